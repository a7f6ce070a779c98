//! Category declarations and the built-in category set.
//!
//! A category pairs a directory name with a matching predicate and two flags:
//! whether directories are candidates too, and whether nested files should be
//! flattened back into the category root. The order of a category list is
//! significant: during normalization the first matching category wins.

use std::path::Path;

/// Predicate deciding whether a path belongs to a category.
pub type Matcher = Box<dyn Fn(&Path) -> bool>;

/// A named file category.
///
/// Identity is the name; a category is immutable once constructed and lives
/// for one run of the tool.
pub struct Category {
    /// Directory name for this category under the source directory.
    pub name: String,
    matcher: Matcher,
    /// Whether directories (not only files) are move candidates.
    pub include_dirs: bool,
    /// Whether nested files should be flattened into the category root.
    pub flatten: bool,
}

impl Category {
    /// Creates a category from a name, a matching predicate and its flags.
    pub fn new(
        name: impl Into<String>,
        matcher: impl Fn(&Path) -> bool + 'static,
        include_dirs: bool,
        flatten: bool,
    ) -> Self {
        Self {
            name: name.into(),
            matcher: Box::new(matcher),
            include_dirs,
            flatten,
        }
    }

    /// Tests whether `path` belongs to this category.
    pub fn matches(&self, path: &Path) -> bool {
        (self.matcher)(path)
    }
}

impl std::fmt::Debug for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Category")
            .field("name", &self.name)
            .field("include_dirs", &self.include_dirs)
            .field("flatten", &self.flatten)
            .finish_non_exhaustive()
    }
}

/// Returns the last extension of `path`, lowercased, without the dot.
fn extension_lower(path: &Path) -> Option<String> {
    path.extension().map(|e| e.to_string_lossy().to_lowercase())
}

/// Tests whether the path's extension is in `exts` (case-insensitive).
///
/// `exts` entries are expected without a leading dot.
pub fn has_extension(path: &Path, exts: &[&str]) -> bool {
    match extension_lower(path) {
        Some(ext) => exts.iter().any(|e| e.eq_ignore_ascii_case(&ext)),
        None => false,
    }
}

/// Tests whether a path looks like an archive.
///
/// Compound tarball suffixes (`.tar.gz`, `.tar.bz2`, `.tar.xz`) always match
/// regardless of `archive_exts`; anything else matches on its last extension.
pub fn is_archive(path: &Path, archive_exts: &[&str]) -> bool {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    if name.ends_with(".tar.gz") || name.ends_with(".tar.bz2") || name.ends_with(".tar.xz") {
        return true;
    }
    has_extension(path, archive_exts)
}

const IMAGE_EXTS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "bmp", "svg", "webp", "tif", "tiff",
];
const DOC_EXTS: &[&str] = &[
    "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "txt", "rtf", "odt", "csv",
];
const ARCHIVE_EXTS: &[&str] = &["zip", "rar", "7z", "tar", "gz", "tgz", "bz2", "xz"];
const APP_EXTS: &[&str] = &["app", "dmg", "pkg", "exe", "msi", "apk", "deb", "rpm"];

/// Returns the built-in category list, in declaration order.
///
/// Apps is the only category that takes directories as candidates (macOS
/// `.app` bundles are directories) and the only one that does not flatten.
pub fn default_categories() -> Vec<Category> {
    vec![
        Category::new("Images", |p: &Path| has_extension(p, IMAGE_EXTS), false, true),
        Category::new("Documents", |p: &Path| has_extension(p, DOC_EXTS), false, true),
        Category::new("Archives", |p: &Path| is_archive(p, ARCHIVE_EXTS), false, true),
        Category::new("Apps", |p: &Path| has_extension(p, APP_EXTS), true, false),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_extension_case_insensitive() {
        assert!(has_extension(Path::new("photo.PNG"), &["png"]));
        assert!(has_extension(Path::new("photo.png"), &["PNG"]));
        assert!(!has_extension(Path::new("photo.png"), &["jpg"]));
        assert!(!has_extension(Path::new("README"), &["png"]));
    }

    #[test]
    fn test_is_archive_compound_suffixes() {
        assert!(is_archive(Path::new("file.tar.gz"), &["zip"]));
        assert!(is_archive(Path::new("file.TAR.GZ"), &["zip"]));
        assert!(is_archive(Path::new("file.tar.bz2"), &["bz2"]));
        assert!(is_archive(Path::new("file.tar.xz"), &["xz"]));
        assert!(is_archive(Path::new("compound.name.tar.gz"), &["gz"]));
    }

    #[test]
    fn test_is_archive_plain_extensions() {
        assert!(is_archive(Path::new("file.zip"), &["zip"]));
        assert!(is_archive(Path::new("bundle.gz"), &["gz"]));
        assert!(!is_archive(Path::new("file.txt"), &["zip"]));
    }

    #[test]
    fn test_default_categories_order_and_flags() {
        let cats = default_categories();
        let names: Vec<_> = cats.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Images", "Documents", "Archives", "Apps"]);

        let apps = &cats[3];
        assert!(apps.include_dirs);
        assert!(!apps.flatten);
        assert!(cats[0].flatten);
        assert!(!cats[0].include_dirs);
    }

    #[test]
    fn test_default_categories_matching() {
        let cats = default_categories();
        assert!(cats[0].matches(Path::new("pic.jpeg")));
        assert!(cats[1].matches(Path::new("report.pdf")));
        assert!(cats[2].matches(Path::new("data.tar.gz")));
        assert!(cats[3].matches(Path::new("Install.dmg")));
        assert!(!cats[0].matches(Path::new("notes.txt")));
    }

    #[test]
    fn test_first_match_wins_lookup() {
        // csv is a Documents extension; a later category claiming it as well
        // must lose during an ordered first-match scan.
        let cats = vec![
            Category::new(
                "Documents",
                |p: &Path| has_extension(p, &["csv", "txt"]),
                false,
                true,
            ),
            Category::new("Data", |p: &Path| has_extension(p, &["csv"]), false, true),
        ];
        let path = Path::new("table.csv");
        let first = cats.iter().find(|c| c.matches(path)).expect("no match");
        assert_eq!(first.name, "Documents");
    }
}
