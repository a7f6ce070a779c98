//! Collision-free destination name resolution.
//!
//! When a move would land on an existing entry, a numeric suffix is appended
//! to the file stem: `a.txt` becomes `a(1).txt`, then `a(2).txt`, and so on.

use std::path::{Path, PathBuf};

/// Splits a file name into stem and extension at the last dot only.
///
/// The extension includes the leading dot; a name without a dot has an empty
/// extension. Compound extensions are not recognized: `archive.tar.gz` splits
/// into `archive.tar` and `.gz`. This is a deliberate simplification, and the
/// resulting collision names (`archive.tar(1).gz`) are intentional.
fn split_file_name(file_name: &str) -> (&str, &str) {
    match file_name.rfind('.') {
        Some(idx) => file_name.split_at(idx),
        None => (file_name, ""),
    }
}

/// Returns a destination path in `dest_dir` that does not collide with any
/// existing file or directory.
///
/// If `dest_dir/file_name` is free it is returned unchanged. Otherwise
/// candidates `stem(1)ext`, `stem(2)ext`, ... are probed in ascending order
/// and the first free one is returned. The filesystem is finite, so a free
/// candidate always exists.
///
/// The check reads filesystem state at call time; it is not safe against
/// concurrent writers racing on the same destination directory.
///
/// # Examples
///
/// ```no_run
/// use sortdir::collision::resolve_collision;
/// use std::path::Path;
///
/// let dest = resolve_collision(Path::new("/downloads/Images"), "photo.jpg");
/// ```
pub fn resolve_collision(dest_dir: &Path, file_name: &str) -> PathBuf {
    let dest = dest_dir.join(file_name);
    if !dest.exists() {
        return dest;
    }

    let (stem, ext) = split_file_name(file_name);
    let mut i = 1u32;
    loop {
        let candidate = dest_dir.join(format!("{}({}){}", stem, i, ext));
        if !candidate.exists() {
            return candidate;
        }
        i += 1;
    }
}
