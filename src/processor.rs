//! Category processing engine.
//!
//! This module runs the two passes of an organization run: one categorizer
//! pass per declared category ([`CategoryProcessor::process_category`]) and a
//! single normalization pass across all of them
//! ([`CategoryProcessor::normalize_categories`]). All filesystem mutation
//! goes through the [`FileMover`] capability, so both passes can run in
//! dry-run mode or against a fake mover in tests.

use crate::category::Category;
use crate::collision::resolve_collision;
use crate::logger::{FileLogger, LogLevel};
use crate::mover::FileMover;
use crate::progress::ProgressReporter;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Directory extension marking a packaged application bundle.
const APP_BUNDLE_EXT: &str = "app";

/// Errors that abort a whole pass.
///
/// Per-entry move failures are never represented here: they are logged and
/// the pass continues. Only failures to create or enumerate the directories
/// the pass operates on are fatal to it.
#[derive(Debug)]
pub enum ProcessError {
    /// Failed to create a category destination directory.
    DirectoryCreationFailed {
        path: PathBuf,
        source: io::Error,
    },
    /// Failed to enumerate a directory.
    DirectoryReadFailed {
        path: PathBuf,
        source: io::Error,
    },
}

impl std::fmt::Display for ProcessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DirectoryCreationFailed { path, source } => {
                write!(
                    f,
                    "Failed to create directory {}: {}",
                    path.display(),
                    source
                )
            }
            Self::DirectoryReadFailed { path, source } => {
                write!(f, "Failed to read directory {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ProcessError {}

/// Result type for category processing passes.
pub type ProcessResult<T> = Result<T, ProcessError>;

/// Returns true if `file_path` lies inside an application bundle located
/// under `category_root`.
///
/// Walks the parent chain upward while the directory still has
/// `category_root` as a case-insensitive path prefix; the first directory
/// carrying the bundle marker extension answers true. Leaving the subtree
/// without finding one answers false, so bundles outside the category root
/// are ignored.
pub fn is_inside_app_bundle(file_path: &Path, category_root: &Path) -> bool {
    let mut dir = file_path.parent();
    while let Some(d) = dir {
        if !path_starts_with_ci(d, category_root) {
            break;
        }
        if d.extension()
            .is_some_and(|e| e.to_string_lossy().eq_ignore_ascii_case(APP_BUNDLE_EXT))
        {
            return true;
        }
        dir = d.parent();
    }
    false
}

/// Case-insensitive path prefix test on the textual form of the paths.
fn path_starts_with_ci(dir: &Path, root: &Path) -> bool {
    dir.to_string_lossy()
        .to_lowercase()
        .starts_with(&root.to_string_lossy().to_lowercase())
}

fn paths_equal_ci(a: &Path, b: &Path) -> bool {
    a.to_string_lossy().eq_ignore_ascii_case(&b.to_string_lossy())
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Runs categorizer and normalizer passes over a source directory.
///
/// Single-threaded and synchronous: moves happen sequentially, and logging
/// and progress callbacks are invoked inline with the move loop. Both
/// collaborators are optional; absence short-circuits silently.
pub struct CategoryProcessor<'a> {
    mover: &'a dyn FileMover,
    logger: Option<&'a dyn FileLogger>,
}

impl<'a> CategoryProcessor<'a> {
    pub fn new(mover: &'a dyn FileMover) -> Self {
        Self {
            mover,
            logger: None,
        }
    }

    pub fn with_logger(mut self, logger: &'a dyn FileLogger) -> Self {
        self.logger = Some(logger);
        self
    }

    fn log(&self, message: &str, level: LogLevel, category: Option<&str>) {
        if let Some(logger) = self.logger {
            logger.log(message, level, category);
        }
    }

    fn report(
        progress: Option<&dyn ProgressReporter>,
        category: &str,
        current: usize,
        total: usize,
    ) {
        if let Some(p) = progress {
            p.report(category, current, total);
        }
    }

    /// Executes one category pass over the immediate entries of `src_dir`.
    ///
    /// Creates `src_dir/<name>` if absent, moves every matching entry into it
    /// (resolving name collisions), then — if the category flattens — pulls
    /// matching files out of any subdirectory of the destination back up to
    /// its root. Under dry-run nothing is touched; each candidate is logged
    /// at DryRun level instead, and still counted.
    ///
    /// A failure moving a single entry is logged at Error level with the
    /// category tag and the pass continues; only failing to create or read
    /// the directories themselves aborts.
    ///
    /// Returns the number of entries processed across both phases.
    pub fn process_category(
        &self,
        src_dir: &Path,
        category: &Category,
        dry_run: bool,
        progress: Option<&dyn ProgressReporter>,
    ) -> ProcessResult<usize> {
        let name = category.name.as_str();
        let dest_dir = src_dir.join(name);
        fs::create_dir_all(&dest_dir).map_err(|e| ProcessError::DirectoryCreationFailed {
            path: dest_dir.clone(),
            source: e,
        })?;

        let entries = list_entries(src_dir, category.include_dirs)?;

        // The initial total is fixed before any move and never revised by
        // the main phase, so consumers see a stable denominator.
        let initial_total = entries.iter().filter(|e| category.matches(e)).count();
        Self::report(progress, name, 0, initial_total);

        let mut moved = 0usize;
        for entry in &entries {
            if !category.matches(entry) {
                continue;
            }

            let entry_name = file_name_of(entry);
            let dest = resolve_collision(&dest_dir, &entry_name);
            let dest_name = file_name_of(&dest);

            if dry_run {
                self.log(
                    &format!("{} -> {}/{}", entry_name, name, dest_name),
                    LogLevel::DryRun,
                    Some(name),
                );
            } else {
                let result = if self.mover.dir_exists(entry) {
                    self.mover.move_dir(entry, &dest)
                } else {
                    self.mover.move_file(entry, &dest)
                };
                match result {
                    Ok(()) => self.log(
                        &format!("{} -> {}/{}", entry_name, name, dest_name),
                        LogLevel::Info,
                        Some(name),
                    ),
                    Err(e) => {
                        self.log(
                            &format!("Failed to move {}: {}", entry.display(), e),
                            LogLevel::Error,
                            Some(name),
                        );
                        continue;
                    }
                }
            }

            moved += 1;
            Self::report(progress, name, moved, initial_total);
        }

        if category.flatten && dest_dir.is_dir() {
            moved += self.flatten_into_root(&dest_dir, category, dry_run, moved, initial_total, progress)?;
        }

        Ok(moved)
    }

    /// Flatten phase: moves matching files out of every subdirectory of
    /// `dest_dir` up into `dest_dir` itself.
    ///
    /// The progress total is recomputed once (`initial_total` plus the count
    /// of nested matches) before any flatten move, so the denominator is only
    /// ever revised upward.
    fn flatten_into_root(
        &self,
        dest_dir: &Path,
        category: &Category,
        dry_run: bool,
        already_moved: usize,
        initial_total: usize,
        progress: Option<&dyn ProgressReporter>,
    ) -> ProcessResult<usize> {
        let name = category.name.as_str();
        let subdirs = subdirs_recursive(dest_dir)?;

        let mut flatten_matches = 0usize;
        let mut per_subdir_files = Vec::with_capacity(subdirs.len());
        for sub in &subdirs {
            let files = files_in(sub)?;
            flatten_matches += files.iter().filter(|f| category.matches(f)).count();
            per_subdir_files.push(files);
        }

        let total = initial_total + flatten_matches;
        let mut moved = already_moved;
        Self::report(progress, name, moved, total);

        for files in per_subdir_files {
            for f in files {
                if !category.matches(&f) {
                    continue;
                }

                let entry_name = file_name_of(&f);
                // Collisions are resolved against the category root, not the
                // subdirectory the file currently lives in.
                let dest = resolve_collision(dest_dir, &entry_name);
                let dest_name = file_name_of(&dest);

                if dry_run {
                    self.log(
                        &format!("{} -> {}/{}", entry_name, name, dest_name),
                        LogLevel::DryRun,
                        Some(name),
                    );
                } else {
                    match self.mover.move_file(&f, &dest) {
                        Ok(()) => self.log(
                            &format!("{} -> {}/{}", entry_name, name, dest_name),
                            LogLevel::Info,
                            Some(name),
                        ),
                        Err(e) => {
                            self.log(
                                &format!("Failed to move {}: {}", f.display(), e),
                                LogLevel::Error,
                                Some(name),
                            );
                            continue;
                        }
                    }
                }

                moved += 1;
                Self::report(progress, name, moved, total);
            }
        }

        Ok(moved - already_moved)
    }

    /// Re-evaluates every file already inside category directories against
    /// all categories, first declared match wins.
    ///
    /// A file whose first match is a different category is relocated there; a
    /// file matched by its current flattening category but nested below the
    /// root is flattened in place; anything unmatched, or inside a detected
    /// application bundle, stays put. A category with no directory yet is
    /// silently skipped. Per-file failures are logged and never stop the
    /// remaining files.
    pub fn normalize_categories(
        &self,
        src_dir: &Path,
        categories: &[Category],
        dry_run: bool,
        progress: Option<&dyn ProgressReporter>,
    ) -> ProcessResult<()> {
        for cat in categories {
            let cat_dir = src_dir.join(&cat.name);
            if !cat_dir.is_dir() {
                continue;
            }

            let files = files_recursive(&cat_dir)?;
            let total = files.len();
            let mut current = 0usize;
            Self::report(progress, &cat.name, current, total);

            for f in &files {
                match self.normalize_file(src_dir, f, cat, &cat_dir, categories, dry_run) {
                    Ok(false) => continue,
                    Ok(true) => {}
                    Err(e) => {
                        self.log(
                            &format!("Failed to normalize {}: {}", f.display(), e),
                            LogLevel::Error,
                            None,
                        );
                    }
                }
                current += 1;
                Self::report(progress, &cat.name, current, total);
            }
        }
        Ok(())
    }

    /// Handles one file during normalization. Returns Ok(false) when the file
    /// was skipped or handled by the same-category flatten shortcut, Ok(true)
    /// when it fell through to a cross-category relocation.
    fn normalize_file(
        &self,
        src_dir: &Path,
        f: &Path,
        cat: &Category,
        cat_dir: &Path,
        categories: &[Category],
        dry_run: bool,
    ) -> io::Result<bool> {
        if is_inside_app_bundle(f, cat_dir) {
            return Ok(false);
        }

        let Some(target) = categories.iter().find(|c| c.matches(f)) else {
            return Ok(false);
        };

        let file_name = file_name_of(f);

        if target.name.eq_ignore_ascii_case(&cat.name) {
            if cat.flatten {
                let dest = resolve_collision(cat_dir, &file_name);
                let dest_name = file_name_of(&dest);
                let in_root = f.parent().is_some_and(|p| paths_equal_ci(p, cat_dir));
                if !in_root {
                    if dry_run {
                        self.log(
                            &format!("{} -> {}/{}", file_name, cat.name, dest_name),
                            LogLevel::DryRun,
                            Some(&cat.name),
                        );
                    } else {
                        self.mover.move_file(f, &dest)?;
                        self.log(
                            &format!(
                                "Flattened: {} -> {}/{}",
                                file_name, cat.name, dest_name
                            ),
                            LogLevel::Info,
                            Some(&cat.name),
                        );
                    }
                }
            }
            return Ok(false);
        }

        let target_dir = src_dir.join(&target.name);
        fs::create_dir_all(&target_dir)?;
        let dest = resolve_collision(&target_dir, &file_name);
        let dest_name = file_name_of(&dest);
        if dry_run {
            self.log(
                &format!("{} -> {}/{}", file_name, target.name, dest_name),
                LogLevel::DryRun,
                Some(&target.name),
            );
        } else {
            self.mover.move_file(f, &dest)?;
            self.log(
                &format!("Relocated: {} -> {}/{}", file_name, target.name, dest_name),
                LogLevel::Info,
                Some(&target.name),
            );
        }
        Ok(true)
    }
}

fn read_dir_mapped(dir: &Path) -> ProcessResult<fs::ReadDir> {
    fs::read_dir(dir).map_err(|e| ProcessError::DirectoryReadFailed {
        path: dir.to_path_buf(),
        source: e,
    })
}

/// Lists immediate entries of `dir`: files only, or files and directories
/// when `include_dirs` is set.
fn list_entries(dir: &Path, include_dirs: bool) -> ProcessResult<Vec<PathBuf>> {
    let mut entries = Vec::new();
    for entry in read_dir_mapped(dir)? {
        let entry = entry.map_err(|e| ProcessError::DirectoryReadFailed {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if path.is_file() || (include_dirs && path.is_dir()) {
            entries.push(path);
        }
    }
    Ok(entries)
}

/// Immediate files of `dir`.
fn files_in(dir: &Path) -> ProcessResult<Vec<PathBuf>> {
    list_entries(dir, false)
}

/// All directories nested at any depth under `dir`, parents before children.
fn subdirs_recursive(dir: &Path) -> ProcessResult<Vec<PathBuf>> {
    let mut out = Vec::new();
    collect_subdirs(dir, &mut out)?;
    Ok(out)
}

fn collect_subdirs(dir: &Path, out: &mut Vec<PathBuf>) -> ProcessResult<()> {
    for entry in read_dir_mapped(dir)? {
        let entry = entry.map_err(|e| ProcessError::DirectoryReadFailed {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if path.is_dir() {
            out.push(path.clone());
            collect_subdirs(&path, out)?;
        }
    }
    Ok(())
}

/// All files nested at any depth under `dir`.
fn files_recursive(dir: &Path) -> ProcessResult<Vec<PathBuf>> {
    let mut out = files_in(dir)?;
    for sub in subdirs_recursive(dir)? {
        out.extend(files_in(&sub)?);
    }
    Ok(out)
}
