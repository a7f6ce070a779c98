//! Abstraction over physical move operations.
//!
//! The processor performs all filesystem mutation through the [`FileMover`]
//! trait, so dry-run simulation and tests can substitute an in-memory fake
//! for the real filesystem.

use std::fs;
use std::io;
use std::path::Path;

/// Capability for moving entries and probing their existence.
///
/// All operations fail with an I/O error on permission or OS-level failure;
/// callers treat any such failure as recoverable-and-logged, never fatal to
/// a whole category pass.
pub trait FileMover {
    /// Moves a single file from `source` to `dest`.
    fn move_file(&self, source: &Path, dest: &Path) -> io::Result<()>;

    /// Moves a whole directory from `source` to `dest`.
    fn move_dir(&self, source: &Path, dest: &Path) -> io::Result<()>;

    /// Returns true if a file exists at `path`.
    fn file_exists(&self, path: &Path) -> bool;

    /// Returns true if a directory exists at `path`.
    fn dir_exists(&self, path: &Path) -> bool;
}

/// Production [`FileMover`] backed by `std::fs`.
pub struct FsMover;

impl FileMover for FsMover {
    fn move_file(&self, source: &Path, dest: &Path) -> io::Result<()> {
        fs::rename(source, dest)
    }

    fn move_dir(&self, source: &Path, dest: &Path) -> io::Result<()> {
        fs::rename(source, dest)
    }

    fn file_exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn dir_exists(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_fs_mover_moves_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let src = temp_dir.path().join("a.txt");
        let dest = temp_dir.path().join("b.txt");
        fs::write(&src, "x").expect("Failed to write file");

        let mover = FsMover;
        mover.move_file(&src, &dest).expect("Failed to move file");

        assert!(!src.exists());
        assert!(dest.is_file());
    }

    #[test]
    fn test_fs_mover_moves_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let src = temp_dir.path().join("dir_a");
        fs::create_dir(&src).expect("Failed to create directory");
        fs::write(src.join("inner.txt"), "x").expect("Failed to write file");

        let mover = FsMover;
        let dest = temp_dir.path().join("dir_b");
        mover.move_dir(&src, &dest).expect("Failed to move directory");

        assert!(!src.exists());
        assert!(dest.join("inner.txt").is_file());
    }

    #[test]
    fn test_fs_mover_existence_checks() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let file = temp_dir.path().join("a.txt");
        fs::write(&file, "x").expect("Failed to write file");

        let mover = FsMover;
        assert!(mover.file_exists(&file));
        assert!(!mover.dir_exists(&file));
        assert!(mover.dir_exists(temp_dir.path()));
        assert!(!mover.file_exists(temp_dir.path()));
        assert!(!mover.file_exists(&temp_dir.path().join("missing")));
    }

    #[test]
    fn test_fs_mover_move_missing_file_fails() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let mover = FsMover;
        let result = mover.move_file(
            &temp_dir.path().join("missing.txt"),
            &temp_dir.path().join("dest.txt"),
        );
        assert!(result.is_err());
    }
}
