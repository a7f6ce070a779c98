//! Best-effort resolution of well-known user folders.
//!
//! Used by the CLI shortcuts `-d` (Downloads) and `-m` (Documents). This is
//! deliberately thin: look under the platform home directory and answer
//! `None` when the expected folder is absent.

use std::path::PathBuf;

/// Well-known user folders the CLI can organize directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnownFolder {
    Downloads,
    Documents,
}

impl KnownFolder {
    fn dir_name(&self) -> &'static str {
        match self {
            KnownFolder::Downloads => "Downloads",
            KnownFolder::Documents => "Documents",
        }
    }
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}

/// Returns the path of the known folder if it exists on disk.
pub fn known_folder_path(folder: KnownFolder) -> Option<PathBuf> {
    let candidate = home_dir()?.join(folder.dir_name());
    candidate.is_dir().then_some(candidate)
}

/// Expands a leading `~` or `~/` to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = home_dir() {
            return home;
        }
    } else if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_tilde_plain_path_unchanged() {
        assert_eq!(expand_tilde("/tmp/x"), PathBuf::from("/tmp/x"));
        assert_eq!(expand_tilde("relative/x"), PathBuf::from("relative/x"));
    }

    #[test]
    fn test_expand_tilde_prefix() {
        if let Some(home) = home_dir() {
            assert_eq!(expand_tilde("~"), home.clone());
            assert_eq!(expand_tilde("~/Downloads"), home.join("Downloads"));
        }
    }

    #[test]
    fn test_known_folder_missing_returns_none() {
        // A folder name lookup never panics regardless of environment.
        let _ = known_folder_path(KnownFolder::Downloads);
        let _ = known_folder_path(KnownFolder::Documents);
    }
}
