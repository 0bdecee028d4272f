//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Normalize a file system path to absolute form.
///
/// Tries `canonicalize()` first (resolves symlinks, `.`, `..`).
/// Falls back to:
/// - Return as-is if already absolute
/// - Join with current directory if relative
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// Resolve a configured directory against the config file's directory.
///
/// `~` is expanded first; absolute paths are kept as they are. The result
/// is not required to exist.
///
/// # Examples
/// ```ignore
/// resolve_dir(Path::new("out"), Path::new("/srv/site"))       -> "/srv/site/out"
/// resolve_dir(Path::new("/var/www"), Path::new("/srv/site"))  -> "/var/www"
/// resolve_dir(Path::new("~/links"), Path::new("/srv/site"))   -> "$HOME/links"
/// ```
pub fn resolve_dir(dir: &Path, root: &Path) -> PathBuf {
    let expanded = shellexpand::tilde(&dir.to_string_lossy()).into_owned();
    let path = PathBuf::from(expanded);
    if path.is_relative() {
        root.join(path)
    } else {
        path
    }
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_dir_relative() {
        assert_eq!(
            resolve_dir(Path::new("out"), Path::new("/srv/site")),
            PathBuf::from("/srv/site/out")
        );
        assert_eq!(
            resolve_dir(Path::new("./out/links"), Path::new("/srv/site")),
            PathBuf::from("/srv/site/./out/links")
        );
    }

    #[test]
    fn test_resolve_dir_absolute() {
        assert_eq!(
            resolve_dir(Path::new("/var/www"), Path::new("/srv/site")),
            PathBuf::from("/var/www")
        );
    }

    #[test]
    fn test_resolve_dir_no_tilde_untouched() {
        // Only a leading `~` is expanded
        assert_eq!(
            resolve_dir(Path::new("a~b"), Path::new("/root")),
            PathBuf::from("/root/a~b")
        );
    }

    #[test]
    fn test_normalize_path_relative_becomes_absolute() {
        let normalized = normalize_path(Path::new("does-not-exist.toml"));
        assert!(normalized.is_absolute());
        assert!(normalized.ends_with("does-not-exist.toml"));
    }
}
