//! Path and reference resolution: declared paths and symlink targets.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::discovery::{is_real_dir, list_dir};

/// Why a declared path did not resolve.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Unresolved {
    /// Declared paths must be relative to the plugin root.
    #[error("path is absolute")]
    Absolute,
    /// Nothing exists at the resolved location.
    #[error("path does not exist")]
    Missing,
}

/// Resolve `declared` against `base` and check that something exists there.
pub fn resolve_declared(base: &Path, declared: &str) -> Result<PathBuf, Unresolved> {
    let declared = Path::new(declared);
    if declared.is_absolute() {
        return Err(Unresolved::Absolute);
    }
    let resolved = base.join(declared);
    if resolved.exists() {
        Ok(resolved)
    } else {
        Err(Unresolved::Missing)
    }
}

/// A symlink whose recorded target does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokenLink {
    /// The link itself.
    pub link: PathBuf,
    /// Target as recorded in the link, before resolution.
    pub target: PathBuf,
}

/// Returns `true` if the path is a symlink (without following it).
#[must_use]
pub fn is_symlink(path: &Path) -> bool {
    path.symlink_metadata()
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false)
}

/// Where a link's recorded target points, relative targets taken from the
/// link's own directory.
#[must_use]
pub fn link_destination(link: &Path, target: &Path) -> PathBuf {
    if target.is_absolute() {
        target.to_path_buf()
    } else {
        link.parent().unwrap_or(Path::new(".")).join(target)
    }
}

/// Find broken symlinks in `dir` and one level into its subdirectories.
///
/// Every link found is counted in the second return value. Symlinked
/// directories are checked as links, never descended into.
#[must_use]
pub fn find_broken_symlinks(dir: &Path) -> (Vec<BrokenLink>, usize) {
    let mut broken = Vec::new();
    let mut seen = 0;
    let Some(entries) = list_dir(dir) else {
        return (broken, seen);
    };
    for path in entries {
        if is_symlink(&path) {
            seen += 1;
            broken.extend(check_link(&path));
        } else if is_real_dir(&path) {
            for nested in list_dir(&path).unwrap_or_default() {
                if is_symlink(&nested) {
                    seen += 1;
                    broken.extend(check_link(&nested));
                }
            }
        }
    }
    broken.sort_by(|a, b| a.link.cmp(&b.link));
    (broken, seen)
}

fn check_link(link: &Path) -> Option<BrokenLink> {
    let target = match std::fs::read_link(link) {
        Ok(t) => t,
        Err(e) => {
            warn!(link = %link.display(), error = %e, "cannot read symlink");
            return None;
        }
    };
    let destination = link_destination(link, &target);
    debug!(link = %link.display(), target = %target.display(), "checking symlink");
    if destination.exists() {
        None
    } else {
        Some(BrokenLink {
            link: link.to_path_buf(),
            target,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn resolves_existing_relative_path() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("agents")).unwrap();
        let resolved = resolve_declared(dir.path(), "./agents").unwrap();
        assert!(resolved.ends_with("agents"));
    }

    #[test]
    fn missing_path_is_unresolved() {
        let dir = tempdir().unwrap();
        assert_eq!(
            resolve_declared(dir.path(), "./nope"),
            Err(Unresolved::Missing)
        );
    }

    #[test]
    fn absolute_path_is_rejected() {
        let dir = tempdir().unwrap();
        assert_eq!(
            resolve_declared(dir.path(), "/usr/share"),
            Err(Unresolved::Absolute)
        );
    }

    #[test]
    fn relative_target_resolves_against_link_dir() {
        let dest = link_destination(Path::new("/p/commands/x.md"), Path::new("../shared/x.md"));
        assert_eq!(dest, PathBuf::from("/p/commands/../shared/x.md"));
    }

    #[test]
    fn missing_dir_has_no_links() {
        let (broken, seen) = find_broken_symlinks(Path::new("/nonexistent/agents"));
        assert!(broken.is_empty());
        assert_eq!(seen, 0);
    }

    #[cfg(unix)]
    #[test]
    fn finds_broken_link_with_recorded_target() {
        let dir = tempdir().unwrap();
        std::os::unix::fs::symlink("../missing.md", dir.path().join("gone.md")).unwrap();
        let (broken, seen) = find_broken_symlinks(dir.path());
        assert_eq!(seen, 1);
        assert_eq!(broken.len(), 1);
        assert_eq!(broken[0].target, PathBuf::from("../missing.md"));
        assert!(broken[0].link.ends_with("gone.md"));
    }

    #[cfg(unix)]
    #[test]
    fn valid_link_is_not_reported() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("real.md"), "x").unwrap();
        std::os::unix::fs::symlink("real.md", dir.path().join("alias.md")).unwrap();
        let (broken, seen) = find_broken_symlinks(dir.path());
        assert!(broken.is_empty());
        assert_eq!(seen, 1);
    }

    #[cfg(unix)]
    #[test]
    fn checks_one_level_of_subdirectories() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("group/deeper")).unwrap();
        std::os::unix::fs::symlink("nowhere.md", dir.path().join("group/a.md")).unwrap();
        std::os::unix::fs::symlink("nowhere.md", dir.path().join("group/deeper/b.md")).unwrap();
        let (broken, _) = find_broken_symlinks(dir.path());
        assert_eq!(broken.len(), 1);
        assert!(broken[0].link.ends_with("group/a.md"));
    }
}
