//! Plugin and component discovery.
//!
//! Enumeration order follows the filesystem and is then sorted by path, so
//! output is stable, but callers must not rely on any particular order.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::{Config, MANIFEST_FILE, METADATA_DIR};
use crate::errors::{PlugcheckError, Result};

/// A plugin directory under `plugins/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plugin {
    /// Directory name, which the manifest `name` must equal.
    pub name: String,
    /// Plugin root directory.
    pub root: PathBuf,
}

impl Plugin {
    #[must_use]
    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(METADATA_DIR).join(MANIFEST_FILE)
    }

    #[must_use]
    pub fn agents_dir(&self) -> PathBuf {
        self.root.join("agents")
    }

    #[must_use]
    pub fn commands_dir(&self) -> PathBuf {
        self.root.join("commands")
    }

    #[must_use]
    pub fn rules_dir(&self) -> PathBuf {
        self.root.join("rules")
    }

    #[must_use]
    pub fn skills_dir(&self) -> PathBuf {
        self.root.join("skills")
    }

    #[must_use]
    pub fn hooks_dir(&self) -> PathBuf {
        self.root.join("hooks")
    }

    #[must_use]
    pub fn hooks_path(&self) -> PathBuf {
        self.hooks_dir().join("hooks.json")
    }

    /// Component directories the symlink checker walks.
    #[must_use]
    pub fn component_dirs(&self) -> [PathBuf; 5] {
        [
            self.agents_dir(),
            self.commands_dir(),
            self.rules_dir(),
            self.skills_dir(),
            self.hooks_dir(),
        ]
    }
}

/// Enumerate plugin directories under `root/plugins`.
///
/// Hidden directories are skipped. Fails only when the plugins directory
/// itself is missing or unreadable.
pub fn discover_plugins(config: &Config) -> Result<Vec<Plugin>> {
    let dir = config.plugins_dir();
    if !dir.is_dir() {
        return Err(PlugcheckError::MissingPluginsDir { path: dir });
    }
    let entries = std::fs::read_dir(&dir).map_err(|source| PlugcheckError::ReadDir {
        path: dir.clone(),
        source,
    })?;

    let mut plugins = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "skipping unreadable entry");
                continue;
            }
        };
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') || !path.is_dir() {
            continue;
        }
        debug!(plugin = %name, "discovered plugin");
        plugins.push(Plugin { name, root: path });
    }
    plugins.sort_by(|a, b| a.root.cmp(&b.root));
    Ok(plugins)
}

/// Collect `.md` files in `dir`, recursing into subdirectories when asked.
///
/// Entries that are not files (directories when not recursing, broken
/// symlinks, sockets) are skipped without error. A missing `dir` yields
/// nothing. Symlinked directories are not followed.
#[must_use]
pub fn markdown_files(dir: &Path, recursive: bool) -> Vec<PathBuf> {
    let mut files = Vec::new();
    collect_markdown(dir, recursive, &mut files);
    files.sort();
    files
}

fn collect_markdown(dir: &Path, recursive: bool, out: &mut Vec<PathBuf>) {
    let Some(entries) = list_dir(dir) else {
        return;
    };
    for path in entries {
        if is_real_dir(&path) {
            if recursive {
                collect_markdown(&path, recursive, out);
            }
        } else if path.is_file() && path.extension().is_some_and(|e| e == "md") {
            out.push(path);
        }
    }
}

/// Subdirectories of a plugin's `skills/` directory.
///
/// Plain files next to the skill directories are ignored.
#[must_use]
pub fn skill_dirs(skills_root: &Path) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = list_dir(skills_root)
        .unwrap_or_default()
        .into_iter()
        .filter(|p| p.is_dir())
        .collect();
    dirs.sort();
    dirs
}

/// List a directory's entries; `None` when it does not exist or cannot be read.
pub(crate) fn list_dir(dir: &Path) -> Option<Vec<PathBuf>> {
    if !dir.is_dir() {
        return None;
    }
    match std::fs::read_dir(dir) {
        Ok(entries) => Some(
            entries
                .filter_map(|e| match e {
                    Ok(e) => Some(e.path()),
                    Err(err) => {
                        warn!(dir = %dir.display(), error = %err, "skipping unreadable entry");
                        None
                    }
                })
                .collect(),
        ),
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "cannot read directory");
            None
        }
    }
}

/// Returns `true` for a directory that is not reached through a symlink.
pub(crate) fn is_real_dir(path: &Path) -> bool {
    path.symlink_metadata()
        .map(|m| m.file_type().is_dir())
        .unwrap_or(false)
}

/// Path of `path` relative to `base`, `/`-separated, for report locations.
#[must_use]
pub fn relative_label(base: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(base).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn discovers_plugin_directories_only() {
        let dir = tempdir().unwrap();
        let plugins = dir.path().join("plugins");
        fs::create_dir_all(plugins.join("alpha")).unwrap();
        fs::create_dir_all(plugins.join("beta")).unwrap();
        fs::create_dir_all(plugins.join(".hidden")).unwrap();
        fs::write(plugins.join("README.md"), "not a plugin").unwrap();

        let found = discover_plugins(&Config::new(dir.path())).unwrap();
        let names: Vec<_> = found.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "beta"]);
    }

    #[test]
    fn missing_plugins_dir_is_an_error() {
        let dir = tempdir().unwrap();
        let err = discover_plugins(&Config::new(dir.path())).unwrap_err();
        assert!(matches!(err, PlugcheckError::MissingPluginsDir { .. }));
    }

    #[test]
    fn markdown_files_flat_ignores_subdirectories() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.md"), "x").unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();
        fs::create_dir(dir.path().join("group")).unwrap();
        fs::write(dir.path().join("group/b.md"), "x").unwrap();

        let files = markdown_files(dir.path(), false);
        assert_eq!(files, vec![dir.path().join("a.md")]);
    }

    #[test]
    fn markdown_files_recursive_descends() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("deep/er")).unwrap();
        fs::write(dir.path().join("a.md"), "x").unwrap();
        fs::write(dir.path().join("deep/er/b.md"), "x").unwrap();

        let files = markdown_files(dir.path(), true);
        assert_eq!(files.len(), 2);
        assert!(files.contains(&dir.path().join("deep/er/b.md")));
    }

    #[test]
    fn markdown_files_missing_dir_is_empty() {
        assert!(markdown_files(Path::new("/nonexistent/commands"), true).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn markdown_files_skips_broken_symlinks() {
        let dir = tempdir().unwrap();
        std::os::unix::fs::symlink("missing.md", dir.path().join("dangling.md")).unwrap();
        fs::write(dir.path().join("real.md"), "x").unwrap();

        let files = markdown_files(dir.path(), true);
        assert_eq!(files, vec![dir.path().join("real.md")]);
    }

    #[test]
    fn skill_dirs_ignores_files() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("my-skill")).unwrap();
        fs::write(dir.path().join("stray.md"), "x").unwrap();
        assert_eq!(skill_dirs(dir.path()), vec![dir.path().join("my-skill")]);
    }

    #[test]
    fn relative_label_uses_forward_slashes() {
        let base = Path::new("/p/commands");
        let path = base.join("group").join("run.md");
        assert_eq!(relative_label(base, &path), "group/run.md");
    }
}
