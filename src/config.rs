//! Run configuration.
//!
//! There are no flags or environment variables: a run is fully determined by
//! the repository root it is pointed at. Validation policy (deny-lists,
//! enumerations, limits) is compiled in next to each validator.

use std::path::{Path, PathBuf};

use crate::errors::Result;

/// Directory under the repository root that holds one directory per plugin.
pub const PLUGINS_DIR: &str = "plugins";

/// Per-plugin (and repository-level) metadata directory.
pub const METADATA_DIR: &str = ".claude-plugin";

/// Manifest file name inside [`METADATA_DIR`].
pub const MANIFEST_FILE: &str = "plugin.json";

/// Marketplace catalog file name inside the repository's [`METADATA_DIR`].
pub const MARKETPLACE_FILE: &str = "marketplace.json";

/// Where a validation run looks for plugins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Repository root; plugins live under `root/plugins`.
    pub root: PathBuf,
}

impl Config {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Configuration rooted at the process working directory.
    pub fn from_current_dir() -> Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }

    #[must_use]
    pub fn plugins_dir(&self) -> PathBuf {
        self.root.join(PLUGINS_DIR)
    }

    #[must_use]
    pub fn marketplace_path(&self) -> PathBuf {
        self.root.join(METADATA_DIR).join(MARKETPLACE_FILE)
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}
