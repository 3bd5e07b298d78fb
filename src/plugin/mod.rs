//! Schema validators, one per component kind.
//!
//! Validators never fail: unreadable or unparsable input is reported as a
//! [`Diagnostic`] and only the checks that depend on it are skipped.

use std::path::Path;

use crate::issue::{Diagnostic, F001};

pub mod agent;
pub mod command;
pub mod hooks;
pub mod manifest;
pub mod marketplace;
pub mod skill;

pub use agent::{validate_agent, validate_agent_text};
pub use command::{validate_command, validate_rule};
pub use hooks::{validate_hooks, validate_hooks_str, HookDocument, HookReport};
pub use manifest::{validate_manifest, validate_manifest_str};
pub use marketplace::{validate_marketplace, CatalogFinding, CatalogReport};
pub use skill::{validate_skill, validate_skill_dir_name};

/// Read a descriptor as UTF-8 text, or explain why it cannot be read.
pub(crate) fn read_text(path: &Path) -> Result<String, Diagnostic> {
    std::fs::read_to_string(path)
        .map_err(|e| Diagnostic::structural(F001, format!("cannot read file: {e}")))
}
