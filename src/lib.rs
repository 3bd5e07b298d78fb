//! Structural and schema validation for plugin marketplace repositories.
//!
//! A repository keeps its plugins under `plugins/<name>/`. Each validator
//! family discovers those plugins, checks one component kind, and returns a
//! [`ValidationRun`] that the caller renders with [`report`].

pub mod config;
pub mod discovery;
pub mod errors;
pub mod frontmatter;
pub mod issue;
pub mod orchestrator;
pub mod plugin;
pub mod report;
pub mod resolver;
pub mod run;

// Re-export key types at crate root for convenience.
pub use config::Config;
pub use discovery::{discover_plugins, Plugin};
pub use errors::{PlugcheckError, Result};
pub use frontmatter::{Document, Frontmatter};
pub use issue::{Category, Diagnostic, Kind, ValidationIssue};
pub use orchestrator::{run, run_all, Family};
pub use run::ValidationRun;

pub use plugin::{
    validate_agent, validate_command, validate_hooks, validate_manifest, validate_marketplace,
    validate_rule, validate_skill, validate_skill_dir_name,
};
