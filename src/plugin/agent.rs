//! Agent file (`agents/*.md`) validation.

use std::path::Path;

use crate::frontmatter;
use crate::issue::{Diagnostic, A001, A002};

/// Frontmatter fields every agent must declare with a non-empty value.
const REQUIRED_FIELDS: &[&str] = &["model", "tools"];

/// Validate an agent `.md` file at the given path.
#[must_use]
pub fn validate_agent(path: &Path) -> Vec<Diagnostic> {
    match super::read_text(path) {
        Ok(text) => validate_agent_text(&text),
        Err(d) => vec![d],
    }
}

/// Validate agent file contents.
///
/// A file without a header block gets exactly one A001 and no field checks.
#[must_use]
pub fn validate_agent_text(text: &str) -> Vec<Diagnostic> {
    let Some(fm) = frontmatter::extract(text) else {
        return vec![Diagnostic::structural(
            A001,
            "missing frontmatter (no `---` header block)",
        )];
    };

    REQUIRED_FIELDS
        .iter()
        .filter_map(|&field| match fm.get(field) {
            None => Some(
                Diagnostic::structural(A002, format!("missing required field `{field}`"))
                    .with_field(field),
            ),
            Some(v) if v.trim().is_empty() => Some(
                Diagnostic::structural(A002, format!("`{field}` must not be empty"))
                    .with_field(field),
            ),
            Some(_) => None,
        })
        .collect()
}
