//! Plugin manifest (`.claude-plugin/plugin.json`) validation.

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::discovery::Plugin;
use crate::issue::{Category, Diagnostic, M001, M002, M003, M004, M005, M006, M007, M008};
use crate::resolver::{resolve_declared, Unresolved};

/// Fields every manifest must carry as non-empty strings.
const REQUIRED_FIELDS: &[&str] = &["name", "version", "description", "license"];

/// Boilerplate from the plugin template that must be replaced before publishing.
const PLACEHOLDERS: &[&str] = &[
    "REPLACE_ME",
    "TODO:",
    "[PLUGIN_NAME]",
    "[DESCRIPTION]",
    "Your Name",
    "your-email@example.com",
    "https://github.com/your-org",
    "A brief description of your plugin",
];

/// Manifest fields that declare paths relative to the plugin root.
const PATH_FIELDS: &[&str] = &[
    "agents",
    "skills",
    "commands",
    "rules",
    "hooks",
    "mcpServers",
    "outputStyles",
    "lspServers",
];

/// Path fields that may instead carry inline configuration.
const INLINE_CAPABLE: &[&str] = &["hooks", "mcpServers", "lspServers"];

/// Shape of a declared path field.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DeclaredPaths {
    /// `"agents": "./agents"`
    Single(String),
    /// `"agents": ["./agents", "./extra"]`
    Many(Vec<String>),
    /// `"hooks": { "PreToolUse": [...] }`
    Inline(serde_json::Map<String, Value>),
}

impl DeclaredPaths {
    fn paths(&self) -> Vec<&str> {
        match self {
            DeclaredPaths::Single(p) => vec![p.as_str()],
            DeclaredPaths::Many(ps) => ps.iter().map(String::as_str).collect(),
            DeclaredPaths::Inline(_) => Vec::new(),
        }
    }
}

/// Validate a plugin's manifest file.
#[must_use]
pub fn validate_manifest(plugin: &Plugin) -> Vec<Diagnostic> {
    let path = plugin.manifest_path();
    if !path.is_file() {
        return vec![Diagnostic::structural(
            M001,
            "missing manifest .claude-plugin/plugin.json",
        )];
    }
    match super::read_text(&path) {
        Ok(content) => validate_manifest_str(&content, &plugin.root, &plugin.name),
        Err(d) => vec![d],
    }
}

/// Validate manifest text for the plugin rooted at `root` in directory `dir_name`.
///
/// A parse failure is reported once and suppresses the remaining checks for
/// this manifest only.
#[must_use]
pub fn validate_manifest_str(content: &str, root: &Path, dir_name: &str) -> Vec<Diagnostic> {
    let raw: Value = match serde_json::from_str(content) {
        Ok(v) => v,
        Err(e) => {
            return vec![Diagnostic::syntax(
                M002,
                format!("invalid manifest syntax: {e}"),
            )]
        }
    };
    let Some(manifest) = raw.as_object() else {
        return vec![Diagnostic::syntax(
            M002,
            "invalid manifest syntax: top level must be a JSON object",
        )];
    };

    let mut diags = Vec::new();

    for &field in REQUIRED_FIELDS {
        match manifest.get(field) {
            None | Some(Value::Null) => diags.push(missing(field)),
            Some(Value::String(s)) if s.trim().is_empty() => diags.push(missing(field)),
            Some(Value::String(_)) => {}
            Some(_) => diags.push(
                Diagnostic::structural(M004, format!("`{field}` must be a string"))
                    .with_field(field),
            ),
        }
    }

    let found: Vec<&str> = PLACEHOLDERS
        .iter()
        .copied()
        .filter(|p| content.contains(p))
        .collect();
    if !found.is_empty() {
        let list = found
            .iter()
            .map(|p| format!("\"{p}\""))
            .collect::<Vec<_>>()
            .join(", ");
        diags.push(Diagnostic::new(
            M005,
            Category::Placeholder,
            format!("manifest contains placeholder text: {list}"),
        ));
    }

    if let Some(Value::String(name)) = manifest.get("name") {
        if !name.trim().is_empty() && name != dir_name {
            diags.push(
                Diagnostic::structural(
                    M006,
                    format!("`name` \"{name}\" does not match plugin directory \"{dir_name}\""),
                )
                .with_field("name"),
            );
        }
    }

    for &field in PATH_FIELDS {
        if let Some(value) = manifest.get(field) {
            check_declared_paths(field, value, root, &mut diags);
        }
    }

    diags
}

fn missing(field: &'static str) -> Diagnostic {
    Diagnostic::structural(M003, format!("missing required field `{field}`")).with_field(field)
}

fn check_declared_paths(
    field: &'static str,
    value: &Value,
    root: &Path,
    diags: &mut Vec<Diagnostic>,
) {
    let declared = match DeclaredPaths::deserialize(value) {
        Ok(DeclaredPaths::Inline(_)) if !INLINE_CAPABLE.contains(&field) => None,
        Ok(d) => Some(d),
        Err(_) => None,
    };
    let Some(declared) = declared else {
        diags.push(
            Diagnostic::structural(
                M008,
                format!("`{field}` must be a path or a list of paths"),
            )
            .with_field(field),
        );
        return;
    };

    for path in declared.paths() {
        match resolve_declared(root, path) {
            Ok(_) => {}
            Err(Unresolved::Absolute) => diags.push(
                Diagnostic::referential(
                    M008,
                    format!("`{field}` path \"{path}\" is absolute; use a path relative to the plugin root"),
                )
                .with_field(field),
            ),
            Err(Unresolved::Missing) => diags.push(
                Diagnostic::referential(
                    M007,
                    format!("plugin.json `{field}` declares \"{path}\" which does not exist"),
                )
                .with_field(field),
            ),
        }
    }
}
