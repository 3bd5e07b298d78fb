//! Marketplace catalog (`.claude-plugin/marketplace.json`) validation.
//!
//! The catalog lists the plugins a marketplace publishes:
//!
//! ```text
//! { "name": "acme-tools", "plugins": [ { "name": "foo", "source": "./plugins/foo" } ] }
//! ```
//!
//! String sources are checked against the repository; object sources (remote
//! git repositories and the like) are left to the host.

use std::collections::HashSet;
use std::path::Path;

use serde_json::Value;

use crate::config::{MANIFEST_FILE, METADATA_DIR};
use crate::issue::{Diagnostic, C001, C002, C003, C004, C005, C006};
use crate::resolver::{resolve_declared, Unresolved};

/// A diagnostic tied to a catalog entry, or to the catalog as a whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogFinding {
    /// Entry name when the entry has one.
    pub entry: Option<String>,
    pub diagnostic: Diagnostic,
}

/// Result of checking a catalog: findings and the number of entries examined.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CatalogReport {
    pub findings: Vec<CatalogFinding>,
    pub entries: usize,
}

impl CatalogReport {
    fn whole(&mut self, diagnostic: Diagnostic) {
        self.findings.push(CatalogFinding {
            entry: None,
            diagnostic,
        });
    }

    fn entry(&mut self, entry: Option<&str>, diagnostic: Diagnostic) {
        self.findings.push(CatalogFinding {
            entry: entry.map(str::to_string),
            diagnostic,
        });
    }
}

/// Validate the catalog at `path`; sources resolve against `repo_root`.
///
/// A missing catalog is not an error: not every repository is a marketplace.
#[must_use]
pub fn validate_marketplace(path: &Path, repo_root: &Path) -> CatalogReport {
    let mut report = CatalogReport::default();
    if !path.is_file() {
        return report;
    }
    let content = match super::read_text(path) {
        Ok(c) => c,
        Err(d) => {
            report.whole(d);
            return report;
        }
    };

    let raw: Value = match serde_json::from_str(&content) {
        Ok(v) => v,
        Err(e) => {
            report.whole(Diagnostic::syntax(C001, format!("invalid catalog syntax: {e}")));
            return report;
        }
    };
    let Some(entries) = raw.get("plugins").and_then(Value::as_array) else {
        report.whole(Diagnostic::syntax(
            C001,
            "catalog must be an object with a `plugins` array",
        ));
        return report;
    };

    let mut seen = HashSet::new();
    for entry in entries {
        report.entries += 1;
        let name = entry
            .get("name")
            .and_then(Value::as_str)
            .filter(|n| !n.trim().is_empty());

        match name {
            None => report.entry(
                None,
                Diagnostic::structural(C002, "catalog entry is missing `name`").with_field("name"),
            ),
            Some(n) if !seen.insert(n) => report.entry(
                name,
                Diagnostic::structural(C006, format!("duplicate catalog entry \"{n}\""))
                    .with_field("name"),
            ),
            Some(_) => {}
        }

        match entry.get("source") {
            None | Some(Value::Null) => report.entry(
                name,
                Diagnostic::structural(C003, "catalog entry is missing `source`")
                    .with_field("source"),
            ),
            Some(Value::String(source)) => {
                check_source(source, name, repo_root, &mut report);
            }
            Some(_) => {}
        }
    }
    report
}

fn check_source(source: &str, name: Option<&str>, repo_root: &Path, report: &mut CatalogReport) {
    let dir = match resolve_declared(repo_root, source) {
        Ok(dir) if dir.is_dir() => dir,
        Ok(_) | Err(Unresolved::Missing) => {
            report.entry(
                name,
                Diagnostic::referential(
                    C004,
                    format!("source \"{source}\" is not a plugin directory"),
                )
                .with_field("source"),
            );
            return;
        }
        Err(Unresolved::Absolute) => {
            report.entry(
                name,
                Diagnostic::referential(
                    C004,
                    format!("source \"{source}\" is absolute; use a path relative to the repository"),
                )
                .with_field("source"),
            );
            return;
        }
    };

    // Unreadable or malformed manifests belong to the manifest family.
    let Some(expected) = name else { return };
    let manifest = dir.join(METADATA_DIR).join(MANIFEST_FILE);
    let declared = std::fs::read_to_string(manifest)
        .ok()
        .and_then(|c| serde_json::from_str::<Value>(&c).ok())
        .and_then(|v| v.get("name").and_then(Value::as_str).map(str::to_string));
    if let Some(declared) = declared {
        if declared != expected {
            report.entry(
                name,
                Diagnostic::structural(
                    C005,
                    format!("entry \"{expected}\" points at plugin named \"{declared}\""),
                )
                .with_field("name"),
            );
        }
    }
}
