//! Command (`commands/**/*.md`) and rule (`rules/**/*.md`) validation.
//!
//! Neither kind has a frontmatter schema; the only requirement is content.

use std::path::Path;

use crate::frontmatter::strip_bom;
use crate::issue::{Diagnostic, K001, R001};

/// Validate a command file: it must have content after trimming.
#[must_use]
pub fn validate_command(path: &Path) -> Vec<Diagnostic> {
    check_non_empty(path, K001, "command")
}

/// Validate a rule file: it must have content after trimming.
#[must_use]
pub fn validate_rule(path: &Path) -> Vec<Diagnostic> {
    check_non_empty(path, R001, "rule")
}

fn check_non_empty(path: &Path, code: &'static str, what: &str) -> Vec<Diagnostic> {
    match super::read_text(path) {
        Ok(text) if strip_bom(&text).trim().is_empty() => {
            vec![Diagnostic::structural(code, format!("{what} file is empty"))]
        }
        Ok(_) => Vec::new(),
        Err(d) => vec![d],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("file.md");
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn command_with_content_passes() {
        let (_dir, path) = write("Run the test suite and summarize failures.\n");
        assert!(validate_command(&path).is_empty());
    }

    #[test]
    fn command_without_frontmatter_is_fine() {
        let (_dir, path) = write("# Deploy\n\nShip it.\n");
        assert!(validate_command(&path).is_empty());
    }

    #[test]
    fn whitespace_only_command_k001() {
        let (_dir, path) = write("  \n\t\n");
        let diags = validate_command(&path);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, K001);
    }

    #[test]
    fn bom_only_rule_r001() {
        let (_dir, path) = write("\u{feff}\n");
        let diags = validate_rule(&path);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, R001);
        assert_eq!(diags[0].message, "rule file is empty");
    }

    #[test]
    fn rule_with_content_passes() {
        let (_dir, path) = write("Always prefer composition.\n");
        assert!(validate_rule(&path).is_empty());
    }
}
