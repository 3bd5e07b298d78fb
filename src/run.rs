//! The per-invocation aggregate of issues and counters.

use std::collections::BTreeMap;

use crate::issue::{Diagnostic, Kind, ValidationIssue};

/// Everything one validator family found in a single pass.
///
/// A run is created fresh by each family entry point and returned to the
/// caller; nothing outlives it.
#[derive(Debug, Default, Clone)]
pub struct ValidationRun {
    issues: Vec<ValidationIssue>,
    examined: BTreeMap<Kind, usize>,
    plugins: usize,
}

impl ValidationRun {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one plugin as scanned.
    pub fn plugin_scanned(&mut self) {
        self.plugins += 1;
    }

    /// Count one unit of `kind` as examined, whether it passes or not.
    pub fn examined(&mut self, kind: Kind) {
        self.examined_many(kind, 1);
    }

    pub fn examined_many(&mut self, kind: Kind, n: usize) {
        *self.examined.entry(kind).or_insert(0) += n;
    }

    pub fn push(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    /// Locate every diagnostic at `plugin/kind/file` and append it.
    pub fn report(
        &mut self,
        plugin: &str,
        kind: Kind,
        file: &str,
        diagnostics: impl IntoIterator<Item = Diagnostic>,
    ) {
        for d in diagnostics {
            self.push(ValidationIssue::new(plugin, kind, file, d));
        }
    }

    /// Fold another run into this one.
    pub fn merge(&mut self, other: ValidationRun) {
        self.issues.extend(other.issues);
        for (kind, n) in other.examined {
            self.examined_many(kind, n);
        }
        self.plugins = self.plugins.max(other.plugins);
    }

    #[must_use]
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    #[must_use]
    pub fn plugin_count(&self) -> usize {
        self.plugins
    }

    #[must_use]
    pub fn examined_count(&self, kind: Kind) -> usize {
        self.examined.get(&kind).copied().unwrap_or(0)
    }

    /// Examined counters in kind order.
    pub fn counts(&self) -> impl Iterator<Item = (Kind, usize)> + '_ {
        self.examined.iter().map(|(k, n)| (*k, *n))
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// `0` when clean, `1` when any issue was found.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        i32::from(!self.is_clean())
    }
}
