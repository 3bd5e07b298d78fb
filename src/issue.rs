//! Structured diagnostics and located validation issues.
//!
//! Validators produce [`Diagnostic`]s that describe what is wrong with one
//! document. The orchestrator attaches the plugin, component kind and file to
//! each one, turning it into a [`ValidationIssue`]. Every issue is an error;
//! there are no warnings.

use std::fmt;

/// Broad class of a rule violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Missing required file or field, wrong name or pattern.
    Structural,
    /// Dangling declared path or broken symlink.
    Referential,
    /// Manifest, hook or catalog document fails to parse.
    Syntax,
    /// Template text that was never replaced.
    Placeholder,
}

/// Component kind an issue is reported against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    Manifest,
    Agent,
    Command,
    Rule,
    Skill,
    Hooks,
    Symlink,
    Marketplace,
}

impl Kind {
    /// Label used in the `plugin/kind/file` location.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Kind::Manifest => "manifest",
            Kind::Agent => "agents",
            Kind::Command => "commands",
            Kind::Rule => "rules",
            Kind::Skill => "skills",
            Kind::Hooks => "hooks",
            Kind::Symlink => "symlinks",
            Kind::Marketplace => "marketplace",
        }
    }

    /// Noun for the summary tally, singular when `count` is 1.
    #[must_use]
    pub fn noun(self, count: usize) -> &'static str {
        let (one, many) = match self {
            Kind::Manifest => ("manifest", "manifests"),
            Kind::Agent => ("agent file", "agent files"),
            Kind::Command => ("command file", "command files"),
            Kind::Rule => ("rule file", "rule files"),
            Kind::Skill => ("skill", "skills"),
            Kind::Hooks => ("hook matcher", "hook matchers"),
            Kind::Symlink => ("symlink", "symlinks"),
            Kind::Marketplace => ("catalog entry", "catalog entries"),
        };
        if count == 1 {
            one
        } else {
            many
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A rule violation found in one document, before it is located.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Stable error code (e.g., `"A001"`, `"S004"`).
    pub code: &'static str,
    pub category: Category,
    /// Human-readable message.
    pub message: String,
    /// Field that caused the diagnostic (e.g., `"name"`, `"model"`).
    pub field: Option<&'static str>,
}

impl Diagnostic {
    #[must_use]
    pub fn new(code: &'static str, category: Category, message: impl Into<String>) -> Self {
        Self {
            code,
            category,
            message: message.into(),
            field: None,
        }
    }

    /// Set the field that caused this diagnostic.
    #[must_use]
    pub fn with_field(mut self, field: &'static str) -> Self {
        self.field = Some(field);
        self
    }

    /// Shorthand for a structural diagnostic.
    #[must_use]
    pub fn structural(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(code, Category::Structural, message)
    }

    /// Shorthand for a referential diagnostic.
    #[must_use]
    pub fn referential(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(code, Category::Referential, message)
    }

    /// Shorthand for a syntax diagnostic.
    #[must_use]
    pub fn syntax(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(code, Category::Syntax, message)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// A diagnostic located at `plugin/kind/file`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub plugin: String,
    pub kind: Kind,
    /// Path relative to the component root (e.g. `review/SKILL.md`).
    pub file: String,
    pub diagnostic: Diagnostic,
}

impl ValidationIssue {
    #[must_use]
    pub fn new(
        plugin: impl Into<String>,
        kind: Kind,
        file: impl Into<String>,
        diagnostic: Diagnostic,
    ) -> Self {
        Self {
            plugin: plugin.into(),
            kind,
            file: file.into(),
            diagnostic,
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.diagnostic.message
    }

    #[must_use]
    pub fn code(&self) -> &'static str {
        self.diagnostic.code
    }

    #[must_use]
    pub fn category(&self) -> Category {
        self.diagnostic.category
    }

    /// `plugin/kind/file`
    #[must_use]
    pub fn location(&self) -> String {
        format!("{}/{}/{}", self.plugin, self.kind, self.file)
    }
}

/// `plugin/kind/file - message`
impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.location(), self.diagnostic)
    }
}

// ── Error code constants ────────────────────────────────────────────────

// Infrastructure (F001)

/// File exists but cannot be read as UTF-8 text.
pub const F001: &str = "F001";

// Manifest (M001–M008)

/// Manifest file missing.
pub const M001: &str = "M001";
/// Manifest is not valid JSON or not a JSON object.
pub const M002: &str = "M002";
/// Missing required field.
pub const M003: &str = "M003";
/// Required field is not a string.
pub const M004: &str = "M004";
/// Placeholder text left in the manifest.
pub const M005: &str = "M005";
/// `name` does not match the plugin directory.
pub const M006: &str = "M006";
/// Declared component path does not resolve.
pub const M007: &str = "M007";
/// Declared component path has the wrong shape (absolute, non-string).
pub const M008: &str = "M008";

// Agents (A001–A002)

/// Agent file has no frontmatter block.
pub const A001: &str = "A001";
/// Agent frontmatter lacks a required field.
pub const A002: &str = "A002";

// Commands and rules (K001, R001)

/// Command file is empty.
pub const K001: &str = "K001";
/// Rule file is empty.
pub const R001: &str = "R001";

// Skills (S001–S011)

/// Skill directory name is not kebab-case.
pub const S001: &str = "S001";
/// `SKILL.md` missing.
pub const S002: &str = "S002";
/// `SKILL.md` is empty.
pub const S003: &str = "S003";
/// `SKILL.md` has no frontmatter block.
pub const S004: &str = "S004";
/// Missing required field.
pub const S005: &str = "S005";
/// `name` is not kebab-case.
pub const S006: &str = "S006";
/// Field contains angle brackets.
pub const S007: &str = "S007";
/// `name` contains a reserved word.
pub const S008: &str = "S008";
/// `name` does not match the skill directory.
pub const S009: &str = "S009";
/// `description` exceeds 1024 characters.
pub const S010: &str = "S010";
/// `description` lacks the discoverability phrase.
pub const S011: &str = "S011";

// Hooks (H001–H008)

/// Hook document is not valid JSON.
pub const H001: &str = "H001";
/// Hook document is neither an object nor an array.
pub const H002: &str = "H002";
/// Unknown event type.
pub const H003: &str = "H003";
/// Event value is not an array of matchers.
pub const H004: &str = "H004";
/// Matcher entry is malformed or has an empty `matcher`.
pub const H005: &str = "H005";
/// Matcher lacks a `hooks` array.
pub const H006: &str = "H006";
/// Hook action lacks a string `type`.
pub const H007: &str = "H007";
/// Hook action lacks a valid `command`.
pub const H008: &str = "H008";

// Symlinks (L001)

/// Symlink target does not exist.
pub const L001: &str = "L001";

// Marketplace catalog (C001–C006)

/// Catalog is not valid JSON or has the wrong shape.
pub const C001: &str = "C001";
/// Catalog entry missing `name`.
pub const C002: &str = "C002";
/// Catalog entry missing `source`.
pub const C003: &str = "C003";
/// Catalog source does not resolve to a plugin directory.
pub const C004: &str = "C004";
/// Catalog entry name does not match the plugin manifest.
pub const C005: &str = "C005";
/// Duplicate catalog entry name.
pub const C006: &str = "C006";
