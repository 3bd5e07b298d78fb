//! Hook set (`hooks/hooks.json`) validation.
//!
//! Two document shapes are accepted and lowered to one list of
//! (event, matcher) bindings before any checks run:
//!
//! ```text
//! { "PreToolUse": [ { "matcher": "Bash", "hooks": [ ... ] } ] }   keyed
//! [ { "matcher": "Bash", "hooks": [ ... ] } ]                       legacy
//! ```
//!
//! The keyed form may also be wrapped as `{ "description": ..., "hooks": {...} }`.

use std::path::Path;

use serde_json::{Map, Value};

use crate::issue::{Diagnostic, H001, H002, H003, H004, H005, H006, H007, H008};

/// Lifecycle events a hook set may bind to.
pub const VALID_EVENTS: &[&str] = &[
    "PreToolUse",
    "PostToolUse",
    "PostToolUseFailure",
    "Notification",
    "UserPromptSubmit",
    "Stop",
    "SubagentStart",
    "SubagentStop",
    "PreCompact",
    "SessionStart",
    "SessionEnd",
    "PermissionRequest",
];

/// A hook document, resolved once from its JSON shape.
#[derive(Debug, Clone, PartialEq)]
pub enum HookDocument {
    /// Object keyed by event type.
    Keyed(Map<String, Value>),
    /// Flat list of matchers with no event wrapper.
    Legacy(Vec<Value>),
}

impl HookDocument {
    /// Classify a parsed document, unwrapping the `{ "hooks": {...} }` form.
    pub fn from_value(value: Value) -> Result<Self, Diagnostic> {
        match value {
            Value::Object(map) => Self::from_object(map),
            Value::Array(items) => Ok(HookDocument::Legacy(items)),
            other => Err(Diagnostic::structural(
                H002,
                format!(
                    "hooks document must be an object or an array, found {}",
                    json_type(&other)
                ),
            )),
        }
    }

    fn from_object(map: Map<String, Value>) -> Result<Self, Diagnostic> {
        let wrapper_keys_only = map.keys().all(|k| k == "hooks" || k == "description");
        if wrapper_keys_only {
            if let Some(Value::Object(inner)) = map.get("hooks") {
                if map.get("description").is_some_and(|d| !d.is_string()) {
                    return Err(
                        Diagnostic::structural(H002, "`description` must be a string")
                            .with_field("description"),
                    );
                }
                return Ok(HookDocument::Keyed(inner.clone()));
            }
        }
        Ok(HookDocument::Keyed(map))
    }

    /// Lower either shape to ordered bindings, reporting unknown events and
    /// non-array event values along the way.
    fn bindings(&self, diags: &mut Vec<Diagnostic>) -> Vec<Binding<'_>> {
        match self {
            HookDocument::Legacy(items) => items
                .iter()
                .enumerate()
                .map(|(index, matcher)| Binding {
                    event: None,
                    index,
                    matcher,
                })
                .collect(),
            HookDocument::Keyed(map) => {
                let mut out = Vec::new();
                for (event, value) in map {
                    if !VALID_EVENTS.contains(&event.as_str()) {
                        diags.push(Diagnostic::structural(
                            H003,
                            format!("invalid event type \"{event}\""),
                        ));
                    }
                    let Some(items) = value.as_array() else {
                        diags.push(Diagnostic::structural(
                            H004,
                            format!("\"{event}\" must be an array of matchers"),
                        ));
                        continue;
                    };
                    out.extend(items.iter().enumerate().map(|(index, matcher)| Binding {
                        event: Some(event.as_str()),
                        index,
                        matcher,
                    }));
                }
                out
            }
        }
    }
}

/// One matcher entry and where it sits in the document.
#[derive(Debug)]
struct Binding<'a> {
    event: Option<&'a str>,
    index: usize,
    matcher: &'a Value,
}

impl Binding<'_> {
    fn label(&self) -> String {
        match self.event {
            Some(event) => format!("{event}[{}]", self.index),
            None => format!("[{}]", self.index),
        }
    }
}

/// Diagnostics for one hook document plus the number of matchers examined.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct HookReport {
    pub diagnostics: Vec<Diagnostic>,
    pub matchers: usize,
}

/// Validate a hooks file at the given path.
#[must_use]
pub fn validate_hooks(path: &Path) -> HookReport {
    match super::read_text(path) {
        Ok(content) => validate_hooks_str(&content),
        Err(d) => HookReport {
            diagnostics: vec![d],
            matchers: 0,
        },
    }
}

/// Validate hook document text.
#[must_use]
pub fn validate_hooks_str(content: &str) -> HookReport {
    let mut report = HookReport::default();

    let raw: Value = match serde_json::from_str(content) {
        Ok(v) => v,
        Err(e) => {
            report
                .diagnostics
                .push(Diagnostic::syntax(H001, format!("invalid JSON syntax: {e}")));
            return report;
        }
    };

    let doc = match HookDocument::from_value(raw) {
        Ok(doc) => doc,
        Err(d) => {
            report.diagnostics.push(d);
            return report;
        }
    };

    let bindings = doc.bindings(&mut report.diagnostics);
    report.matchers = bindings.len();
    for binding in &bindings {
        check_matcher(binding, &mut report.diagnostics);
    }
    report
}

fn check_matcher(binding: &Binding<'_>, diags: &mut Vec<Diagnostic>) {
    let at = binding.label();
    let Some(entry) = binding.matcher.as_object() else {
        diags.push(Diagnostic::structural(
            H005,
            format!("matcher entry {at} must be an object"),
        ));
        return;
    };

    let matcher_ok = entry
        .get("matcher")
        .and_then(Value::as_str)
        .is_some_and(|m| !m.trim().is_empty());
    if !matcher_ok {
        diags.push(
            Diagnostic::structural(H005, format!("matcher entry {at} requires a non-empty `matcher`"))
                .with_field("matcher"),
        );
    }

    let Some(actions) = entry.get("hooks").and_then(Value::as_array) else {
        diags.push(
            Diagnostic::structural(H006, format!("matcher entry {at} is missing a `hooks` array"))
                .with_field("hooks"),
        );
        return;
    };

    for (i, action) in actions.iter().enumerate() {
        let at = format!("{at}.hooks[{i}]");
        let Some(action) = action.as_object() else {
            diags.push(Diagnostic::structural(H007, format!("hook {at} must be an object")));
            continue;
        };
        if !action.get("type").is_some_and(Value::is_string) {
            diags.push(
                Diagnostic::structural(H007, format!("hook {at} requires a string `type`"))
                    .with_field("type"),
            );
        }
        if !is_valid_command(action.get("command")) {
            diags.push(
                Diagnostic::structural(
                    H008,
                    format!("hook {at} requires a `command` string or list of strings"),
                )
                .with_field("command"),
            );
        }
    }
}

/// A command is a non-empty string or a non-empty list of strings.
fn is_valid_command(command: Option<&Value>) -> bool {
    match command {
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(Value::Array(parts)) => !parts.is_empty() && parts.iter().all(Value::is_string),
        _ => false,
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
