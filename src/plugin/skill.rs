//! Skill directory (`skills/<skill-id>/SKILL.md`) validation.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::frontmatter::{self, strip_bom, Frontmatter};
use crate::issue::{
    Diagnostic, S001, S002, S003, S004, S005, S006, S007, S008, S009, S010, S011,
};

/// Required file name inside each skill directory.
pub const SKILL_FILE: &str = "SKILL.md";

/// Kebab-case: lowercase alphanumeric words joined by single hyphens.
static KEBAB_CASE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("kebab-case regex"));

/// Brand names a skill name must not contain, in any case.
const RESERVED_WORDS: &[&str] = &["anthropic", "claude"];

/// Maximum description length in characters.
const MAX_DESCRIPTION_CHARS: usize = 1024;

/// Phrase a description must contain so the host knows when to load the skill.
const TRIGGER_PHRASE: &str = "use when";

#[must_use]
pub fn is_kebab_case(s: &str) -> bool {
    KEBAB_CASE_RE.is_match(s)
}

fn has_angle_brackets(s: &str) -> bool {
    s.contains(['<', '>'])
}

fn dir_name(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// S001: the skill directory name must be kebab-case, whatever it contains.
#[must_use]
pub fn validate_skill_dir_name(dir: &Path) -> Option<Diagnostic> {
    let name = dir_name(dir);
    (!is_kebab_case(&name)).then(|| {
        Diagnostic::structural(
            S001,
            format!("skill directory name \"{name}\" is not kebab-case"),
        )
    })
}

/// Validate the `SKILL.md` inside a skill directory.
///
/// A missing, empty or header-less file stops the checks for that directory.
/// Otherwise every name and description violation is reported.
#[must_use]
pub fn validate_skill(dir: &Path) -> Vec<Diagnostic> {
    let path = dir.join(SKILL_FILE);
    if !path.is_file() {
        return vec![Diagnostic::structural(S002, format!("{SKILL_FILE} not found"))];
    }
    let text = match super::read_text(&path) {
        Ok(t) => t,
        Err(d) => return vec![d],
    };
    if strip_bom(&text).trim().is_empty() {
        return vec![Diagnostic::structural(S003, format!("{SKILL_FILE} is empty"))];
    }
    let Some(fm) = frontmatter::extract(&text) else {
        return vec![Diagnostic::structural(
            S004,
            "missing frontmatter (no `---` header block)",
        )];
    };

    let mut diags = validate_name(&fm, &dir_name(dir));
    diags.extend(validate_description(&fm));
    diags
}

fn missing(field: &'static str) -> Diagnostic {
    Diagnostic::structural(S005, format!("missing required field `{field}`")).with_field(field)
}

fn validate_name(fm: &Frontmatter, dir_name: &str) -> Vec<Diagnostic> {
    let Some(name) = fm.non_empty("name") else {
        return vec![missing("name")];
    };
    let mut diags = Vec::new();

    if !is_kebab_case(name) {
        diags.push(
            Diagnostic::structural(S006, format!("`name` is not kebab-case: \"{name}\""))
                .with_field("name"),
        );
    }

    if has_angle_brackets(name) {
        diags.push(
            Diagnostic::structural(S007, "`name` must not contain `<` or `>`").with_field("name"),
        );
    }

    let lowered = name.to_lowercase();
    for word in RESERVED_WORDS {
        if lowered.contains(word) {
            diags.push(
                Diagnostic::structural(S008, format!("`name` contains reserved word \"{word}\""))
                    .with_field("name"),
            );
        }
    }

    if name != dir_name {
        diags.push(
            Diagnostic::structural(
                S009,
                format!("`name` \"{name}\" does not match directory name \"{dir_name}\""),
            )
            .with_field("name"),
        );
    }

    diags
}

fn validate_description(fm: &Frontmatter) -> Vec<Diagnostic> {
    let Some(desc) = fm.non_empty("description") else {
        return vec![missing("description")];
    };
    let mut diags = Vec::new();

    let len = desc.chars().count();
    if len > MAX_DESCRIPTION_CHARS {
        diags.push(
            Diagnostic::structural(
                S010,
                format!("`description` is {len} characters (max {MAX_DESCRIPTION_CHARS})"),
            )
            .with_field("description"),
        );
    }

    if has_angle_brackets(desc) {
        diags.push(
            Diagnostic::structural(S007, "`description` must not contain `<` or `>`")
                .with_field("description"),
        );
    }

    if !desc.to_lowercase().contains(TRIGGER_PHRASE) {
        diags.push(
            Diagnostic::structural(
                S011,
                format!("`description` must say when to use the skill (include \"{TRIGGER_PHRASE}\")"),
            )
            .with_field("description"),
        );
    }

    diags
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const GOOD_DESC: &str = "Formats SQL queries. Use when the user pastes SQL.";

    fn make_skill_dir(name: &str, content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let parent = tempdir().unwrap();
        let dir = parent.path().join(name);
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join(SKILL_FILE), content).unwrap();
        (parent, dir)
    }

    fn codes(diags: &[Diagnostic]) -> Vec<&'static str> {
        diags.iter().map(|d| d.code).collect()
    }

    #[test]
    fn valid_skill_no_issues() {
        let (_p, dir) = make_skill_dir(
            "sql-format",
            &format!("---\nname: sql-format\ndescription: {GOOD_DESC}\n---\nBody\n"),
        );
        assert!(validate_skill_dir_name(&dir).is_none());
        let diags = validate_skill(&dir);
        assert!(diags.is_empty(), "unexpected issues: {diags:?}");
    }

    #[test]
    fn kebab_case_examples() {
        for ok in ["a", "abc-123", "v2", "my-skill-name"] {
            assert!(is_kebab_case(ok), "{ok} should be kebab-case");
        }
        for bad in ["", "-a", "a-", "a--b", "My-skill", "my_skill", "my skill"] {
            assert!(!is_kebab_case(bad), "{bad} should not be kebab-case");
        }
    }

    #[test]
    fn non_kebab_directory_s001() {
        let d = validate_skill_dir_name(Path::new("/p/skills/My Skill")).unwrap();
        assert_eq!(d.code, S001);
        assert!(d.message.contains("My Skill"));
    }

    #[test]
    fn missing_skill_md_stops() {
        let parent = tempdir().unwrap();
        let dir = parent.path().join("empty-skill");
        fs::create_dir(&dir).unwrap();
        assert_eq!(codes(&validate_skill(&dir)), vec![S002]);
    }

    #[test]
    fn lowercase_skill_md_is_not_accepted() {
        let parent = tempdir().unwrap();
        let dir = parent.path().join("lower");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("skill.md"), "---\nname: lower\n---\n").unwrap();
        let diags = validate_skill(&dir);
        // Case-insensitive filesystems resolve SKILL.md to skill.md.
        if !dir.join(SKILL_FILE).is_file() {
            assert_eq!(codes(&diags), vec![S002]);
        }
    }

    #[test]
    fn empty_skill_md_s003() {
        let (_p, dir) = make_skill_dir("blank", "\n\n");
        assert_eq!(codes(&validate_skill(&dir)), vec![S003]);
    }

    #[test]
    fn missing_frontmatter_s004() {
        let (_p, dir) = make_skill_dir("no-header", "# Just a body\n");
        assert_eq!(codes(&validate_skill(&dir)), vec![S004]);
    }

    #[test]
    fn missing_name_and_description_s005() {
        let (_p, dir) = make_skill_dir("bare", "---\nlicense: MIT\n---\nBody\n");
        let diags = validate_skill(&dir);
        assert_eq!(codes(&diags), vec![S005, S005]);
        assert_eq!(diags[0].field, Some("name"));
        assert_eq!(diags[1].field, Some("description"));
    }

    #[test]
    fn name_mismatch_s009() {
        let (_p, dir) = make_skill_dir(
            "sql-format",
            &format!("---\nname: sql-formatter\ndescription: {GOOD_DESC}\n---\n"),
        );
        let diags = validate_skill(&dir);
        assert_eq!(codes(&diags), vec![S009]);
        assert!(diags[0].message.contains("sql-formatter"));
    }

    #[test]
    fn name_violations_accumulate() {
        let (_p, dir) = make_skill_dir(
            "x",
            &format!("---\nname: Claude<Helper>\ndescription: {GOOD_DESC}\n---\n"),
        );
        let diags = validate_skill(&dir);
        assert_eq!(codes(&diags), vec![S006, S007, S008, S009]);
    }

    #[test]
    fn reserved_word_matched_as_substring() {
        let (_p, dir) = make_skill_dir(
            "myanthropictool",
            &format!("---\nname: myanthropictool\ndescription: {GOOD_DESC}\n---\n"),
        );
        assert_eq!(codes(&validate_skill(&dir)), vec![S008]);
    }

    #[test]
    fn description_exactly_1024_chars_ok() {
        let desc = format!("use when {}", "x".repeat(1015));
        assert_eq!(desc.chars().count(), 1024);
        let (_p, dir) =
            make_skill_dir("long", &format!("---\nname: long\ndescription: {desc}\n---\n"));
        assert!(validate_skill(&dir).is_empty());
    }

    #[test]
    fn description_too_long_s010() {
        let desc = format!("Use when {}", "x".repeat(1100));
        let (_p, dir) =
            make_skill_dir("long", &format!("---\nname: long\ndescription: {desc}\n---\n"));
        assert_eq!(codes(&validate_skill(&dir)), vec![S010]);
    }

    #[test]
    fn description_violations_accumulate() {
        let (_p, dir) = make_skill_dir(
            "tags",
            "---\nname: tags\ndescription: Renders <b>bold</b> text\n---\n",
        );
        assert_eq!(codes(&validate_skill(&dir)), vec![S007, S011]);
    }

    #[test]
    fn trigger_phrase_is_case_insensitive() {
        let (_p, dir) = make_skill_dir(
            "shout",
            "---\nname: shout\ndescription: USE WHEN the user is loud.\n---\n",
        );
        assert!(validate_skill(&dir).is_empty());
    }
}
