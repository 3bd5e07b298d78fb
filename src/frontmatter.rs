//! Frontmatter extraction for descriptor files.
//!
//! A descriptor opens with a header block delimited by `---` lines:
//!
//! ```text
//! ---
//! name: code-reviewer
//! model: sonnet
//! tools: Read, Grep
//! ---
//! Body text...
//! ```
//!
//! Only flat, top-level `key: value` scalars are extracted. Anything else in
//! the block (list items, nested mappings, folded text) is tolerated and
//! skipped, so this is deliberately not a YAML parser.

/// Delimiter line that opens and closes the header block.
const DELIMITER: &str = "---";

/// Byte-order mark some editors prepend to UTF-8 files.
const BOM: char = '\u{feff}';

/// Ordered `key -> value` pairs from a header block. Every value is a string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontmatter {
    entries: Vec<(String, String)>,
}

impl Frontmatter {
    /// Value for `key`, if the block declared it.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Value for `key` when it is declared and not blank.
    #[must_use]
    pub fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.trim().is_empty())
    }

    /// Returns `true` if the block declared `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterate over pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert a pair. A repeated key keeps its first position and takes the
    /// newer value.
    fn insert(&mut self, key: String, value: String) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }
}

/// A descriptor split into its header and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// `None` when the header block is absent or unterminated.
    pub frontmatter: Option<Frontmatter>,
    /// Text after the closing delimiter, or the whole text without a header.
    pub body: String,
}

/// Strip a leading byte-order mark.
#[must_use]
pub fn strip_bom(text: &str) -> &str {
    text.strip_prefix(BOM).unwrap_or(text)
}

/// Extract the header block from `text`.
///
/// Returns `None` ("missing") when the first line is not the delimiter or the
/// block is never closed. A block with no recognizable pairs yields an empty
/// [`Frontmatter`], which is not the same as missing.
#[must_use]
pub fn extract(text: &str) -> Option<Frontmatter> {
    split(text).frontmatter
}

/// Split `text` into frontmatter and body.
#[must_use]
pub fn split(text: &str) -> Document {
    let text = strip_bom(text);
    let mut lines = text.split_inclusive('\n');

    let opens = lines
        .next()
        .is_some_and(|first| trim_line_ending(first) == DELIMITER);
    if !opens {
        return Document {
            frontmatter: None,
            body: text.to_string(),
        };
    }

    let mut frontmatter = Frontmatter::default();
    let mut consumed = text.split_inclusive('\n').next().map_or(0, str::len);
    for raw in lines {
        consumed += raw.len();
        let line = trim_line_ending(raw);
        if line == DELIMITER {
            return Document {
                frontmatter: Some(frontmatter),
                body: text[consumed..].to_string(),
            };
        }
        if let Some((key, value)) = parse_line(line) {
            frontmatter.insert(key, value);
        }
    }

    // Unterminated block.
    Document {
        frontmatter: None,
        body: text.to_string(),
    }
}

fn trim_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Parse one header line into a pair.
///
/// Indented lines belong to the previous key's nested value and are skipped,
/// as are lines without a colon and lines with an empty key.
fn parse_line(line: &str) -> Option<(String, String)> {
    if line.starts_with([' ', '\t']) {
        return None;
    }
    let (key, value) = line.split_once(':')?;
    let key = key.trim();
    if key.is_empty() || key.starts_with('#') {
        return None;
    }
    Some((key.to_string(), unquote(value.trim()).to_string()))
}

/// Remove one pair of matching surrounding quotes.
fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}
