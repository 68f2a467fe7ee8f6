//! Heading anchors and markdown link escaping.
//!
//! The table of contents links to category headings by anchor, so anchors must
//! match what GitHub generates when it renders the README:
//!
//! - lowercase the heading text
//! - keep letters and digits (any script), `-` and `_`
//! - turn spaces into `-`
//! - drop everything else
//! - when the same anchor appears again in a document, suffix `-1`, `-2`, ...
//!
//! ```text
//! "Advanced Topics"  → "advanced-topics"
//! "C++ / Rust"       → "c--rust"
//! "Rust" (2nd time)  → "rust-1"
//! ```

use std::collections::HashMap;

/// Convert heading text to its base anchor (without duplicate suffix).
pub fn base_anchor(text: &str) -> String {
    text.trim()
        .chars()
        .flat_map(char::to_lowercase)
        .filter_map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                Some(c)
            } else if c == ' ' {
                Some('-')
            } else {
                None
            }
        })
        .collect()
}

/// Hands out unique anchors in document order.
///
/// Feed it every heading of the document, in order, including headings that
/// are not generated (the hand-written preamble) so the duplicate suffixes
/// line up with what the markdown renderer computes.
#[derive(Debug, Default)]
pub struct AnchorRegistry {
    seen: HashMap<String, usize>,
}

impl AnchorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a heading and return its unique anchor.
    pub fn register(&mut self, text: &str) -> String {
        let base = base_anchor(text);
        let mut candidate = base.clone();
        while self.seen.contains_key(&candidate) {
            let count = self.seen.entry(base.clone()).or_insert(0);
            *count += 1;
            candidate = format!("{base}-{count}");
        }
        self.seen.insert(candidate.clone(), 0);
        candidate
    }
}

/// Escape text for use inside `[...]` of a markdown link.
///
/// Code spans are copied through untouched. Outside them, markdown
/// punctuation that GitHub would interpret (brackets, emphasis markers, angle
/// brackets) is backslash-escaped.
pub fn escape_link_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(c) = rest.chars().next() {
        if c == '`' {
            let run = rest.len() - rest.trim_start_matches('`').len();
            let span = code_span_len(rest, run);
            match span {
                Some(len) => out.push_str(&rest[..len]),
                None => (0..run).for_each(|_| out.push_str("\\`")),
            }
            rest = &rest[span.unwrap_or(run)..];
            continue;
        }
        if matches!(c, '\\' | '[' | ']' | '<' | '>' | '*' | '_') {
            out.push('\\');
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }
    out
}

/// Byte length of the code span opened by the `run` backticks at the start of
/// `text`, or `None` when no closing run of the same length follows.
fn code_span_len(text: &str, run: usize) -> Option<usize> {
    let body = &text[run..];
    let mut offset = 0;
    while let Some(pos) = body[offset..].find('`') {
        let start = offset + pos;
        let len = body[start..].len() - body[start..].trim_start_matches('`').len();
        if len == run {
            return Some(run + start + len);
        }
        offset = start + len;
    }
    None
}

/// Encode a relative path for use inside `(...)` of a markdown link.
///
/// Only the characters that break link destinations or change how the URL
/// is split (`#` fragment, `?` query, `%` escapes) are encoded; everything
/// else (including non-ASCII) is left readable.
pub fn encode_link_target(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for c in path.chars() {
        match c {
            '%' => out.push_str("%25"),
            ' ' => out.push_str("%20"),
            '#' => out.push_str("%23"),
            '?' => out.push_str("%3F"),
            '(' => out.push_str("%28"),
            ')' => out.push_str("%29"),
            '<' => out.push_str("%3C"),
            '>' => out.push_str("%3E"),
            _ => out.push(c),
        }
    }
    out
}
