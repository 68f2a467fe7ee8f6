//! Markdown rendering of the index and splicing into the target document.
//!
//! Stage 2 of the index build. Pure functions only: no I/O, so the exact
//! bytes of the generated document can be asserted in tests.
//!
//! ## Generated Section
//!
//! ```markdown
//! <!-- til-index:start -->
//!
//! ## Categories
//!
//! - [python](#python)
//! - [rust](#rust)
//!
//! ## Articles
//!
//! ### python
//!
//! - [Python basics](python/basics.md)
//!
//! #### advanced
//!
//! - [Metaclasses](python/advanced/metaclasses.md)
//!
//! ### rust
//!
//! <!-- til-index:end -->
//! ```
//!
//! Top-level categories are `###` headings; each nesting level adds a `#`,
//! capped at `######`. Direct articles are listed before subcategories.
//!
//! ## Splicing
//!
//! | Existing document | Result |
//! |-------------------|--------|
//! | none | configured preamble + section |
//! | no markers | whole document kept as preamble, section appended |
//! | start marker only | everything after the start marker replaced |
//! | both markers | only the region between the markers replaced |

use crate::config::DocumentConfig;
use crate::metadata;
use crate::naming::{AnchorRegistry, encode_link_target, escape_link_text};
use crate::types::{Category, Index};
use std::borrow::Cow;
use tracing::debug;

const TOP_LEVEL_HEADING: usize = 3;
const MAX_HEADING: usize = 6;

/// Where the generated section sits in an existing document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionLocation {
    /// No start marker: the section will be appended.
    Missing,
    /// Start marker found without a matching end marker.
    Unterminated,
    /// Both markers found.
    Delimited,
}

/// An existing document cut around its generated section.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentParts<'a> {
    /// Hand-written content before the section, including its final newline.
    pub before: Cow<'a, str>,
    /// Hand-written content after the end marker line.
    pub after: &'a str,
    pub location: SectionLocation,
}

/// Render the full target document.
///
/// `existing` is the current content of the target, if it exists.
pub fn render_document(existing: Option<&str>, index: &Index, doc: &DocumentConfig) -> String {
    let parts = match existing {
        Some(text) => split_document(text, doc),
        None => DocumentParts {
            before: normalize_preamble(&doc.preamble).into(),
            after: "",
            location: SectionLocation::Missing,
        },
    };
    debug!(location = ?parts.location, "splicing generated section");

    let preamble_headings = metadata::heading_texts(&parts.before);
    let section = render_section(index, doc, &preamble_headings);

    format!(
        "{before}{start}\n\n{section}\n{end}\n{after}",
        before = parts.before,
        start = doc.start_marker.trim(),
        end = doc.end_marker.trim(),
        after = parts.after,
    )
}

/// Cut an existing document around its generated section.
pub fn split_document<'a>(text: &'a str, doc: &DocumentConfig) -> DocumentParts<'a> {
    let Some((start_begin, start_end)) = find_marker_line(text, 0, &doc.start_marker) else {
        return DocumentParts {
            before: normalize_preamble(text).into(),
            after: "",
            location: SectionLocation::Missing,
        };
    };

    let before: Cow<'a, str> = Cow::Borrowed(&text[..start_begin]);
    match find_marker_line(text, start_end, &doc.end_marker) {
        Some((_, end_end)) => DocumentParts {
            before,
            after: &text[end_end..],
            location: SectionLocation::Delimited,
        },
        None => DocumentParts {
            before,
            after: "",
            location: SectionLocation::Unterminated,
        },
    }
}

/// Byte range of the first line at or after `from` that is exactly `marker`
/// (surrounding whitespace ignored). The range includes the line terminator.
fn find_marker_line(text: &str, from: usize, marker: &str) -> Option<(usize, usize)> {
    let marker = marker.trim();
    let mut offset = from;
    for line in text[from..].split_inclusive('\n') {
        let begin = offset;
        offset += line.len();
        if line.trim() == marker {
            return Some((begin, offset));
        }
    }
    None
}

/// Preamble text as it sits above the start marker: trailing whitespace
/// collapsed to one blank line, or nothing at all for an empty preamble.
fn normalize_preamble(text: &str) -> String {
    let trimmed = text.trim_end();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{trimmed}\n\n")
    }
}

/// Render the generated section (without markers).
///
/// `preamble_headings` are the headings that precede the section in the
/// document, needed to number duplicate anchors the way GitHub does.
pub fn render_section(index: &Index, doc: &DocumentConfig, preamble_headings: &[String]) -> String {
    let anchors = top_level_anchors(index, doc, preamble_headings);

    let mut blocks: Vec<String> = Vec::new();
    blocks.push(format!("## {}", doc.categories_heading.trim()));
    if !index.categories.is_empty() {
        let toc = index
            .categories
            .iter()
            .zip(&anchors)
            .map(|(category, anchor)| {
                format!("- [{}](#{anchor})", escape_link_text(&category.name))
            })
            .collect::<Vec<_>>()
            .join("\n");
        blocks.push(toc);
    }

    blocks.push(format!("## {}", doc.articles_heading.trim()));
    for category in &index.categories {
        render_category(category, TOP_LEVEL_HEADING, &mut blocks);
    }

    let mut out = blocks.join("\n\n");
    out.push('\n');
    out
}

fn render_category(category: &Category, level: usize, blocks: &mut Vec<String>) {
    blocks.push(format!("{} {}", "#".repeat(level.min(MAX_HEADING)), category.name));

    if !category.articles.is_empty() {
        let list = category
            .articles
            .iter()
            .map(|article| {
                format!(
                    "- [{}]({})",
                    escape_link_text(&article.title),
                    encode_link_target(&article.path)
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        blocks.push(list);
    }

    for sub in &category.subcategories {
        render_category(sub, level + 1, blocks);
    }
}

/// Anchors of the top-level category headings, accounting for every heading
/// that comes before them in the final document.
fn top_level_anchors(
    index: &Index,
    doc: &DocumentConfig,
    preamble_headings: &[String],
) -> Vec<String> {
    let mut registry = AnchorRegistry::new();
    for heading in preamble_headings {
        registry.register(heading);
    }
    registry.register(doc.categories_heading.trim());
    registry.register(doc.articles_heading.trim());

    let mut anchors = Vec::with_capacity(index.categories.len());
    for category in &index.categories {
        anchors.push(registry.register(&category.name));
        register_nested(&mut registry, &category.subcategories);
    }
    anchors
}

fn register_nested(registry: &mut AnchorRegistry, categories: &[Category]) {
    for category in categories {
        registry.register(&category.name);
        register_nested(registry, &category.subcategories);
    }
}
