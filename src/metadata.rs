//! Article title extraction and resolution.
//!
//! An article's display title can come from three places:
//!
//! - **Front matter**: a `title:` key in a leading YAML block.
//!
//!   ```markdown
//!   ---
//!   title: Lifetimes in practice
//!   ---
//!   ```
//!
//! - **Heading**: the first heading of the body, any level, ATX (`# Title`) or
//!   setext (`Title` underlined with `===`). The body is parsed with
//!   `pulldown-cmark`, so a `# comment` line inside a fenced code block is not
//!   mistaken for a heading. Inline markup contributes its text only:
//!   `# Using *Box<T>*` becomes "Using Box<T>".
//!
//! - **Filename**: the file stem, verbatim (`smart-pointers.md` → "smart-pointers").
//!
//! ## Resolution priority
//!
//! The first non-empty value wins: front matter → heading → filename.
//! Front matter is an explicit statement by the author, so it beats whatever
//! the body happens to start with.

use crate::types::TitleSource;
use pulldown_cmark::{Event, MetadataBlockKind, Options, Parser, Tag, TagEnd};

/// Title candidates found in a markdown document.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ContentMetadata {
    pub front_matter_title: Option<String>,
    pub heading: Option<String>,
}

/// Resolve a metadata field from multiple sources.
///
/// Takes a list of optional values in priority order and returns the index
/// and trimmed value of the first non-empty one.
pub fn resolve<'a>(sources: &[Option<&'a str>]) -> Option<(usize, &'a str)> {
    sources.iter().enumerate().find_map(|(i, opt)| {
        opt.map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| (i, s))
    })
}

/// Pull the front matter title and first heading out of markdown content.
pub fn extract(content: &str) -> ContentMetadata {
    let parser = Parser::new_ext(content, Options::ENABLE_YAML_STYLE_METADATA_BLOCKS);

    let mut meta = ContentMetadata::default();
    let mut front_matter = String::new();
    let mut in_front_matter = false;
    let mut heading_buf: Option<String> = None;

    for event in parser {
        match event {
            Event::Start(Tag::MetadataBlock(MetadataBlockKind::YamlStyle)) => {
                in_front_matter = true;
            }
            Event::End(TagEnd::MetadataBlock(_)) => {
                in_front_matter = false;
                meta.front_matter_title = front_matter_title(&front_matter);
            }
            Event::Start(Tag::Heading { .. }) => heading_buf = Some(String::new()),
            Event::End(TagEnd::Heading(_)) => {
                if let Some(text) = heading_buf.take() {
                    let text = text.trim();
                    if !text.is_empty() {
                        meta.heading = Some(text.to_string());
                        break;
                    }
                }
            }
            Event::Text(text) => {
                if in_front_matter {
                    front_matter.push_str(&text);
                } else if let Some(buf) = heading_buf.as_mut() {
                    buf.push_str(&text);
                }
            }
            Event::Code(code) => {
                if let Some(buf) = heading_buf.as_mut() {
                    buf.push_str(&code_span(&code));
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some(buf) = heading_buf.as_mut() {
                    buf.push(' ');
                }
            }
            _ => {}
        }
    }

    meta
}

/// Text of every heading in the document, in order.
pub fn heading_texts(content: &str) -> Vec<String> {
    let parser = Parser::new_ext(content, Options::ENABLE_YAML_STYLE_METADATA_BLOCKS);
    let mut headings = Vec::new();
    let mut current: Option<String> = None;

    for event in parser {
        match event {
            Event::Start(Tag::Heading { .. }) => current = Some(String::new()),
            Event::End(TagEnd::Heading(_)) => {
                if let Some(text) = current.take() {
                    headings.push(text.trim().to_string());
                }
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some(buf) = current.as_mut() {
                    buf.push_str(&text);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some(buf) = current.as_mut() {
                    buf.push(' ');
                }
            }
            _ => {}
        }
    }

    headings
}

/// Re-wrap inline code in a backtick fence long enough for its content.
fn code_span(code: &str) -> String {
    let longest = code
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    let fence = "`".repeat(longest + 1);
    if code.starts_with('`') || code.ends_with('`') {
        format!("{fence} {code} {fence}")
    } else {
        format!("{fence}{code}{fence}")
    }
}

/// Find a top-level `title:` key in a YAML front matter body.
fn front_matter_title(yaml: &str) -> Option<String> {
    yaml.lines()
        .find_map(|line| line.strip_prefix("title:"))
        .map(|value| strip_quotes(value.trim()).to_string())
        .filter(|value| !value.is_empty())
}

fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

/// Resolve the display title of an article from its content and file stem.
pub fn resolve_title(content: &str, stem: &str) -> (String, TitleSource) {
    let meta = extract(content);
    let sources = [
        meta.front_matter_title.as_deref(),
        meta.heading.as_deref(),
        Some(stem),
    ];
    match resolve(&sources) {
        Some((0, title)) => (title.to_string(), TitleSource::FrontMatter),
        Some((1, title)) => (title.to_string(), TitleSource::Heading),
        _ => (stem.to_string(), TitleSource::Filename),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // resolve() tests
    // =========================================================================

    #[test]
    fn resolve_first_non_empty_wins() {
        assert_eq!(resolve(&[None, Some("b"), Some("c")]), Some((1, "b")));
    }

    #[test]
    fn resolve_skips_blank_values() {
        assert_eq!(resolve(&[Some("   "), Some(" c ")]), Some((1, "c")));
    }

    #[test]
    fn resolve_all_empty_is_none() {
        assert_eq!(resolve(&[None, Some("")]), None);
    }

    // =========================================================================
    // extract() tests
    // =========================================================================

    #[test]
    fn extracts_atx_heading() {
        let meta = extract("# Decorators\n\nbody text");
        assert_eq!(meta.heading.as_deref(), Some("Decorators"));
        assert_eq!(meta.front_matter_title, None);
    }

    #[test]
    fn extracts_first_heading_of_any_level() {
        let meta = extract("intro paragraph\n\n### Deep one\n\n# Later");
        assert_eq!(meta.heading.as_deref(), Some("Deep one"));
    }

    #[test]
    fn extracts_setext_heading() {
        let meta = extract("Ownership rules\n===============\n\ntext");
        assert_eq!(meta.heading.as_deref(), Some("Ownership rules"));
    }

    #[test]
    fn heading_drops_emphasis_but_keeps_code_spans() {
        let meta = extract("# Using *boxed* `Box<T>` values\n");
        assert_eq!(meta.heading.as_deref(), Some("Using boxed `Box<T>` values"));
    }

    #[test]
    fn code_span_fence_outgrows_inner_backticks() {
        assert_eq!(code_span("Vec<u8>"), "`Vec<u8>`");
        assert_eq!(code_span("a `b` c"), "``a `b` c``");
        assert_eq!(code_span("`tick"), "`` `tick ``");
    }

    #[test]
    fn hash_inside_code_fence_is_not_a_heading() {
        let meta = extract("```sh\n# not a title\n```\n\nNo heading here.");
        assert_eq!(meta.heading, None);
    }

    #[test]
    fn empty_heading_is_skipped() {
        let meta = extract("#\n\n## Real title\n");
        assert_eq!(meta.heading.as_deref(), Some("Real title"));
    }

    #[test]
    fn extracts_front_matter_title() {
        let meta = extract("---\ntitle: \"Pinning futures\"\ntags: [rust]\n---\n\n# Heading\n");
        assert_eq!(meta.front_matter_title.as_deref(), Some("Pinning futures"));
        assert_eq!(meta.heading.as_deref(), Some("Heading"));
    }

    #[test]
    fn front_matter_without_title() {
        let meta = extract("---\ntags: [rust]\n---\n\nplain text\n");
        assert_eq!(meta.front_matter_title, None);
        assert_eq!(meta.heading, None);
    }

    #[test]
    fn heading_texts_lists_all_headings_in_order() {
        let headings = heading_texts("# TIL\n\nintro\n\n## Setup\n\n```\n# no\n```\n\n### Usage `cli`\n");
        assert_eq!(headings, vec!["TIL", "Setup", "Usage cli"]);
    }

    #[test]
    fn heading_texts_empty_document() {
        assert!(heading_texts("").is_empty());
    }

    #[test]
    fn strip_quotes_handles_both_styles() {
        assert_eq!(strip_quotes("'single'"), "single");
        assert_eq!(strip_quotes("\"double\""), "double");
        assert_eq!(strip_quotes("\"mismatched'"), "\"mismatched'");
    }

    // =========================================================================
    // resolve_title() tests
    // =========================================================================

    #[test]
    fn title_prefers_front_matter() {
        let (title, source) = resolve_title("---\ntitle: From meta\n---\n\n# From heading\n", "stem");
        assert_eq!(title, "From meta");
        assert_eq!(source, TitleSource::FrontMatter);
    }

    #[test]
    fn title_falls_back_to_heading() {
        let (title, source) = resolve_title("## Iterators\n", "iterators");
        assert_eq!(title, "Iterators");
        assert_eq!(source, TitleSource::Heading);
    }

    #[test]
    fn title_falls_back_to_filename() {
        let (title, source) = resolve_title("just some notes\n", "smart-pointers");
        assert_eq!(title, "smart-pointers");
        assert_eq!(source, TitleSource::Filename);
    }

    #[test]
    fn empty_file_uses_filename() {
        let (title, source) = resolve_title("", "empty");
        assert_eq!(title, "empty");
        assert_eq!(source, TitleSource::Filename);
    }
}
