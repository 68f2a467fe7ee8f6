//! CLI output formatting.
//!
//! # Information-First Display
//!
//! The primary display for every entity (category, article) is its semantic
//! identity: positional index and name or title. Filesystem paths follow as
//! indented `Source:` context lines, so the output reads as a content
//! inventory while still pointing back at the files.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Categories
//! 001 python (3 articles)
//!     Source: python/
//!     001 Python basics
//!         Source: python/basics.md
//!     002 list-tricks
//!         Source: python/list-tricks.md
//!         Title: from filename
//!     001 advanced (1 article)
//!         Source: python/advanced/
//!         001 Metaclasses
//!             Source: python/advanced/metaclasses.md
//!
//! Skipped (unreadable)
//!     rust/broken.md
//! ```
//!
//! ## Generate
//!
//! ```text
//! Updated README.md (4 categories, 6 articles)
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::generate::{DocumentStatus, GenerateResult};
use crate::types::{Category, Index, TitleSource};
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, singular: &str, plural: &str) -> String {
    if n == 1 {
        format!("{n} {singular}")
    } else {
        format!("{n} {plural}")
    }
}

/// Format a category header: positional index, name, and recursive article count.
///
/// ```text
/// 001 python (3 articles)
/// ```
fn category_header(index: usize, category: &Category) -> String {
    format!(
        "{} {} ({})",
        format_index(index),
        category.name,
        plural(category.article_count(), "article", "articles")
    )
}

fn format_category(category: &Category, position: usize, depth: usize, lines: &mut Vec<String>) {
    let base = indent(depth);
    let inner = indent(depth + 1);
    let detail = indent(depth + 2);

    lines.push(format!("{base}{}", category_header(position, category)));
    lines.push(format!("{inner}Source: {}/", category.path));

    for (i, article) in category.articles.iter().enumerate() {
        lines.push(format!("{inner}{} {}", format_index(i + 1), article.title));
        lines.push(format!("{detail}Source: {}", article.path));
        match article.title_source {
            TitleSource::Heading => {}
            TitleSource::FrontMatter => lines.push(format!("{detail}Title: from front matter")),
            TitleSource::Filename => lines.push(format!("{detail}Title: from filename")),
        }
    }

    for (i, sub) in category.subcategories.iter().enumerate() {
        format_category(sub, i + 1, depth + 1, lines);
    }
}

/// Format the discovered category tree.
pub fn format_scan_output(index: &Index, root: &Path) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Categories".to_string());
    if index.categories.is_empty() {
        lines.push(format!("    (no category folders in {})", root.display()));
    }
    for (i, category) in index.categories.iter().enumerate() {
        format_category(category, i + 1, 0, &mut lines);
    }

    if !index.skipped.is_empty() {
        lines.push(String::new());
        lines.push("Skipped (unreadable)".to_string());
        for path in &index.skipped {
            lines.push(format!("    {path}"));
        }
    }

    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(index: &Index, root: &Path) {
    for line in format_scan_output(index, root) {
        println!("{}", line);
    }
}

fn summary(index: &Index) -> String {
    format!(
        "{}, {}",
        plural(index.category_count(), "category", "categories"),
        plural(index.article_count(), "article", "articles")
    )
}

fn skipped_lines(index: &Index) -> Vec<String> {
    index
        .skipped
        .iter()
        .map(|path| format!("    skipped {path} (unreadable)"))
        .collect()
}

/// Format the result of writing the target document.
pub fn format_generate_output(result: &GenerateResult, display_name: &str) -> Vec<String> {
    let verb = match result.status {
        DocumentStatus::Created => "Created",
        DocumentStatus::Updated => "Updated",
        DocumentStatus::Unchanged => "Unchanged",
    };
    let mut lines = vec![format!("{verb} {display_name} ({})", summary(&result.index))];
    lines.extend(skipped_lines(&result.index));
    lines
}

/// Print generate output to stdout.
pub fn print_generate_output(result: &GenerateResult, display_name: &str) {
    for line in format_generate_output(result, display_name) {
        println!("{}", line);
    }
}

/// Format the result of a check run.
pub fn format_check_output(result: &GenerateResult, display_name: &str) -> Vec<String> {
    let mut lines = if result.is_up_to_date() {
        vec![format!(
            "{display_name} is up to date ({})",
            summary(&result.index)
        )]
    } else {
        vec![format!(
            "{display_name} is out of date; run `til-index` to regenerate it"
        )]
    };
    lines.extend(skipped_lines(&result.index));
    lines
}

/// Print check output to stdout.
pub fn print_check_output(result: &GenerateResult, display_name: &str) {
    for line in format_check_output(result, display_name) {
        println!("{}", line);
    }
}
