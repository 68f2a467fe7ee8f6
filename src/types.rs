//! Shared types produced by the scan stage and consumed by rendering and output.
//!
//! The whole model is rebuilt on every run. It serializes to JSON so that
//! `til-index scan --json` can dump exactly what the renderer will see.

use serde::Serialize;

/// The scanned notes tree: top-level categories plus files that were skipped.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Index {
    pub categories: Vec<Category>,
    /// Root-relative paths of markdown files that could not be read as text.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<String>,
}

impl Index {
    /// Total number of articles at any depth.
    pub fn article_count(&self) -> usize {
        self.categories.iter().map(Category::article_count).sum()
    }

    /// Total number of categories at any depth.
    pub fn category_count(&self) -> usize {
        self.categories.iter().map(Category::category_count).sum()
    }
}

/// A topic folder.
///
/// Categories nest to arbitrary depth. A category with no direct articles is
/// still a category: it keeps its heading as long as it exists on disk.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    /// Folder name, used verbatim as the heading text.
    pub name: String,
    /// Path relative to the scan root, `/`-separated.
    pub path: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub articles: Vec<Article>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subcategories: Vec<Category>,
}

impl Category {
    /// Articles in this category and all of its subcategories.
    pub fn article_count(&self) -> usize {
        self.articles.len()
            + self
                .subcategories
                .iter()
                .map(Category::article_count)
                .sum::<usize>()
    }

    /// This category plus every nested subcategory.
    pub fn category_count(&self) -> usize {
        1 + self
            .subcategories
            .iter()
            .map(Category::category_count)
            .sum::<usize>()
    }
}

/// A single markdown note.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Article {
    /// Display title, see [`crate::metadata::resolve_title`].
    pub title: String,
    /// Path relative to the scan root, `/`-separated. Used as the link target.
    pub path: String,
    /// Where the title came from.
    pub title_source: TitleSource,
}

/// Which source produced an article's display title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleSource {
    /// `title:` key in a leading YAML front matter block.
    FrontMatter,
    /// First heading in the markdown body.
    Heading,
    /// File stem, used when the content has neither.
    Filename,
}
