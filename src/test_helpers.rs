//! Shared test utilities for the til-index test suite.
//!
//! Provides fixture setup, lookup helpers, bulk extractors, and a tree-shape
//! assertion that work with the scan-stage data structures
//! (`Index`, `Category`, `Article`).
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let index = scan(tmp.path(), &IndexConfig::default()).unwrap();
//!
//! let python = find_category(&index, "python");
//! assert_eq!(article_titles(python), vec!["Python basics", "list-tricks"]);
//!
//! assert_tree_shape(&index, &[
//!     ("javascript", &[]),
//!     ("python", &["advanced"]),
//!     ("rust", &["async"]),
//! ]);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::types::{Article, Category, Index};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/notes/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/notes");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Write a note at a root-relative path, creating parent folders.
pub fn write_note(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

// =========================================================================
// Index lookups (panic with the available names on miss)
// =========================================================================

/// Find a top-level category by name. Panics if not found.
pub fn find_category<'a>(index: &'a Index, name: &str) -> &'a Category {
    index
        .categories
        .iter()
        .find(|c| c.name == name)
        .unwrap_or_else(|| {
            let names = category_names(index);
            panic!("category '{name}' not found. Available: {names:?}")
        })
}

/// Find a direct subcategory by name. Panics if not found.
pub fn find_subcategory<'a>(category: &'a Category, name: &str) -> &'a Category {
    category
        .subcategories
        .iter()
        .find(|c| c.name == name)
        .unwrap_or_else(|| {
            let names = subcategory_names(category);
            panic!(
                "subcategory '{name}' not found in '{}'. Available: {names:?}",
                category.name
            )
        })
}

/// Find a direct article by root-relative path. Panics if not found.
pub fn find_article<'a>(category: &'a Category, path: &str) -> &'a Article {
    category
        .articles
        .iter()
        .find(|a| a.path == path)
        .unwrap_or_else(|| {
            let paths: Vec<&str> = category.articles.iter().map(|a| a.path.as_str()).collect();
            panic!(
                "article '{path}' not found in '{}'. Available: {paths:?}",
                category.name
            )
        })
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// Top-level category names in index order.
pub fn category_names(index: &Index) -> Vec<&str> {
    index.categories.iter().map(|c| c.name.as_str()).collect()
}

/// Direct subcategory names in index order.
pub fn subcategory_names(category: &Category) -> Vec<&str> {
    category
        .subcategories
        .iter()
        .map(|c| c.name.as_str())
        .collect()
}

/// Direct article titles in index order.
pub fn article_titles(category: &Category) -> Vec<&str> {
    category.articles.iter().map(|a| a.title.as_str()).collect()
}

/// Assert that the top two levels of the category tree match an expected shape.
///
/// Each entry is `(category, subcategories)`. Use `&[]` for leaf categories.
pub fn assert_tree_shape(index: &Index, expected: &[(&str, &[&str])]) {
    let expected_names: Vec<&str> = expected.iter().map(|(n, _)| *n).collect();
    assert_eq!(
        category_names(index),
        expected_names,
        "top-level categories mismatch"
    );

    for (name, subs) in expected {
        let actual = subcategory_names(find_category(index, name));
        assert_eq!(actual, subs.to_vec(), "subcategories of '{name}' mismatch");
    }
}
