//! Filesystem scanning.
//!
//! Stage 1 of the index build. Walks the notes root and produces an [`Index`]
//! that the renderer turns into markdown.
//!
//! ## Directory Structure
//!
//! ```text
//! notes/                           # Root (where the tool is run)
//! ├── README.md                    # Target document (root files are never articles)
//! ├── til-index.toml               # Optional config
//! ├── python/                      # Category
//! │   ├── basics.md                # Article
//! │   ├── cheatsheet.pdf           # Not markdown, ignored
//! │   └── advanced/                # Subcategory
//! │       └── metaclasses.md
//! ├── rust/
//! │   └── async/                   # Category with only a subcategory
//! │       └── pinning.md
//! └── .github/                     # Hidden / ignored, skipped
//! ```
//!
//! ## Ordering
//!
//! Folders and files are ordered case-insensitively by name, ties broken by
//! the raw name, so the same tree always yields the same index regardless of
//! what order the filesystem returns entries in.
//!
//! ## Unreadable files
//!
//! A markdown file that cannot be read as UTF-8 is skipped with a warning and
//! recorded in [`Index::skipped`]. One bad note never aborts the run. A
//! directory that cannot be listed is an error.
//!
//! ## Symbolic links
//!
//! Links are followed: a linked note is an article and a linked folder is a
//! category. Broken links are skipped with a warning, and so is a linked
//! folder that points back at one of its own ancestors.
//!
//! The target document itself is never an article, even when `output` places
//! it inside a category folder.

use crate::config::IndexConfig;
use crate::metadata;
use crate::types::{Article, Category, Index};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Root directory not found: {0}")]
    RootNotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Scan `root` for category folders and their markdown articles.
pub fn scan(root: &Path, config: &IndexConfig) -> Result<Index, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::RootNotFound(root.to_path_buf()));
    }

    let mut categories = Vec::new();
    let mut skipped = Vec::new();

    for entry in list_dir(root)? {
        if !is_category_dir(&entry, config) {
            continue;
        }
        if let Some(category) = scan_category(entry.path(), root, config, &mut skipped)? {
            categories.push(category);
        }
    }

    let index = Index {
        categories,
        skipped,
    };
    info!(
        root = %root.display(),
        categories = index.category_count(),
        articles = index.article_count(),
        skipped = index.skipped.len(),
        "scan complete"
    );
    Ok(index)
}

fn scan_category(
    path: &Path,
    root: &Path,
    config: &IndexConfig,
    skipped: &mut Vec<String>,
) -> Result<Option<Category>, ScanError> {
    let mut articles = Vec::new();
    let mut subcategories = Vec::new();
    let output_key = config.output_key();

    for entry in list_dir(path)? {
        if is_category_dir(&entry, config) {
            if let Some(sub) = scan_category(entry.path(), root, config, skipped)? {
                subcategories.push(sub);
            }
        } else if is_article(&entry, config) {
            let rel = relative_path(entry.path(), root);
            if rel == output_key {
                debug!(path = %rel, "skipping target document");
                continue;
            }
            match read_article(entry.path(), rel.clone()) {
                Some(article) => articles.push(article),
                None => skipped.push(rel),
            }
        }
    }

    let category = Category {
        name: file_name(path),
        path: relative_path(path, root),
        articles,
        subcategories,
    };

    if config.skip_empty_categories && category.article_count() == 0 {
        debug!(category = %category.path, "skipping empty category");
        return Ok(None);
    }

    debug!(
        category = %category.path,
        articles = category.articles.len(),
        subcategories = category.subcategories.len(),
        "scanned category"
    );
    Ok(Some(category))
}

/// Read an article and resolve its title. `None` when the file is unreadable.
fn read_article(path: &Path, rel: String) -> Option<Article> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(path = %rel, error = %e, "skipping unreadable file");
            return None;
        }
    };
    let content = match String::from_utf8(bytes) {
        Ok(content) => content,
        Err(e) => {
            warn!(path = %rel, error = %e, "skipping file that is not valid UTF-8");
            return None;
        }
    };
    let content = content.strip_prefix('\u{feff}').unwrap_or(&content);

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let (title, title_source) = metadata::resolve_title(content, &stem);

    Some(Article {
        title,
        path: rel,
        title_source,
    })
}

/// Direct children of `path`, in index order, with symlinks resolved.
fn list_dir(path: &Path) -> Result<Vec<DirEntry>, ScanError> {
    let walker = WalkDir::new(path)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));

    let mut entries = Vec::new();
    for entry in walker {
        match entry {
            Ok(entry) => entries.push(entry),
            Err(e) if e.loop_ancestor().is_some() => {
                warn!(path = ?e.path(), "skipping symlink loop");
            }
            Err(e) if is_broken_link(&e) => {
                warn!(path = ?e.path(), "skipping broken symlink");
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(entries)
}

fn is_broken_link(err: &walkdir::Error) -> bool {
    err.io_error()
        .is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound)
        && err
            .path()
            .is_some_and(|p| fs::symlink_metadata(p).is_ok_and(|m| m.file_type().is_symlink()))
}

/// Whether a symlinked directory resolves to one of its own ancestors.
fn links_to_ancestor(entry: &DirEntry) -> bool {
    let target = fs::canonicalize(entry.path());
    let parent = entry.path().parent().map(fs::canonicalize);
    match (target, parent) {
        (Ok(target), Some(Ok(parent))) if !parent.starts_with(&target) => false,
        _ => {
            warn!(path = %entry.path().display(), "skipping symlink to an ancestor folder");
            true
        }
    }
}

fn sort_key(entry: &DirEntry) -> (String, String) {
    let name = entry.file_name().to_string_lossy();
    (name.to_lowercase(), name.into_owned())
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

fn is_category_dir(entry: &DirEntry, config: &IndexConfig) -> bool {
    entry.file_type().is_dir()
        && !is_hidden(entry)
        && !config.is_ignored_dir(&entry.file_name().to_string_lossy())
        && !(entry.path_is_symlink() && links_to_ancestor(entry))
}

fn is_article(entry: &DirEntry, config: &IndexConfig) -> bool {
    entry.file_type().is_file()
        && !is_hidden(entry)
        && !config.is_ignored_file(&entry.file_name().to_string_lossy())
        && entry
            .path()
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Root-relative, `/`-separated path.
fn relative_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
