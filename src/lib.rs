//! # til-index
//!
//! Regenerates the table of contents of a "Today I Learned" notes repository.
//! Your folder tree is the data source: top-level folders become categories,
//! nested folders become subcategories, and markdown files become articles.
//!
//! # Architecture: Three Stages
//!
//! ```text
//! 1. Scan      notes/  →  Index      (filesystem → category tree)
//! 2. Render    Index   →  markdown   (pure, byte-for-byte deterministic)
//! 3. Generate  markdown → README.md  (splice between markers, atomic replace)
//! ```
//!
//! Rendering is a pure function of the index and the existing document, so
//! running the tool twice on an unchanged tree produces the same bytes and the
//! second run leaves the file alone.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Walks the root, builds the [`types::Index`], skips unreadable notes |
//! | [`metadata`] | Article titles: front matter, first heading, or filename |
//! | [`naming`] | GitHub-compatible heading anchors and link escaping |
//! | [`render`] | Markdown for the generated section, splicing into the document |
//! | [`generate`] | Reads the existing document, writes the new one, check mode |
//! | [`config`] | Optional `til-index.toml` loading, merging, and validation |
//! | [`types`] | The index model shared by every stage |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Markers, Not Templates
//!
//! The generated listing lives between two HTML comments. Everything outside
//! them belongs to the author and is copied through verbatim, so the README
//! can carry a hand-written introduction, badges, or a license footer without
//! a separate template file. A README without markers is adopted as-is: its
//! whole content becomes the preamble and the listing is appended.
//!
//! ## Case-Insensitive Name Ordering
//!
//! Folders and files are sorted by lowercased name with the raw name as a tie
//! breaker. Filesystem listing order differs across platforms; the index must
//! not.
//!
//! ## No Version Control Awareness
//!
//! The tool only reads the tree and writes one file. Committing the result is
//! the job of whatever runs it (typically a CI workflow on push). `til-index
//! check` exits non-zero when the README is stale, for pipelines that prefer
//! failing over committing.

pub mod config;
pub mod generate;
pub mod metadata;
pub mod naming;
pub mod output;
pub mod render;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
