//! Index configuration.
//!
//! Handles loading, validating, and merging the optional `til-index.toml` in
//! the notes root. Every key has a stock default, so a repository without the
//! file works out of the box.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! output = "README.md"             # Target document, relative to the root
//! ignore_dirs = [".git", ".github", "scripts", "__pycache__", "node_modules", "target"]
//! ignore_files = ["README.md"]     # File names never listed as articles
//! skip_empty_categories = false    # Drop folders without any markdown inside
//!
//! [document]
//! start_marker = "<!-- til-index:start -->"
//! end_marker = "<!-- til-index:end -->"
//! categories_heading = "Categories"
//! articles_heading = "Articles"
//! preamble = """..."""             # Used only when the target does not exist yet
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! ignore_dirs = [".git", "drafts"]
//!
//! [document]
//! articles_heading = "Notes"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path};
use thiserror::Error;

/// File name of the config file looked up in the notes root.
pub const CONFIG_FILENAME: &str = "til-index.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Index configuration loaded from `til-index.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndexConfig {
    /// Target document, relative to the notes root.
    pub output: String,
    /// Directory names skipped at every depth.
    pub ignore_dirs: Vec<String>,
    /// File names skipped at every depth.
    pub ignore_files: Vec<String>,
    /// Drop categories that contain no article at any depth.
    pub skip_empty_categories: bool,
    /// Layout of the generated document.
    pub document: DocumentConfig,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            output: "README.md".to_string(),
            ignore_dirs: [
                ".git",
                ".github",
                "scripts",
                "__pycache__",
                "node_modules",
                "target",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            ignore_files: vec!["README.md".to_string()],
            skip_empty_categories: false,
            document: DocumentConfig::default(),
        }
    }
}

impl IndexConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output.trim().is_empty() {
            return Err(ConfigError::Validation("output must not be empty".into()));
        }
        let output = Path::new(&self.output);
        if output.file_name().is_none()
            || output
                .components()
                .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(ConfigError::Validation(format!(
                "output must be a file path inside the notes root, got '{}'",
                self.output
            )));
        }
        let doc = &self.document;
        for (key, marker) in [
            ("document.start_marker", &doc.start_marker),
            ("document.end_marker", &doc.end_marker),
        ] {
            if marker.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
            if marker.contains('\n') {
                return Err(ConfigError::Validation(format!(
                    "{key} must be a single line"
                )));
            }
        }
        if doc.start_marker.trim() == doc.end_marker.trim() {
            return Err(ConfigError::Validation(
                "document.start_marker and document.end_marker must differ".into(),
            ));
        }
        if doc.categories_heading.trim().is_empty() || doc.articles_heading.trim().is_empty() {
            return Err(ConfigError::Validation(
                "document headings must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// The target document as a root-relative, `/`-separated path.
    ///
    /// Scanned files are compared against this so a target placed inside a
    /// category folder is never listed as an article.
    pub fn output_key(&self) -> String {
        Path::new(&self.output)
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Whether a directory name is excluded from the scan.
    pub fn is_ignored_dir(&self, name: &str) -> bool {
        self.ignore_dirs.iter().any(|d| d == name)
    }

    /// Whether a file name is excluded from the scan.
    pub fn is_ignored_file(&self, name: &str) -> bool {
        self.ignore_files.iter().any(|f| f == name)
    }
}

/// Layout of the generated document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocumentConfig {
    /// Line that opens the generated section.
    pub start_marker: String,
    /// Line that closes the generated section.
    pub end_marker: String,
    /// Heading of the top-level category list.
    pub categories_heading: String,
    /// Heading above the per-category article listings.
    pub articles_heading: String,
    /// Hand-written header for a document that does not exist yet.
    pub preamble: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            start_marker: "<!-- til-index:start -->".to_string(),
            end_marker: "<!-- til-index:end -->".to_string(),
            categories_heading: "Categories".to_string(),
            articles_heading: "Articles".to_string(),
            preamble: DEFAULT_PREAMBLE.to_string(),
        }
    }
}

const DEFAULT_PREAMBLE: &str = "# TIL (Today I Learned)

Short notes on things learned day to day.

These are personal study notes; accuracy is not guaranteed.

The listing below is generated. Edit the notes, not the listing.
";

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(IndexConfig::default())
        .map_err(|e| ConfigError::Validation(format!("stock defaults do not serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely, so a list
///   like `ignore_dirs` is replaced, not appended to.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.is_file() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto the stock defaults, then deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<IndexConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: IndexConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from an explicit file path (stock defaults if it doesn't exist).
pub fn load_config_file(path: &Path) -> Result<IndexConfig, ConfigError> {
    resolve_config(load_raw_config(path)?)
}

/// Load config from `til-index.toml` in the given root directory.
pub fn load_config(root: &Path) -> Result<IndexConfig, ConfigError> {
    load_config_file(&root.join(CONFIG_FILENAME))
}

/// Returns a fully-commented stock `til-index.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# til-index Configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# Target document, relative to the notes root. Links in the generated
# listing are relative to the root, so keep the document there.
output = "README.md"

# Directory names skipped at every depth. Names starting with "." are
# always skipped.
ignore_dirs = [".git", ".github", "scripts", "__pycache__", "node_modules", "target"]

# File names never listed as articles.
ignore_files = ["README.md"]

# Drop category folders that contain no markdown file at any depth.
skip_empty_categories = false

# ---------------------------------------------------------------------------
# Generated document
# ---------------------------------------------------------------------------
[document]
# The generated listing lives between these two lines. Everything above the
# start marker and below the end marker is preserved verbatim.
start_marker = "<!-- til-index:start -->"
end_marker = "<!-- til-index:end -->"

categories_heading = "Categories"
articles_heading = "Articles"

# Header written only when the target document does not exist yet.
preamble = """
# TIL (Today I Learned)

Short notes on things learned day to day.

These are personal study notes; accuracy is not guaranteed.

The listing below is generated. Edit the notes, not the listing.
"""
"##
}
