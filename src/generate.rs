//! Target document generation.
//!
//! Stage 3 of the index build: scan the root, render the document, and write
//! it. Nothing is written until the scan and render have both succeeded, so a
//! failed run (missing root, unreadable directory, broken existing document)
//! leaves the previous document untouched.
//!
//! An existing document is replaced through a temporary file in the same
//! directory that is renamed over it, which never leaves a half-written
//! README behind. When the rendered bytes match the existing ones the file is
//! left alone.

use crate::config::{ConfigError, IndexConfig};
use crate::render;
use crate::scan::{self, ScanError};
use crate::types::Index;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Could not read existing document {path}: {source}")]
    ReadExisting {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Could not replace {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: tempfile::PersistError,
    },
}

/// What happened (or would happen) to the target document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentStatus {
    /// The document did not exist.
    Created,
    /// The document existed with different content.
    Updated,
    /// The document already matched the rendered content.
    Unchanged,
}

/// Outcome of a generate or check run.
#[derive(Debug)]
pub struct GenerateResult {
    pub index: Index,
    pub output_path: PathBuf,
    pub status: DocumentStatus,
}

impl GenerateResult {
    /// Whether the document on disk matches the rendered index.
    pub fn is_up_to_date(&self) -> bool {
        self.status == DocumentStatus::Unchanged
    }
}

/// A rendered document that has not been written yet.
struct Plan {
    index: Index,
    output_path: PathBuf,
    existing: Option<String>,
    rendered: String,
}

impl Plan {
    fn status(&self) -> DocumentStatus {
        match &self.existing {
            None => DocumentStatus::Created,
            Some(existing) if *existing == self.rendered => DocumentStatus::Unchanged,
            Some(_) => DocumentStatus::Updated,
        }
    }
}

fn plan(root: &Path, config: &IndexConfig) -> Result<Plan, GenerateError> {
    config.validate()?;
    let index = scan::scan(root, config)?;
    let output_path = root.join(&config.output);

    let existing = match fs::read_to_string(&output_path) {
        Ok(content) => Some(content),
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(source) => {
            return Err(GenerateError::ReadExisting {
                path: output_path,
                source,
            });
        }
    };

    let rendered = render::render_document(existing.as_deref(), &index, &config.document);
    Ok(Plan {
        index,
        output_path,
        existing,
        rendered,
    })
}

/// Scan `root` and write the target document.
pub fn generate(root: &Path, config: &IndexConfig) -> Result<GenerateResult, GenerateError> {
    let plan = plan(root, config)?;
    let status = plan.status();

    match status {
        DocumentStatus::Unchanged => {
            debug!(path = %plan.output_path.display(), "document already up to date");
        }
        DocumentStatus::Created => {
            fs::write(&plan.output_path, &plan.rendered)?;
            info!(path = %plan.output_path.display(), "document created");
        }
        DocumentStatus::Updated => {
            replace_file(&plan.output_path, &plan.rendered)?;
            info!(path = %plan.output_path.display(), "document updated");
        }
    }

    Ok(GenerateResult {
        index: plan.index,
        output_path: plan.output_path,
        status,
    })
}

/// Scan `root` and report whether the target document is up to date,
/// without writing anything.
pub fn check(root: &Path, config: &IndexConfig) -> Result<GenerateResult, GenerateError> {
    let plan = plan(root, config)?;
    let status = plan.status();
    Ok(GenerateResult {
        index: plan.index,
        output_path: plan.output_path,
        status,
    })
}

/// Atomically replace an existing file, keeping its permissions.
fn replace_file(path: &Path, content: &str) -> Result<(), GenerateError> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let permissions = fs::metadata(path)?.permissions();

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.as_file().sync_all()?;
    fs::set_permissions(tmp.path(), permissions)?;

    tmp.persist(path).map_err(|source| GenerateError::Persist {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}
