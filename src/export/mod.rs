//! Saving generated documents.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::info;

use crate::error::StorageResult;

/// Extension used for exported documents.
pub const MARKDOWN_EXTENSION: &str = "md";

/// `<template name>_<YYYY-MM-DD>.md`, with path separators in the name replaced.
pub fn file_name(template_name: &str, date: DateTime<Utc>) -> String {
    let safe: String = template_name
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '-' } else { c })
        .collect();
    format!(
        "{}_{}.{}",
        safe.trim(),
        date.format("%Y-%m-%d"),
        MARKDOWN_EXTENSION
    )
}

/// Write `document` into `dir`, creating the directory if needed.
pub fn write_document(
    dir: &Path,
    template_name: &str,
    document: &str,
    date: DateTime<Utc>,
) -> StorageResult<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(file_name(template_name, date));
    std::fs::write(&path, document)?;
    info!(path = %path.display(), bytes = document.len(), "Document exported");
    Ok(path)
}
