//! Summary of a finished run

use crate::batch::{GenerationOutcome, StopReason};
use crate::schema::SchemaKind;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub size_bytes: u64,
    /// Size formatted as `"x.xx MB"`
    pub size: String,
    pub rows: u64,
    pub columns: usize,
    pub schema: SchemaKind,
    pub stop_reason: StopReason,
}

impl FileReport {
    /// Stat the saved file and combine it with the generation outcome
    pub fn from_output(
        path: &Path,
        schema: SchemaKind,
        outcome: &GenerationOutcome,
    ) -> Result<Self> {
        let size_bytes = fs::metadata(path)
            .with_context(|| format!("Failed to get file size: {}", path.display()))?
            .len();

        Ok(Self {
            path: path.to_path_buf(),
            size_bytes,
            size: format_file_size(size_bytes),
            rows: outcome.rows,
            columns: outcome.columns,
            schema,
            stop_reason: outcome.stop_reason,
        })
    }
}

/// Bytes as MB with two decimals
pub fn format_file_size(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
}
