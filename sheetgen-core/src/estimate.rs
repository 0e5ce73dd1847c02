//! Byte-size heuristics for the size-targeting loop
//!
//! Two estimators coexist. The projection (15 bytes per cell) sizes the
//! progress display before generation starts; the running estimate (20 bytes
//! per cell) decides when to stop. Neither tracks the real compressed size,
//! which is only known once the file is saved, so generated files land near
//! the target rather than on it.

pub const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Per-cell cost used to project the total row count
pub const PROJECTED_BYTES_PER_CELL: u64 = 15;

/// Per-cell cost used by the stop condition
pub const RUNNING_BYTES_PER_CELL: u64 = 20;

/// Target size in MB as a byte budget
pub fn target_bytes(target_mb: f64) -> u64 {
    (target_mb * BYTES_PER_MB).ceil() as u64
}

/// Rows expected to fill `target_bytes`, capped at `max_rows`
pub fn projected_rows(target_bytes: u64, columns: usize, max_rows: u64) -> u64 {
    let per_row = (columns as u64 * PROJECTED_BYTES_PER_CELL).max(1);
    (target_bytes / per_row).min(max_rows)
}

/// Running size estimate after `rows` rows
pub fn estimated_bytes(rows: u64, columns: usize) -> u64 {
    rows * columns as u64 * RUNNING_BYTES_PER_CELL
}
