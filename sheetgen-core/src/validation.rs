//! Validators for user supplied answers
//!
//! Every validator returns the parsed value or a message suitable for
//! showing back to the user before asking again.

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// Largest accepted target size, in MB
pub const MAX_TARGET_MB: f64 = 1000.0;

/// Largest accepted row cap
pub const MAX_ROWS_LIMIT: u64 = 10_000_000;

pub const XLSX_EXTENSION: &str = ".xlsx";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a number greater than 0.")]
    NotPositiveNumber,

    #[error("Please enter a size of at most 1000MB (1GB).")]
    SizeTooLarge,

    #[error("Please enter an integer greater than 0.")]
    NotPositiveInteger,

    #[error("Please enter at most 10,000,000 rows.")]
    TooManyRows,

    #[error("Please enter a file name.")]
    EmptyFileName,

    #[error("File names cannot contain any of < > : \" / \\ | ? *")]
    ForbiddenCharacter,
}

fn forbidden_chars() -> &'static Regex {
    static FORBIDDEN: OnceLock<Regex> = OnceLock::new();
    FORBIDDEN.get_or_init(|| Regex::new(r#"[<>:"/\\|?*]"#).unwrap())
}

/// Parse a target size in MB, accepted in `(0, 1000]`
pub fn parse_target_mb(input: &str) -> Result<f64, ValidationError> {
    let value: f64 = input
        .trim()
        .parse()
        .map_err(|_| ValidationError::NotPositiveNumber)?;
    check_target_mb(value)
}

pub fn check_target_mb(value: f64) -> Result<f64, ValidationError> {
    // NaN fails this comparison as well
    if !(value > 0.0) {
        return Err(ValidationError::NotPositiveNumber);
    }
    if value > MAX_TARGET_MB {
        return Err(ValidationError::SizeTooLarge);
    }
    Ok(value)
}

/// Parse a row cap, accepted in `(0, 10_000_000]`
pub fn parse_max_rows(input: &str) -> Result<u64, ValidationError> {
    let trimmed = input.trim();
    if trimmed.starts_with('-') {
        return Err(ValidationError::NotPositiveInteger);
    }
    let value: u64 = trimmed
        .parse()
        .map_err(|_| ValidationError::NotPositiveInteger)?;
    check_max_rows(value)
}

pub fn check_max_rows(value: u64) -> Result<u64, ValidationError> {
    if value == 0 {
        return Err(ValidationError::NotPositiveInteger);
    }
    if value > MAX_ROWS_LIMIT {
        return Err(ValidationError::TooManyRows);
    }
    Ok(value)
}

/// Validate a file name and return it with the `.xlsx` extension
pub fn parse_file_name(input: &str) -> Result<String, ValidationError> {
    let name = input.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyFileName);
    }
    if forbidden_chars().is_match(name) {
        return Err(ValidationError::ForbiddenCharacter);
    }
    Ok(with_xlsx_extension(name))
}

/// Append `.xlsx` unless the name already ends with it
pub fn with_xlsx_extension(name: &str) -> String {
    if name.ends_with(XLSX_EXTENSION) {
        name.to_string()
    } else {
        format!("{}{}", name, XLSX_EXTENSION)
    }
}
