//! Read-back of generated files using calamine

use anyhow::{Context, Result};
use calamine::{Data, Reader, Sheets, open_workbook_auto};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub mod xml_parser;

pub use xml_parser::HeaderStyle;

/// What a generated file actually contains
#[derive(Debug, Clone, PartialEq)]
pub struct WrittenSheet {
    pub sheet_name: String,
    pub headers: Vec<String>,
    /// Rows below the header
    pub data_rows: usize,
    pub columns: usize,
    pub header_style: HeaderStyle,
}

/// Re-open a generated workbook and describe its first sheet
pub fn read_back<P: AsRef<Path>>(path: P) -> Result<WrittenSheet> {
    let path = path.as_ref();
    let mut excel: Sheets<_> = open_workbook_auto(path)
        .with_context(|| format!("Failed to open workbook: {}", path.display()))?;

    let sheet_name = excel
        .sheet_names()
        .first()
        .cloned()
        .with_context(|| format!("Workbook has no sheets: {}", path.display()))?;

    let range = excel
        .worksheet_range(&sheet_name)
        .with_context(|| format!("Failed to read sheet '{}'", sheet_name))?;

    let (height, width) = range.get_size();
    let headers = range
        .rows()
        .next()
        .map(|row| row.iter().map(cell_text).collect())
        .unwrap_or_default();

    let file =
        File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
    let mut archive = zip::ZipArchive::new(BufReader::new(file))?;
    let header_style = xml_parser::header_style_from_xlsx(&mut archive)?;

    Ok(WrittenSheet {
        sheet_name,
        headers,
        data_rows: height.saturating_sub(1),
        columns: width,
        header_style,
    })
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}
