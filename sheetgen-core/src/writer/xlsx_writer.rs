// ! XLSX writer backed by rust_xlsxwriter

use super::ColumnDef;
use crate::batch::RowSink;
use crate::schema::{FieldValue, Record};
use anyhow::{Context, Result};
use chrono::Datelike;
use rust_xlsxwriter::{Color, ExcelDateTime, Format, FormatPattern, Workbook};
use std::path::Path;

/// Data rows a worksheet can hold below the header row
pub const MAX_DATA_ROWS: u64 = 1_048_575;

/// Accumulates rows in a single-sheet workbook until saved.
///
/// Every cell stays in memory until `save`, so a full worksheet of ten
/// columns needs on the order of a gigabyte of RAM.
pub struct XlsxSink {
    workbook: Workbook,
    columns: usize,
    next_row: u32,
    date_format: Format,
}

impl XlsxSink {
    /// Create the workbook and write the styled header row
    pub fn new(sheet_name: &str, columns: &[ColumnDef], header_fill: u32) -> Result<Self> {
        let mut workbook = Workbook::new();
        let header_format = Format::new()
            .set_bold()
            .set_pattern(FormatPattern::Solid)
            .set_background_color(Color::RGB(header_fill));

        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(sheet_name)
            .with_context(|| format!("Invalid sheet name '{}'", sheet_name))?;

        for (col, column) in columns.iter().enumerate() {
            let col = col as u16;
            worksheet.set_column_width(col, column.width)?;
            worksheet.write_string_with_format(0, col, &column.header, &header_format)?;
        }

        Ok(Self {
            workbook,
            columns: columns.len(),
            next_row: 1,
            date_format: Format::new().set_num_format("yyyy-mm-dd"),
        })
    }

    pub fn rows_written(&self) -> u64 {
        u64::from(self.next_row - 1)
    }

    pub fn column_count(&self) -> usize {
        self.columns
    }

    /// Serialize the workbook to `path`, replacing any existing file
    pub fn save(mut self, path: &Path) -> Result<()> {
        self.workbook
            .save(path)
            .with_context(|| format!("Failed to save XLSX file: {}", path.display()))
    }
}

impl RowSink for XlsxSink {
    fn append_rows(&mut self, rows: &[Record]) -> Result<()> {
        if self.rows_written() + rows.len() as u64 > MAX_DATA_ROWS {
            anyhow::bail!(
                "Worksheet row limit reached: cannot write more than {} data rows",
                MAX_DATA_ROWS
            );
        }

        let worksheet = self.workbook.worksheet_from_index(0)?;
        for record in rows {
            let row = self.next_row;
            for (col, value) in record.values().enumerate() {
                let col = col as u16;
                match value {
                    FieldValue::Text(text) => {
                        worksheet.write_string(row, col, text)?;
                    }
                    FieldValue::Integer(n) => {
                        worksheet.write_number(row, col, *n as f64)?;
                    }
                    FieldValue::Date(date) => {
                        let datetime = ExcelDateTime::from_ymd(
                            date.year() as u16,
                            date.month() as u8,
                            date.day() as u8,
                        )?;
                        worksheet.write_datetime_with_format(
                            row,
                            col,
                            &datetime,
                            &self.date_format,
                        )?;
                    }
                }
            }
            self.next_row += 1;
        }

        Ok(())
    }
}
