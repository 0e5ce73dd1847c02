// ! Writer module for producing Excel files

mod xlsx_writer;

pub use xlsx_writer::{MAX_DATA_ROWS, XlsxSink};

use crate::schema::SchemaKind;

/// Column definition handed to the spreadsheet writer
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    /// Header text shown in the first row
    pub header: String,
    /// Record field feeding the column
    pub key: &'static str,
    pub width: f64,
}

/// Columns of a schema, all with the same width
pub fn columns_for(schema: SchemaKind, width: f64) -> Vec<ColumnDef> {
    schema
        .fields()
        .iter()
        .zip(schema.headers())
        .map(|(field, header)| ColumnDef {
            header,
            key: field.name,
            width,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_for_sale() {
        let columns = columns_for(SchemaKind::Sale, 15.0);
        assert_eq!(columns.len(), 10);
        assert_eq!(columns[0].header, "OrderId");
        assert_eq!(columns[0].key, "orderId");
        assert_eq!(columns[5].header, "TotalAmount");
        assert!(columns.iter().all(|c| c.width == 15.0));
    }
}
