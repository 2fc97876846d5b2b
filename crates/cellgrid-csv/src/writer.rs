//! CSV writer

use std::fs::File;
use std::io::Write;
use std::path::Path;

use cellgrid_core::View;

use crate::error::CsvResult;
use crate::options::{CsvWriteOptions, LineTerminator};

/// CSV file writer
pub struct CsvWriter;

impl CsvWriter {
    /// Write a view to a CSV file
    pub fn write_file<P: AsRef<Path>>(
        view: &View,
        path: P,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let file = File::create(path)?;
        Self::write(view, file, options)
    }

    /// Write a view to a writer.
    ///
    /// Hidden columns are skipped unless [`CsvWriteOptions::include_hidden`] is set.
    /// Rows are written in display order when every row has an `index`, otherwise
    /// in the order given.
    pub fn write<W: Write>(view: &View, writer: W, options: &CsvWriteOptions) -> CsvResult<()> {
        let terminator = match options.line_terminator {
            LineTerminator::LF => csv::Terminator::Any(b'\n'),
            LineTerminator::CRLF => csv::Terminator::CRLF,
        };

        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .terminator(terminator)
            .from_writer(writer);

        let columns: Vec<_> = view
            .columns
            .iter()
            .filter(|c| options.include_hidden || !c.descriptor.hidden)
            .collect();

        if options.write_header {
            csv_writer.write_record(columns.iter().map(|c| c.descriptor.name.as_str()))?;
        }

        let mut rows: Vec<_> = view.rows.iter().collect();
        if rows.iter().all(|r| r.index.is_some()) {
            rows.sort_by_key(|r| r.index);
        }

        for row in &rows {
            let record: Vec<String> = columns
                .iter()
                .map(|c| view.export_value(c.key(), row))
                .collect();
            csv_writer.write_record(&record)?;
        }

        csv_writer.flush()?;
        tracing::debug!(rows = rows.len(), columns = columns.len(), "wrote csv");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellgrid_core::{deserialize_view, CellType, ColumnDescriptor, ColumnKind, Row};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn view() -> View {
        let columns = vec![
            ColumnDescriptor::new("title", CellType::String).with_name("Title"),
            ColumnDescriptor::new("price", CellType::Currency).with_name("Price"),
            ColumnDescriptor::new("secret", CellType::String).with_hidden(true),
            ColumnDescriptor::new("pos", CellType::Number).with_kind(ColumnKind::Index),
        ];
        let rows = vec![
            Row::from_json(json!({"title": "Pen, blue", "price": "1.50 EUR", "pos": 1})).unwrap(),
            Row::from_json(json!({"title": "Ink", "price": "bogus", "pos": 0})).unwrap(),
        ];
        deserialize_view(columns, rows).unwrap()
    }

    fn render(options: &CsvWriteOptions) -> String {
        let mut buf = Vec::new();
        CsvWriter::write(&view(), &mut buf, options).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_write_in_display_order() {
        let out = render(&CsvWriteOptions::default().with_line_terminator(LineTerminator::LF));
        assert_eq!(out, "Title,Price\nInk,\n\"Pen, blue\",1.50 EUR\n");
    }

    #[test]
    fn test_write_hidden_columns_on_request() {
        let out = render(
            &CsvWriteOptions::default()
                .with_hidden_columns(true)
                .with_line_terminator(LineTerminator::LF),
        );
        assert_eq!(out, "Title,Price,secret
Ink,,
\"Pen, blue\",1.50 EUR,
");
    }

    #[test]
    fn test_write_without_header() {
        let out = render(
            &CsvWriteOptions::default()
                .with_header(false)
                .with_delimiter(b';')
                .with_line_terminator(LineTerminator::LF),
        );
        assert_eq!(out, "Ink;\nPen, blue;1.50 EUR\n");
    }
}
