//! Export options

/// How a view is laid out as CSV
#[derive(Debug, Clone)]
pub struct CsvWriteOptions {
    /// Field delimiter (default: comma)
    pub delimiter: u8,
    /// Quote character (default: double quote)
    pub quote: u8,
    /// Start with a record of column display names (default: true)
    pub write_header: bool,
    /// Also export columns the grid hides (default: false). Internal columns are
    /// never part of a view and cannot be exported.
    pub include_hidden: bool,
    /// Record separator (default: CRLF, as spreadsheet tools expect)
    pub line_terminator: LineTerminator,
}

impl Default for CsvWriteOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            write_header: true,
            include_hidden: false,
            line_terminator: LineTerminator::CRLF,
        }
    }
}

impl CsvWriteOptions {
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_header(mut self, write_header: bool) -> Self {
        self.write_header = write_header;
        self
    }

    pub fn with_hidden_columns(mut self, include_hidden: bool) -> Self {
        self.include_hidden = include_hidden;
        self
    }

    pub fn with_line_terminator(mut self, terminator: LineTerminator) -> Self {
        self.line_terminator = terminator;
        self
    }
}

/// Record separator written after each exported row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineTerminator {
    LF,
    CRLF,
}
