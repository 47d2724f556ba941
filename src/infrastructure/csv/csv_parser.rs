// ============================================================
// CSV PARSER
// ============================================================
// Parse roster CSV files into rows, tolerating ragged records

use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use encoding_rs::WINDOWS_1252;
use tracing::{debug, warn};

use crate::domain::error::{AppError, Result};
use crate::domain::roster::{ConversionConfig, DuplicateColumns, Row};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// CSV parser producing schema-less roster rows
pub struct CsvParser {
    /// Delimiter character (default: comma)
    delimiter: u8,

    /// Whether to trim whitespace from values
    trim: bool,

    /// Drop blank lines instead of emitting empty rows
    skip_empty_lines: bool,

    /// Representation of repeated header names
    duplicate_columns: DuplicateColumns,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self {
            delimiter: b',',
            trim: false,
            skip_empty_lines: true,
            duplicate_columns: DuplicateColumns::Collect,
        }
    }
}

impl CsvParser {
    /// Create a new CSV parser with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Parser configured from the conversion settings
    pub fn from_config(config: &ConversionConfig) -> Self {
        Self::new()
            .with_trim(config.trim_values)
            .with_skip_empty_lines(config.skip_empty_lines)
            .with_duplicate_columns(config.duplicate_columns)
    }

    /// Set whether to trim whitespace
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    pub fn with_skip_empty_lines(mut self, skip: bool) -> Self {
        self.skip_empty_lines = skip;
        self
    }

    pub fn with_duplicate_columns(mut self, duplicate_columns: DuplicateColumns) -> Self {
        self.duplicate_columns = duplicate_columns;
        self
    }

    /// Read a CSV file and return rows
    pub async fn parse_file(&self, path: &Path) -> Result<Vec<Row>> {
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            AppError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let content = Self::decode(&bytes);
        self.parse_content(&content)
    }

    /// Decode file bytes, falling back to Windows-1252 for non UTF-8 input
    pub fn decode(bytes: &[u8]) -> String {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

        match std::str::from_utf8(bytes) {
            Ok(content) => content.to_string(),
            Err(err) => {
                warn!(
                    valid_up_to = err.valid_up_to(),
                    "Input is not valid UTF-8, decoding as Windows-1252"
                );
                let (content, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
                content.into_owned()
            }
        }
    }

    /// Parse CSV content from string
    pub fn parse_content(&self, content: &str) -> Result<Vec<Row>> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(if self.trim { Trim::All } else { Trim::None })
            .flexible(true) // Allow rows with different lengths
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| AppError::ParseError(format!("Failed to read CSV headers: {}", e)))?
            .clone();

        let bytes = content.as_bytes();
        let mut lines = LineCounter::new(bytes);
        let mut record_end = reader.position().byte() as usize;

        let mut rows = Vec::new();
        let mut record = StringRecord::new();

        while reader.read_record(&mut record).map_err(describe_record_error)? {
            // The reader drops blank lines silently; recover them from the bytes
            let (blank_lines, record_start) = skip_blank_lines(bytes, record_end);
            let line = lines.line_at(record_start);

            if !self.skip_empty_lines {
                for blank in line - blank_lines..line {
                    rows.push(self.parse_row(blank, &headers, &StringRecord::new()));
                }
            }

            rows.push(self.parse_row(line, &headers, &record));
            record_end = reader.position().byte() as usize;
        }

        debug!(rows = rows.len(), columns = headers.len(), "Parsed CSV content");
        Ok(rows)
    }

    /// Parse a single CSV record; missing trailing fields read as empty
    fn parse_row(&self, line: usize, headers: &StringRecord, record: &StringRecord) -> Row {
        let mut row = Row::new(line);

        for (idx, header) in headers.iter().enumerate() {
            let value = record.get(idx).unwrap_or("");
            row.append(header, value);
        }

        if self.duplicate_columns == DuplicateColumns::Join {
            row.join_lists();
        }

        row
    }
}

fn describe_record_error(err: csv::Error) -> AppError {
    match err.position() {
        Some(position) => AppError::ParseError(format!(
            "Failed to parse CSV record at line {}: {}",
            position.line(),
            err
        )),
        None => AppError::ParseError(format!("Failed to parse CSV record: {}", err)),
    }
}

/// Skip the blank lines that precede the record beginning after `offset`.
///
/// Returns the number of blank lines and the offset of the record's first byte.
fn skip_blank_lines(bytes: &[u8], offset: usize) -> (usize, usize) {
    let mut offset = offset.min(bytes.len());

    // Finish the previous record's terminator when the reader stopped inside it
    if offset > 0 && bytes[offset - 1] != b'\n' {
        offset += terminator_len(&bytes[offset..]);
    }

    let mut blank_lines = 0;
    loop {
        let len = terminator_len(&bytes[offset..]);
        if len == 0 {
            break;
        }
        offset += len;
        blank_lines += 1;
    }

    (blank_lines, offset)
}

fn terminator_len(bytes: &[u8]) -> usize {
    if bytes.starts_with(b"\r\n") {
        2
    } else if bytes.starts_with(b"\n") {
        1
    } else {
        0
    }
}

/// Incremental 1-based line numbers for increasing byte offsets
struct LineCounter<'a> {
    bytes: &'a [u8],
    offset: usize,
    line: usize,
}

impl<'a> LineCounter<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            offset: 0,
            line: 1,
        }
    }

    fn line_at(&mut self, offset: usize) -> usize {
        let offset = offset.min(self.bytes.len());
        if offset > self.offset {
            self.line += self.bytes[self.offset..offset]
                .iter()
                .filter(|&&byte| byte == b'\n')
                .count();
            self.offset = offset;
        }
        self.line
    }
}
