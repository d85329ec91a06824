//! Loading delimited files into an in-memory table.
//!
//! Bytes are decoded as UTF-8 first and Windows-1252 second; the decoded
//! text is parsed as comma-separated values with a header row. Every
//! failure is reported as a [`ReadError`] so callers never see a panic or
//! an untyped error.

use std::fmt;
use std::fs;
use std::path::Path;

/// Bytes with no mapping in the Windows-1252 code page.
const UNDEFINED_1252: [u8; 5] = [0x81, 0x8D, 0x8F, 0x90, 0x9D];

/// Text encoding a table was decoded from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceEncoding {
    Utf8,
    Windows1252,
}

#[derive(Debug)]
pub enum ReadError {
    /// The file could not be read from disk
    Io(String),
    /// Neither UTF-8 nor Windows-1252 could decode the bytes
    Undecodable,
    /// No header row was found
    NoColumns,
    /// A data row has more fields than the header
    FieldCount {
        expected: usize,
        line: u64,
        saw: usize,
    },
    /// Any other parser failure, carrying the underlying message
    Other(String),
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadError::Io(msg) => write!(f, "{}", msg),
            ReadError::Undecodable => {
                write!(f, "File could not be decoded as utf-8 or windows-1252")
            }
            ReadError::NoColumns => write!(f, "No columns to parse from file"),
            ReadError::FieldCount {
                expected,
                line,
                saw,
            } => write!(
                f,
                "Error tokenizing data: Expected {} fields in line {}, saw {}",
                expected, line, saw
            ),
            ReadError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ReadError {}

impl From<csv::Error> for ReadError {
    fn from(err: csv::Error) -> Self {
        ReadError::Other(err.to_string())
    }
}

/// Parsed tabular file: header names plus raw string cells.
#[derive(Debug, Clone)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Number of data rows (header excluded)
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Position of the first header equal to `name`
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Cells of a column, top to bottom. Short rows yield an empty cell.
    /// Returns `None` when the column does not exist.
    pub fn column<'a>(&'a self, name: &str) -> Option<impl Iterator<Item = &'a str> + 'a> {
        let idx = self.column_index(name)?;
        Some(
            self.rows
                .iter()
                .map(move |row| row.get(idx).map(String::as_str).unwrap_or("")),
        )
    }
}

/// Read and parse a CSV file from disk.
pub fn read_table(path: &Path) -> Result<Table, ReadError> {
    let bytes = fs::read(path)
        .map_err(|e| ReadError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
    parse_bytes(&bytes)
}

/// Decode and parse raw CSV bytes.
pub fn parse_bytes(bytes: &[u8]) -> Result<Table, ReadError> {
    let (text, _) = decode(bytes)?;
    parse_text(&text)
}

/// Decode with UTF-8, falling back to Windows-1252. A UTF-8 BOM is dropped.
pub fn decode(bytes: &[u8]) -> Result<(String, SourceEncoding), ReadError> {
    match std::str::from_utf8(bytes) {
        Ok(text) => {
            let text = text.strip_prefix('\u{feff}').unwrap_or(text);
            Ok((text.to_string(), SourceEncoding::Utf8))
        }
        Err(_) => decode_windows_1252(bytes)
            .map(|text| (text, SourceEncoding::Windows1252))
            .ok_or(ReadError::Undecodable),
    }
}

fn decode_windows_1252(bytes: &[u8]) -> Option<String> {
    if bytes.iter().any(|b| UNDEFINED_1252.contains(b)) {
        return None;
    }
    let (text, had_errors) = encoding_rs::WINDOWS_1252.decode_without_bom_handling(bytes);
    if had_errors {
        return None;
    }
    Some(text.into_owned())
}

fn parse_text(text: &str) -> Result<Table, ReadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.is_empty() {
        return Err(ReadError::NoColumns);
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.len() > headers.len() {
            return Err(ReadError::FieldCount {
                expected: headers.len(),
                line: record.position().map(|p| p.line()).unwrap_or(0),
                saw: record.len(),
            });
        }
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(Table { headers, rows })
}
