//! Low-level CSV reading shared by the bulk importer and the restore path.
//!
//! Strips a UTF-8 BOM, auto-detects the delimiter, skips blank rows and pads
//! short rows to the header width.

use csv::{ReaderBuilder, Terminator};
use log::warn;

use crate::errors::{ImportError, Result};

/// Delimiters tried during auto-detection, in order of preference.
const CANDIDATE_DELIMITERS: [u8; 3] = [b',', b';', b'\t'];

/// Lines sampled when scoring a delimiter
const DELIMITER_SAMPLE_LINES: usize = 10;

/// Headers and data rows of a CSV file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCsv {
    pub headers: Vec<String>,
    pub rows: Vec<CsvRow>,
    pub delimiter: u8,
}

/// One data row. `row` is 1-based and counts data rows only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRow {
    pub row: usize,
    pub cells: Vec<String>,
}

impl ParsedCsv {
    /// Position of a header, matched after trimming.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Required columns that are not present, in the order given.
    pub fn missing_columns(&self, required: &[&str]) -> Vec<String> {
        required
            .iter()
            .filter(|name| self.column_index(name).is_none())
            .map(|name| name.to_string())
            .collect()
    }
}

impl CsvRow {
    /// Trimmed cell at `index`; `None` for an absent column or a blank cell.
    pub fn cell(&self, index: Option<usize>) -> Option<&str> {
        index
            .and_then(|i| self.cells.get(i))
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
    }
}

/// Parses CSV bytes into a header row and data rows.
///
/// A file without a header or without data rows is an
/// [`ImportError::EmptyFile`]; a record the reader cannot decode rejects the
/// whole file.
pub fn parse_csv(content: &[u8]) -> Result<ParsedCsv> {
    let text = decode_content(content);
    let delimiter = detect_delimiter(&text);

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .terminator(Terminator::Any(b'\n'))
        .from_reader(text.as_bytes());

    let mut records: Vec<Vec<String>> = Vec::new();
    for result in reader.records() {
        let record = result?;
        let cells: Vec<String> = record
            .iter()
            .map(|c| c.trim_end_matches('\r').to_string())
            .collect();
        if cells.iter().all(|c| c.trim().is_empty()) {
            continue;
        }
        records.push(cells);
    }

    let mut records = records.into_iter();
    let headers: Vec<String> = match records.next() {
        Some(header) => header.iter().map(|h| h.trim().to_string()).collect(),
        None => return Err(ImportError::EmptyFile.into()),
    };

    let width = headers.len();
    let rows: Vec<CsvRow> = records
        .enumerate()
        .map(|(i, mut cells)| {
            if cells.len() < width {
                cells.resize(width, String::new());
            } else if cells.len() > width {
                warn!(
                    "Row {} has {} columns, expected {}. Extra columns ignored.",
                    i + 1,
                    cells.len(),
                    width
                );
                cells.truncate(width);
            }
            CsvRow { row: i + 1, cells }
        })
        .collect();

    if rows.is_empty() {
        return Err(ImportError::EmptyFile.into());
    }

    Ok(ParsedCsv {
        headers,
        rows,
        delimiter,
    })
}

fn decode_content(content: &[u8]) -> String {
    let content = content.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(content);
    match std::str::from_utf8(content) {
        Ok(s) => s.to_string(),
        Err(e) => {
            warn!(
                "Invalid UTF-8 at byte {}; some characters were replaced",
                e.valid_up_to()
            );
            String::from_utf8_lossy(content).into_owned()
        }
    }
}

/// Picks the delimiter whose per-line count is highest and most consistent.
fn detect_delimiter(content: &str) -> u8 {
    let mut best = b',';
    let mut best_score = 0usize;
    for candidate in CANDIDATE_DELIMITERS {
        let score = score_delimiter(content, candidate as char);
        if score > best_score {
            best_score = score;
            best = candidate;
        }
    }
    best
}

fn score_delimiter(content: &str, delimiter: char) -> usize {
    let counts: Vec<usize> = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .take(DELIMITER_SAMPLE_LINES)
        .map(|line| line.matches(delimiter).count())
        .collect();

    match counts.first() {
        Some(&first) if first > 0 => first * counts.iter().filter(|&&c| c == first).count(),
        _ => 0,
    }
}
