// ============================================================
// CSV PARSER
// ============================================================
// Parse CSV uploads into header-keyed rows with encoding detection
// and delimiter auto-detection

use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::domain::error::AppError;
use crate::domain::quiz::{FieldMap, RawRow};

/// CSV parser producing [`RawRow`]s.
///
/// Values are handed through untrimmed: whitespace cleanup is the row
/// cleaner's job, so the validator sees the file as uploaded.
pub struct CsvParser {
    /// Delimiter character (default: comma)
    delimiter: u8,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Parse a CSV file and return rows
    pub fn parse_file(&self, path: &Path) -> Result<Vec<RawRow>, AppError> {
        let content = read_with_encoding_detection(path)?;
        self.parse_content(&content)
    }

    /// Parse CSV content from string
    pub fn parse_content(&self, content: &str) -> Result<Vec<RawRow>, AppError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(Trim::None)
            .flexible(true) // Allow rows with different lengths
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| AppError::ParseError(format!("Failed to read CSV headers: {}", e)))?
            .clone();

        let mut rows = Vec::new();
        let mut index = 0;

        for result in reader.records() {
            let record = result.map_err(|e| {
                AppError::ParseError(format!("Failed to parse CSV row {}: {}", index + 1, e))
            })?;

            // Skip lines that carry no content at all
            if record.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }

            rows.push(parse_row(index, &headers, &record));
            index += 1;
        }

        Ok(rows)
    }

    /// Detect delimiter from content (comma, semicolon, tab, pipe)
    pub fn detect_delimiter(content: &str) -> u8 {
        let candidates = [b',', b';', b'\t', b'|'];
        let sample_lines: Vec<_> = content.lines().take(10).collect();

        let mut best_delimiter = b',';
        let mut best_score = 0.0f32;

        for &delimiter in &candidates {
            let counts: Vec<usize> = sample_lines
                .iter()
                .map(|line| line.bytes().filter(|&b| b == delimiter).count())
                .collect();
            if counts.is_empty() {
                continue;
            }

            // Favor delimiters that appear often and consistently per line
            let avg = counts.iter().sum::<usize>() as f32 / counts.len() as f32;
            let variance = counts
                .iter()
                .map(|&c| (c as f32 - avg).powi(2))
                .sum::<f32>()
                / counts.len() as f32;
            let score = avg / (1.0 + variance.sqrt());

            if score > best_score {
                best_score = score;
                best_delimiter = delimiter;
            }
        }

        best_delimiter
    }

    /// Parse a CSV file with automatic delimiter detection
    pub fn parse_file_auto_detect(path: &Path) -> Result<Vec<RawRow>, AppError> {
        let content = read_with_encoding_detection(path)?;
        let delimiter = Self::detect_delimiter(&content);
        Self::default().with_delimiter(delimiter).parse_content(&content)
    }
}

fn parse_row(index: usize, headers: &StringRecord, record: &StringRecord) -> RawRow {
    let fields: FieldMap = headers
        .iter()
        .enumerate()
        .map(|(idx, header)| {
            let value = record.get(idx).unwrap_or("").to_string();
            (header.to_string(), value)
        })
        .collect();

    RawRow::new(index, fields)
}

/// Read a file as UTF-8, falling back to Windows-1252 and finally to a
/// lossy conversion for anything else.
fn read_with_encoding_detection(path: &Path) -> Result<String, AppError> {
    let buffer = std::fs::read(path)
        .map_err(|e| AppError::IoError(format!("Failed to read file: {}", e)))?;

    if let Ok(content) = std::str::from_utf8(&buffer) {
        return Ok(content.to_string());
    }

    let (content, _, had_errors) = encoding_rs::WINDOWS_1252.decode(&buffer);
    if !had_errors {
        return Ok(content.into_owned());
    }

    Ok(String::from_utf8_lossy(&buffer).to_string())
}
