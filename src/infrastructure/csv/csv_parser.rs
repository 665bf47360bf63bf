// ============================================================
// CSV ROW SOURCE
// ============================================================
// Read snapshot exports with encoding fallback and delimiter detection

use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim};
use tracing::debug;

use super::RowSource;
use crate::domain::catalog::RawRow;
use crate::domain::error::AppError;

/// Reads a before/after export from disk
pub struct CsvRowSource {
    path: PathBuf,

    /// Delimiter character, detected from content when `None`
    delimiter: Option<u8>,

    /// Whether the first line is a header
    has_headers: bool,
}

impl CsvRowSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            delimiter: None,
            has_headers: true,
        }
    }

    /// Set custom delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    pub fn with_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }

    /// Split CSV content into rows. Cells are kept untrimmed and rows
    /// may have any length; blank lines are skipped.
    pub fn parse_content(&self, content: &str) -> Result<Vec<RawRow>, AppError> {
        let delimiter = self
            .delimiter
            .unwrap_or_else(|| Self::detect_delimiter(content));

        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(self.has_headers)
            .trim(Trim::None)
            .flexible(true)
            .from_reader(content.as_bytes());

        let mut rows = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                AppError::ParseError(format!("Failed to parse CSV row {}: {}", index + 1, e))
            })?;

            let row: RawRow = record.iter().map(|cell| cell.to_string()).collect();
            if row.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }
            rows.push(row);
        }

        debug!(path = %self.path.display(), rows = rows.len(), "Read CSV rows");
        Ok(rows)
    }

    /// UTF-8 first, Windows-1252 otherwise
    fn read_with_encoding_detection(path: &Path) -> Result<String, AppError> {
        let buffer = std::fs::read(path).map_err(|e| {
            AppError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        match String::from_utf8(buffer) {
            Ok(content) => Ok(content),
            Err(err) => {
                let (content, _, _) = encoding_rs::WINDOWS_1252.decode(err.as_bytes());
                Ok(content.into_owned())
            }
        }
    }

    /// Detect delimiter from content (comma, semicolon, tab, pipe)
    pub fn detect_delimiter(content: &str) -> u8 {
        let candidates = [b',', b';', b'\t', b'|'];
        let sample_lines: Vec<_> = content.lines().take(10).collect();

        let mut best_delimiter = b',';
        let mut best_score = 0.0f32;

        if sample_lines.is_empty() {
            return best_delimiter;
        }

        for &delimiter in &candidates {
            let field_counts: Vec<usize> = sample_lines
                .iter()
                .map(|line| line.bytes().filter(|&b| b == delimiter).count())
                .collect();

            // Score by consistency (low standard deviation) and frequency
            let avg = field_counts.iter().sum::<usize>() as f32 / field_counts.len() as f32;
            let variance = field_counts
                .iter()
                .map(|&x| (x as f32 - avg).powi(2))
                .sum::<f32>()
                / field_counts.len() as f32;

            let score = avg / (1.0 + variance.sqrt());

            if score > best_score {
                best_score = score;
                best_delimiter = delimiter;
            }
        }

        best_delimiter
    }
}

impl RowSource for CsvRowSource {
    fn read_rows(&self) -> Result<Vec<RawRow>, AppError> {
        let content = Self::read_with_encoding_detection(&self.path)?;
        self.parse_content(&content)
    }
}
