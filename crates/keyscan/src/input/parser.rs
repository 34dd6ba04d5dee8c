//! CSV/TSV loader with delimiter detection.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::debug;

use super::relation::{Relation, SourceMetadata};
use crate::error::{KeyscanError, Result};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Whether the file has a header row.
    pub has_header: bool,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
            max_rows: None,
            quote: b'"',
        }
    }
}

impl ParserConfig {
    /// Use a fixed delimiter instead of detecting one.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Treat the first line as data and synthesize column names.
    pub fn without_header(mut self) -> Self {
        self.has_header = false;
        self
    }

    /// Stop after reading this many data rows.
    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = Some(max_rows);
        self
    }
}

/// Loads delimited text into a [`Relation`].
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return the relation and its source metadata.
    ///
    /// The relation is named after the file stem.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(Relation, SourceMetadata)> {
        let path = path.as_ref();
        let io_err = |source: std::io::Error| KeyscanError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut file = File::open(path).map_err(io_err)?;
        let size_bytes = file.metadata().map_err(io_err)?.len();

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(io_err)?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(&contents)?,
        };

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "relation".to_string());
        let relation = self.parse_bytes(&name, &contents, delimiter)?;

        let format = match delimiter {
            b'\t' => "tsv",
            b',' => "csv",
            b';' => "csv-semicolon",
            b'|' => "psv",
            _ => "delimited",
        }
        .to_string();

        debug!(
            file = %path.display(),
            format = %format,
            rows = relation.row_count(),
            columns = relation.attribute_count(),
            "loaded relation"
        );

        let metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            size_bytes,
            format,
            relation.row_count(),
            relation.attribute_count(),
        );

        Ok((relation, metadata))
    }

    /// Parse in-memory text into a relation with the given name.
    pub fn parse_str(&self, name: &str, text: &str) -> Result<Relation> {
        let bytes = text.as_bytes();
        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(bytes)?,
        };
        self.parse_bytes(name, bytes, delimiter)
    }

    fn parse_bytes(&self, name: &str, bytes: &[u8], delimiter: u8) -> Result<Relation> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(self.config.has_header)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let mut headers: Vec<String> = if self.config.has_header {
            reader.headers()?.iter().map(|s| s.trim().to_string()).collect()
        } else {
            Vec::new()
        };

        let mut rows = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            if let Some(max) = self.config.max_rows {
                if row_idx >= max {
                    break;
                }
            }

            let record = result?;
            if !self.config.has_header && headers.is_empty() {
                headers = (0..record.len())
                    .map(|i| format!("column_{}", i + 1))
                    .collect();
            }
            rows.push(record.iter().map(|s| s.to_string()).collect());
        }

        if headers.is_empty() {
            return Err(KeyscanError::EmptyData("No columns found".to_string()));
        }

        Ok(Relation::new(name, headers, rows))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Detect the delimiter by analyzing the first few lines.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let reader = BufReader::new(bytes);
    let lines: Vec<String> = reader
        .lines()
        .take(10)
        .filter_map(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(KeyscanError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        let consistent = counts.iter().all(|&c| c == first_count);
        let variance: f64 = if counts.len() > 1 {
            let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
            counts.iter().map(|&c| (c as f64 - mean).powi(2)).sum::<f64>() / counts.len() as f64
        } else {
            0.0
        };

        // Higher count with lower variance wins; tab breaks ties since it
        // rarely appears inside values.
        let score = if consistent {
            first_count * 1000 + (if delim == b'\t' { 100 } else { 0 })
        } else if variance < 1.0 {
            first_count * 100
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_delimiter_csv() {
        let data = b"a,b,c\n1,2,3\n4,5,6";
        assert_eq!(detect_delimiter(data).unwrap(), b',');
    }

    #[test]
    fn test_detect_delimiter_tsv() {
        let data = b"a\tb\tc\n1\t2\t3\n4\t5\t6";
        assert_eq!(detect_delimiter(data).unwrap(), b'\t');
    }

    #[test]
    fn test_detect_delimiter_ignores_quoted() {
        let data = b"name;note\n\"a,b\";x\n\"c,d\";y";
        assert_eq!(detect_delimiter(data).unwrap(), b';');
    }

    #[test]
    fn test_parse_csv() {
        let parser = Parser::new();
        let relation = parser
            .parse_str("people", "name,age,city\nAlice,30,NYC\nBob,25,LA")
            .unwrap();

        assert_eq!(relation.name(), "people");
        assert_eq!(relation.attributes(), &["name", "age", "city"]);
        assert_eq!(relation.row_count(), 2);
        assert_eq!(relation.get(0, 0), Some("Alice"));
        assert_eq!(relation.get(1, 1), Some("25"));
    }

    #[test]
    fn test_parse_without_header() {
        let parser = Parser::with_config(ParserConfig::default().without_header());
        let relation = parser.parse_str("raw", "1,a\n2,b\n").unwrap();

        assert_eq!(relation.attributes(), &["column_1", "column_2"]);
        assert_eq!(relation.row_count(), 2);
    }

    #[test]
    fn test_parse_header_only() {
        let parser = Parser::with_config(ParserConfig::default().with_delimiter(b','));
        let relation = parser.parse_str("empty", "a,b\n").unwrap();

        assert_eq!(relation.attribute_count(), 2);
        assert_eq!(relation.row_count(), 0);
    }

    #[test]
    fn test_parse_max_rows() {
        let parser = Parser::with_config(ParserConfig::default().with_max_rows(1));
        let relation = parser.parse_str("r", "a,b\n1,2\n3,4\n").unwrap();
        assert_eq!(relation.row_count(), 1);
    }

    #[test]
    fn test_parse_pads_short_rows() {
        let parser = Parser::with_config(ParserConfig::default().with_delimiter(b','));
        let relation = parser.parse_str("r", "a,b,c\n1,2\n").unwrap();
        assert_eq!(relation.get(0, 2), Some(""));
    }

    #[test]
    fn test_empty_input_rejected() {
        let parser = Parser::new();
        assert!(matches!(
            parser.parse_str("r", "\n\n"),
            Err(KeyscanError::EmptyData(_))
        ));
    }
}
