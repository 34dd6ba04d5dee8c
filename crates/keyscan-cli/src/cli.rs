//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Keyscan: discover keys and inclusion dependencies in tabular data
#[derive(Parser)]
#[command(name = "keyscan")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Discover minimal unique column combinations of a data file
    Ucc {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Field delimiter (default: auto-detect)
        #[arg(short, long, value_parser = parse_delimiter)]
        delimiter: Option<u8>,

        /// Treat the first line as data
        #[arg(long)]
        no_header: bool,

        /// Only read this many data rows
        #[arg(long)]
        max_rows: Option<usize>,

        /// Stop after combinations of this many columns
        #[arg(long)]
        max_arity: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Discover unary inclusion dependencies between columns of data files
    Ind {
        /// Paths to the data files
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /// Request n-ary dependencies (not available)
        #[arg(long)]
        nary: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Match the columns of two data files by the values they hold
    Match {
        /// Source data file
        #[arg(value_name = "SOURCE")]
        source: PathBuf,

        /// Target data file
        #[arg(value_name = "TARGET")]
        target: PathBuf,

        /// Drop matches scoring below this similarity
        #[arg(long, default_value = "0.0")]
        min_similarity: f64,

        /// Compare values on character n-grams of this size
        #[arg(long)]
        ngram: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Find rows of a data file that describe the same entity
    Dedup {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Column indices to sort by, one pass each (default: every column)
        #[arg(short, long, value_delimiter = ',')]
        keys: Vec<usize>,

        /// Number of neighboring rows compared in each pass
        #[arg(short, long, default_value = "5")]
        window: usize,

        /// Similarity at which two rows count as duplicates
        #[arg(long)]
        threshold: Option<f64>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compare two strings with a similarity measure
    Similarity {
        left: String,
        right: String,

        /// Similarity measure
        #[arg(short, long, default_value = "levenshtein")]
        measure: MeasureChoice,

        /// N-gram size for Jaccard tokenization (0 = word tokens)
        #[arg(long, default_value = "2")]
        ngram: usize,
    },
}

fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s {
        "\\t" | "tab" => Ok(b'\t'),
        _ if s.len() == 1 && s.is_ascii() => Ok(s.as_bytes()[0]),
        _ => Err(format!("Delimiter must be a single ASCII character, got '{}'", s)),
    }
}

/// Similarity measure choice
#[derive(Clone, Debug, Default)]
pub enum MeasureChoice {
    /// Jaccard over token sets
    Jaccard,
    /// Jaccard over token multisets
    JaccardBag,
    /// Normalized Levenshtein
    #[default]
    Levenshtein,
    /// Normalized Damerau-Levenshtein
    Damerau,
}

impl std::str::FromStr for MeasureChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "jaccard" => Ok(MeasureChoice::Jaccard),
            "jaccard-bag" | "bag" => Ok(MeasureChoice::JaccardBag),
            "levenshtein" | "lev" => Ok(MeasureChoice::Levenshtein),
            "damerau" | "damerau-levenshtein" => Ok(MeasureChoice::Damerau),
            _ => Err(format!(
                "Unknown measure: {}. Use: jaccard, jaccard-bag, levenshtein, or damerau.",
                s
            )),
        }
    }
}

impl std::fmt::Display for MeasureChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MeasureChoice::Jaccard => write!(f, "jaccard"),
            MeasureChoice::JaccardBag => write!(f, "jaccard-bag"),
            MeasureChoice::Levenshtein => write!(f, "levenshtein"),
            MeasureChoice::Damerau => write!(f, "damerau"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter(","), Ok(b','));
        assert_eq!(parse_delimiter("tab"), Ok(b'\t'));
        assert_eq!(parse_delimiter("\\t"), Ok(b'\t'));
        assert!(parse_delimiter(",,").is_err());
    }

    #[test]
    fn test_measure_choice() {
        assert!(matches!("Jaccard_Bag".parse::<MeasureChoice>(), Ok(MeasureChoice::JaccardBag)));
        assert!(matches!("damerau".parse::<MeasureChoice>(), Ok(MeasureChoice::Damerau)));
        assert!("cosine".parse::<MeasureChoice>().is_err());
    }

    #[test]
    fn test_cli_parses_ucc() {
        let cli =
            Cli::try_parse_from(["keyscan", "ucc", "data.csv", "-d", ";", "--max-arity", "2"])
                .unwrap();
        match cli.command {
            Commands::Ucc {
                delimiter,
                max_arity,
                ..
            } => {
                assert_eq!(delimiter, Some(b';'));
                assert_eq!(max_arity, Some(2));
            }
            _ => panic!("expected ucc command"),
        }
    }

    #[test]
    fn test_cli_parses_dedup_keys() {
        let cli = Cli::try_parse_from(["keyscan", "dedup", "people.csv", "-k", "0,2", "-w", "3"])
            .unwrap();
        match cli.command {
            Commands::Dedup {
                keys,
                window,
                threshold,
                ..
            } => {
                assert_eq!(keys, vec![0, 2]);
                assert_eq!(window, 3);
                assert_eq!(threshold, None);
            }
            _ => panic!("expected dedup command"),
        }
    }

    #[test]
    fn test_cli_parses_match() {
        let cli = Cli::try_parse_from(["keyscan", "match", "a.csv", "b.csv", "--ngram", "3"])
            .unwrap();
        match cli.command {
            Commands::Match {
                ngram,
                min_similarity,
                ..
            } => {
                assert_eq!(ngram, Some(3));
                assert_eq!(min_similarity, 0.0);
            }
            _ => panic!("expected match command"),
        }
    }
}
