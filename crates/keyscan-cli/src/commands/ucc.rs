//! Ucc command - discover minimal unique column combinations of a file.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use colored::Colorize;
use keyscan::{Keyscan, KeyscanConfig, ParserConfig, UccConfig};

/// Parsing and search options for the ucc command.
pub struct Options {
    pub delimiter: Option<u8>,
    pub no_header: bool,
    pub max_rows: Option<usize>,
    pub max_arity: Option<usize>,
    pub json: bool,
}

impl Options {
    fn to_config(&self) -> KeyscanConfig {
        KeyscanConfig {
            parser: ParserConfig {
                delimiter: self.delimiter,
                has_header: !self.no_header,
                max_rows: self.max_rows,
                ..ParserConfig::default()
            },
            ucc: UccConfig {
                max_arity: self.max_arity,
            },
            ..KeyscanConfig::default()
        }
    }
}

pub fn run(
    file: PathBuf,
    options: Options,
    cancel: Arc<AtomicBool>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let keyscan = Keyscan::with_config(options.to_config()).with_cancel_flag(cancel);

    if !options.json {
        println!(
            "{} {}",
            "Profiling".cyan().bold(),
            file.display().to_string().white()
        );
    }

    let report = keyscan.profile_file(&file)?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} rows, {} columns",
        report.row_count.to_string().white().bold(),
        report.attributes.len().to_string().white().bold()
    );

    if verbose {
        if let Some(ref source) = report.source {
            println!("  format: {}  hash: {}", source.format, source.hash.dimmed());
        }
    }
    println!();

    if report.uccs.is_empty() {
        println!("{}", "No unique column combinations found.".yellow());
        if let Some(max) = options.max_arity {
            println!("Search was limited to {} column(s).", max);
        }
        return Ok(());
    }

    println!(
        "Found {} minimal unique column combinations:",
        report.summary.total_uccs.to_string().white().bold()
    );
    for ucc in &report.uccs {
        let label = if ucc.arity == 1 {
            "key".green()
        } else {
            format!("{}-col", ucc.arity).cyan()
        };
        println!("  {:>6}  {}", label, ucc.columns.join(", ").white());
    }

    if !report.summary.uncovered_columns.is_empty() {
        println!();
        println!(
            "{} {}",
            "Not part of any key:".dimmed(),
            report.summary.uncovered_columns.join(", ")
        );
    }

    Ok(())
}
