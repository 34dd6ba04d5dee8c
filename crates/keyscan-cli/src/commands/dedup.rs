//! Dedup command - find rows of a data file that describe the same entity.

use std::path::PathBuf;

use colored::Colorize;
use keyscan::{DedupConfig, Keyscan, KeyscanConfig};

pub fn run(
    file: PathBuf,
    keys: Vec<usize>,
    window: usize,
    threshold: Option<f64>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let keyscan = Keyscan::with_config(KeyscanConfig {
        dedup: DedupConfig { window, threshold },
        ..KeyscanConfig::default()
    });

    let report = keyscan.find_duplicates(&file, &keys)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} {} ({} rows)",
        "Duplicates in".cyan().bold(),
        report.relation.white(),
        report.row_count
    );

    if report.duplicates.is_empty() {
        println!("{}", "No duplicates found.".yellow());
        return Ok(());
    }

    println!(
        "Found {} duplicate pairs in {} clusters:",
        report.duplicates.len().to_string().white().bold(),
        report.clusters.len().to_string().white().bold()
    );
    for cluster in &report.clusters {
        let rows: Vec<String> = cluster.iter().map(|row| row.to_string()).collect();
        println!("  rows {}", rows.join(", ").white());
    }

    Ok(())
}
