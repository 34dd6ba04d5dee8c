//! Match command - pair the columns of two data files by their values.

use std::path::PathBuf;

use colored::Colorize;
use keyscan::{Keyscan, KeyscanConfig, SchemaMatcher, Tokenizer};

pub fn run(
    source: PathBuf,
    target: PathBuf,
    min_similarity: f64,
    ngram: Option<usize>,
    json: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(missing) = [&source, &target].into_iter().find(|f| !f.exists()) {
        return Err(format!("File not found: {}", missing.display()).into());
    }

    let mut matcher = SchemaMatcher::new().with_min_similarity(min_similarity);
    if let Some(n) = ngram {
        matcher = matcher.with_tokenizer(Tokenizer::NGrams(n));
    }
    let keyscan = Keyscan::with_config(KeyscanConfig {
        matcher,
        ..KeyscanConfig::default()
    });

    let report = keyscan.match_files(&source, &target)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} {} {} {}",
        "Matching".cyan().bold(),
        report.source.white(),
        "with".cyan(),
        report.target.white()
    );

    if verbose {
        println!();
        for (row, name) in report.matrix.source_attributes.iter().enumerate() {
            let scores: Vec<String> = report.matrix.scores()[row]
                .iter()
                .map(|score| format!("{:.2}", score))
                .collect();
            println!("  {:<20} {}", name, scores.join(" ").dimmed());
        }
    }
    println!();

    if report.correspondences.is_empty() {
        println!("{}", "No attribute correspondences found.".yellow());
        return Ok(());
    }

    for correspondence in &report.correspondences {
        println!(
            "  {} {} {}  {}",
            correspondence.source_name.white(),
            "↔".cyan(),
            correspondence.target_name.white(),
            format!("{:.3}", correspondence.similarity).dimmed()
        );
    }

    Ok(())
}
