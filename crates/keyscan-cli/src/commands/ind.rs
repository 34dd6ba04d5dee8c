//! Ind command - discover unary inclusion dependencies between files.

use std::path::PathBuf;

use colored::Colorize;
use keyscan::Keyscan;

pub fn run(
    files: Vec<PathBuf>,
    nary: bool,
    json: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(missing) = files.iter().find(|f| !f.exists()) {
        return Err(format!("File not found: {}", missing.display()).into());
    }

    let inds = Keyscan::new().inclusion_dependencies(&files, nary)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&inds)?);
        return Ok(());
    }

    if verbose {
        println!(
            "{} {} file(s)",
            "Compared columns of".cyan().bold(),
            files.len()
        );
    }

    if inds.is_empty() {
        println!("{}", "No inclusion dependencies found.".yellow());
        return Ok(());
    }

    println!(
        "Found {} inclusion dependencies:",
        inds.len().to_string().white().bold()
    );
    for ind in &inds {
        println!(
            "  {} {} {}",
            ind.dependent.to_string().white(),
            "⊆".cyan(),
            ind.referenced
        );
    }

    Ok(())
}
