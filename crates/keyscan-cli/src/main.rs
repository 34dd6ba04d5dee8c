//! Keyscan CLI - key and inclusion dependency discovery, schema matching and
//! duplicate detection.

mod cli;
mod commands;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Ctrl-C stops discovery at the next level boundary.
    let cancel = Arc::new(AtomicBool::new(false));
    {
        let cancel = cancel.clone();
        if let Err(e) = ctrlc::set_handler(move || cancel.store(true, Ordering::Relaxed)) {
            tracing::warn!("could not install Ctrl-C handler: {}", e);
        }
    }

    let result = match cli.command {
        Commands::Ucc {
            file,
            delimiter,
            no_header,
            max_rows,
            max_arity,
            json,
        } => commands::ucc::run(
            file,
            commands::ucc::Options {
                delimiter,
                no_header,
                max_rows,
                max_arity,
                json,
            },
            cancel,
            cli.verbose,
        ),

        Commands::Ind { files, nary, json } => commands::ind::run(files, nary, json, cli.verbose),

        Commands::Match {
            source,
            target,
            min_similarity,
            ngram,
            json,
        } => commands::matching::run(source, target, min_similarity, ngram, json, cli.verbose),

        Commands::Dedup {
            file,
            keys,
            window,
            threshold,
            json,
        } => commands::dedup::run(file, keys, window, threshold, json),

        Commands::Similarity {
            left,
            right,
            measure,
            ngram,
        } => commands::similarity::run(&left, &right, measure, ngram),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins; otherwise warnings only, or keyscan debug output with `-v`.
fn init_logging(verbose: bool) {
    let default = if verbose {
        "warn,keyscan=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
