//! Similarity command - score two strings with a similarity measure.

use colored::Colorize;
use keyscan::{Jaccard, Levenshtein, SimilarityMeasure, Tokenizer};

use crate::cli::MeasureChoice;

pub fn run(
    left: &str,
    right: &str,
    measure: MeasureChoice,
    ngram: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let tokenizer = if ngram == 0 {
        Tokenizer::Words
    } else {
        Tokenizer::NGrams(ngram)
    };

    let measure: Box<dyn SimilarityMeasure> = match measure {
        MeasureChoice::Jaccard => Box::new(Jaccard::new(tokenizer, false)),
        MeasureChoice::JaccardBag => Box::new(Jaccard::new(tokenizer, true)),
        MeasureChoice::Levenshtein => Box::new(Levenshtein::new(false)),
        MeasureChoice::Damerau => Box::new(Levenshtein::new(true)),
    };

    let score = measure.compare(left, right);
    println!(
        "{}: {}",
        measure.name().cyan(),
        format!("{:.4}", score).white().bold()
    );

    Ok(())
}
