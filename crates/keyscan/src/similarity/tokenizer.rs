//! Splitting strings into comparable tokens.

use once_cell::sync::Lazy;
use regex::Regex;

static WORD_BOUNDARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\p{L}\p{N}]+").unwrap());

/// How a string is broken into tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tokenizer {
    /// Maximal runs of letters and digits.
    Words,
    /// Overlapping character n-grams, padded with `#` on both ends.
    NGrams(usize),
}

impl Tokenizer {
    pub fn tokenize(&self, input: &str) -> Vec<String> {
        match *self {
            Tokenizer::Words => WORD_BOUNDARY
                .split(input)
                .filter(|token| !token.is_empty())
                .map(|token| token.to_string())
                .collect(),
            Tokenizer::NGrams(n) => ngrams(input, n.max(1)),
        }
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Tokenizer::NGrams(2)
    }
}

fn ngrams(input: &str, n: usize) -> Vec<String> {
    if input.is_empty() {
        return Vec::new();
    }

    let padding = std::iter::repeat_n('#', n - 1);
    let chars: Vec<char> = padding
        .clone()
        .chain(input.chars())
        .chain(padding)
        .collect();

    chars.windows(n).map(|w| w.iter().collect()).collect()
}
