//! Fuzzy string similarity.
//!
//! Pure Rust implementation without external dependencies.

use std::collections::HashMap;

/// Sørensen–Dice coefficient over character bigrams.
///
/// Returns a value in [0.0, 1.0] where 1.0 means the bigram profiles are
/// identical. Bigram overlap tolerates suffix variants ("neural nets" vs
/// "neural network" scores ~0.78) better than plain edit distance, which is
/// what label matching needs.
///
/// Inputs are compared as-is; callers normalize labels first.
pub fn bigram_dice(a: &str, b: &str) -> f64 {
    let a_grams = bigrams(a);
    let b_grams = bigrams(b);

    if a_grams.is_empty() || b_grams.is_empty() {
        // Too short for bigrams: only exact equality counts.
        return if a == b { 1.0 } else { 0.0 };
    }

    let mut counts: HashMap<(char, char), usize> = HashMap::new();
    for gram in &a_grams {
        *counts.entry(*gram).or_insert(0) += 1;
    }

    let mut shared = 0usize;
    for gram in &b_grams {
        if let Some(count) = counts.get_mut(gram) {
            if *count > 0 {
                *count -= 1;
                shared += 1;
            }
        }
    }

    2.0 * shared as f64 / (a_grams.len() + b_grams.len()) as f64
}

fn bigrams(s: &str) -> Vec<(char, char)> {
    let chars: Vec<char> = s.chars().collect();
    chars.windows(2).map(|w| (w[0], w[1])).collect()
}
