//! Bag-of-words Cosine Similarity
//!
//! No model embeddings here: similarity is computed over raw token-frequency
//! vectors. Tokenization splits on whitespace and common sentence punctuation
//! in both Latin and Japanese text (`,` `、` `.` `。`), lowercasing as it
//! goes. This keeps the measure symmetric, bounded in [0, 1], and exactly 0
//! when either side produces no tokens.

use std::collections::HashMap;

/// Punctuation treated as token separators alongside whitespace
const SEPARATORS: [char; 4] = [',', '、', '.', '。'];

/// Split text into lowercased tokens
///
/// Whitespace and the characters in [`SEPARATORS`] both delimit tokens;
/// empty fragments (e.g. from "a, b") are dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| c.is_whitespace() || SEPARATORS.contains(&c))
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
        .collect()
}

/// Build a token-frequency vector from tokens
pub fn term_frequencies(tokens: &[String]) -> HashMap<String, f64> {
    let mut freqs: HashMap<String, f64> = HashMap::new();
    for token in tokens {
        *freqs.entry(token.clone()).or_default() += 1.0;
    }
    freqs
}

/// Cosine similarity between two token-frequency vectors
///
/// Defined as dot(a, b) / (|a| * |b|), and 0.0 when either vector is
/// all-zero (including the empty-text case).
pub fn cosine_similarity(a: &HashMap<String, f64>, b: &HashMap<String, f64>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    // Iterate the smaller map for the dot product
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    let mut dot = 0.0_f64;
    for (token, count) in small {
        if let Some(other) = large.get(token) {
            dot += count * other;
        }
    }

    let norm_a: f64 = a.values().map(|v| v * v).sum::<f64>().sqrt();
    let norm_b: f64 = b.values().map(|v| v * v).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

/// Convenience: cosine similarity between two raw texts
pub fn text_similarity(a: &str, b: &str) -> f64 {
    cosine_similarity(&term_frequencies(&tokenize(a)), &term_frequencies(&tokenize(b)))
}

// ============================================================================
// TESTS
// ============================================================================
