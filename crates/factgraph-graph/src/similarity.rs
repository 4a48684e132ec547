//! Lexical similarity between node labels

use std::collections::BTreeSet;

/// Lowercased whitespace tokens of at least `min_chars` characters
pub fn tokens(text: &str, min_chars: usize) -> BTreeSet<String> {
    text.split_whitespace()
        .map(str::to_lowercase)
        .filter(|token| token.chars().count() >= min_chars)
        .collect()
}

/// Share of common tokens between two labels, in [0, 1]
///
/// `|common| / max(|tokens(a)|, |tokens(b)|)` over deduplicated token sets.
/// Returns 0 when either side has no qualifying tokens.
///
/// # Examples
///
/// ```
/// use factgraph_graph::text_similarity;
///
/// assert_eq!(text_similarity("Vaccines prevent measles", "Measles vaccines work", 4), 2.0 / 3.0);
/// assert_eq!(text_similarity("a b c", "a b c", 4), 0.0);
/// ```
pub fn text_similarity(a: &str, b: &str, min_chars: usize) -> f64 {
    let left = tokens(a, min_chars);
    let right = tokens(b, min_chars);

    if left.is_empty() || right.is_empty() {
        return 0.0;
    }

    let common = left.intersection(&right).count();
    common as f64 / left.len().max(right.len()) as f64
}
