//! Approximate string scoring.
//!
//! A query token is scored against a field by the smallest edit distance
//! between the token and any substring of the field (Sellers' variant of
//! Levenshtein), divided by the token length and capped at `1.0`. `0.0` means
//! the token occurs verbatim.

/// Lowercased characters of `text`, ready for scoring.
pub fn normalize(text: &str) -> Vec<char> {
    text.chars().flat_map(char::to_lowercase).collect()
}

/// Split a query into normalized whitespace-separated tokens.
pub fn tokenize(query: &str) -> Vec<Vec<char>> {
    query.split_whitespace().map(normalize).collect()
}

/// Minimum edit distance between `pattern` and any substring of `text`.
pub fn substring_distance(pattern: &[char], text: &[char]) -> usize {
    let m = pattern.len();
    if m == 0 {
        return 0;
    }

    // prev[i]: distance of pattern[..i] to the best substring ending before
    // the current text character.
    let mut prev: Vec<usize> = (0..=m).collect();
    let mut cur = vec![0; m + 1];
    let mut best = m;

    for &tc in text {
        cur[0] = 0;
        for i in 1..=m {
            let substitution = prev[i - 1] + usize::from(pattern[i - 1] != tc);
            cur[i] = substitution.min(prev[i] + 1).min(cur[i - 1] + 1);
        }
        best = best.min(cur[m]);
        std::mem::swap(&mut prev, &mut cur);
    }

    best
}

/// Normalized distance of one token against one field, in `[0, 1]`.
pub fn token_score(token: &[char], field: &[char]) -> f64 {
    if token.is_empty() {
        return 0.0;
    }
    let distance = substring_distance(token, field) as f64;
    (distance / token.len() as f64).min(1.0)
}

/// Mean token score of a tokenized query against one field.
pub fn field_score(tokens: &[Vec<char>], field: &[char]) -> f64 {
    if tokens.is_empty() {
        return 0.0;
    }
    let total: f64 = tokens.iter().map(|token| token_score(token, field)).sum();
    total / tokens.len() as f64
}
