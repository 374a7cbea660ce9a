//! Lightweight search over listing fields
//!
//! Substring matches first, then an in-order subsequence match. Used to
//! filter pack and extension listings.

/// Minimum fuzzy score for `matches_any` to accept a field
pub const DEFAULT_THRESHOLD: f64 = 0.3;

/// Case-insensitive score in `0.0..=1.0`. Containment scores 1; otherwise
/// the ratio of pattern characters matched in order, or 0 when any is
/// left unmatched.
pub fn fuzzy_score(pattern: &str, text: &str) -> f64 {
    let pattern = pattern.to_lowercase();
    let text = text.to_lowercase();

    if text.contains(&pattern) {
        return 1.0;
    }

    let pattern: Vec<char> = pattern.chars().collect();
    let mut matched = 0;
    for c in text.chars() {
        if matched == pattern.len() {
            break;
        }
        if c == pattern[matched] {
            matched += 1;
        }
    }

    if matched == pattern.len() {
        matched as f64 / pattern.len() as f64
    } else {
        0.0
    }
}

/// Whether `query` matches any of `fields`. A blank query matches everything.
pub fn matches_any(query: &str, fields: &[&str], threshold: f64) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }

    fields
        .iter()
        .any(|field| field.to_lowercase().contains(&query))
        || fields
            .iter()
            .any(|field| fuzzy_score(&query, field) >= threshold)
}

#[cfg(test)]
mod tests {
    include!("search.test.rs");
}
