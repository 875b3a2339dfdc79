//! Counters for permission model activity.

/// Codes dropped or rejected because the catalog did not recognise them.
pub const CODES_DROPPED_TOTAL: &str = "permatrix_codes_dropped_total";
/// Search evaluations, by corpus.
pub const SEARCH_EVALUATIONS_TOTAL: &str = "permatrix_search_evaluations_total";
/// Items returned by search evaluations, by corpus.
pub const SEARCH_MATCHES_TOTAL: &str = "permatrix_search_matches_total";

/// Record `count` codes dropped at `source` (e.g. `"template"`, `"grouped_view"`).
pub fn track_dropped_codes(source: &'static str, count: usize) {
    if count == 0 {
        return;
    }
    metrics::counter!(CODES_DROPPED_TOTAL, "source" => source).increment(count as u64);
}

pub fn track_search(corpus: &'static str, matches: usize) {
    metrics::counter!(SEARCH_EVALUATIONS_TOTAL, "corpus" => corpus).increment(1);
    metrics::counter!(SEARCH_MATCHES_TOTAL, "corpus" => corpus).increment(matches as u64);
}
