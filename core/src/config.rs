use serde::{Deserialize, Serialize};

/// Maximum number of hits returned by a ranked query.
pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;
/// Relevance values closer than this are considered equal when ranking.
pub const RELEVANCE_EPSILON: f64 = 1e-6;

/// Ranking knobs for a [`SearchServer`](crate::SearchServer).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub max_results: usize,
    pub relevance_epsilon: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { max_results: MAX_RESULT_DOCUMENT_COUNT, relevance_epsilon: RELEVANCE_EPSILON }
    }
}
