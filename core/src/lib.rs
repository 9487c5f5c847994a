//! In-memory full-text index with TF-IDF ranking, plus/minus queries and
//! exact per-document term matching.

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod catalog;
pub mod config;
pub mod error;
pub mod index;
pub mod matcher;
pub mod query;
pub mod ranker;
pub mod server;
pub mod stop_words;
pub mod tokenizer;

pub use config::SearchConfig;
pub use error::{Result, SearchError};
pub use server::SearchServer;
pub use stop_words::StopWords;

/// Caller-supplied document id. Negative values are rejected on ingestion.
pub type DocId = i32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    #[default]
    Actual = 0,
    Irrelevant = 1,
    Banned = 2,
    Removed = 3,
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DocumentStatus::Actual => "actual",
            DocumentStatus::Irrelevant => "irrelevant",
            DocumentStatus::Banned => "banned",
            DocumentStatus::Removed => "removed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocMeta {
    /// Truncated mean of the ratings given at ingestion.
    pub rating: i32,
    pub status: DocumentStatus,
}

/// One ranked result of a query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SearchHit {
    pub doc_id: DocId,
    pub relevance: f64,
    pub rating: i32,
}
