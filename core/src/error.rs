use crate::DocId;

/// Errors returned by the search engine.
///
/// Every variant is an input-validation failure local to one call; the
/// engine state is left exactly as it was before the failing call.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    /// A stop word passed at construction contains a control character.
    #[error("stop word {0:?} contains a control character")]
    InvalidStopWord(String),
    /// Document ids must be non-negative.
    #[error("document id {0} is negative")]
    InvalidId(DocId),
    /// A document with this id was already added.
    #[error("document id {0} was already added")]
    DuplicateId(DocId),
    /// A document or query term contains a control character.
    #[error("term {0:?} contains a control character")]
    InvalidCharacter(String),
    /// The query (or one of its words) is empty.
    #[error("empty query")]
    EmptyQuery,
    /// A lone `-`, a double `--` prefix, or a term ending in `-`.
    #[error("malformed minus word {0:?}")]
    MalformedMinus(String),
    /// Position outside `[0, document_count)`.
    #[error("document index {index} is out of range (document count {count})")]
    OutOfRange { index: usize, count: usize },
    /// No document with this id.
    #[error("document {0} not found")]
    NotFound(DocId),
}

pub type Result<T> = std::result::Result<T, SearchError>;
