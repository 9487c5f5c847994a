use crate::catalog::{average_rating, DocumentCatalog};
use crate::config::SearchConfig;
use crate::error::{Result, SearchError};
use crate::index::InvertedIndex;
use crate::matcher::match_words;
use crate::query::parse_query;
use crate::ranker::{find_all_documents, rank};
use crate::stop_words::StopWords;
use crate::tokenizer::{is_valid_word, split_into_words};
use crate::{DocId, DocMeta, DocumentStatus, SearchHit};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// In-memory TF-IDF search engine.
///
/// Single writer: `add_document` takes `&mut self`, every query takes `&self`.
/// Callers sharing one instance across threads wrap it in a reader/writer lock.
#[derive(Debug)]
pub struct SearchServer {
    stop_words: StopWords,
    index: InvertedIndex,
    catalog: DocumentCatalog,
    config: SearchConfig,
}

impl SearchServer {
    /// Engine with the default [`SearchConfig`] and the given stop words.
    pub fn new<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self::with_config(StopWords::new(stop_words)?, SearchConfig::default()))
    }

    /// Engine whose stop words are given as one space-delimited string.
    pub fn from_stop_words_text(text: &str) -> Result<Self> {
        Ok(Self::with_config(StopWords::from_text(text)?, SearchConfig::default()))
    }

    pub fn with_config(stop_words: StopWords, config: SearchConfig) -> Self {
        debug!(
            stop_words = stop_words.len(),
            max_results = config.max_results,
            epsilon = config.relevance_epsilon,
            "search server created"
        );
        Self { stop_words, index: InvertedIndex::new(), catalog: DocumentCatalog::new(), config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    /// Index one document. On error nothing is changed.
    pub fn add_document(
        &mut self,
        doc_id: DocId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        if doc_id < 0 {
            return Err(SearchError::InvalidId(doc_id));
        }
        if self.catalog.contains(doc_id) {
            return Err(SearchError::DuplicateId(doc_id));
        }
        let words = self.split_into_words_no_stop(text);
        if let Some(bad) = words.iter().find(|w| !is_valid_word(w)) {
            return Err(SearchError::InvalidCharacter(bad.to_string()));
        }

        self.index.add_document(doc_id, &words);
        self.catalog.insert(doc_id, DocMeta { rating: average_rating(ratings), status });
        Ok(())
    }

    /// Best hits for `raw_query` among documents accepted by `predicate(id, status, rating)`.
    pub fn find_top_documents_with<F>(
        &self,
        raw_query: &str,
        predicate: F,
    ) -> Result<Vec<SearchHit>>
    where
        F: Fn(DocId, DocumentStatus, i32) -> bool,
    {
        let query = parse_query(raw_query, &self.stop_words)?;
        let hits = find_all_documents(&query, &self.index, &self.catalog, predicate);
        let candidates = hits.len();
        let hits = rank(hits, &self.config);
        debug!(
            plus = query.plus_words.len(),
            minus = query.minus_words.len(),
            candidates,
            returned = hits.len(),
            "find_top_documents"
        );
        Ok(hits)
    }

    pub fn find_top_documents_by_status(
        &self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<SearchHit>> {
        self.find_top_documents_with(raw_query, |_, doc_status, _| doc_status == status)
    }

    /// Best hits among [`DocumentStatus::Actual`] documents.
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<SearchHit>> {
        self.find_top_documents_by_status(raw_query, DocumentStatus::Actual)
    }

    /// Plus words of `raw_query` found in `doc_id` (empty if a minus word is
    /// found), together with the document's status.
    pub fn match_document(
        &self,
        raw_query: &str,
        doc_id: DocId,
    ) -> Result<(Vec<String>, DocumentStatus)> {
        let query = parse_query(raw_query, &self.stop_words)?;
        let meta = self.catalog.get(doc_id).ok_or(SearchError::NotFound(doc_id))?;
        let words = match_words(&query, &self.index, doc_id);
        trace!(doc_id, matched = words.len(), "match_document");
        Ok((words, meta.status))
    }

    pub fn document_count(&self) -> usize {
        self.catalog.len()
    }

    /// Id of the `position`-th added document.
    pub fn document_id(&self, position: usize) -> Result<DocId> {
        self.catalog
            .id_at(position)
            .ok_or(SearchError::OutOfRange { index: position, count: self.catalog.len() })
    }

    /// Ids in the order documents were added.
    pub fn document_ids(&self) -> impl Iterator<Item = DocId> + '_ {
        self.catalog.ids()
    }

    /// Term frequencies of one document; empty for unknown ids.
    pub fn word_frequencies(&self, doc_id: DocId) -> BTreeMap<&str, f64> {
        self.index.word_frequencies(doc_id)
    }

    fn split_into_words_no_stop<'a>(&self, text: &'a str) -> Vec<&'a str> {
        split_into_words(text)
            .filter(|word| !word.is_empty() && !self.stop_words.contains(word))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server() -> SearchServer {
        let mut server = SearchServer::from_stop_words_text("and in on").unwrap();
        server
            .add_document(1, "fluffy cat fluffy tail", DocumentStatus::Actual, &[8, 2, 3, 4])
            .unwrap();
        server
            .add_document(2, "fluffy dog and stylish collar", DocumentStatus::Actual, &[1, 2, 3, 4])
            .unwrap();
        server
    }

    #[test]
    fn rejected_documents_leave_state_untouched() {
        let mut server = server();
        assert_eq!(
            server.add_document(-1, "cat", DocumentStatus::Actual, &[]),
            Err(SearchError::InvalidId(-1))
        );
        assert_eq!(
            server.add_document(2, "cat", DocumentStatus::Actual, &[]),
            Err(SearchError::DuplicateId(2))
        );
        assert_eq!(
            server.add_document(3, "big dog star\x12ling", DocumentStatus::Actual, &[]),
            Err(SearchError::InvalidCharacter("star\x12ling".into()))
        );
        assert_eq!(server.document_count(), 2);
        assert!(server.word_frequencies(3).is_empty());
        assert!(server.find_top_documents("big").unwrap().is_empty());
    }

    #[test]
    fn stop_words_and_empty_words_are_not_indexed() {
        let mut server = server();
        server.add_document(3, "cat  in  hat", DocumentStatus::Actual, &[]).unwrap();
        let tf = server.word_frequencies(3);
        assert_eq!(tf.keys().copied().collect::<Vec<_>>(), vec!["cat", "hat"]);
        assert!((tf["cat"] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn document_made_only_of_stop_words_is_still_counted() {
        let mut server = server();
        server.add_document(9, "and in", DocumentStatus::Irrelevant, &[5]).unwrap();
        assert_eq!(server.document_count(), 3);
        assert!(server.word_frequencies(9).is_empty());
        let (words, status) = server.match_document("and cat", 9).unwrap();
        assert!(words.is_empty());
        assert_eq!(status, DocumentStatus::Irrelevant);
    }

    #[test]
    fn match_unknown_document_is_not_found() {
        assert_eq!(server().match_document("cat", 42), Err(SearchError::NotFound(42)));
    }

    #[test]
    fn document_id_is_bounds_checked() {
        let server = server();
        assert_eq!(server.document_id(0), Ok(1));
        assert_eq!(server.document_id(1), Ok(2));
        assert_eq!(server.document_id(2), Err(SearchError::OutOfRange { index: 2, count: 2 }));
    }

    #[test]
    fn custom_config_limits_results() {
        let stop = StopWords::default();
        let config = SearchConfig { max_results: 1, ..Default::default() };
        let mut server = SearchServer::with_config(stop, config);
        server.add_document(1, "cat", DocumentStatus::Actual, &[1]).unwrap();
        server.add_document(2, "cat dog", DocumentStatus::Actual, &[1]).unwrap();
        server.add_document(3, "dog", DocumentStatus::Actual, &[1]).unwrap();
        let hits = server.find_top_documents("cat").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].doc_id, 1);
    }
}
