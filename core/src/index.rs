use crate::DocId;
use std::collections::{BTreeMap, HashMap};

/// Term to (document id to term frequency) mapping.
///
/// A document's frequencies are occurrence fractions of its retained word
/// count, so they sum to 1.0 across all of its terms.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    postings: HashMap<String, BTreeMap<DocId, f64>>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index already validated, stop-word-filtered, non-empty words of one document.
    pub fn add_document(&mut self, doc_id: DocId, words: &[&str]) {
        if words.is_empty() {
            return;
        }
        let inv_word_count = 1.0 / words.len() as f64;
        for word in words {
            *self
                .postings
                .entry((*word).to_string())
                .or_default()
                .entry(doc_id)
                .or_insert(0.0) += inv_word_count;
        }
    }

    /// Postings of `term`, ordered by document id.
    pub fn postings(&self, term: &str) -> Option<&BTreeMap<DocId, f64>> {
        self.postings.get(term)
    }

    /// Number of documents containing `term`.
    pub fn document_frequency(&self, term: &str) -> usize {
        self.postings.get(term).map_or(0, BTreeMap::len)
    }

    pub fn contains(&self, term: &str, doc_id: DocId) -> bool {
        self.postings.get(term).is_some_and(|p| p.contains_key(&doc_id))
    }

    /// Term frequencies of one document. Scans every postings list.
    pub fn word_frequencies(&self, doc_id: DocId) -> BTreeMap<&str, f64> {
        self.postings
            .iter()
            .filter_map(|(term, docs)| docs.get(&doc_id).map(|tf| (term.as_str(), *tf)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn term_frequency_is_occurrence_fraction() {
        let mut index = InvertedIndex::new();
        index.add_document(1, &["fluffy", "cat", "fluffy", "tail"]);

        let fluffy = index.postings("fluffy").unwrap();
        assert!((fluffy[&1] - 0.5).abs() < 1e-12);
        assert!((index.postings("cat").unwrap()[&1] - 0.25).abs() < 1e-12);
        assert_eq!(index.document_frequency("tail"), 1);
    }

    #[test]
    fn frequencies_sum_to_one() {
        let mut index = InvertedIndex::new();
        index.add_document(7, &["a", "b", "c", "a", "b", "a", "d"]);
        let sum: f64 = index.word_frequencies(7).values().sum();
        assert!((sum - 1.0).abs() < 1e-6);
    }

    #[test]
    fn document_frequency_counts_documents_not_occurrences() {
        let mut index = InvertedIndex::new();
        index.add_document(1, &["dog", "dog", "dog"]);
        index.add_document(2, &["dog", "collar"]);
        assert_eq!(index.document_frequency("dog"), 2);
        assert_eq!(index.document_frequency("collar"), 1);
        assert_eq!(index.document_frequency("cat"), 0);
        assert!(index.contains("collar", 2));
        assert!(!index.contains("collar", 1));
    }

    #[test]
    fn empty_document_leaves_index_untouched() {
        let mut index = InvertedIndex::new();
        index.add_document(3, &[]);
        assert_eq!(index.document_frequency("anything"), 0);
        assert!(index.word_frequencies(3).is_empty());
    }
}
