use crate::index::InvertedIndex;
use crate::query::ParsedQuery;
use crate::DocId;

/// Plus words of `query` present in `doc_id`, in lexicographic order.
/// Any minus word present in the document empties the result.
pub fn match_words(query: &ParsedQuery, index: &InvertedIndex, doc_id: DocId) -> Vec<String> {
    if query.minus_words.iter().any(|word| index.contains(word, doc_id)) {
        return Vec::new();
    }
    query
        .plus_words
        .iter()
        .filter(|word| index.contains(word, doc_id))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::parse_query;
    use crate::stop_words::StopWords;

    fn index() -> InvertedIndex {
        let mut index = InvertedIndex::new();
        index.add_document(1, &["fluffy", "cat", "fluffy", "tail"]);
        index.add_document(2, &["fluffy", "dog", "stylish", "collar"]);
        index
    }

    #[test]
    fn returns_sorted_plus_words_present() {
        let query = parse_query("tail fluffy collar", &StopWords::default()).unwrap();
        assert_eq!(match_words(&query, &index(), 1), vec!["fluffy", "tail"]);
        assert_eq!(match_words(&query, &index(), 2), vec!["collar", "fluffy"]);
    }

    #[test]
    fn minus_word_clears_everything() {
        let query = parse_query("fluffy cat -tail", &StopWords::default()).unwrap();
        assert!(match_words(&query, &index(), 1).is_empty());
        assert_eq!(match_words(&query, &index(), 2), vec!["fluffy"]);
    }

    #[test]
    fn absent_minus_word_is_ignored() {
        let query = parse_query("cat -parrot", &StopWords::default()).unwrap();
        assert_eq!(match_words(&query, &index(), 1), vec!["cat"]);
    }
}
