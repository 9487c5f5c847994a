use crate::error::{Result, SearchError};
use crate::stop_words::StopWords;
use crate::tokenizer::{is_valid_word, split_into_words};
use std::collections::BTreeSet;

/// Plus and minus terms of a query, stop words removed.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ParsedQuery {
    pub plus_words: BTreeSet<String>,
    pub minus_words: BTreeSet<String>,
}

#[derive(Debug)]
struct QueryWord<'a> {
    data: &'a str,
    is_minus: bool,
}

/// Per-word checks that run over the whole query before any word is parsed.
fn validate_query_word(word: &str) -> Result<()> {
    if !is_valid_word(word) {
        return Err(SearchError::InvalidCharacter(word.to_string()));
    }
    if word.is_empty() || word == "-" || word.starts_with("--") {
        return Err(SearchError::MalformedMinus(word.to_string()));
    }
    Ok(())
}

fn parse_query_word(word: &str) -> Result<QueryWord<'_>> {
    let (data, is_minus) = match word.strip_prefix('-') {
        Some(rest) => (rest, true),
        None => (word, false),
    };
    if data.ends_with('-') {
        return Err(SearchError::MalformedMinus(word.to_string()));
    }
    Ok(QueryWord { data, is_minus })
}

/// Parse raw query text into plus/minus sets.
///
/// Character and minus-prefix checks run over the whole query first, so a
/// control character anywhere wins over a trailing `-` earlier in the text.
pub fn parse_query(text: &str, stop_words: &StopWords) -> Result<ParsedQuery> {
    if text.is_empty() {
        return Err(SearchError::EmptyQuery);
    }
    for word in split_into_words(text) {
        validate_query_word(word)?;
    }
    let mut query = ParsedQuery::default();
    for word in split_into_words(text) {
        let word = parse_query_word(word)?;
        if stop_words.contains(word.data) {
            continue;
        }
        if word.is_minus {
            query.minus_words.insert(word.data.to_string());
        } else {
            query.plus_words.insert(word.data.to_string());
        }
    }
    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop() -> StopWords {
        StopWords::from_text("and in").unwrap()
    }

    fn set(words: &[&str]) -> BTreeSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn splits_plus_and_minus() {
        let q = parse_query("fluffy -dog cat fluffy -dog", &stop()).unwrap();
        assert_eq!(q.plus_words, set(&["cat", "fluffy"]));
        assert_eq!(q.minus_words, set(&["dog"]));
    }

    #[test]
    fn stop_words_dropped_from_both_sets() {
        let q = parse_query("cat and -in", &stop()).unwrap();
        assert_eq!(q.plus_words, set(&["cat"]));
        assert!(q.minus_words.is_empty());
    }

    #[test]
    fn same_term_can_be_plus_and_minus() {
        let q = parse_query("cat -cat", &stop()).unwrap();
        assert_eq!(q.plus_words, set(&["cat"]));
        assert_eq!(q.minus_words, set(&["cat"]));
    }

    #[test]
    fn hyphen_inside_term_is_plain_text() {
        let q = parse_query("cat-dog -dog-cat", &stop()).unwrap();
        assert_eq!(q.plus_words, set(&["cat-dog"]));
        assert_eq!(q.minus_words, set(&["dog-cat"]));
    }

    #[test]
    fn rejects_empty_query_and_empty_words() {
        assert_eq!(parse_query("", &stop()), Err(SearchError::EmptyQuery));
        let empty_word = Err(SearchError::MalformedMinus(String::new()));
        assert_eq!(parse_query("fluffy  tail", &stop()), empty_word);
        assert_eq!(parse_query("fluffy ", &stop()), empty_word);
        assert_eq!(parse_query(" fluffy", &stop()), empty_word);
    }

    #[test]
    fn rejects_malformed_minus() {
        for query in ["-", "fluffy -", "--cat", "fluffy --cat", "cat-", "-cat-", "---"] {
            assert!(
                matches!(parse_query(query, &stop()), Err(SearchError::MalformedMinus(_))),
                "query {query:?} should be rejected"
            );
        }
    }

    #[test]
    fn control_character_checked_before_minus_syntax() {
        assert_eq!(
            parse_query("fluffy\x12 -", &stop()),
            Err(SearchError::InvalidCharacter("fluffy\x12".into()))
        );
        assert_eq!(parse_query("-", &stop()), Err(SearchError::MalformedMinus("-".into())));
    }

    #[test]
    fn whole_query_validated_before_trailing_minus_check() {
        assert_eq!(
            parse_query("cat- x\x12", &stop()),
            Err(SearchError::InvalidCharacter("x\x12".into()))
        );
        assert_eq!(
            parse_query("cat- --dog", &stop()),
            Err(SearchError::MalformedMinus("--dog".into()))
        );
        assert_eq!(
            parse_query("cat- dog", &stop()),
            Err(SearchError::MalformedMinus("cat-".into()))
        );
    }
}
