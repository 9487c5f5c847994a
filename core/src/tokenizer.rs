/// Split text into terms on single space characters.
///
/// Consecutive spaces produce empty terms and empty input produces one empty
/// term; callers decide whether an empty term is an error or noise. Tabs and
/// newlines are ordinary characters here.
pub fn split_into_words(text: &str) -> impl Iterator<Item = &str> + '_ {
    text.split(' ')
}

/// A term is valid when it contains no control characters (below `' '`).
pub fn is_valid_word(word: &str) -> bool {
    !word.chars().any(|c| c < ' ')
}
