use crate::error::{Result, SearchError};
use std::collections::BTreeSet;

/// Split text into words on runs of spaces. Empty pieces are dropped, order is kept.
pub fn split_words(text: &str) -> Vec<&str> {
    text.split(' ').filter(|w| !w.is_empty()).collect()
}

/// A word is valid when it carries no control character (codes 0 to 31).
pub fn is_valid_word(word: &str) -> bool {
    !word.chars().any(|c| (c as u32) < 0x20)
}

pub(crate) fn ensure_valid_word(word: &str) -> Result<()> {
    if is_valid_word(word) {
        Ok(())
    } else {
        Err(SearchError::InvalidWord(word.to_string()))
    }
}

/// Immutable set of words excluded from indexing and from queries.
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: BTreeSet<String>,
}

impl StopWords {
    /// Build from any collection of strings; empty strings are skipped and repeats collapse.
    pub fn new<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for word in words {
            let word = word.as_ref();
            if word.is_empty() {
                continue;
            }
            ensure_valid_word(word)?;
            set.insert(word.to_string());
        }
        Ok(Self { words: set })
    }

    /// Build from space-separated text.
    pub fn from_text(text: &str) -> Result<Self> {
        Self::new(split_words(text))
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Split a document into indexable words: validated, stop words removed, repeats kept.
pub(crate) fn split_words_no_stop<'a>(text: &'a str, stop_words: &StopWords) -> Result<Vec<&'a str>> {
    let mut words = Vec::new();
    for word in split_words(text) {
        ensure_valid_word(word)?;
        if !stop_words.contains(word) {
            words.push(word);
        }
    }
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_space_runs() {
        assert_eq!(split_words("  big   white dog "), vec!["big", "white", "dog"]);
        assert!(split_words("    ").is_empty());
        assert!(split_words("").is_empty());
    }

    #[test]
    fn rejects_control_characters() {
        assert!(is_valid_word("curly"));
        assert!(is_valid_word("кот"));
        assert!(!is_valid_word("cur\x01ly"));
        assert!(!is_valid_word("tab\there"));
    }

    #[test]
    fn stop_words_drop_empty_and_repeats() {
        let stop = StopWords::new(["and", "", "in", "and"]).unwrap();
        assert_eq!(stop.len(), 2);
        assert!(stop.contains("in"));
        assert!(!stop.contains(""));
    }

    #[test]
    fn invalid_stop_word_fails_construction() {
        let err = StopWords::from_text("and i\x12n").unwrap_err();
        assert_eq!(err, SearchError::InvalidWord("i\x12n".into()));
    }

    #[test]
    fn no_stop_split_keeps_repeats() {
        let stop = StopWords::from_text("and").unwrap();
        let words = split_words_no_stop("cat and cat", &stop).unwrap();
        assert_eq!(words, vec!["cat", "cat"]);
    }
}
