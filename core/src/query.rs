//! Parsing of raw query strings into plus and minus word sets.

use crate::error::{Result, SearchError};
use crate::tokenizer::{ensure_valid_word, split_words, StopWords};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryWord<'a> {
    pub text: &'a str,
    pub is_minus: bool,
    pub is_stop: bool,
}

/// A parsed query. Words borrow from the raw query string; repeats collapse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query<'a> {
    pub plus_words: BTreeSet<&'a str>,
    pub minus_words: BTreeSet<&'a str>,
}

impl<'a> Query<'a> {
    pub fn parse(text: &'a str, stop_words: &StopWords) -> Result<Self> {
        let mut query = Query::default();
        for_each_query_word(text, stop_words, |word| {
            if word.is_minus {
                query.minus_words.insert(word.text);
            } else {
                query.plus_words.insert(word.text);
            }
        })?;
        tracing::trace!(plus = query.plus_words.len(), minus = query.minus_words.len(), "parsed query");
        Ok(query)
    }

    pub fn is_empty(&self) -> bool {
        self.plus_words.is_empty() && self.minus_words.is_empty()
    }
}

/// Query words in input order, repeats kept. Used by the parallel matcher, which
/// deduplicates after the fan-in instead of while parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryTerms<'a> {
    pub plus_words: Vec<&'a str>,
    pub minus_words: Vec<&'a str>,
}

impl<'a> QueryTerms<'a> {
    pub fn parse(text: &'a str, stop_words: &StopWords) -> Result<Self> {
        let mut terms = QueryTerms::default();
        for_each_query_word(text, stop_words, |word| {
            if word.is_minus {
                terms.minus_words.push(word.text);
            } else {
                terms.plus_words.push(word.text);
            }
        })?;
        Ok(terms)
    }
}

/// Feed every non-stop query word to `f`; fails on the first malformed token.
fn for_each_query_word<'a>(
    text: &'a str,
    stop_words: &StopWords,
    mut f: impl FnMut(QueryWord<'a>),
) -> Result<()> {
    for word in split_words(text) {
        let query_word = parse_query_word(word, stop_words)?;
        if !query_word.is_stop {
            f(query_word);
        }
    }
    Ok(())
}

/// Classify one token. The stop-word check runs on the text with its minus stripped.
pub fn parse_query_word<'a>(word: &'a str, stop_words: &StopWords) -> Result<QueryWord<'a>> {
    ensure_valid_word(word)?;
    let (text, is_minus) = match word.strip_prefix('-') {
        Some("") => return Err(SearchError::BareMinus),
        Some(rest) if rest.starts_with('-') => return Err(SearchError::DoubleMinus(word.to_string())),
        Some(rest) => (rest, true),
        None => (word, false),
    };
    Ok(QueryWord { text, is_minus, is_stop: stop_words.contains(text) })
}
