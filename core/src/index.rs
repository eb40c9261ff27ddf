//! The word/document relation behind the search server.
//!
//! Term frequencies are stored twice: once keyed by word (posting lists, used for ranking)
//! and once keyed by document (used for removal and word-frequency lookups). Both views are
//! private and only change through [`InvertedIndex::insert_document`] and
//! [`InvertedIndex::remove_document`], so they always hold the same triples.

use crate::{DocumentId, ExecutionPolicy};
use rayon::prelude::*;
use std::collections::BTreeMap;

/// document id -> term frequency of one word
pub type Postings = BTreeMap<DocumentId, f64>;

#[derive(Debug, Default, Clone)]
pub struct InvertedIndex {
    word_to_document_freqs: BTreeMap<String, Postings>,
    document_to_word_freqs: BTreeMap<DocumentId, BTreeMap<String, f64>>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every occurrence of `words` for `id`. Each occurrence adds `1 / words.len()`.
    pub(crate) fn insert_document(&mut self, id: DocumentId, words: &[&str]) {
        let doc_freqs = self.document_to_word_freqs.entry(id).or_default();
        if words.is_empty() {
            return;
        }
        let inv_word_count = 1.0 / words.len() as f64;
        for &word in words {
            *doc_freqs.entry(word.to_string()).or_insert(0.0) += inv_word_count;
            *self
                .word_to_document_freqs
                .entry(word.to_string())
                .or_default()
                .entry(id)
                .or_insert(0.0) += inv_word_count;
        }
    }

    /// Drop `id` from both views. Posting lists left empty are deleted under either policy.
    pub(crate) fn remove_document(&mut self, id: DocumentId, policy: ExecutionPolicy) {
        let Some(doc_freqs) = self.document_to_word_freqs.remove(&id) else {
            return;
        };
        match policy {
            ExecutionPolicy::Sequential => {
                for word in doc_freqs.keys() {
                    if let Some(postings) = self.word_to_document_freqs.get_mut(word) {
                        postings.remove(&id);
                        if postings.is_empty() {
                            self.word_to_document_freqs.remove(word);
                        }
                    }
                }
            }
            ExecutionPolicy::Parallel => {
                // Detach the affected lists so each task owns a disjoint one.
                let mut detached: Vec<(String, Postings)> = doc_freqs
                    .into_keys()
                    .filter_map(|word| {
                        let postings = self.word_to_document_freqs.remove(&word)?;
                        Some((word, postings))
                    })
                    .collect();
                detached.par_iter_mut().for_each(|(_, postings)| {
                    postings.remove(&id);
                });
                for (word, postings) in detached {
                    if !postings.is_empty() {
                        self.word_to_document_freqs.insert(word, postings);
                    }
                }
            }
        }
    }

    pub fn postings(&self, word: &str) -> Option<&Postings> {
        self.word_to_document_freqs.get(word)
    }

    /// Number of documents containing `word`.
    pub fn document_frequency(&self, word: &str) -> usize {
        self.postings(word).map_or(0, |p| p.len())
    }

    pub fn contains(&self, word: &str, id: DocumentId) -> bool {
        self.postings(word).is_some_and(|p| p.contains_key(&id))
    }

    /// Words indexed for `id`, in ascending order. Empty for unknown ids.
    pub fn words(&self, id: DocumentId) -> impl Iterator<Item = &str> + '_ {
        self.document_to_word_freqs
            .get(&id)
            .into_iter()
            .flat_map(|freqs| freqs.keys().map(String::as_str))
    }

    /// Fresh word -> frequency map for `id`; empty when `id` is unknown.
    pub fn word_frequencies(&self, id: DocumentId) -> BTreeMap<&str, f64> {
        self.document_to_word_freqs
            .get(&id)
            .map(|freqs| freqs.iter().map(|(w, &f)| (w.as_str(), f)).collect())
            .unwrap_or_default()
    }

    /// Number of distinct indexed words.
    pub fn vocabulary_len(&self) -> usize {
        self.word_to_document_freqs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_of(docs: &[(DocumentId, &[&str])]) -> InvertedIndex {
        let mut index = InvertedIndex::new();
        for (id, words) in docs {
            index.insert_document(*id, words);
        }
        index
    }

    #[test]
    fn term_frequencies_accumulate_per_occurrence() {
        let index = index_of(&[(1, &["curly", "cat", "curly", "tail"])]);
        let freqs = index.word_frequencies(1);
        assert_eq!(freqs["curly"], 0.5);
        assert_eq!(freqs["cat"], 0.25);
        assert_eq!(index.postings("curly").unwrap()[&1], 0.5);
    }

    #[test]
    fn unknown_document_has_no_words() {
        let index = index_of(&[(1, &["cat"])]);
        assert!(index.word_frequencies(7).is_empty());
        assert_eq!(index.words(7).count(), 0);
    }

    #[test]
    fn sequential_removal_drops_empty_postings() {
        let mut index = index_of(&[(1, &["cat", "dog"]), (2, &["dog"])]);
        index.remove_document(1, ExecutionPolicy::Sequential);
        assert!(index.postings("cat").is_none());
        assert_eq!(index.document_frequency("dog"), 1);
        assert!(index.word_frequencies(1).is_empty());
    }

    #[test]
    fn parallel_removal_matches_sequential() {
        let docs: &[(DocumentId, &[&str])] =
            &[(1, &["cat", "dog", "bird"]), (2, &["dog", "fish"]), (3, &["bird", "cat"])];
        let mut seq = index_of(docs);
        let mut par = index_of(docs);
        seq.remove_document(1, ExecutionPolicy::Sequential);
        par.remove_document(1, ExecutionPolicy::Parallel);
        assert_eq!(seq.word_to_document_freqs, par.word_to_document_freqs);
        assert_eq!(seq.document_to_word_freqs, par.document_to_word_freqs);
        assert_eq!(par.vocabulary_len(), 4);
    }
}
