use crate::document::{compute_average_rating, DocumentData};
use crate::error::{Result, SearchError};
use crate::index::InvertedIndex;
use crate::query::{Query, QueryTerms};
use crate::ranking::{inverse_document_freq, select_top, DocumentPredicate};
use crate::tokenizer::{split_words_no_stop, StopWords};
use crate::{Document, DocumentId, DocumentStatus, ExecutionPolicy};
use rayon::prelude::*;
use std::collections::{btree_map, BTreeMap};

/// In-memory TF-IDF search server.
///
/// Owns the stop words, the inverted index and the per-document metadata. Reads take `&self`
/// and may run concurrently; every mutation takes `&mut self`.
#[derive(Debug, Clone, Default)]
pub struct SearchServer {
    stop_words: StopWords,
    index: InvertedIndex,
    documents: BTreeMap<DocumentId, DocumentData>,
}

impl SearchServer {
    /// Create a server from a collection of stop words.
    pub fn new<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self::with_stop_words(StopWords::new(stop_words)?))
    }

    /// Create a server from space-separated stop words, e.g. `"and in at"`.
    pub fn from_stop_text(stop_text: &str) -> Result<Self> {
        Ok(Self::with_stop_words(StopWords::from_text(stop_text)?))
    }

    pub fn with_stop_words(stop_words: StopWords) -> Self {
        Self { stop_words, index: InvertedIndex::new(), documents: BTreeMap::new() }
    }

    /// Index a document. Nothing is modified when an error is returned.
    pub fn add_document(
        &mut self,
        document_id: DocumentId,
        document: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        if document_id < 0 {
            return Err(SearchError::InvalidDocumentId(document_id));
        }
        if self.documents.contains_key(&document_id) {
            return Err(SearchError::DuplicateDocumentId(document_id));
        }
        let words = split_words_no_stop(document, &self.stop_words)?;
        self.index.insert_document(document_id, &words);
        let rating = compute_average_rating(ratings);
        self.documents.insert(document_id, DocumentData { rating, status });
        tracing::debug!(document_id, words = words.len(), %status, rating, "document added");
        Ok(())
    }

    /// Top documents with status [`DocumentStatus::Actual`].
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top_documents_with_status(raw_query, DocumentStatus::Actual)
    }

    pub fn find_top_documents_with_status(
        &self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        self.find_top_documents_by(raw_query, &move |_, document_status, _| document_status == status)
    }

    /// Top documents among those accepted by `predicate`. Documents containing a minus word
    /// are excluded whatever the predicate says.
    pub fn find_top_documents_by(
        &self,
        raw_query: &str,
        predicate: &DocumentPredicate,
    ) -> Result<Vec<Document>> {
        let query = Query::parse(raw_query, &self.stop_words)?;
        Ok(select_top(self.find_all_documents(&query, predicate)))
    }

    fn find_all_documents(&self, query: &Query<'_>, predicate: &DocumentPredicate) -> Vec<Document> {
        let mut document_to_relevance: BTreeMap<DocumentId, f64> = BTreeMap::new();
        for word in &query.plus_words {
            let Some(postings) = self.index.postings(word) else { continue };
            let idf = inverse_document_freq(self.documents.len(), postings.len());
            for (&document_id, &term_freq) in postings {
                let Some(data) = self.documents.get(&document_id) else { continue };
                if predicate(document_id, data.status, data.rating) {
                    *document_to_relevance.entry(document_id).or_insert(0.0) += term_freq * idf;
                }
            }
        }
        for word in &query.minus_words {
            let Some(postings) = self.index.postings(word) else { continue };
            for document_id in postings.keys() {
                document_to_relevance.remove(document_id);
            }
        }
        document_to_relevance
            .into_iter()
            .filter_map(|(id, relevance)| {
                self.documents.get(&id).map(|data| Document::new(id, relevance, data.rating))
            })
            .collect()
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// The `index`-th registered id in ascending order.
    pub fn document_id(&self, index: usize) -> Option<DocumentId> {
        self.documents.keys().nth(index).copied()
    }

    /// Registered ids in ascending order.
    pub fn iter(&self) -> DocumentIds<'_> {
        DocumentIds { inner: self.documents.keys() }
    }

    pub fn contains(&self, document_id: DocumentId) -> bool {
        self.documents.contains_key(&document_id)
    }

    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    /// Word -> term frequency for a document; an empty map for unknown ids.
    pub fn word_frequencies(&self, document_id: DocumentId) -> BTreeMap<&str, f64> {
        self.index.word_frequencies(document_id)
    }

    pub(crate) fn index(&self) -> &InvertedIndex {
        &self.index
    }

    /// Sequential removal. Unknown ids are ignored.
    pub fn remove_document(&mut self, document_id: DocumentId) {
        self.remove_document_with(ExecutionPolicy::Sequential, document_id)
    }

    pub fn remove_document_with(&mut self, policy: ExecutionPolicy, document_id: DocumentId) {
        if self.documents.remove(&document_id).is_none() {
            return;
        }
        self.index.remove_document(document_id, policy);
        tracing::debug!(document_id, ?policy, "document removed");
    }

    /// Plus words of `raw_query` found in the document, in ascending order, with the
    /// document's status. The word list is empty when the document contains a minus word.
    pub fn match_document<'q>(
        &self,
        raw_query: &'q str,
        document_id: DocumentId,
    ) -> Result<(Vec<&'q str>, DocumentStatus)> {
        self.match_document_with(ExecutionPolicy::Sequential, raw_query, document_id)
    }

    pub fn match_document_with<'q>(
        &self,
        policy: ExecutionPolicy,
        raw_query: &'q str,
        document_id: DocumentId,
    ) -> Result<(Vec<&'q str>, DocumentStatus)> {
        match policy {
            ExecutionPolicy::Sequential => self.match_sequential(raw_query, document_id),
            ExecutionPolicy::Parallel => self.match_parallel(raw_query, document_id),
        }
    }

    fn status_of(&self, document_id: DocumentId) -> Result<DocumentStatus> {
        self.documents
            .get(&document_id)
            .map(|data| data.status)
            .ok_or(SearchError::UnknownDocument(document_id))
    }

    fn match_sequential<'q>(
        &self,
        raw_query: &'q str,
        document_id: DocumentId,
    ) -> Result<(Vec<&'q str>, DocumentStatus)> {
        let query = Query::parse(raw_query, &self.stop_words)?;
        let status = self.status_of(document_id)?;
        if query.minus_words.iter().any(|word| self.index.contains(word, document_id)) {
            return Ok((Vec::new(), status));
        }
        let matched = query
            .plus_words
            .into_iter()
            .filter(|word| self.index.contains(word, document_id))
            .collect();
        Ok((matched, status))
    }

    fn match_parallel<'q>(
        &self,
        raw_query: &'q str,
        document_id: DocumentId,
    ) -> Result<(Vec<&'q str>, DocumentStatus)> {
        let terms = QueryTerms::parse(raw_query, &self.stop_words)?;
        let status = self.status_of(document_id)?;
        if terms.minus_words.par_iter().any(|word| self.index.contains(word, document_id)) {
            return Ok((Vec::new(), status));
        }
        let mut matched: Vec<&'q str> = terms
            .plus_words
            .par_iter()
            .copied()
            .filter(|word| self.index.contains(word, document_id))
            .collect();
        matched.par_sort_unstable();
        matched.dedup();
        Ok((matched, status))
    }
}

/// Iterator over registered document ids, ascending.
pub struct DocumentIds<'a> {
    inner: btree_map::Keys<'a, DocumentId, DocumentData>,
}

impl Iterator for DocumentIds<'_> {
    type Item = DocumentId;

    fn next(&mut self) -> Option<DocumentId> {
        self.inner.next().copied()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for DocumentIds<'_> {}

impl<'a> IntoIterator for &'a SearchServer {
    type Item = DocumentId;
    type IntoIter = DocumentIds<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
