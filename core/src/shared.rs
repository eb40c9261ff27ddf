//! A search server shared between threads: one writer or many readers at a time.

use crate::batch;
use crate::error::Result;
use crate::ranking::DocumentPredicate;
use crate::{Document, DocumentId, DocumentStatus, ExecutionPolicy, SearchServer};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

/// Cloneable handle. Mutations hold the write lock for their whole duration; searches
/// hold the read lock.
#[derive(Debug, Clone, Default)]
pub struct SharedSearchServer {
    inner: Arc<RwLock<SearchServer>>,
}

impl SharedSearchServer {
    pub fn new(server: SearchServer) -> Self {
        Self { inner: Arc::new(RwLock::new(server)) }
    }

    pub fn read(&self) -> RwLockReadGuard<'_, SearchServer> {
        self.inner.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, SearchServer> {
        self.inner.write()
    }

    pub fn add_document(
        &self,
        document_id: DocumentId,
        document: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        self.inner.write().add_document(document_id, document, status, ratings)
    }

    pub fn remove_document(&self, policy: ExecutionPolicy, document_id: DocumentId) {
        self.inner.write().remove_document_with(policy, document_id)
    }

    pub fn remove_duplicates(&self) -> Vec<DocumentId> {
        self.inner.write().remove_duplicates()
    }

    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.inner.read().find_top_documents(raw_query)
    }

    pub fn find_top_documents_by(
        &self,
        raw_query: &str,
        predicate: &DocumentPredicate,
    ) -> Result<Vec<Document>> {
        self.inner.read().find_top_documents_by(raw_query, predicate)
    }

    pub fn match_document<'q>(
        &self,
        policy: ExecutionPolicy,
        raw_query: &'q str,
        document_id: DocumentId,
    ) -> Result<(Vec<&'q str>, DocumentStatus)> {
        self.inner.read().match_document_with(policy, raw_query, document_id)
    }

    pub fn process_queries<S>(&self, queries: &[S]) -> Result<Vec<Vec<Document>>>
    where
        S: AsRef<str> + Sync,
    {
        batch::process_queries(&self.inner.read(), queries)
    }

    pub fn document_count(&self) -> usize {
        self.inner.read().document_count()
    }

    pub fn word_frequencies(&self, document_id: DocumentId) -> Vec<(String, f64)> {
        self.inner
            .read()
            .word_frequencies(document_id)
            .into_iter()
            .map(|(word, freq)| (word.to_string(), freq))
            .collect()
    }
}

impl From<SearchServer> for SharedSearchServer {
    fn from(server: SearchServer) -> Self {
        Self::new(server)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_are_visible_to_clones() {
        let shared = SharedSearchServer::new(SearchServer::from_stop_text("and").unwrap());
        let other = shared.clone();
        shared.add_document(1, "white cat", DocumentStatus::Actual, &[3]).unwrap();
        assert_eq!(other.document_count(), 1);
        let (words, _) = other.match_document(ExecutionPolicy::Parallel, "cat dog", 1).unwrap();
        assert_eq!(words, vec!["cat"]);
        other.remove_document(ExecutionPolicy::Sequential, 1);
        assert!(shared.word_frequencies(1).is_empty());
    }
}
