//! Ordering and selection of ranked documents.

use crate::{Document, DocumentId, DocumentStatus, MAX_RESULT_DOCUMENT_COUNT, RELEVANCE_EPSILON};

/// Filter applied to every candidate posting during ranking: `(id, status, rating) -> keep`.
pub type DocumentPredicate = dyn Fn(DocumentId, DocumentStatus, i32) -> bool + Sync;

/// `ln(total / containing)`.
pub fn inverse_document_freq(total_documents: usize, documents_with_word: usize) -> f64 {
    (total_documents as f64 / documents_with_word as f64).ln()
}

/// Sort by descending relevance; relevances closer than [`RELEVANCE_EPSILON`] count as equal
/// and are ordered by descending rating (then ascending id).
pub fn sort_by_relevance(documents: &mut [Document]) {
    documents.sort_by(|a, b| {
        b.relevance
            .total_cmp(&a.relevance)
            .then_with(|| b.rating.cmp(&a.rating))
            .then_with(|| a.id.cmp(&b.id))
    });
    // Re-order each run of near-equal relevances by rating; a run is anchored at its first element.
    let mut start = 0;
    while start < documents.len() {
        let anchor = documents[start].relevance;
        let mut end = start + 1;
        while end < documents.len() && (anchor - documents[end].relevance).abs() < RELEVANCE_EPSILON {
            end += 1;
        }
        documents[start..end].sort_by(|a, b| b.rating.cmp(&a.rating).then_with(|| a.id.cmp(&b.id)));
        start = end;
    }
}

/// Sort and keep the best [`MAX_RESULT_DOCUMENT_COUNT`].
pub fn select_top(mut documents: Vec<Document>) -> Vec<Document> {
    sort_by_relevance(&mut documents);
    documents.truncate(MAX_RESULT_DOCUMENT_COUNT);
    documents
}
