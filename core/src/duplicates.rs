use crate::{DocumentId, ExecutionPolicy, SearchServer};
use std::collections::{BTreeSet, HashSet};

/// Ids whose indexed word set equals that of a lower id. Word order and repeats are ignored.
pub fn find_duplicates(server: &SearchServer) -> Vec<DocumentId> {
    let mut seen: HashSet<BTreeSet<&str>> = HashSet::new();
    let mut duplicates = Vec::new();
    for document_id in server {
        let words: BTreeSet<&str> = server.index().words(document_id).collect();
        if !seen.insert(words) {
            duplicates.push(document_id);
        }
    }
    duplicates
}

/// Remove every duplicate found by [`find_duplicates`], keeping the first id of each group.
/// Returns the removed ids in ascending order.
pub fn remove_duplicates(server: &mut SearchServer) -> Vec<DocumentId> {
    let duplicates = find_duplicates(server);
    for &document_id in &duplicates {
        server.remove_document_with(ExecutionPolicy::Sequential, document_id);
        tracing::info!(document_id, "found duplicate document");
    }
    duplicates
}

impl SearchServer {
    pub fn remove_duplicates(&mut self) -> Vec<DocumentId> {
        remove_duplicates(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DocumentStatus;

    #[test]
    fn word_order_and_repeats_do_not_matter() {
        let mut server = SearchServer::from_stop_text("and").unwrap();
        server.add_document(1, "nasty rat and funny pet", DocumentStatus::Actual, &[1]).unwrap();
        server.add_document(2, "funny funny pet nasty rat", DocumentStatus::Banned, &[9]).unwrap();
        server.add_document(3, "funny pet", DocumentStatus::Actual, &[1]).unwrap();
        assert_eq!(find_duplicates(&server), vec![2]);
        assert_eq!(server.remove_duplicates(), vec![2]);
        assert_eq!(server.iter().collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn empty_documents_group_together() {
        let mut server = SearchServer::from_stop_text("and").unwrap();
        server.add_document(4, "and", DocumentStatus::Actual, &[]).unwrap();
        server.add_document(7, "", DocumentStatus::Actual, &[]).unwrap();
        assert_eq!(server.remove_duplicates(), vec![7]);
    }
}
