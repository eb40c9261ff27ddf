//! Independent queries fanned out across the rayon pool.

use crate::error::Result;
use crate::{Document, SearchServer};
use rayon::prelude::*;

/// `result[i]` is `server.find_top_documents(&queries[i])`. Fails if any query is malformed.
pub fn process_queries<S>(server: &SearchServer, queries: &[S]) -> Result<Vec<Vec<Document>>>
where
    S: AsRef<str> + Sync,
{
    queries
        .par_iter()
        .map(|query| server.find_top_documents(query.as_ref()))
        .collect()
}

/// All results of [`process_queries`] flattened, query by query.
pub fn process_queries_joined<S>(server: &SearchServer, queries: &[S]) -> Result<Vec<Document>>
where
    S: AsRef<str> + Sync,
{
    Ok(process_queries(server, queries)?.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DocumentStatus, SearchError};

    fn server() -> SearchServer {
        let mut server = SearchServer::from_stop_text("and with").unwrap();
        let texts = ["funny pet and nasty rat", "funny pet with curly hair", "big dog", "nasty dog"];
        for (id, text) in texts.iter().enumerate() {
            server.add_document(id as i32, text, DocumentStatus::Actual, &[id as i32]).unwrap();
        }
        server
    }

    #[test]
    fn results_follow_query_order() {
        let server = server();
        let queries = ["nasty rat -not", "not very funny nasty pet", "curly hair", "unknown"];
        let results = process_queries(&server, &queries).unwrap();
        assert_eq!(results.len(), queries.len());
        for (query, result) in queries.iter().zip(&results) {
            assert_eq!(result, &server.find_top_documents(query).unwrap());
        }
        assert!(results[3].is_empty());
    }

    #[test]
    fn joined_preserves_query_major_order() {
        let server = server();
        let queries = vec!["dog".to_string(), "curly".to_string()];
        let joined = process_queries_joined(&server, &queries).unwrap();
        let ids: Vec<_> = joined.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn malformed_query_fails_the_batch() {
        let server = server();
        let err = process_queries(&server, &["dog", "--cat"]).unwrap_err();
        assert_eq!(err, SearchError::DoubleMinus("--cat".into()));
    }
}
