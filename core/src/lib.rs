//! In-memory full-text search over short documents: an inverted index with TF-IDF ranking,
//! plus/minus word queries, duplicate elimination, batch querying and request statistics.

pub mod batch;
pub mod document;
pub mod duplicates;
pub mod error;
pub mod index;
pub mod query;
pub mod ranking;
pub mod request_queue;
pub mod server;
pub mod shared;
pub mod tokenizer;

pub use batch::{process_queries, process_queries_joined};
pub use document::{Document, DocumentId, DocumentStatus};
pub use duplicates::{find_duplicates, remove_duplicates};
pub use error::{Result, SearchError};
pub use ranking::DocumentPredicate;
pub use request_queue::RequestQueue;
pub use server::SearchServer;
pub use shared::SharedSearchServer;

/// Maximum number of documents returned by a search.
pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;
/// Relevances closer than this are ranked by rating instead.
pub const RELEVANCE_EPSILON: f64 = 1e-6;
/// Length of the request statistics window, in requests.
pub const REQUEST_WINDOW: u64 = 1440;

/// How an operation that supports data parallelism runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionPolicy {
    #[default]
    Sequential,
    /// Fan out over the rayon global pool and join before returning.
    Parallel,
}
