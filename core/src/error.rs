use crate::DocumentId;

/// Errors raised by the search engine. Every variant is reported before any state is touched.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("invalid document id {0}: ids must be non-negative")]
    InvalidDocumentId(DocumentId),
    #[error("document id {0} is already registered")]
    DuplicateDocumentId(DocumentId),
    #[error("word {0:?} contains a control character (codes 0 to 31)")]
    InvalidWord(String),
    #[error("a bare minus is not a valid query word")]
    BareMinus,
    #[error("query word {0:?} has more than one leading minus")]
    DoubleMinus(String),
    #[error("document {0} is not registered")]
    UnknownDocument(DocumentId),
}

impl SearchError {
    /// True for the errors caused by malformed caller input.
    pub fn is_invalid_argument(&self) -> bool {
        !matches!(self, SearchError::UnknownDocument(_))
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;
