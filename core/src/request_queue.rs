//! Sliding-window statistics over search requests.

use crate::error::Result;
use crate::ranking::DocumentPredicate;
use crate::{Document, DocumentStatus, SearchServer, REQUEST_WINDOW};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestRecord {
    pub tick: u64,
    pub result_count: usize,
}

/// Runs searches against a server and counts how many of the requests in the trailing
/// window returned nothing. Every request advances the logical clock by one tick.
#[derive(Debug)]
pub struct RequestQueue<'a> {
    server: &'a SearchServer,
    requests: VecDeque<RequestRecord>,
    window: u64,
    current_tick: u64,
    no_result_requests: usize,
}

impl<'a> RequestQueue<'a> {
    pub fn new(server: &'a SearchServer) -> Self {
        Self::with_window(server, REQUEST_WINDOW)
    }

    pub fn with_window(server: &'a SearchServer, window: u64) -> Self {
        Self {
            server,
            requests: VecDeque::new(),
            window: window.max(1),
            current_tick: 0,
            no_result_requests: 0,
        }
    }

    pub fn add_find_request(&mut self, raw_query: &str) -> Result<Vec<Document>> {
        let result = self.server.find_top_documents(raw_query)?;
        self.record(result.len());
        Ok(result)
    }

    pub fn add_find_request_with_status(
        &mut self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        let result = self.server.find_top_documents_with_status(raw_query, status)?;
        self.record(result.len());
        Ok(result)
    }

    pub fn add_find_request_by(
        &mut self,
        raw_query: &str,
        predicate: &DocumentPredicate,
    ) -> Result<Vec<Document>> {
        let result = self.server.find_top_documents_by(raw_query, predicate)?;
        self.record(result.len());
        Ok(result)
    }

    /// Requests in the current window that returned no documents.
    pub fn no_result_requests(&self) -> usize {
        self.no_result_requests
    }

    /// Requests currently held in the window.
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    fn record(&mut self, result_count: usize) {
        self.current_tick += 1;
        if let Some(oldest) = self.requests.front() {
            if self.current_tick - oldest.tick >= self.window {
                if oldest.result_count == 0 {
                    self.no_result_requests -= 1;
                }
                self.requests.pop_front();
            }
        }
        self.requests.push_back(RequestRecord { tick: self.current_tick, result_count });
        if result_count == 0 {
            self.no_result_requests += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_window_evicts_oldest() {
        let mut server = SearchServer::from_stop_text("").unwrap();
        server.add_document(1, "cat", DocumentStatus::Actual, &[]).unwrap();
        let mut queue = RequestQueue::with_window(&server, 3);
        queue.add_find_request("dog").unwrap();
        queue.add_find_request("dog").unwrap();
        queue.add_find_request("cat").unwrap();
        assert_eq!(queue.no_result_requests(), 2);
        queue.add_find_request("cat").unwrap();
        assert_eq!(queue.no_result_requests(), 1);
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn failed_request_is_not_recorded() {
        let server = SearchServer::from_stop_text("").unwrap();
        let mut queue = RequestQueue::new(&server);
        assert!(queue.add_find_request("-").is_err());
        assert!(queue.is_empty());
        assert_eq!(queue.no_result_requests(), 0);
    }
}
