use std::collections::VecDeque;
use crate::core::error::Result;
use crate::core::server::SearchServer;
use crate::core::types::{DocId, DocumentStatus};
use crate::search::results::ScoredDocument;

/// Remembers whether each of the last `capacity` requests came back empty
pub struct RequestQueue<'a> {
    server: &'a SearchServer,
    requests: VecDeque<bool>,
    capacity: usize,
    no_result_count: usize,
}

impl<'a> RequestQueue<'a> {
    pub fn new(server: &'a SearchServer) -> Self {
        Self::with_capacity(server, server.config().request_history_capacity)
    }

    pub fn with_capacity(server: &'a SearchServer, capacity: usize) -> Self {
        RequestQueue {
            server,
            requests: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
            no_result_count: 0,
        }
    }

    pub fn add_find_request_by<P>(&mut self, raw_query: &str, predicate: P) -> Result<Vec<ScoredDocument>>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
    {
        let result = self.server.find_top_documents_by(raw_query, predicate)?;
        self.record(result.is_empty());
        Ok(result)
    }

    pub fn add_find_request_by_status(&mut self, raw_query: &str, status: DocumentStatus) -> Result<Vec<ScoredDocument>> {
        let result = self.server.find_top_documents_by_status(raw_query, status)?;
        self.record(result.is_empty());
        Ok(result)
    }

    pub fn add_find_request(&mut self, raw_query: &str) -> Result<Vec<ScoredDocument>> {
        let result = self.server.find_top_documents(raw_query)?;
        self.record(result.is_empty());
        Ok(result)
    }

    /// Empty requests among the retained ones
    pub fn no_result_requests(&self) -> usize {
        self.no_result_count
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    fn record(&mut self, empty: bool) {
        if self.requests.len() == self.capacity {
            if let Some(true) = self.requests.pop_front() {
                self.no_result_count -= 1;
            }
        }
        self.requests.push_back(empty);
        if empty {
            self.no_result_count += 1;
        }
    }
}
