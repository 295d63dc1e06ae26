use std::collections::BTreeMap;
use std::sync::Arc;
use crate::analysis::analyzer::Analyzer;
use crate::analysis::filters::stopword::StopWordFilter;
use crate::core::config::Config;
use crate::core::error::{Error, Result};
use crate::core::types::{DocId, DocumentStatus};
use crate::index::inverted::InvertedIndex;
use crate::query::parser::QueryParser;
use crate::search::executor::{ExecutionPolicy, QueryExecutor};
use crate::search::results::ScoredDocument;

/// In-memory full-text search server.
///
/// Writes (`add_document`, `remove_document`) take `&mut self`, queries take
/// `&self`, so the borrow checker serializes writes against reads. Share a
/// server between threads behind an `RwLock` when writes must continue
/// while queries run.
pub struct SearchServer {
    config: Config,
    analyzer: Analyzer,
    query_parser: QueryParser,
    index: InvertedIndex,
    executor: QueryExecutor,
}

impl SearchServer {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let stop_words = Arc::new(StopWordFilter::new(config.stop_words.iter().cloned())?);
        let executor = QueryExecutor::new(&config);

        Ok(SearchServer {
            analyzer: Analyzer::new(stop_words.clone()),
            query_parser: QueryParser::new(stop_words),
            index: InvertedIndex::new(),
            executor,
            config,
        })
    }

    /// Default configuration with stop words given as one space-separated string
    pub fn with_stop_words_text(stop_words: &str) -> Result<Self> {
        Self::new(Config::default().with_stop_words_text(stop_words))
    }

    pub fn with_stop_words<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Config::default().with_stop_words(stop_words))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Status used by `find_top_documents`
    pub fn default_status(&self) -> DocumentStatus {
        self.config.default_status
    }

    /// All-or-nothing: on error the index is left exactly as it was.
    pub fn add_document(
        &mut self,
        doc_id: impl Into<DocId>,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        let doc_id = doc_id.into();
        if doc_id.0 < 0 {
            return Err(Error::invalid_document(doc_id.0, "is negative"));
        }
        if self.index.contains(doc_id) {
            return Err(Error::invalid_document(doc_id.0, "is already indexed"));
        }

        let words = self.analyzer.analyze(text)?;
        self.index.add_document(doc_id, &words, status, ratings)?;

        tracing::debug!(doc_id = doc_id.0, words = words.len(), %status, "document added");
        Ok(())
    }

    /// Removing an id that is not live does nothing.
    pub fn remove_document(&mut self, doc_id: impl Into<DocId>) {
        let doc_id = doc_id.into();
        if self.index.remove_document(doc_id) {
            tracing::debug!(doc_id = doc_id.0, "document removed");
        }
    }

    pub fn document_count(&self) -> usize {
        self.index.document_count()
    }

    pub fn contains(&self, doc_id: impl Into<DocId>) -> bool {
        self.index.contains(doc_id.into())
    }

    /// Rating and status of a live document
    pub fn document_info(&self, doc_id: impl Into<DocId>) -> Option<(i32, DocumentStatus)> {
        self.index.document_data(doc_id.into()).map(|data| (data.rating, data.status))
    }

    /// Live ids, ascending
    pub fn document_ids(&self) -> impl Iterator<Item = DocId> + '_ {
        self.index.document_ids()
    }

    /// Term -> normalized frequency; empty for an absent id
    pub fn word_frequencies(&self, doc_id: impl Into<DocId>) -> &BTreeMap<String, f64> {
        self.index.word_frequencies(doc_id.into())
    }

    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<ScoredDocument>> {
        self.find_top_documents_default_with(ExecutionPolicy::Sequential, raw_query)
    }

    /// Filters on the configured default status
    pub fn find_top_documents_default_with(&self, policy: ExecutionPolicy, raw_query: &str) -> Result<Vec<ScoredDocument>> {
        self.find_top_documents_by_status_with(policy, raw_query, self.config.default_status)
    }

    pub fn par_find_top_documents(&self, raw_query: &str) -> Result<Vec<ScoredDocument>> {
        self.find_top_documents_default_with(ExecutionPolicy::Parallel, raw_query)
    }

    pub fn find_top_documents_by_status(&self, raw_query: &str, status: DocumentStatus) -> Result<Vec<ScoredDocument>> {
        self.find_top_documents_by_status_with(ExecutionPolicy::Sequential, raw_query, status)
    }

    pub fn find_top_documents_by_status_with(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<ScoredDocument>> {
        self.find_top_documents_with(policy, raw_query, move |_, doc_status, _| doc_status == status)
    }

    pub fn find_top_documents_by<P>(&self, raw_query: &str, predicate: P) -> Result<Vec<ScoredDocument>>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
    {
        self.find_top_documents_with(ExecutionPolicy::Sequential, raw_query, predicate)
    }

    /// Parses once, scores every live document, then keeps the top results.
    pub fn find_top_documents_with<P>(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        predicate: P,
    ) -> Result<Vec<ScoredDocument>>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
    {
        let query = self.query_parser.parse(raw_query)?;
        self.executor.find_top_documents(&self.index, &query, &predicate, policy)
    }

    /// Relevance of every matching document, before ranking
    pub fn score_all<P>(&self, policy: ExecutionPolicy, raw_query: &str, predicate: P) -> Result<BTreeMap<DocId, f64>>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
    {
        let query = self.query_parser.parse(raw_query)?;
        self.executor.score_all(&self.index, &query, &predicate, policy)
    }

    pub fn match_document(
        &self,
        raw_query: &str,
        doc_id: impl Into<DocId>,
    ) -> Result<(Vec<String>, DocumentStatus)> {
        self.match_document_with(ExecutionPolicy::Sequential, raw_query, doc_id)
    }

    /// Plus words found in the document (empty when any minus word is found) and its status
    pub fn match_document_with(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        doc_id: impl Into<DocId>,
    ) -> Result<(Vec<String>, DocumentStatus)> {
        let doc_id = doc_id.into();
        let query = self.query_parser.parse(raw_query)?;
        let document = self.index.document(doc_id)
            .ok_or_else(|| Error::unknown_document(doc_id.0))?;

        let matched = self.executor.match_document(document, &query, policy)?;
        Ok((matched, document.data.status))
    }

    /// Runs `op` on the server's worker pool, building the pool on first use
    pub fn install<R, F>(&self, op: F) -> Result<R>
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        self.executor.install(op)
    }
}

impl<'a> IntoIterator for &'a SearchServer {
    type Item = DocId;
    type IntoIter = std::iter::Copied<std::collections::btree_map::Keys<'a, DocId, crate::index::inverted::IndexedDocument>>;

    fn into_iter(self) -> Self::IntoIter {
        self.index.document_keys().copied()
    }
}
