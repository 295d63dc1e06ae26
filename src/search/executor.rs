use std::collections::BTreeMap;
use std::sync::OnceLock;
use rayon::prelude::*;
use crate::core::config::Config;
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::{DocId, DocumentStatus};
use crate::index::inverted::{IndexedDocument, InvertedIndex};
use crate::parallel::concurrent_map::ConcurrentMap;
use crate::query::types::Query;
use crate::scoring::scorer::{Scorer, TfIdfScorer};
use crate::search::results::{ScoredDocument, TopKCollector};

/// How a query pass is scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionPolicy {
    #[default]
    Sequential,
    /// Documents are partitioned across the executor's worker pool and
    /// relevances are accumulated in a sharded map
    Parallel,
}

/// One step of a document's evaluation, applied to the relevance map
#[derive(Debug, Clone, Copy, PartialEq)]
enum Contribution {
    Add(f64),
    Exclude,
}

/// Scores parsed queries against an index
pub struct QueryExecutor {
    pub scorer: Box<dyn Scorer>,
    pub max_result_count: usize,
    pub relevance_epsilon: f64,
    pub accumulator_shards: usize,
    worker_threads: usize,
    /// Built on the first parallel call; sequential-only executors never spawn threads
    pool: OnceLock<rayon::ThreadPool>,
}

impl QueryExecutor {
    pub fn new(config: &Config) -> Self {
        QueryExecutor {
            scorer: Box::new(TfIdfScorer::new()),
            max_result_count: config.max_result_count,
            relevance_epsilon: config.relevance_epsilon,
            accumulator_shards: config.accumulator_shards,
            worker_threads: config.worker_threads,
            pool: OnceLock::new(),
        }
    }

    pub fn worker_count(&self) -> usize {
        self.worker_threads
    }

    /// Whether the worker pool has been built yet
    pub fn has_pool(&self) -> bool {
        self.pool.get().is_some()
    }

    fn pool(&self) -> Result<&rayon::ThreadPool> {
        if let Some(pool) = self.pool.get() {
            return Ok(pool);
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.worker_threads)
            .thread_name(|i| format!("searchserver-worker-{}", i))
            .build()
            .map_err(|e| Error::new(ErrorKind::Internal, format!("Failed to build worker pool: {}", e)))?;
        tracing::debug!(threads = self.worker_threads, "worker pool built");

        // A racing caller may have won; its pool is kept and ours is dropped
        Ok(self.pool.get_or_init(|| pool))
    }

    /// Runs `op` on the executor's worker pool
    pub fn install<R, F>(&self, op: F) -> Result<R>
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        Ok(self.pool()?.install(op))
    }

    /// Relevance of every live document matching at least one plus word that
    /// passes `predicate`. Documents containing a minus word are absent.
    pub fn score_all<P>(
        &self,
        index: &InvertedIndex,
        query: &Query,
        predicate: &P,
        policy: ExecutionPolicy,
    ) -> Result<BTreeMap<DocId, f64>>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
    {
        let idfs = self.plus_word_idfs(index, query);

        match policy {
            ExecutionPolicy::Sequential => {
                let mut relevances = BTreeMap::new();
                for (doc_id, document) in index.documents() {
                    self.score_document(doc_id, document, query, &idfs, predicate, |step| match step {
                        Contribution::Add(delta) => *relevances.entry(doc_id).or_insert(0.0) += delta,
                        Contribution::Exclude => {
                            relevances.remove(&doc_id);
                        }
                    });
                }
                Ok(relevances)
            }
            ExecutionPolicy::Parallel => {
                let accumulator: ConcurrentMap<DocId, f64> = ConcurrentMap::new(self.accumulator_shards);
                let documents: Vec<(DocId, &IndexedDocument)> = index.documents().collect();
                let chunk_size = documents.len().div_ceil(self.worker_count()).max(1);

                self.pool()?.install(|| {
                    documents.par_chunks(chunk_size).for_each(|partition| {
                        for (doc_id, document) in partition {
                            self.score_document(*doc_id, document, query, &idfs, predicate, |step| match step {
                                Contribution::Add(delta) => *accumulator.access(*doc_id) += delta,
                                Contribution::Exclude => {
                                    accumulator.erase(doc_id);
                                }
                            });
                        }
                    });
                });

                Ok(accumulator.into_ordinary_map())
            }
        }
    }

    /// IDF per plus word; words without postings are left out and contribute nothing
    fn plus_word_idfs<'q>(&self, index: &InvertedIndex, query: &'q Query) -> BTreeMap<&'q str, f64> {
        let total_docs = index.document_count();
        query.plus_words.iter()
            .filter_map(|word| {
                let doc_freq = index.posting_list(word).map_or(0, |list| list.doc_freq());
                self.scorer.idf(total_docs, doc_freq).map(|idf| (word.as_str(), idf))
            })
            .collect()
    }

    /// Decides one document using only its own frequencies.
    fn score_document<P, S>(
        &self,
        doc_id: DocId,
        document: &IndexedDocument,
        query: &Query,
        idfs: &BTreeMap<&str, f64>,
        predicate: &P,
        mut sink: S,
    ) where
        P: Fn(DocId, DocumentStatus, i32) -> bool,
        S: FnMut(Contribution),
    {
        let data = document.data;
        for (word, idf) in idfs {
            let Some(term_freq) = document.word_freqs.get(*word) else {
                continue;
            };
            if predicate(doc_id, data.status, data.rating) {
                sink(Contribution::Add(self.scorer.score(*term_freq, *idf)));
            }
        }

        if query.minus_words.iter().any(|word| document.word_freqs.contains_key(word)) {
            sink(Contribution::Exclude);
        }
    }

    /// Sorted, truncated hits for already scored documents
    pub fn top_documents(&self, index: &InvertedIndex, relevances: BTreeMap<DocId, f64>) -> Vec<ScoredDocument> {
        let mut collector = TopKCollector::new(self.max_result_count, self.relevance_epsilon);
        for (doc_id, relevance) in relevances {
            let rating = index.document_data(doc_id).map_or(0, |data| data.rating);
            collector.collect(ScoredDocument::new(doc_id, relevance, rating));
        }
        collector.get_results()
    }

    pub fn find_top_documents<P>(
        &self,
        index: &InvertedIndex,
        query: &Query,
        predicate: &P,
        policy: ExecutionPolicy,
    ) -> Result<Vec<ScoredDocument>>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
    {
        let relevances = self.score_all(index, query, predicate, policy)?;
        let hits = self.top_documents(index, relevances);
        tracing::debug!(
            plus_words = query.plus_words.len(),
            minus_words = query.minus_words.len(),
            ?policy,
            hits = hits.len(),
            "query evaluated"
        );
        Ok(hits)
    }

    /// Plus words present in the document, or nothing when a minus word is present.
    /// The caller checks that the document is live.
    pub fn match_document(
        &self,
        document: &IndexedDocument,
        query: &Query,
        policy: ExecutionPolicy,
    ) -> Result<Vec<String>> {
        let freqs = &document.word_freqs;
        match policy {
            ExecutionPolicy::Sequential => {
                if query.minus_words.iter().any(|word| freqs.contains_key(word)) {
                    return Ok(Vec::new());
                }
                Ok(query.plus_words.iter()
                    .filter(|word| freqs.contains_key(*word))
                    .cloned()
                    .collect())
            }
            ExecutionPolicy::Parallel => self.install(|| {
                let minus_words: Vec<&String> = query.minus_words.iter().collect();
                if minus_words.par_iter().any(|word| freqs.contains_key(*word)) {
                    return Vec::new();
                }
                let plus_words: Vec<&String> = query.plus_words.iter().collect();
                plus_words.par_iter()
                    .filter(|word| freqs.contains_key(**word))
                    .map(|word| (*word).clone())
                    .collect()
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use crate::analysis::filters::stopword::StopWordFilter;
    use crate::query::parser::QueryParser;

    fn build_index(docs: &[(i64, &str, DocumentStatus, i32)]) -> InvertedIndex {
        let mut index = InvertedIndex::new();
        for (id, text, status, rating) in docs {
            let words: Vec<&str> = text.split(' ').filter(|w| *w != "and" && *w != "with").collect();
            index.add_document(DocId(*id), &words, *status, &[*rating]).unwrap();
        }
        index
    }

    fn parse(raw: &str) -> Query {
        QueryParser::new(Arc::new(StopWordFilter::new(vec!["and", "with"]).unwrap()))
            .parse(raw)
            .unwrap()
    }

    fn executor() -> QueryExecutor {
        let config = Config {
            worker_threads: 4,
            ..Config::default()
        };
        QueryExecutor::new(&config)
    }

    fn any_doc(_: DocId, _: DocumentStatus, _: i32) -> bool {
        true
    }

    #[test]
    fn test_minus_word_excludes_document() {
        let index = build_index(&[
            (1, "funny pet and nasty rat", DocumentStatus::Active, 7),
            (2, "funny pet with curly hair", DocumentStatus::Active, 1),
        ]);
        let scores = executor().score_all(&index, &parse("funny -nasty"), &any_doc, ExecutionPolicy::Sequential).unwrap();

        assert!(!scores.contains_key(&DocId(1)));
        // "funny" is in both documents, so its idf is ln(1) = 0
        assert_eq!(scores.get(&DocId(2)), Some(&0.0));
    }

    #[test]
    fn test_relevance_values() {
        let index = build_index(&[
            (0, "white cat fashionable collar", DocumentStatus::Active, 8),
            (1, "fluffy cat fluffy tail", DocumentStatus::Active, 7),
            (2, "groomed dog expressive eyes", DocumentStatus::Active, 5),
        ]);
        let scores = executor().score_all(&index, &parse("fluffy groomed cat"), &any_doc, ExecutionPolicy::Sequential).unwrap();

        let ln3 = 3f64.ln();
        let ln15 = 1.5f64.ln();
        assert!((scores[&DocId(1)] - (0.5 * ln3 + 0.25 * ln15)).abs() < 1e-12);
        assert!((scores[&DocId(2)] - 0.25 * ln3).abs() < 1e-12);
        assert!((scores[&DocId(0)] - 0.25 * ln15).abs() < 1e-12);
    }

    #[test]
    fn test_predicate_filters_contributions() {
        let index = build_index(&[
            (1, "cat", DocumentStatus::Active, 1),
            (2, "cat", DocumentStatus::Banned, 1),
            (3, "dog", DocumentStatus::Active, 1),
        ]);
        let only_banned = |_: DocId, status: DocumentStatus, _: i32| status == DocumentStatus::Banned;
        let scores = executor().score_all(&index, &parse("cat"), &only_banned, ExecutionPolicy::Sequential).unwrap();
        assert_eq!(scores.keys().copied().collect::<Vec<_>>(), vec![DocId(2)]);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let docs: Vec<(i64, String)> = (0..200)
            .map(|i| (i, format!("w{} w{} w{} common tail{}", i % 7, i % 11, i % 13, i % 5)))
            .collect();
        let mut index = InvertedIndex::new();
        for (id, text) in &docs {
            let words: Vec<&str> = text.split(' ').collect();
            index.add_document(DocId(*id), &words, DocumentStatus::Active, &[(*id % 9) as i32]).unwrap();
        }
        let query = parse("w1 w3 w5 common -tail2");
        let executor = executor();

        let sequential = executor.score_all(&index, &query, &any_doc, ExecutionPolicy::Sequential).unwrap();
        let parallel = executor.score_all(&index, &query, &any_doc, ExecutionPolicy::Parallel).unwrap();

        assert_eq!(sequential.len(), parallel.len());
        for (id, relevance) in &sequential {
            assert!((parallel[id] - relevance).abs() < 1e-9);
        }
    }

    #[test]
    fn test_match_document_policies_agree() {
        let index = build_index(&[(1, "funny pet and nasty rat", DocumentStatus::Active, 1)]);
        let executor = executor();
        let document = index.document(DocId(1)).unwrap();

        for policy in [ExecutionPolicy::Sequential, ExecutionPolicy::Parallel] {
            assert_eq!(executor.match_document(document, &parse("rat funny cat"), policy).unwrap(), vec!["funny", "rat"]);
            assert!(executor.match_document(document, &parse("rat -nasty"), policy).unwrap().is_empty());
        }
    }

    #[test]
    fn test_top_documents_uses_ratings() {
        let index = build_index(&[
            (1, "cat", DocumentStatus::Active, 3),
            (2, "cat", DocumentStatus::Active, 5),
            (3, "dog", DocumentStatus::Active, 1),
        ]);
        let executor = executor();
        let hits = executor.find_top_documents(&index, &parse("cat"), &any_doc, ExecutionPolicy::Sequential).unwrap();
        assert_eq!(hits.iter().map(|h| h.id).collect::<Vec<_>>(), vec![DocId(2), DocId(1)]);
        assert_eq!(hits[0].rating, 5);
    }

    #[test]
    fn test_pool_built_only_for_parallel_work() {
        let index = build_index(&[(1, "cat", DocumentStatus::Active, 1)]);
        let executor = executor();

        executor.score_all(&index, &parse("cat"), &any_doc, ExecutionPolicy::Sequential).unwrap();
        assert!(!executor.has_pool());

        executor.score_all(&index, &parse("cat"), &any_doc, ExecutionPolicy::Parallel).unwrap();
        assert!(executor.has_pool());
        assert_eq!(executor.worker_count(), 4);
    }
}
