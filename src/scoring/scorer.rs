/// Scorer trait
pub trait Scorer: Send + Sync {
    /// `None` when the term contributes nothing (no postings, or an empty index)
    fn idf(&self, total_docs: usize, doc_freq: usize) -> Option<f64>;

    fn score(&self, term_freq: f64, idf: f64) -> f64;

    fn name(&self) -> &str;
}

/// TF-IDF Scorer
///
/// TF is the normalized in-document frequency stored in the index,
/// IDF = ln(N / df).
#[derive(Debug, Clone, Copy, Default)]
pub struct TfIdfScorer;

impl TfIdfScorer {
    pub fn new() -> Self {
        TfIdfScorer
    }
}

impl Scorer for TfIdfScorer {
    fn idf(&self, total_docs: usize, doc_freq: usize) -> Option<f64> {
        if doc_freq == 0 || total_docs == 0 {
            return None;
        }
        Some((total_docs as f64 / doc_freq as f64).ln())
    }

    fn score(&self, term_freq: f64, idf: f64) -> f64 {
        term_freq * idf
    }

    fn name(&self) -> &str {
        "tfidf"
    }
}
