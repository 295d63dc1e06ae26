use std::cmp::Ordering;
use std::fmt;
use serde::{Serialize, Deserialize};
use crate::core::types::DocId;

/// Document with relevance score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredDocument {
    pub id: DocId,
    pub relevance: f64,
    pub rating: i32,
}

impl ScoredDocument {
    pub fn new(id: DocId, relevance: f64, rating: i32) -> Self {
        ScoredDocument { id, relevance, rating }
    }
}

impl fmt::Display for ScoredDocument {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{{ document_id = {}, relevance = {}, rating = {} }}",
            self.id, self.relevance, self.rating
        )
    }
}

/// Top-K collector: relevance descending, rating descending when two
/// relevances are closer than `epsilon`.
pub struct TopKCollector {
    pub hits: Vec<ScoredDocument>,
    pub k: usize,
    pub epsilon: f64,
}

impl TopKCollector {
    pub fn new(k: usize, epsilon: f64) -> Self {
        TopKCollector {
            hits: Vec::new(),
            k,
            epsilon,
        }
    }

    pub fn collect(&mut self, scored_doc: ScoredDocument) {
        self.hits.push(scored_doc);
    }

    pub fn total_collected(&self) -> usize {
        self.hits.len()
    }

    /// Sorted and truncated to `k`.
    ///
    /// The epsilon comparison is not transitive, so it cannot drive
    /// `sort_by`. Hits are first ordered by relevance, then an insertion pass
    /// moves each hit left past every neighbour that `compare_by_relevance`
    /// puts after it. Afterwards no adjacent pair violates the comparison.
    pub fn get_results(mut self) -> Vec<ScoredDocument> {
        self.hits.sort_by(|a, b| {
            b.relevance.total_cmp(&a.relevance)
                .then_with(|| b.rating.cmp(&a.rating))
                .then_with(|| a.id.cmp(&b.id))
        });

        for i in 1..self.hits.len() {
            let mut j = i;
            while j > 0 && compare_by_relevance(&self.hits[j - 1], &self.hits[j], self.epsilon) == Ordering::Greater {
                self.hits.swap(j - 1, j);
                j -= 1;
            }
        }

        self.hits.truncate(self.k);
        self.hits
    }
}

pub fn compare_by_relevance(a: &ScoredDocument, b: &ScoredDocument, epsilon: f64) -> Ordering {
    if (a.relevance - b.relevance).abs() < epsilon {
        b.rating.cmp(&a.rating)
    } else {
        b.relevance.total_cmp(&a.relevance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: i64, relevance: f64, rating: i32) -> ScoredDocument {
        ScoredDocument::new(DocId(id), relevance, rating)
    }

    fn ids(hits: &[ScoredDocument]) -> Vec<i64> {
        hits.iter().map(|h| h.id.0).collect()
    }

    #[test]
    fn test_near_tie_breaks_on_rating() {
        let mut collector = TopKCollector::new(5, 1e-6);
        collector.collect(doc(1, 0.4000001, 3));
        collector.collect(doc(2, 0.4, 5));
        assert_eq!(ids(&collector.get_results()), vec![2, 1]);
    }

    #[test]
    fn test_clear_gap_ignores_rating() {
        let mut collector = TopKCollector::new(5, 1e-6);
        collector.collect(doc(1, 0.5, -10));
        collector.collect(doc(2, 0.4, 100));
        collector.collect(doc(3, 0.6, 0));
        assert_eq!(ids(&collector.get_results()), vec![3, 1, 2]);
    }

    #[test]
    fn test_truncates_to_k() {
        let mut collector = TopKCollector::new(5, 1e-6);
        for id in 0..8 {
            collector.collect(doc(id, id as f64 * 0.1, 0));
        }
        assert_eq!(collector.total_collected(), 8);
        assert_eq!(ids(&collector.get_results()), vec![7, 6, 5, 4, 3]);
    }

    #[test]
    fn test_results_agree_with_pairwise_comparison() {
        let mut collector = TopKCollector::new(10, 1e-6);
        let docs = [doc(1, 0.2, 1), doc(2, 0.2000004, 7), doc(3, 0.9, 2), doc(4, 0.2, 9), doc(5, 0.0, 3)];
        for d in docs {
            collector.collect(d);
        }
        let results = collector.get_results();
        for pair in results.windows(2) {
            assert_ne!(compare_by_relevance(&pair[0], &pair[1], 1e-6), Ordering::Greater);
        }
        assert_eq!(ids(&results), vec![3, 4, 2, 1, 5]);
    }

    #[test]
    fn test_neighbours_within_epsilon_ordered_by_rating() {
        // 1 and 2 tie, 2 and 3 tie, 1 and 3 do not
        let mut collector = TopKCollector::new(5, 1e-6);
        collector.collect(doc(1, 1.0000008, 5));
        collector.collect(doc(2, 1.0, 1));
        collector.collect(doc(3, 0.9999995, 3));

        let results = collector.get_results();
        assert_eq!(ids(&results), vec![1, 3, 2]);
        for pair in results.windows(2) {
            assert_ne!(compare_by_relevance(&pair[0], &pair[1], 1e-6), Ordering::Greater);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(doc(2, 0.5, 4).to_string(), "{ document_id = 2, relevance = 0.5, rating = 4 }");
    }
}
