use std::collections::BTreeMap;
use crate::core::types::DocId;

/// Posting list for a term: document id -> normalized term frequency.
/// Note: ordered by doc_id so iteration is deterministic
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostingList {
    pub postings: BTreeMap<DocId, f64>,
}

impl PostingList {
    pub fn new() -> Self {
        PostingList {
            postings: BTreeMap::new(),
        }
    }

    /// Adds one occurrence worth `weight` to the document's frequency
    pub fn add_occurrence(&mut self, doc_id: DocId, weight: f64) {
        *self.postings.entry(doc_id).or_insert(0.0) += weight;
    }

    pub fn remove(&mut self, doc_id: DocId) -> Option<f64> {
        self.postings.remove(&doc_id)
    }

    pub fn frequency(&self, doc_id: DocId) -> Option<f64> {
        self.postings.get(&doc_id).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    /// Number of documents containing the term
    pub fn doc_freq(&self) -> usize {
        self.postings.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DocId, f64)> + '_ {
        self.postings.iter().map(|(id, freq)| (*id, *freq))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_occurrences_accumulate() {
        let mut list = PostingList::new();
        list.add_occurrence(DocId(3), 0.25);
        list.add_occurrence(DocId(3), 0.25);
        list.add_occurrence(DocId(1), 0.5);

        assert_eq!(list.doc_freq(), 2);
        assert_eq!(list.frequency(DocId(3)), Some(0.5));
        let ids: Vec<DocId> = list.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![DocId(1), DocId(3)]);
    }

    #[test]
    fn test_remove() {
        let mut list = PostingList::new();
        list.add_occurrence(DocId(1), 1.0);
        assert_eq!(list.remove(DocId(1)), Some(1.0));
        assert_eq!(list.remove(DocId(1)), None);
        assert!(list.is_empty());
    }
}
