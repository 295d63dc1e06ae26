use std::collections::{btree_map, BTreeMap};
use crate::core::error::{Error, Result};
use crate::core::types::{compute_average_rating, DocId, DocumentData, DocumentStatus};
use crate::index::posting::PostingList;

static EMPTY_FREQUENCIES: BTreeMap<String, f64> = BTreeMap::new();

/// Forward entry for one live document
#[derive(Debug, Clone)]
pub struct IndexedDocument {
    pub data: DocumentData,
    /// term -> normalized frequency; values sum to 1.0 for a non-empty document
    pub word_freqs: BTreeMap<String, f64>,
}

/// Bidirectional index. The forward map (document -> term -> freq) and the
/// inverted map (term -> document -> freq) hold exactly the same pairs and are
/// only mutated together through `add_document` / `remove_document`.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    postings: BTreeMap<String, PostingList>,
    documents: BTreeMap<DocId, IndexedDocument>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        InvertedIndex {
            postings: BTreeMap::new(),
            documents: BTreeMap::new(),
        }
    }

    /// Indexes already analyzed words. Each occurrence adds `1 / words.len()`
    /// to the term's frequency.
    pub fn add_document(
        &mut self,
        doc_id: DocId,
        words: &[&str],
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        if doc_id.0 < 0 {
            return Err(Error::invalid_document(doc_id.0, "is negative"));
        }
        if self.documents.contains_key(&doc_id) {
            return Err(Error::invalid_document(doc_id.0, "is already indexed"));
        }

        let mut word_freqs: BTreeMap<String, f64> = BTreeMap::new();
        if !words.is_empty() {
            let inv_word_count = 1.0 / words.len() as f64;
            for word in words {
                *word_freqs.entry(word.to_string()).or_insert(0.0) += inv_word_count;
                self.postings.entry(word.to_string())
                    .or_insert_with(PostingList::new)
                    .add_occurrence(doc_id, inv_word_count);
            }
        }

        self.documents.insert(doc_id, IndexedDocument {
            data: DocumentData {
                rating: compute_average_rating(ratings),
                status,
            },
            word_freqs,
        });

        Ok(())
    }

    /// Returns false when the id was not live.
    pub fn remove_document(&mut self, doc_id: DocId) -> bool {
        let Some(document) = self.documents.remove(&doc_id) else {
            return false;
        };

        for term in document.word_freqs.keys() {
            if let Some(list) = self.postings.get_mut(term) {
                list.remove(doc_id);
                if list.is_empty() {
                    self.postings.remove(term);
                }
            }
        }

        true
    }

    /// Empty map for an absent id
    pub fn word_frequencies(&self, doc_id: DocId) -> &BTreeMap<String, f64> {
        self.documents.get(&doc_id)
            .map(|doc| &doc.word_freqs)
            .unwrap_or(&EMPTY_FREQUENCIES)
    }

    pub fn posting_list(&self, term: &str) -> Option<&PostingList> {
        self.postings.get(term)
    }

    pub fn document(&self, doc_id: DocId) -> Option<&IndexedDocument> {
        self.documents.get(&doc_id)
    }

    pub fn document_data(&self, doc_id: DocId) -> Option<DocumentData> {
        self.documents.get(&doc_id).map(|doc| doc.data)
    }

    pub fn contains(&self, doc_id: DocId) -> bool {
        self.documents.contains_key(&doc_id)
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    pub fn term_count(&self) -> usize {
        self.postings.len()
    }

    /// Live ids, ascending
    pub fn document_ids(&self) -> impl Iterator<Item = DocId> + '_ {
        self.documents.keys().copied()
    }

    pub fn document_keys(&self) -> btree_map::Keys<'_, DocId, IndexedDocument> {
        self.documents.keys()
    }

    pub fn documents(&self) -> impl Iterator<Item = (DocId, &IndexedDocument)> + '_ {
        self.documents.iter().map(|(id, doc)| (*id, doc))
    }

    /// Mean of the per-document ratings over all live documents, truncated; 0 when empty
    pub fn average_rating(&self) -> i32 {
        let ratings: Vec<i32> = self.documents.values().map(|doc| doc.data.rating).collect();
        compute_average_rating(&ratings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ErrorKind;

    fn index_with(docs: &[(i64, &str)]) -> InvertedIndex {
        let mut index = InvertedIndex::new();
        for (id, text) in docs {
            let words: Vec<&str> = text.split(' ').collect();
            index.add_document(DocId(*id), &words, DocumentStatus::Active, &[1, 2, 3]).unwrap();
        }
        index
    }

    /// Every (term, doc) pair in one direction exists in the other with the same value
    fn assert_symmetric(index: &InvertedIndex) {
        for (doc_id, doc) in index.documents() {
            for (term, freq) in &doc.word_freqs {
                let list = index.posting_list(term).expect("term missing from inverted map");
                assert_eq!(list.frequency(doc_id), Some(*freq));
            }
        }
        for (term, list) in &index.postings {
            for (doc_id, freq) in list.iter() {
                assert_eq!(index.word_frequencies(doc_id).get(term), Some(&freq));
            }
        }
    }

    #[test]
    fn test_repeated_word_counts_twice() {
        let index = index_with(&[(1, "cat dog cat rat")]);
        let freqs = index.word_frequencies(DocId(1));
        assert_eq!(freqs.get("cat"), Some(&0.5));
        assert_eq!(freqs.get("dog"), Some(&0.25));
        assert_symmetric(&index);
    }

    #[test]
    fn test_rejects_negative_and_duplicate_ids() {
        let mut index = index_with(&[(1, "cat")]);
        let err = index.add_document(DocId(-1), &["dog"], DocumentStatus::Active, &[]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidDocument);

        let err = index.add_document(DocId(1), &["dog"], DocumentStatus::Active, &[]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidDocument);
        assert_eq!(index.document_count(), 1);
        assert!(index.posting_list("dog").is_none());
    }

    #[test]
    fn test_remove_drops_postings_and_empty_terms() {
        let mut index = index_with(&[(1, "cat dog"), (2, "cat rat")]);
        assert!(index.remove_document(DocId(1)));

        assert!(index.posting_list("dog").is_none());
        assert_eq!(index.posting_list("cat").map(|l| l.doc_freq()), Some(1));
        assert!(index.word_frequencies(DocId(1)).is_empty());
        assert_eq!(index.document_count(), 1);
        assert_symmetric(&index);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut index = index_with(&[(1, "cat")]);
        assert!(!index.remove_document(DocId(42)));
        assert_eq!(index.document_count(), 1);
    }

    #[test]
    fn test_empty_document_is_live_without_terms() {
        let mut index = InvertedIndex::new();
        index.add_document(DocId(5), &[], DocumentStatus::Banned, &[]).unwrap();
        assert!(index.contains(DocId(5)));
        assert!(index.word_frequencies(DocId(5)).is_empty());
        assert_eq!(index.term_count(), 0);
    }

    #[test]
    fn test_metadata() {
        let mut index = InvertedIndex::new();
        index.add_document(DocId(1), &["a"], DocumentStatus::Banned, &[1, 2]).unwrap();
        index.add_document(DocId(2), &["b"], DocumentStatus::Active, &[9]).unwrap();
        assert_eq!(index.document_data(DocId(1)), Some(DocumentData { rating: 1, status: DocumentStatus::Banned }));
        assert_eq!(index.average_rating(), 5);
        assert_eq!(index.document_ids().collect::<Vec<_>>(), vec![DocId(1), DocId(2)]);
    }
}
