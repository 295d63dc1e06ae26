use std::collections::{BTreeSet, HashSet};
use crate::core::server::SearchServer;
use crate::core::types::DocId;

/// Removes every document whose term set equals that of a lower id.
/// Returns the removed ids, ascending.
pub fn remove_duplicates(server: &mut SearchServer) -> Vec<DocId> {
    let mut seen: HashSet<BTreeSet<&str>> = HashSet::new();
    let mut duplicates = Vec::new();

    for doc_id in server.document_ids() {
        let terms: BTreeSet<&str> = server.word_frequencies(doc_id)
            .keys()
            .map(String::as_str)
            .collect();
        if !seen.insert(terms) {
            duplicates.push(doc_id);
        }
    }
    drop(seen);

    for doc_id in &duplicates {
        tracing::info!(doc_id = doc_id.0, "found duplicate document");
        server.remove_document(*doc_id);
    }

    duplicates
}
