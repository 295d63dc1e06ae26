use rayon::prelude::*;
use crate::core::error::Result;
use crate::core::server::SearchServer;
use crate::search::results::ScoredDocument;

/// Evaluates every query independently on the server's worker pool.
/// Results keep the input order; the first failing query (in input order) wins.
pub fn process_queries<S>(server: &SearchServer, queries: &[S]) -> Result<Vec<Vec<ScoredDocument>>>
where
    S: AsRef<str> + Sync,
{
    let _timer = crate::core::timing::LogDuration::new(format!("process_queries({})", queries.len()));

    server.install(|| {
        queries
            .par_iter()
            .map(|query| server.find_top_documents(query.as_ref()))
            .collect::<Vec<_>>()
    })?
    .into_iter()
    .collect()
}

/// Same as `process_queries`, flattened in input order
pub fn process_queries_joined<S>(server: &SearchServer, queries: &[S]) -> Result<Vec<ScoredDocument>>
where
    S: AsRef<str> + Sync,
{
    Ok(process_queries(server, queries)?
        .into_iter()
        .flatten()
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ErrorKind;
    use crate::core::types::{DocId, DocumentStatus};

    fn server() -> SearchServer {
        let mut server = SearchServer::with_stop_words_text("and with").unwrap();
        let texts = [
            "funny pet and nasty rat",
            "funny pet with curly hair",
            "funny pet and not very nasty rat",
            "pet with rat and rat and rat",
            "nasty rat with curly hair",
        ];
        for (id, text) in texts.iter().enumerate() {
            server.add_document(id as i64 + 1, text, DocumentStatus::Active, &[1, 2]).unwrap();
        }
        server
    }

    #[test]
    fn test_results_follow_input_order() {
        let server = server();
        let queries = vec!["nasty rat -not", "not very funny nasty pet", "curly hair"];
        let results = process_queries(&server, &queries).unwrap();

        assert_eq!(results.len(), 3);
        for (query, hits) in queries.iter().zip(&results) {
            assert_eq!(hits, &server.find_top_documents(query).unwrap());
        }
        assert_eq!(results.iter().map(Vec::len).collect::<Vec<_>>(), vec![3, 5, 2]);
    }

    #[test]
    fn test_joined_flattens() {
        let server = server();
        let queries = ["curly hair", "curly hair"];
        let joined = process_queries_joined(&server, &queries).unwrap();
        assert_eq!(joined.len(), 4);
        assert_eq!(joined[0].id, joined[2].id);
        assert!(joined.iter().any(|hit| hit.id == DocId(5)));
    }

    #[test]
    fn test_error_propagates() {
        let server = server();
        let err = process_queries(&server, &["rat", "--rat"]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidQuery);
    }
}
