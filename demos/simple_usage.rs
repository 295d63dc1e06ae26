/// Search server walkthrough
///
/// - Building a server from stop words
/// - Adding, querying and matching documents
/// - Request history, batch queries and duplicate removal
///
/// Run with `RUST_LOG=debug` to see the server's own events.

use searchserver::core::server::SearchServer;
use searchserver::core::types::{DocumentStatus, NewDocument};
use searchserver::log_duration;
use searchserver::reader::batch_query::{process_queries, process_queries_joined};
use searchserver::reader::request_queue::RequestQueue;
use searchserver::search::executor::ExecutionPolicy;
use searchserver::writer::batch::add_documents;
use searchserver::writer::dedup::remove_duplicates;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("\n╔═══════════════════════════════════════════════╗");
    println!("║        Search Server - API Walkthrough        ║");
    println!("╚═══════════════════════════════════════════════╝\n");

    // Step 1: Create server
    let mut server = SearchServer::with_stop_words_text("and in at with")?;

    // Step 2: Add documents, one by one and as a batch
    println!("Step 2: Adding documents...");
    server.add_document(1, "curly cat curly tail", DocumentStatus::Active, &[7, 2, 7])?;
    server.add_document(2, "curly dog and fancy collar", DocumentStatus::Active, &[1, 2, 3])?;

    let report = add_documents(&mut server, vec![
        NewDocument::new(3, "big cat fancy collar", DocumentStatus::Active, vec![1, 2, 8]),
        NewDocument::new(4, "big dog sparrow eugene", DocumentStatus::Active, vec![1, 3, 2]),
        NewDocument::new(5, "big dog sparrow vasiliy", DocumentStatus::Banned, vec![1, 1, 1]),
        NewDocument::new(6, "fancy collar and curly dog", DocumentStatus::Active, vec![4]),
        NewDocument::new(2, "duplicate id", DocumentStatus::Active, vec![]),
    ]);
    println!("  Added {:?}, rejected {}", report.added, report.failed.len());
    for (id, err) in &report.failed {
        println!("    {}: {}", id, err);
    }
    println!("  {} documents indexed\n", server.document_count());

    // Step 3: Search
    println!("Step 3: Searching...");
    for hit in server.find_top_documents("curly nasty cat")? {
        println!("  {}", hit);
    }
    println!("  Banned:");
    for hit in server.find_top_documents_by_status("big dog", DocumentStatus::Banned)? {
        println!("    {}", hit);
    }
    println!("  Even ids, parallel:");
    for hit in server.find_top_documents_with(ExecutionPolicy::Parallel, "fancy dog", |id, _, _| id.0 % 2 == 0)? {
        println!("    {}", hit);
    }
    if let Err(err) = server.find_top_documents("curly --cat") {
        println!("  Rejected query: {}", err);
    }
    println!();

    // Step 4: Match
    println!("Step 4: Matching...");
    for id in &server {
        let (words, status) = server.match_document("curly fancy -sparrow", id)?;
        println!("  {} [{}]: {:?}", id, status, words);
    }
    println!();

    // Step 5: Request history
    println!("Step 5: Request history...");
    {
        let mut queue = RequestQueue::new(&server);
        for _ in 0..1439 {
            queue.add_find_request("empty request")?;
        }
        queue.add_find_request("curly dog")?;
        queue.add_find_request("big collar")?;
        queue.add_find_request_by_status("sparrow", DocumentStatus::Banned)?;
        println!("  Empty requests in history: {}\n", queue.no_result_requests());
    }

    // Step 6: Batch queries
    println!("Step 6: Batch queries...");
    {
        log_duration!("batch queries");
        let queries = ["curly", "big dog", "fancy -collar"];
        for (query, hits) in queries.iter().zip(process_queries(&server, &queries)?) {
            println!("  {:<14} {} results", query, hits.len());
        }
        let joined = process_queries_joined(&server, &queries)?;
        println!("  Joined: {} results\n", joined.len());
    }

    // Step 7: Duplicates
    println!("Step 7: Removing duplicates...");
    let removed = remove_duplicates(&mut server);
    println!("  Removed {:?}, {} documents left\n", removed, server.document_count());

    Ok(())
}
