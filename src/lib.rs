pub mod core;
pub mod analysis;
pub mod index;
pub mod scoring;
pub mod search;
pub mod query;
pub mod writer;
pub mod reader;
pub mod parallel;

/*
┌──────────────────────────────────────────────────────────────────────────────┐
│                         SEARCHSERVER STRUCT ARCHITECTURE                     │
└──────────────────────────────────────────────────────────────────────────────┘

┌───────────────────────────────── CORE LAYER ─────────────────────────────────┐
│                                                                              │
│  ┌────────────────────────────────────────────────────────────────────────┐  │
│  │                          struct SearchServer                           │  │
│  │  config: Config                  // stop words, K, epsilon, shards     │  │
│  │  analyzer: Analyzer              // split -> validate -> stop words    │  │
│  │  query_parser: QueryParser       // raw text -> plus/minus sets        │  │
│  │  index: InvertedIndex            // term <-> document frequencies      │  │
│  │  executor: QueryExecutor         // TF-IDF scoring + top-K             │  │
│  └────────────────────────────────────────────────────────────────────────┘  │
└──────────────────────────────────────────────────────────────────────────────┘

┌──────────────────────────────── INDEX LAYER ─────────────────────────────────┐
│  struct InvertedIndex                                                        │
│    postings:  BTreeMap<String, PostingList>       // term -> doc -> freq     │
│    documents: BTreeMap<DocId, IndexedDocument>    // doc -> term -> freq     │
│  Both directions change only inside add_document / remove_document.          │
└──────────────────────────────────────────────────────────────────────────────┘

┌──────────────────────────────── SEARCH LAYER ────────────────────────────────┐
│  QueryExecutor::score_all                                                    │
│    Sequential: BTreeMap<DocId, f64>                                          │
│    Parallel:   par_chunks(documents) ──► ConcurrentMap<DocId, f64>           │
│                  shard = doc_id mod N, one parking_lot::Mutex per shard      │
│                ──► into_ordinary_map()                                       │
│  TopKCollector: relevance desc, rating desc within epsilon, truncate to K    │
└──────────────────────────────────────────────────────────────────────────────┘

┌────────────────────────────── READER / WRITER ───────────────────────────────┐
│  reader::request_queue   RequestQueue     // empty-result history (FIFO)     │
│  reader::batch_query     process_queries  // many queries on the pool        │
│  writer::batch           BatchIngest      // skip-and-report ingestion       │
│  writer::dedup           remove_duplicates// same term set -> keep lowest id │
└──────────────────────────────────────────────────────────────────────────────┘

Query flow:
  raw text ─► QueryParser::parse ─► Query { plus_words, minus_words }
           ─► QueryExecutor::score_all ─► TopKCollector ─► Vec<ScoredDocument>
*/
