pub mod request_queue;
pub mod batch_query;
