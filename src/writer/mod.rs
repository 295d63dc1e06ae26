pub mod batch;
pub mod dedup;
