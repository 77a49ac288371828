pub mod existence;
pub mod summary_cache;
