//! Aggregation queries over the loaded tables.

pub mod aggregator;

pub use aggregator::*;
