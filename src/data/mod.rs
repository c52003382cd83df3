//! Dataset loading.
//!
//! Reads the four season CSV files into immutable in-memory tables.

pub mod loader;

pub use loader::DataStore;
