//! Text report generation.

pub mod generator;

pub use generator::*;
