// Analyzer module: city-wide aggregates, tract comparison, correlation.

pub mod aggregate;
pub mod compare;
pub mod correlation;

pub use aggregate::aggregate;
pub use compare::{compare, ComparisonKey};
pub use correlation::correlate;
