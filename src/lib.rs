//! tractlens: census-tract health and economic indicator analysis.
//!
//! The library half loads a tract-level indicator table and answers the
//! dashboard's questions: city-wide aggregates, tract-vs-city comparisons
//! and indicator correlations. The binary half drives the external data
//! pipeline that produces the table and validates its outputs.

pub mod analyzer;
pub mod catalog;
pub mod config;
pub mod error;
pub mod loader;
pub mod model;
pub mod pipeline;

pub use analyzer::{aggregate, compare, correlate, ComparisonKey};
pub use catalog::{Category, IndicatorCatalog, IndicatorDescriptor, Unit, COMPARISON_SET};
pub use error::{DataError, PipelineError};
pub use loader::{DatasetCache, DatasetLoader};
pub use model::{
    AggregateResult, CentralTendency, Correlation, CorrelationTier, ComparisonResult,
    ComparisonRow, Dataset, Summary, Tract,
};
