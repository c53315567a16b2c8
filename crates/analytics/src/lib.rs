//! # Trade Aggregation Engine
//!
//! This crate implements the data-join-and-aggregation pipeline: product
//! filter, reference-table left join, synthetic-year draw, grouped sums and
//! the top-N importer × year pivot.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of
//!   files or HTTP. It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** The `AggregationEngine` is a stateless
//!   calculator. It takes a loaded extract and a reference table as input
//!   and produces an `AnalysisDataset` as output, which makes it highly
//!   reliable and easy to test.
//!
//! ## Public API
//!
//! - `AggregationEngine`: the pipeline logic.
//! - `AnalysisDataset` and its parts (`TradeSummary`, `YearlyTotal`,
//!   `ImporterTotal`, `ExportMatrix`): the derived tables.
//! - `AnalysisParams`: the parameter set for one pass.
//! - `AnalyticsError`: the specific error types this crate can return.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::AggregationEngine;
pub use error::AnalyticsError;
pub use report::{
    AnalysisDataset, AnalysisParams, ExportMatrix, ImporterTotal, TradeSummary, YearlyTotal,
};
