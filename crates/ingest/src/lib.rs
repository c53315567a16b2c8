//! # Trade Data Ingest
//!
//! CSV collaborators for the aggregation pipeline: typed readers for the
//! trade extract and the country-code reference table, and the writer that
//! re-exports the enriched dataset.
//!
//! A missing or unreadable input file is a recoverable condition
//! (`IngestError::DataUnavailable`), not a crash: both the CLI and the
//! dashboard turn it into a user-facing message.

pub mod error;
pub mod export;
pub mod reader;

// Re-export the key components to create a clean, public-facing API.
pub use error::IngestError;
pub use export::enriched_to_csv;
pub use reader::{load_country_table, load_transactions};
