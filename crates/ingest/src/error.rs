use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    /// The recoverable "data unavailable" condition. Presentation layers
    /// render this as a user-facing message instead of crashing.
    #[error("Data unavailable: '{0}' is missing or unreadable")]
    DataUnavailable(PathBuf),

    #[error("Malformed input in '{path}': {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error(transparent)]
    Reference(#[from] core_types::CoreError),

    #[error("Failed to serialize export: {0}")]
    Export(String),
}
