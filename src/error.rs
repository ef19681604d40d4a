use emulation_types::{ConversionError, SerializeError};
use thiserror::Error;

/// Errors raised while sampling or emitting emulation records.
#[derive(Debug, Error)]
pub enum EmulationError {
    /// The table has fewer than `offset + 1` rows.
    #[error("Sample not found: table '{table}' has no row at offset {offset}")]
    SampleNotFound { table: String, offset: u64 },

    /// Dynamic offset bound requested but a table has no rows.
    #[error("Table '{table}' is empty, nothing to sample")]
    EmptyTable { table: String },

    #[error("MySQL error: {0}")]
    MySQL(#[from] mysql_async::Error),

    #[error("Failed to convert row from table '{table}': {source}")]
    Conversion {
        table: String,
        #[source]
        source: ConversionError,
    },

    #[error(transparent)]
    Serialize(#[from] SerializeError),

    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = EmulationError> = std::result::Result<T, E>;
