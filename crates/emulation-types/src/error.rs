//! Error types for row conversion and serialization.

use mysql_async::consts::ColumnType;
use mysql_async::Value;
use thiserror::Error;

/// Error while converting a MySQL value into a [`crate::RowValue`].
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("Unsupported MySQL type {column_type:?} for column '{column}'")]
    UnsupportedType {
        column: String,
        column_type: ColumnType,
    },
    #[error("Type mismatch: expected {expected}, got {actual:?}")]
    TypeMismatch { expected: String, actual: Value },
    #[error("Invalid UTF-8 in string: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
    #[error("Invalid date/time value: {0}")]
    InvalidDateTime(String),
    #[error("Column '{column}': {source}")]
    Column {
        column: String,
        #[source]
        source: Box<ConversionError>,
    },
}

/// Error while turning a [`crate::Row`] into JSON.
#[derive(Debug, Error, PartialEq)]
pub enum SerializeError {
    /// The value has no defined JSON encoding.
    #[error("Type not serializable: column '{column}' holds {kind}")]
    NotSerializable { column: String, kind: &'static str },
}
