//! Row value model for pin-emulation.
//!
//! This crate holds the in-memory representation of a sampled database row
//! and the two conversions the emulator needs:
//!
//! - [`reverse`] - MySQL row → [`Row`]
//! - [`forward`] - [`Row`] → JSON value
//!
//! # Example
//!
//! ```ignore
//! use emulation_types::{Row, RowValue};
//!
//! let row: Row = mysql_row.try_into()?;
//! let json = emulation_types::forward::row_to_json(&row)?;
//! ```

pub mod error;
pub mod forward;
pub mod reverse;
mod row;
mod value;

pub use error::{ConversionError, SerializeError};
pub use row::Row;
pub use value::RowValue;
