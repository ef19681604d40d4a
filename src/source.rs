use crate::error::Result;
use async_trait::async_trait;
use emulation_types::Row;

/// Read access to the sampled tables.
///
/// Implementations must scope any connection to a single call: acquire,
/// query, release.
#[async_trait]
pub trait RowSource: Send + Sync {
    /// Row at zero-based `offset` of each table, in `tables` order.
    ///
    /// `None` marks a table with no row at that offset.
    async fn rows_at(&self, tables: &[&str], offset: u64) -> Result<Vec<Option<Row>>>;

    /// Number of rows in `table`.
    async fn row_count(&self, table: &str) -> Result<u64>;
}
