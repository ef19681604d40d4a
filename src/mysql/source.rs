//! Offset-paginated reads from the emulation database.

use crate::error::{EmulationError, Result};
use crate::source::RowSource;
use async_trait::async_trait;
use emulation_types::Row;
use mysql_async::{prelude::*, Pool};
use tracing::debug;

/// [`RowSource`] backed by a MySQL connection pool.
#[derive(Debug, Clone)]
pub struct MySqlRowSource {
    pool: Pool,
}

impl MySqlRowSource {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Close all pooled connections.
    pub async fn disconnect(self) -> Result<()> {
        self.pool.disconnect().await?;
        Ok(())
    }
}

/// Backtick-quote a table name.
pub fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// `SELECT * FROM <table> LIMIT ?, 1`; the offset is bound as a parameter.
pub fn row_at_query(table: &str) -> String {
    format!("SELECT * FROM {} LIMIT ?, 1", quote_identifier(table))
}

pub fn row_count_query(table: &str) -> String {
    format!("SELECT COUNT(*) FROM {}", quote_identifier(table))
}

#[async_trait]
impl RowSource for MySqlRowSource {
    async fn rows_at(&self, tables: &[&str], offset: u64) -> Result<Vec<Option<Row>>> {
        // One connection per call, returned to the pool when `conn` drops.
        let mut conn = self.pool.get_conn().await?;

        let mut rows = Vec::with_capacity(tables.len());
        for table in tables {
            let query = row_at_query(table);
            debug!("{query} [offset = {offset}]");

            let raw: Option<mysql_async::Row> = conn.exec_first(query, (offset,)).await?;
            let row = raw
                .map(Row::try_from)
                .transpose()
                .map_err(|source| EmulationError::Conversion {
                    table: table.to_string(),
                    source,
                })?;
            rows.push(row);
        }
        Ok(rows)
    }

    async fn row_count(&self, table: &str) -> Result<u64> {
        let mut conn = self.pool.get_conn().await?;
        let count: Option<u64> = conn.query_first(row_count_query(table)).await?;
        Ok(count.unwrap_or(0))
    }
}
