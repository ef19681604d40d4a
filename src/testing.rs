//! Test data infrastructure
//!
//! [`MemoryRowSource`] stands in for the emulation database so sampling,
//! printing and publishing can be exercised without a MySQL server.

use crate::error::Result;
use crate::record::Part;
use crate::source::RowSource;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use emulation_types::{Row, RowValue};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

const CATEGORIES: [&str; 5] = ["diy-and-crafts", "travel", "quotes", "beauty", "tattoos"];
const COUNTRIES: [&str; 4] = ["Maldives", "Chad", "Aruba", "Kiribati"];
const FIRST_NAMES: [&str; 4] = ["Alexandria", "Andrew", "Mackenzie", "Thomas"];

/// In-memory tables addressed by name.
#[derive(Debug, Default)]
pub struct MemoryRowSource {
    tables: HashMap<String, Vec<Row>>,
    rows_at_calls: AtomicUsize,
}

impl MemoryRowSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, name: &str, rows: Vec<Row>) -> Self {
        self.tables.insert(name.to_string(), rows);
        self
    }

    /// Keep only the first `len` rows of `table`.
    pub fn truncate(&mut self, table: &str, len: usize) {
        if let Some(rows) = self.tables.get_mut(table) {
            rows.truncate(len);
        }
    }

    /// Replace a single row.
    pub fn set_row(&mut self, table: &str, offset: usize, row: Row) {
        if let Some(slot) = self.tables.get_mut(table).and_then(|t| t.get_mut(offset)) {
            *slot = row;
        }
    }

    /// How many times [`RowSource::rows_at`] was called.
    pub fn rows_at_calls(&self) -> usize {
        self.rows_at_calls.load(Ordering::SeqCst)
    }

    /// `len` rows in each of the three tables, row `i` of every table
    /// describing post `i`.
    pub fn fixture(len: usize) -> Self {
        let pins = (0..len).map(pin_row).collect();
        let geos = (0..len).map(geo_row).collect();
        let users = (0..len).map(user_row).collect();
        Self::new()
            .with_table(Part::Pin.table(), pins)
            .with_table(Part::Geo.table(), geos)
            .with_table(Part::User.table(), users)
    }
}

#[async_trait]
impl RowSource for MemoryRowSource {
    async fn rows_at(&self, tables: &[&str], offset: u64) -> Result<Vec<Option<Row>>> {
        self.rows_at_calls.fetch_add(1, Ordering::SeqCst);
        Ok(tables
            .iter()
            .map(|table| {
                let rows = self.tables.get(*table)?;
                let index = usize::try_from(offset).ok()?;
                rows.get(index).cloned()
            })
            .collect())
    }

    async fn row_count(&self, table: &str) -> Result<u64> {
        Ok(self.tables.get(table).map_or(0, |rows| rows.len() as u64))
    }
}

fn timestamp(i: usize) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2018, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt + chrono::TimeDelta::hours(i as i64 * 7))
        .unwrap_or_default()
}

pub fn pin_row(i: usize) -> Row {
    Row::new()
        .with("index", RowValue::Int(i as i64))
        .with(
            "unique_id",
            RowValue::Text(format!("00000000-0000-4000-8000-{i:012}")),
        )
        .with("title", RowValue::Text(format!("Pin number {i}")))
        .with("follower_count", RowValue::Text(format!("{}k", i % 90 + 1)))
        .with(
            "category",
            RowValue::Text(CATEGORIES[i % CATEGORIES.len()].to_string()),
        )
}

pub fn geo_row(i: usize) -> Row {
    Row::new()
        .with("ind", RowValue::Int(i as i64))
        .with("timestamp", RowValue::DateTime(timestamp(i)))
        .with("latitude", RowValue::Float(-45.0 + (i % 90) as f64))
        .with("longitude", RowValue::Float(10.5 + (i % 100) as f64))
        .with(
            "country",
            RowValue::Text(COUNTRIES[i % COUNTRIES.len()].to_string()),
        )
}

pub fn user_row(i: usize) -> Row {
    Row::new()
        .with("ind", RowValue::Int(i as i64))
        .with(
            "first_name",
            RowValue::Text(FIRST_NAMES[i % FIRST_NAMES.len()].to_string()),
        )
        .with("last_name", RowValue::Text("Smith".to_string()))
        .with("age", RowValue::Int(20 + (i % 40) as i64))
        .with("date_joined", RowValue::DateTime(timestamp(i)))
}
