//! Random-offset sampling across the three tables.

use crate::error::{EmulationError, Result};
use crate::record::{EmulationRecord, Part};
use crate::source::RowSource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tracing::debug;

/// Upper bound on sampled offsets when none is configured.
pub const DEFAULT_MAX_OFFSET: u64 = 11_000;

/// How the inclusive upper bound of the offset range is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetBound {
    /// Offsets are drawn from `[0, N]`. Offsets past the end of a table
    /// produce [`EmulationError::SampleNotFound`].
    Fixed(u64),
    /// Offsets are drawn from `[0, min(row counts) - 1]`, counted before
    /// every draw.
    RowCount,
}

impl Default for OffsetBound {
    fn default() -> Self {
        OffsetBound::Fixed(DEFAULT_MAX_OFFSET)
    }
}

/// A drawn offset and the record fetched with it.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub offset: u64,
    pub record: EmulationRecord,
}

/// Draws offsets from an owned random source and fetches records.
///
/// The random source is passed in, so a seeded sampler always draws the
/// same sequence of offsets.
pub struct Sampler<R = StdRng> {
    rng: R,
    bound: OffsetBound,
}

impl Sampler<StdRng> {
    /// Deterministic sampler.
    pub fn seeded(seed: u64, bound: OffsetBound) -> Self {
        Self::new(StdRng::seed_from_u64(seed), bound)
    }

    /// Sampler seeded from the operating system.
    pub fn from_os_rng(bound: OffsetBound) -> Self {
        Self::new(StdRng::from_os_rng(), bound)
    }
}

impl<R: Rng> Sampler<R> {
    pub fn new(rng: R, bound: OffsetBound) -> Self {
        Self { rng, bound }
    }

    pub fn bound(&self) -> OffsetBound {
        self.bound
    }

    /// Largest offset the next draw may return.
    pub async fn max_offset<S: RowSource + ?Sized>(&self, source: &S) -> Result<u64> {
        match self.bound {
            OffsetBound::Fixed(max) => Ok(max),
            OffsetBound::RowCount => {
                let mut min_count = u64::MAX;
                for part in Part::ALL {
                    let count = source.row_count(part.table()).await?;
                    if count == 0 {
                        return Err(EmulationError::EmptyTable {
                            table: part.table().to_string(),
                        });
                    }
                    min_count = min_count.min(count);
                }
                Ok(min_count - 1)
            }
        }
    }

    /// Draw an offset uniformly from `[0, max_offset]`.
    pub async fn draw_offset<S: RowSource + ?Sized>(&mut self, source: &S) -> Result<u64> {
        let max = self.max_offset(source).await?;
        Ok(self.rng.random_range(0..=max))
    }

    /// Draw an offset and fetch the record at it.
    pub async fn sample<S: RowSource + ?Sized>(&mut self, source: &S) -> Result<Sample> {
        let offset = self.draw_offset(source).await?;
        debug!("Sampling offset {offset}");
        let record = sample_at(source, offset).await?;
        Ok(Sample { offset, record })
    }

    /// Random pause of a whole number of seconds in `[0, max)`.
    ///
    /// Zero when `max` is under one second.
    pub fn random_delay(&mut self, max: Duration) -> Duration {
        match max.as_secs() {
            0 => Duration::ZERO,
            secs => Duration::from_secs(self.rng.random_range(0..secs)),
        }
    }
}

/// Fetch the record at a known offset.
///
/// Fails with [`EmulationError::SampleNotFound`] naming the first table
/// that has no row at `offset`.
pub async fn sample_at<S: RowSource + ?Sized>(source: &S, offset: u64) -> Result<EmulationRecord> {
    let tables = Part::ALL.map(Part::table);
    let mut rows = source.rows_at(&tables, offset).await?.into_iter();

    let mut next = |part: Part| {
        rows.next()
            .flatten()
            .ok_or_else(|| EmulationError::SampleNotFound {
                table: part.table().to_string(),
                offset,
            })
    };

    Ok(EmulationRecord {
        pin: next(Part::Pin)?,
        geo: next(Part::Geo)?,
        user: next(Part::User)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryRowSource;
    use emulation_types::RowValue;

    #[tokio::test]
    async fn test_sample_at_returns_kth_row_of_each_table() {
        let source = MemoryRowSource::fixture(5);

        for k in 0..5 {
            let record = sample_at(&source, k).await.unwrap();
            assert_eq!(record.pin.get("index"), Some(&RowValue::Int(k as i64)));
            assert_eq!(record.geo.get("ind"), Some(&RowValue::Int(k as i64)));
            assert_eq!(record.user.get("ind"), Some(&RowValue::Int(k as i64)));
        }
    }

    #[tokio::test]
    async fn test_offset_past_end_is_not_found() {
        let source = MemoryRowSource::fixture(5);

        let err = sample_at(&source, 5).await.unwrap_err();
        assert!(matches!(
            err,
            EmulationError::SampleNotFound { ref table, offset: 5 } if table == "pinterest_data"
        ));
    }

    #[tokio::test]
    async fn test_shorter_table_is_named_in_error() {
        let mut source = MemoryRowSource::fixture(5);
        source.truncate("user_data", 2);

        let err = sample_at(&source, 3).await.unwrap_err();
        assert!(matches!(
            err,
            EmulationError::SampleNotFound { ref table, offset: 3 } if table == "user_data"
        ));
    }

    #[tokio::test]
    async fn test_same_seed_same_offsets() {
        let source = MemoryRowSource::fixture(50);
        let mut a = Sampler::seeded(100, OffsetBound::Fixed(49));
        let mut b = Sampler::seeded(100, OffsetBound::Fixed(49));

        for _ in 0..20 {
            let sa = a.sample(&source).await.unwrap();
            let sb = b.sample(&source).await.unwrap();
            assert_eq!(sa.offset, sb.offset);
            assert_eq!(sa.record, sb.record);
        }
    }

    #[tokio::test]
    async fn test_fixed_bound_is_inclusive() {
        let source = MemoryRowSource::fixture(1);
        let mut sampler = Sampler::seeded(7, OffsetBound::Fixed(0));
        for _ in 0..10 {
            assert_eq!(sampler.draw_offset(&source).await.unwrap(), 0);
        }
    }

    #[tokio::test]
    async fn test_row_count_bound_uses_smallest_table() {
        let mut source = MemoryRowSource::fixture(100);
        source.truncate("geolocation_data", 3);

        let mut sampler = Sampler::seeded(1, OffsetBound::RowCount);
        assert_eq!(sampler.max_offset(&source).await.unwrap(), 2);
        for _ in 0..50 {
            let sample = sampler.sample(&source).await.unwrap();
            assert!(sample.offset <= 2);
        }
    }

    #[tokio::test]
    async fn test_row_count_bound_on_empty_table() {
        let mut source = MemoryRowSource::fixture(10);
        source.truncate("pinterest_data", 0);

        let mut sampler = Sampler::seeded(1, OffsetBound::RowCount);
        let err = sampler.sample(&source).await.unwrap_err();
        assert!(matches!(err, EmulationError::EmptyTable { ref table } if table == "pinterest_data"));
    }

    #[test]
    fn test_random_delay_range() {
        let mut sampler = Sampler::seeded(3, OffsetBound::default());
        assert_eq!(
            sampler.random_delay(Duration::from_millis(900)),
            Duration::ZERO
        );
        for _ in 0..50 {
            let d = sampler.random_delay(Duration::from_secs(2));
            assert!(d == Duration::ZERO || d == Duration::from_secs(1));
        }
    }
}
