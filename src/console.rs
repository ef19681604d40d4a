//! Console emitter: prints sampled records in a loop.

use crate::error::Result;
use crate::record::EmulationRecord;
use crate::sample::Sampler;
use crate::source::RowSource;
use rand::Rng;
use std::io::Write;
use std::time::Duration;
use tracing::info;

/// Line written after every record.
pub const DELIMITER: &str = "---";

#[derive(Debug, Clone)]
pub struct ConsoleOptions {
    /// Stop after this many records; run until interrupted when `None`.
    pub iterations: Option<u64>,
    /// Upper bound of the random pause before each record.
    pub max_delay: Duration,
}

impl Default for ConsoleOptions {
    fn default() -> Self {
        Self {
            iterations: None,
            max_delay: Duration::from_secs(2),
        }
    }
}

/// Write one record as three headed blocks followed by [`DELIMITER`].
pub fn write_record<W: Write>(out: &mut W, record: &EmulationRecord) -> std::io::Result<()> {
    for (i, (part, row)) in record.parts().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        writeln!(out, "{}:", part.heading())?;
        writeln!(out, "{row}")?;
    }
    writeln!(out, "{DELIMITER}")
}

/// Sample and print records until `options.iterations` is reached.
///
/// Returns the number of records printed. The first failed sample ends the
/// loop with its error.
pub async fn run_console<S, R, W>(
    sampler: &mut Sampler<R>,
    source: &S,
    out: &mut W,
    options: &ConsoleOptions,
) -> Result<u64>
where
    S: RowSource + ?Sized,
    R: Rng,
    W: Write,
{
    let mut printed = 0u64;
    loop {
        if options.iterations.is_some_and(|n| printed >= n) {
            break;
        }

        let delay = sampler.random_delay(options.max_delay);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let sample = sampler.sample(source).await?;
        write_record(out, &sample.record)?;
        out.flush()?;
        printed += 1;
    }

    info!("Printed {printed} emulated records");
    Ok(printed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use emulation_types::{Row, RowValue};

    #[test]
    fn test_write_record_layout() {
        let record = EmulationRecord {
            pin: Row::new().with("index", RowValue::Int(1)),
            geo: Row::new().with("country", RowValue::Text("Chad".into())),
            user: Row::new().with("age", RowValue::Int(30)),
        };

        let mut out = Vec::new();
        write_record(&mut out, &record).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Pin data:\n{\"index\": 1}\n\n\
             Geolocation data:\n{\"country\": \"Chad\"}\n\n\
             User data:\n{\"age\": 30}\n\
             ---\n"
        );
    }
}
