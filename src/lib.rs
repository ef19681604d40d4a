//! pin-emulation Library
//!
//! Emulates user posting activity by sampling rows from three related tables
//! (`pinterest_data`, `geolocation_data`, `user_data`) at a shared random
//! offset and either printing them or posting them to a Kafka REST proxy.
//!
//! # Pipeline
//!
//! - Load credentials from YAML files ([`config`])
//! - Connect to MySQL ([`mysql::connect`])
//! - Draw an offset and fetch one row per table ([`Sampler`])
//! - Print the record ([`console`]) or post one envelope per part ([`publish`])
//!
//! # CLI Usage
//!
//! ```bash
//! # Print five records, reproducibly
//! pin-emulation --seed 100 print --iterations 5
//!
//! # Post one record to <INVOKE_URL_BASE>.pin / .geo / .user
//! pin-emulation post --api-credentials db_creds_api.yaml
//! ```

use clap::Args;
use std::path::PathBuf;
use std::time::Duration;

pub mod config;
pub mod console;
mod error;
pub mod mysql;
pub mod publish;
mod record;
pub mod sample;
mod source;
pub mod testing;

pub use error::{EmulationError, Result};
pub use record::{EmulationRecord, Part};
pub use sample::{sample_at, OffsetBound, Sample, Sampler, DEFAULT_MAX_OFFSET};
pub use source::RowSource;

/// Options shared by every command.
#[derive(Args, Clone, Debug)]
pub struct EmulationOpts {
    /// YAML file with RDS_HOST, RDS_PORT, RDS_DATABASE, RDS_USER and RDS_PASSWORD
    #[arg(
        long,
        global = true,
        default_value = "db_creds_aws_emulation.yaml",
        env = "EMULATION_DB_CREDENTIALS"
    )]
    pub db_credentials: PathBuf,

    /// Seed for reproducible sampling (random if omitted)
    #[arg(long, global = true, env = "EMULATION_SEED")]
    pub seed: Option<u64>,

    /// Largest row offset to sample
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_OFFSET)]
    pub max_offset: u64,

    /// Bound offsets by the smallest table's row count instead of --max-offset
    #[arg(long, global = true)]
    pub dynamic_bound: bool,

    /// Upper bound of the random pause between records, in whole seconds
    /// (e.g. "2s", "1m"; below one second disables the pause)
    #[arg(long, global = true, default_value = "2s", value_parser = config::parse_duration)]
    pub max_delay: Duration,
}

impl EmulationOpts {
    pub fn offset_bound(&self) -> OffsetBound {
        if self.dynamic_bound {
            OffsetBound::RowCount
        } else {
            OffsetBound::Fixed(self.max_offset)
        }
    }

    /// Seeded sampler when `--seed` is given, OS-seeded otherwise.
    pub fn sampler(&self) -> Sampler {
        match self.seed {
            Some(seed) => Sampler::seeded(seed, self.offset_bound()),
            None => Sampler::from_os_rng(self.offset_bound()),
        }
    }
}
