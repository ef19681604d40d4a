//! Kafka REST proxy producer
//!
//! Posts JSON records to a Kafka REST proxy (`/topics/<topic>` style
//! endpoints) using the v2 embedded-JSON format:
//!
//! ```text
//! POST <base_url>.<topic_suffix>
//! Content-Type: application/vnd.kafka.json.v2+json
//!
//! {"records":[{"value": {...}}]}
//! ```

mod client;
mod envelope;
mod error;

pub use client::KafkaRestClient;
pub use envelope::{topic_url, Envelope, EnvelopeRecord, KAFKA_JSON_V2_CONTENT_TYPE};
pub use error::ProducerError;
pub use reqwest::StatusCode;
