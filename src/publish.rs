//! Publish emulated records to the Kafka REST proxy.
//!
//! Every sample produces three POSTs, one per [`Part`], each carrying a
//! single-record envelope. A failed POST is reported for its part and does
//! not stop the other parts.

use crate::error::Result;
use crate::record::{EmulationRecord, Part};
use crate::sample::Sampler;
use crate::source::RowSource;
use emulation_types::forward::row_to_json;
use kafka_rest_producer::{Envelope, KafkaRestClient, ProducerError, StatusCode};
use rand::Rng;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Result of posting one part.
#[derive(Debug)]
pub struct PartOutcome {
    pub part: Part,
    pub url: String,
    pub result: std::result::Result<StatusCode, ProducerError>,
}

/// Outcomes of publishing one record, in [`Part::ALL`] order.
#[derive(Debug)]
pub struct PublishReport {
    pub outcomes: Vec<PartOutcome>,
}

impl PublishReport {
    /// True when every part was accepted with a 2xx status.
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = &PartOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }

    /// Status per part; `None` where no response was received.
    pub fn statuses(&self) -> Vec<(Part, Option<StatusCode>)> {
        self.outcomes
            .iter()
            .map(|o| {
                let status = match &o.result {
                    Ok(status) => Some(*status),
                    Err(e) => e.status(),
                };
                (o.part, status)
            })
            .collect()
    }
}

/// Serialized envelope for every part.
///
/// Fails on the first value without a JSON encoding, before anything is sent.
pub fn build_payloads(record: &EmulationRecord) -> Result<Vec<(Part, String)>> {
    record
        .parts()
        .map(|(part, row)| -> Result<(Part, String)> {
            let envelope = Envelope::single(row_to_json(row)?);
            Ok((part, envelope.to_json_string()?))
        })
        .collect()
}

/// Post all three parts of `record`.
pub async fn publish(client: &KafkaRestClient, record: &EmulationRecord) -> Result<PublishReport> {
    let payloads = build_payloads(record)?;

    info!("Posting emulated data to Kafka topic...");
    let mut outcomes = Vec::with_capacity(payloads.len());
    for (part, payload) in payloads {
        let url = client.url_for(part.name());
        debug!("{part} payload: {payload}");

        let result = client.post_payload(part.name(), payload).await;
        match &result {
            Ok(status) => info!("Response for {part}: {}", status.as_u16()),
            Err(e) => warn!("Publishing {part} failed: {e}"),
        }
        outcomes.push(PartOutcome { part, url, result });
    }

    Ok(PublishReport { outcomes })
}

/// Sample and publish `iterations` records, pausing a random delay between them.
pub async fn publish_samples<S, R>(
    sampler: &mut Sampler<R>,
    source: &S,
    client: &KafkaRestClient,
    iterations: u64,
    max_delay: Duration,
) -> Result<Vec<PublishReport>>
where
    S: RowSource + ?Sized,
    R: Rng,
{
    let mut reports = Vec::new();
    for i in 0..iterations {
        if i > 0 {
            let delay = sampler.random_delay(max_delay);
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }

        let sample = sampler.sample(source).await?;
        info!("Publishing record at offset {}", sample.offset);
        reports.push(publish(client, &sample.record).await?);
    }
    Ok(reports)
}
