use crate::{topic_url, Envelope, ProducerError, KAFKA_JSON_V2_CONTENT_TYPE};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// HTTP client bound to one REST proxy base URL.
#[derive(Debug, Clone)]
pub struct KafkaRestClient {
    http: Client,
    base_url: String,
}

impl KafkaRestClient {
    /// Create a client whose requests time out after `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ProducerError> {
        let base_url = base_url.into();
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| ProducerError::Transport {
                url: base_url.clone(),
                source,
            })?;
        Ok(Self { http, base_url })
    }

    /// URL records for `suffix` are posted to.
    pub fn url_for(&self, suffix: &str) -> String {
        topic_url(&self.base_url, suffix)
    }

    /// Serialize and post an envelope.
    pub async fn post(
        &self,
        suffix: &str,
        envelope: &Envelope,
    ) -> Result<StatusCode, ProducerError> {
        let payload = envelope.to_json_string()?;
        self.post_payload(suffix, payload).await
    }

    /// Post an already serialized envelope.
    ///
    /// Returns the response status on 2xx; any other status is an error
    /// carrying the response body.
    pub async fn post_payload(
        &self,
        suffix: &str,
        payload: String,
    ) -> Result<StatusCode, ProducerError> {
        let url = self.url_for(suffix);
        tracing::debug!("POST {url}: {payload}");

        let response = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, KAFKA_JSON_V2_CONTENT_TYPE)
            .body(payload)
            .send()
            .await
            .map_err(|source| ProducerError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProducerError::Status { url, status, body });
        }

        tracing::debug!("POST {url} -> {status}");
        Ok(status)
    }
}
