use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur while posting to the REST proxy.
#[derive(Error, Debug)]
pub enum ProducerError {
    /// Request could not be built, sent, or answered.
    #[error("HTTP request to '{url}' failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The proxy answered with a non-2xx status.
    #[error("Kafka REST proxy returned status {status} for '{url}': {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },

    /// Envelope could not be encoded.
    #[error("Failed to encode envelope: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ProducerError {
    /// HTTP status if the proxy answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ProducerError::Status { status, .. } => Some(*status),
            ProducerError::Transport { source, .. } => source.status(),
            ProducerError::Encode(_) => None,
        }
    }
}
