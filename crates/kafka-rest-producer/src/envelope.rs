use serde::{Deserialize, Serialize};

/// Media type of the Kafka REST proxy v2 embedded-JSON format.
pub const KAFKA_JSON_V2_CONTENT_TYPE: &str = "application/vnd.kafka.json.v2+json";

/// Request body accepted by the proxy: a batch of records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub records: Vec<EnvelopeRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeRecord {
    pub value: serde_json::Value,
}

impl Envelope {
    /// Envelope carrying exactly one record.
    pub fn single(value: serde_json::Value) -> Self {
        Self {
            records: vec![EnvelopeRecord { value }],
        }
    }

    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Endpoint for a topic suffix: `<base_url>.<suffix>`.
pub fn topic_url(base_url: &str, suffix: &str) -> String {
    format!("{base_url}.{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_envelope_shape() {
        let envelope = Envelope::single(json!({"ind": 5, "category": "diy"}));
        assert_eq!(
            envelope.to_json_string().unwrap(),
            r#"{"records":[{"value":{"ind":5,"category":"diy"}}]}"#
        );
    }

    #[test]
    fn test_topic_url() {
        assert_eq!(
            topic_url("https://abc.execute-api.us-east-1.amazonaws.com/prod/topics/12e", "geo"),
            "https://abc.execute-api.us-east-1.amazonaws.com/prod/topics/12e.geo"
        );
    }
}
