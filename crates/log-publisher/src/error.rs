//! Error types for the log publisher.

use rdkafka::error::KafkaError;
use thiserror::Error;

/// Errors that can occur while publishing log batches.
#[derive(Error, Debug)]
pub enum PublisherError {
    #[error("Kafka error: {0}")]
    Kafka(#[from] KafkaError),

    #[error("Delivery failed for {failed} of {total} records: {source}")]
    Delivery {
        failed: u64,
        total: u64,
        source: KafkaError,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid producer configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for log publisher operations.
pub type Result<T> = std::result::Result<T, PublisherError>;
