//! Synthetic log publisher for Kafka.
//!
//! Generates fake structured log entries and publishes them as JSON to a Kafka
//! topic in batches, flushing after each batch and waiting for the broker to
//! acknowledge it.
//!
//! ```text
//! LogGenerator ──► LogEntry ──► JSON bytes ──► Publisher::send (buffered)
//!                                                    │
//!                                  batch boundary ──►│ Publisher::flush (blocks)
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use log_publisher::{send_log_batches, KafkaPublisher, LogGenerator, ProducerConfig};
//!
//! fn main() -> Result<(), log_publisher::PublisherError> {
//!     let mut publisher = KafkaPublisher::connect(&ProducerConfig::new("localhost:9092"))?;
//!     let mut generator = LogGenerator::from_os_rng();
//!
//!     let metrics = send_log_batches(&mut publisher, &mut generator, "mlp-logs", 5, 10)?;
//!     println!("Published {} records", metrics.records_sent);
//!
//!     publisher.close()
//! }
//! ```

pub mod clock;
pub mod config;
pub mod entry;
pub mod error;
pub mod generator;
pub mod publisher;
pub mod sender;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::ProducerConfig;
pub use entry::{LogEntry, LogLevel, MESSAGES};
pub use error::{PublisherError, Result};
pub use generator::LogGenerator;
pub use publisher::{DeliveryReport, DeliveryTracker, KafkaPublisher, Publisher};
pub use sender::{
    send_log_batches, SendMetrics, DEFAULT_BATCH_SIZE, DEFAULT_NUM_BATCHES, DEFAULT_TOPIC,
};
