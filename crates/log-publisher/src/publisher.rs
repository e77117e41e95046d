//! Publishing seam between the batch sender and the broker client.
//!
//! [`Publisher`] is the narrow interface the sender needs: enqueue a record,
//! then flush and wait for acknowledgment. [`KafkaPublisher`] implements it on
//! top of librdkafka; tests substitute an in-memory implementation.

use crate::config::ProducerConfig;
use crate::error::{PublisherError, Result};
use rdkafka::error::KafkaError;
use rdkafka::message::DeliveryResult;
use rdkafka::producer::{BaseRecord, Producer, ProducerContext, ThreadedProducer};
use rdkafka::util::Timeout;
use rdkafka::ClientContext;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use tracing::{debug, info, warn};

/// A client that buffers records and delivers them to a topic.
pub trait Publisher {
    /// Enqueue one record without a key. Returns once the record is buffered,
    /// not when the broker has acknowledged it.
    fn send(&mut self, topic: &str, payload: &[u8]) -> Result<()>;

    /// Block until every buffered record is acknowledged or has failed.
    ///
    /// Any delivery failure since the previous flush is reported here.
    fn flush(&mut self) -> Result<()>;
}

/// Outcome of the deliveries reported since the last [`DeliveryTracker::take_report`].
#[derive(Debug, Default)]
pub struct DeliveryReport {
    pub delivered: u64,
    pub failed: u64,
    pub first_error: Option<KafkaError>,
}

/// Producer context that tallies delivery reports.
///
/// Delivery callbacks run on the producer's polling thread; the tally is read
/// and reset by the caller after each flush.
#[derive(Debug, Default)]
pub struct DeliveryTracker {
    delivered: AtomicU64,
    failed: AtomicU64,
    first_error: Mutex<Option<KafkaError>>,
}

impl DeliveryTracker {
    fn record_success(&self) {
        self.delivered.fetch_add(1, Ordering::Relaxed);
    }

    fn record_failure(&self, err: &KafkaError) {
        self.failed.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut first) = self.first_error.lock() {
            first.get_or_insert_with(|| err.clone());
        }
    }

    /// Return the tally since the previous call and start a new one.
    pub fn take_report(&self) -> DeliveryReport {
        let first_error = match self.first_error.lock() {
            Ok(mut first) => first.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        DeliveryReport {
            delivered: self.delivered.swap(0, Ordering::Relaxed),
            failed: self.failed.swap(0, Ordering::Relaxed),
            first_error,
        }
    }
}

impl ClientContext for DeliveryTracker {}

impl ProducerContext for DeliveryTracker {
    type DeliveryOpaque = ();

    fn delivery(&self, delivery_result: &DeliveryResult<'_>, _: Self::DeliveryOpaque) {
        match delivery_result {
            Ok(_) => self.record_success(),
            Err((err, _)) => {
                warn!("Record delivery failed: {err}");
                self.record_failure(err);
            }
        }
    }
}

/// Kafka publisher backed by a librdkafka producer.
///
/// Records are buffered client-side and sent by librdkafka's background
/// thread according to `batch.size` and `linger.ms`. The connection is opened
/// by [`KafkaPublisher::connect`] and released when the publisher is closed or
/// dropped.
pub struct KafkaPublisher {
    producer: ThreadedProducer<DeliveryTracker>,
}

impl KafkaPublisher {
    /// Create the producer. librdkafka connects lazily, so an unreachable
    /// broker surfaces at the first flush rather than here.
    pub fn connect(config: &ProducerConfig) -> Result<Self> {
        let producer: ThreadedProducer<DeliveryTracker> = config
            .to_client_config()?
            .create_with_context(DeliveryTracker::default())?;

        info!(
            "Kafka producer created for {} (acks={}, linger.ms={}, batch.size={})",
            config.bootstrap_servers, config.acks, config.linger_ms, config.batch_size_bytes
        );

        Ok(Self { producer })
    }

    /// Flush outstanding records and release the client.
    pub fn close(mut self) -> Result<()> {
        let result = self.flush();
        debug!("Kafka producer closed");
        result
    }
}

impl Publisher for KafkaPublisher {
    fn send(&mut self, topic: &str, payload: &[u8]) -> Result<()> {
        let record: BaseRecord<'_, (), [u8]> = BaseRecord::to(topic).payload(payload);
        self.producer
            .send(record)
            .map_err(|(err, _)| PublisherError::Kafka(err))
    }

    /// Waits without a deadline of its own: every buffered record either
    /// reaches the broker or is failed by librdkafka once `message.timeout.ms`
    /// expires, so the wait ends with a delivery outcome for each of them.
    fn flush(&mut self) -> Result<()> {
        let flushed = self.producer.flush(Timeout::Never);
        let report = self.producer.context().take_report();
        let total = report.delivered + report.failed;

        if let Some(source) = report.first_error {
            return Err(PublisherError::Delivery {
                failed: report.failed,
                total,
                source,
            });
        }
        flushed?;

        debug!("Flushed {} records", total);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdkafka::types::RDKafkaErrorCode;

    #[test]
    fn test_tracker_report_resets() {
        let tracker = DeliveryTracker::default();
        tracker.record_success();
        tracker.record_success();
        tracker.record_failure(&KafkaError::MessageProduction(
            RDKafkaErrorCode::MessageTimedOut,
        ));
        tracker.record_failure(&KafkaError::MessageProduction(
            RDKafkaErrorCode::NotEnoughReplicas,
        ));

        let report = tracker.take_report();
        assert_eq!(report.delivered, 2);
        assert_eq!(report.failed, 2);
        assert_eq!(
            report.first_error,
            Some(KafkaError::MessageProduction(
                RDKafkaErrorCode::MessageTimedOut
            ))
        );

        let empty = tracker.take_report();
        assert_eq!(empty.delivered, 0);
        assert_eq!(empty.failed, 0);
        assert!(empty.first_error.is_none());
    }

    #[test]
    fn test_connect_rejects_invalid_config() {
        let config = ProducerConfig::new("");
        assert!(matches!(
            KafkaPublisher::connect(&config),
            Err(PublisherError::InvalidConfig(_))
        ));
    }
}
