//! Batched send loop.

use crate::clock::Clock;
use crate::error::Result;
use crate::generator::LogGenerator;
use crate::publisher::Publisher;
use rand::Rng;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Topic published to when none is given.
pub const DEFAULT_TOPIC: &str = "mlp-logs";
/// Number of batches sent when none is given.
pub const DEFAULT_NUM_BATCHES: u64 = 5;
/// Records per batch when none is given.
pub const DEFAULT_BATCH_SIZE: u64 = 10;

/// Metrics from a send run.
#[derive(Debug, Clone, Default)]
pub struct SendMetrics {
    /// Number of records handed to the publisher.
    pub records_sent: u64,
    /// Number of batches flushed successfully.
    pub batch_count: u64,
    /// Total JSON payload bytes handed to the publisher.
    pub bytes_sent: u64,
    /// Total time taken.
    pub total_duration: Duration,
}

impl SendMetrics {
    /// Calculate records per second.
    pub fn records_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.records_sent as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Publish `num_batches` batches of `batch_size` generated log entries to `topic`.
///
/// Each batch enqueues its records and then flushes, blocking until the broker
/// has acknowledged them. The first error, whether from encoding, enqueueing or
/// the flush, aborts the run and is returned as is. Records of a failed batch
/// are not retried.
pub fn send_log_batches<P, R, C>(
    publisher: &mut P,
    generator: &mut LogGenerator<R, C>,
    topic: &str,
    num_batches: u64,
    batch_size: u64,
) -> Result<SendMetrics>
where
    P: Publisher + ?Sized,
    R: Rng,
    C: Clock,
{
    let start_time = Instant::now();
    let mut metrics = SendMetrics::default();

    for batch in 1..=num_batches {
        info!("Sending batch {}/{}", batch, num_batches);

        for _ in 0..batch_size {
            let payload = generator.next_entry().to_json_bytes()?;
            publisher.send(topic, &payload)?;
            metrics.records_sent += 1;
            metrics.bytes_sent += payload.len() as u64;
        }

        publisher.flush()?;
        metrics.batch_count += 1;

        debug!(
            "Batch {} acknowledged: {} records sent so far",
            batch, metrics.records_sent
        );
    }

    metrics.total_duration = start_time.elapsed();

    info!(
        "Published {} records in {} batches to '{}' in {:?} ({:.2} records/sec)",
        metrics.records_sent,
        metrics.batch_count,
        topic,
        metrics.total_duration,
        metrics.records_per_second()
    );

    Ok(metrics)
}
