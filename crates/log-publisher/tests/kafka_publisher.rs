//! Tests for the librdkafka-backed publisher.
//!
//! The unreachable-broker test needs no running Kafka: librdkafka fails the
//! buffered record once `message.timeout.ms` expires and the flush reports it.
//! The round-trip test needs a broker on localhost:9092 and is ignored by default.

use log_publisher::{
    send_log_batches, KafkaPublisher, LogGenerator, ProducerConfig, Publisher, PublisherError,
};

fn unreachable_config(message_timeout_ms: u32) -> ProducerConfig {
    ProducerConfig {
        message_timeout_ms,
        ..ProducerConfig::new("127.0.0.1:1")
    }
}

fn assert_single_delivery_failure(err: PublisherError) {
    match err {
        PublisherError::Delivery { failed, total, .. } => {
            assert_eq!(failed, 1);
            assert_eq!(total, 1);
        }
        other => panic!("expected a delivery failure, got: {other}"),
    }
}

#[test]
fn test_unreachable_broker_fails_flush() {
    let mut publisher = KafkaPublisher::connect(&unreachable_config(500)).unwrap();

    publisher.send("test-topic", br#"{"level":"INFO"}"#).unwrap();
    assert_single_delivery_failure(publisher.flush().unwrap_err());
}

#[test]
fn test_flush_waits_out_long_message_timeout() {
    // A message timeout of several seconds must still end in a delivery
    // outcome, not in the flush giving up first.
    let mut publisher = KafkaPublisher::connect(&unreachable_config(5_000)).unwrap();

    publisher.send("test-topic", br#"{"level":"INFO"}"#).unwrap();
    assert_single_delivery_failure(publisher.flush().unwrap_err());

    // The failed record was settled, so nothing is left to flush.
    publisher.flush().unwrap();
}

#[test]
fn test_unreachable_broker_aborts_sender() {
    let mut publisher = KafkaPublisher::connect(&unreachable_config(500)).unwrap();
    let mut generator = LogGenerator::from_seed(42);

    let err = send_log_batches(&mut publisher, &mut generator, "test-topic", 5, 10).unwrap_err();
    match err {
        PublisherError::Delivery { failed, total, .. } => {
            assert_eq!(failed, 10);
            assert_eq!(total, 10);
        }
        other => panic!("expected a delivery failure, got: {other}"),
    }

    // Nothing left buffered, closing is clean.
    publisher.close().unwrap();
}

#[test]
#[ignore = "requires a Kafka broker on localhost:9092"]
fn test_publish_to_local_broker() {
    let mut publisher = KafkaPublisher::connect(&ProducerConfig::new("localhost:9092")).unwrap();
    let mut generator = LogGenerator::from_os_rng();

    let metrics =
        send_log_batches(&mut publisher, &mut generator, "mlp-logs-test", 2, 5).unwrap();

    assert_eq!(metrics.records_sent, 10);
    assert_eq!(metrics.batch_count, 2);
    publisher.close().unwrap();
}
