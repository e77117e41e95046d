//! Command-line entry point for mlp-log-publisher
//!
//! With no arguments, publishes 5 batches of 10 synthetic log records to the
//! `mlp-logs` topic on `192.168.1.23:9092`, then closes the producer.
//!
//! ```bash
//! # Defaults
//! mlp-log-publisher
//!
//! # Local broker, bigger run, reproducible levels and messages
//! mlp-log-publisher --bootstrap-servers localhost:9092 \
//!   --topic app-logs --num-batches 20 --batch-size 100 --seed 42
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default: `info`).

use anyhow::Context;
use clap::Parser;
use log_publisher::{
    send_log_batches, KafkaPublisher, LogGenerator, ProducerConfig, DEFAULT_BATCH_SIZE,
    DEFAULT_NUM_BATCHES, DEFAULT_TOPIC,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "mlp-log-publisher")]
#[command(about = "Publish batches of synthetic JSON log records to a Kafka topic")]
#[command(long_about = None)]
struct Cli {
    /// Topic to publish to
    #[arg(long, default_value = DEFAULT_TOPIC)]
    topic: String,

    /// Number of batches to send
    #[arg(long, default_value_t = DEFAULT_NUM_BATCHES)]
    num_batches: u64,

    /// Records per batch; each batch is flushed before the next starts
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    batch_size: u64,

    /// Random seed for the level/message sequence (default: OS entropy)
    #[arg(long)]
    seed: Option<u64>,

    /// Kafka producer options
    #[command(flatten)]
    producer: ProducerConfig,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut publisher =
        KafkaPublisher::connect(&cli.producer).context("Failed to create Kafka producer")?;

    let mut generator = match cli.seed {
        Some(seed) => LogGenerator::from_seed(seed),
        None => LogGenerator::from_os_rng(),
    };

    send_log_batches(
        &mut publisher,
        &mut generator,
        &cli.topic,
        cli.num_batches,
        cli.batch_size,
    )
    .with_context(|| format!("Failed to publish log batches to '{}'", cli.topic))?;

    publisher
        .close()
        .context("Failed to close Kafka producer")?;
    info!("Producer closed");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_uses_defaults() {
        let cli = Cli::parse_from(["mlp-log-publisher"]);

        assert_eq!(cli.topic, "mlp-logs");
        assert_eq!(cli.num_batches, 5);
        assert_eq!(cli.batch_size, 10);
        assert_eq!(cli.seed, None);
        assert_eq!(cli.producer, ProducerConfig::default());
    }

    #[test]
    fn test_batch_flags_do_not_clash() {
        let cli = Cli::parse_from([
            "mlp-log-publisher",
            "--batch-size",
            "3",
            "--batch-size-bytes",
            "1024",
            "--seed",
            "7",
        ]);

        assert_eq!(cli.batch_size, 3);
        assert_eq!(cli.producer.batch_size_bytes, 1024);
        assert_eq!(cli.seed, Some(7));
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
