//! Kafka producer configuration.

use crate::error::{PublisherError, Result};
use clap::Args;
use rdkafka::ClientConfig;

pub const DEFAULT_BOOTSTRAP_SERVERS: &str = "192.168.1.23:9092";
pub const DEFAULT_CLIENT_ID: &str = "mlp";
pub const DEFAULT_ACKS: &str = "all";
pub const DEFAULT_BATCH_SIZE_BYTES: u32 = 16_384;
pub const DEFAULT_LINGER_MS: u32 = 10;
pub const DEFAULT_COMPRESSION_TYPE: &str = "none";
pub const DEFAULT_MESSAGE_TIMEOUT_MS: u32 = 30_000;

/// Producer settings, mapped onto librdkafka configuration keys.
///
/// Defaults require acknowledgment from all in-sync replicas and buffer up to
/// 16 KB or 10 ms of records before a network batch is sent.
#[derive(Args, Clone, Debug, PartialEq, Eq)]
pub struct ProducerConfig {
    /// Kafka bootstrap servers (comma-separated, e.g., "localhost:9092")
    #[arg(long, default_value = DEFAULT_BOOTSTRAP_SERVERS)]
    pub bootstrap_servers: String,

    /// Client id reported to the broker (empty = librdkafka default)
    #[arg(long, default_value = DEFAULT_CLIENT_ID)]
    pub client_id: String,

    /// Acknowledgment level: 0, 1 or all
    #[arg(long, default_value = DEFAULT_ACKS)]
    pub acks: String,

    /// Maximum size in bytes of a client-side record batch
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE_BYTES)]
    pub batch_size_bytes: u32,

    /// Delay in milliseconds to wait for more records before sending a batch
    #[arg(long, default_value_t = DEFAULT_LINGER_MS)]
    pub linger_ms: u32,

    /// Compression codec: none, gzip, snappy, lz4 or zstd
    #[arg(long, default_value = DEFAULT_COMPRESSION_TYPE)]
    pub compression_type: String,

    /// Time in milliseconds a record may wait for delivery before it is failed.
    /// This also bounds how long a flush can block (0 = no limit)
    #[arg(long, default_value_t = DEFAULT_MESSAGE_TIMEOUT_MS)]
    pub message_timeout_ms: u32,

    /// Security protocol: PLAINTEXT, SSL, SASL_PLAINTEXT or SASL_SSL
    #[arg(long)]
    pub security_protocol: Option<String>,

    /// SASL mechanism, e.g. PLAIN or SCRAM-SHA-256
    #[arg(long)]
    pub sasl_mechanism: Option<String>,

    #[arg(long)]
    pub sasl_username: Option<String>,

    #[arg(long)]
    pub sasl_password: Option<String>,
}

impl Default for ProducerConfig {
    fn default() -> Self {
        Self {
            bootstrap_servers: DEFAULT_BOOTSTRAP_SERVERS.to_string(),
            client_id: DEFAULT_CLIENT_ID.to_string(),
            acks: DEFAULT_ACKS.to_string(),
            batch_size_bytes: DEFAULT_BATCH_SIZE_BYTES,
            linger_ms: DEFAULT_LINGER_MS,
            compression_type: DEFAULT_COMPRESSION_TYPE.to_string(),
            message_timeout_ms: DEFAULT_MESSAGE_TIMEOUT_MS,
            security_protocol: None,
            sasl_mechanism: None,
            sasl_username: None,
            sasl_password: None,
        }
    }
}

impl ProducerConfig {
    /// Default settings pointed at the given bootstrap servers.
    pub fn new(bootstrap_servers: &str) -> Self {
        Self {
            bootstrap_servers: bootstrap_servers.to_string(),
            ..Default::default()
        }
    }

    /// Build the librdkafka client configuration.
    ///
    /// Empty optional values are left unset so librdkafka applies its own defaults.
    pub fn to_client_config(&self) -> Result<ClientConfig> {
        if self.bootstrap_servers.trim().is_empty() {
            return Err(PublisherError::InvalidConfig(
                "bootstrap servers must not be empty".to_string(),
            ));
        }

        let has_mechanism = non_empty(&self.sasl_mechanism).is_some();
        let has_credentials =
            non_empty(&self.sasl_username).is_some() && non_empty(&self.sasl_password).is_some();
        if has_mechanism && !has_credentials {
            return Err(PublisherError::InvalidConfig(
                "SASL mechanism requires both a username and a password".to_string(),
            ));
        }

        let mut config = ClientConfig::new();
        config
            .set("bootstrap.servers", &self.bootstrap_servers)
            .set("acks", &self.acks)
            .set("batch.size", self.batch_size_bytes.to_string())
            .set("linger.ms", self.linger_ms.to_string())
            .set("compression.type", &self.compression_type)
            .set("message.timeout.ms", self.message_timeout_ms.to_string());

        if !self.client_id.is_empty() {
            config.set("client.id", &self.client_id);
        }

        let optional = [
            ("security.protocol", &self.security_protocol),
            ("sasl.mechanism", &self.sasl_mechanism),
            ("sasl.username", &self.sasl_username),
            ("sasl.password", &self.sasl_password),
        ];
        for (key, value) in optional {
            if let Some(value) = non_empty(value) {
                config.set(key, value);
            }
        }

        Ok(config)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
