// ABOUTME: gRPC channel creation with keep-alive configuration.
// ABOUTME: Provides configurable channel builder for greet gRPC connections.

use std::time::Duration;
use tonic::transport::{Channel, Endpoint};

use crate::error::GreetError;

/// Configuration for gRPC channel keep-alive behavior.
#[derive(Debug, Clone)]
pub struct KeepAliveConfig {
    /// Interval between keep-alive pings when the connection is idle.
    pub interval: Duration,
    /// Timeout waiting for keep-alive response before considering connection dead.
    pub timeout: Duration,
    /// Whether to send keep-alive pings even when no streams are active.
    pub while_idle: bool,
}

impl Default for KeepAliveConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
            timeout: Duration::from_secs(20),
            while_idle: true,
        }
    }
}

/// Configuration for creating a gRPC channel.
#[derive(Debug, Clone)]
pub struct ChannelConfig {
    /// Server address to connect to (e.g., "http://localhost:50051").
    pub address: String,
    /// Keep-alive configuration. If None, keep-alive is disabled.
    pub keep_alive: Option<KeepAliveConfig>,
    /// Connection timeout.
    pub connect_timeout: Option<Duration>,
}

impl ChannelConfig {
    /// Create a channel config with default settings.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into().trim().to_string(),
            keep_alive: Some(KeepAliveConfig::default()),
            connect_timeout: Some(Duration::from_secs(30)),
        }
    }

    /// Disable keep-alive.
    pub fn without_keep_alive(mut self) -> Self {
        self.keep_alive = None;
        self
    }

    /// Set custom keep-alive configuration.
    pub fn with_keep_alive(mut self, config: KeepAliveConfig) -> Self {
        self.keep_alive = Some(config);
        self
    }

    /// Set connection timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }
}

/// Create a gRPC channel with the specified configuration.
///
/// Keep-alive is important for long-lived streaming calls to detect dead
/// peers and prevent connection resets from intermediaries.
pub async fn create_channel(config: &ChannelConfig) -> Result<Channel, GreetError> {
    let mut endpoint = Endpoint::from_shared(config.address.clone())
        .map_err(|e| GreetError::InvalidAddress(e.to_string()))?;

    // Apply keep-alive settings if configured
    if let Some(ka) = &config.keep_alive {
        endpoint = endpoint
            .http2_keep_alive_interval(ka.interval)
            .keep_alive_timeout(ka.timeout)
            .keep_alive_while_idle(ka.while_idle);
    }

    // Apply connection timeout if configured
    if let Some(timeout) = config.connect_timeout {
        endpoint = endpoint.connect_timeout(timeout);
    }

    let channel = endpoint
        .connect()
        .await
        .map_err(|e| GreetError::ConnectionFailed(e.to_string()))?;

    tracing::debug!(
        address = %config.address,
        keep_alive = config.keep_alive.is_some(),
        "gRPC channel connected"
    );

    Ok(channel)
}

/// Create a simple channel without keep-alive (useful for one-shot calls).
pub async fn create_simple_channel(address: &str) -> Result<Channel, GreetError> {
    let config = ChannelConfig::new(address).without_keep_alive();
    create_channel(&config).await
}
