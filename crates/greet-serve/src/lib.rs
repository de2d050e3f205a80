// ABOUTME: Greeter demo server - unary, server-, client-, and bidirectional streaming
// ABOUTME: Exposes GreeterService handlers and the listener setup around them

pub mod server;
pub mod service;

use anyhow::Result;

/// Default number of replies emitted per server-streaming call.
pub const DEFAULT_STREAM_REPLIES: usize = 10;

/// Configuration for the Greeter server
#[derive(Debug, Clone)]
pub struct ServeConfig {
    /// gRPC listen address (default: 127.0.0.1:50051)
    pub grpc_addr: String,
    /// Number of replies emitted per server-streaming call
    pub stream_reply_count: usize,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            grpc_addr: "127.0.0.1:50051".to_string(),
            stream_reply_count: DEFAULT_STREAM_REPLIES,
        }
    }
}

/// Run the Greeter server
pub async fn run(config: ServeConfig) -> Result<()> {
    server::run(config).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_config_defaults() {
        let config = ServeConfig::default();
        assert_eq!(config.grpc_addr, "127.0.0.1:50051");
        assert_eq!(config.stream_reply_count, DEFAULT_STREAM_REPLIES);
    }
}
