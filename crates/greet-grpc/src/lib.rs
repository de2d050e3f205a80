// ABOUTME: Shared gRPC call utilities for greet-serve and greet-client.
// ABOUTME: Provides channel creation, call sender/receiver wrappers, and error types.

pub mod call;
pub mod channel;
pub mod error;

// Channel creation
pub use channel::{create_channel, create_simple_channel, ChannelConfig, KeepAliveConfig};

// Error types
pub use error::GreetError;

// Call management
pub use call::{BidiCall, CallReceiver, CallSender, OutboundCall, DEFAULT_CALL_BUFFER};

// Re-export proto types for convenience
pub use greet_proto;
