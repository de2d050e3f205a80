// ABOUTME: Re-exports generated protobuf types for the Greeter service.
// ABOUTME: Single source of truth for the Greeter gRPC service and message types.

#![allow(clippy::derive_partial_eq_without_eq)]

/// Generated protobuf types for the Greeter service.
pub mod helloworld {
    tonic::include_proto!("helloworld");
}

// Re-export commonly used types at crate root for convenience
pub use helloworld::*;

// Re-export client types under a client module
pub mod client {
    pub use super::helloworld::greeter_client::GreeterClient;
}

// Re-export server types under a server module
pub mod server {
    pub use super::helloworld::greeter_server::{Greeter, GreeterServer};
}
