// ABOUTME: Error types for the greet-grpc crate.
// ABOUTME: Provides structured errors for channel and call operations.

use thiserror::Error;

/// Errors that can occur on a gRPC call.
///
/// End-of-stream is deliberately not a variant: a direction running out of
/// messages is reported as `Ok(None)` by [`crate::call::CallReceiver::recv`],
/// never as a failure.
#[derive(Error, Debug)]
pub enum GreetError {
    /// Invalid server address format.
    #[error("invalid server address: {0}")]
    InvalidAddress(String),

    /// Failed to connect to the server.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The call terminated with a gRPC status from the peer.
    #[error("call failed: {0}")]
    Rpc(#[from] tonic::Status),

    /// Send attempted after the send side was closed.
    #[error("send side already closed")]
    SendClosed,

    /// The transport dropped the call before the send completed.
    #[error("call dropped before send completed")]
    CallDropped,
}

impl From<tonic::transport::Error> for GreetError {
    fn from(err: tonic::transport::Error) -> Self {
        GreetError::ConnectionFailed(err.to_string())
    }
}

impl From<GreetError> for tonic::Status {
    fn from(err: GreetError) -> Self {
        match err {
            GreetError::Rpc(status) => status,
            other => tonic::Status::internal(other.to_string()),
        }
    }
}

impl GreetError {
    /// The gRPC status carried by this error, if any.
    pub fn status(&self) -> Option<&tonic::Status> {
        match self {
            GreetError::Rpc(status) => Some(status),
            _ => None,
        }
    }
}
