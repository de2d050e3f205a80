// ABOUTME: gRPC server setup and lifecycle for the Greeter demo
// ABOUTME: Builds the service router explicitly and runs it with graceful shutdown

use crate::service::GreeterService;
use crate::ServeConfig;
use anyhow::{Context, Result};
use greet_proto::server::GreeterServer;
use tokio::net::TcpListener;
use tokio::signal;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;
use tracing::info;

/// Run the Greeter server
pub async fn run(config: ServeConfig) -> Result<()> {
    info!("Starting Greeter server");
    info!("  gRPC address: {}", config.grpc_addr);
    info!("  Stream replies per call: {}", config.stream_reply_count);

    let service = GreeterService::new(config.stream_reply_count);

    // Parse address
    let addr = config.grpc_addr.parse().context("parsing gRPC address")?;

    info!("Greeter listening on {}", addr);
    println!("Greeter server running on {}", config.grpc_addr);
    println!("Press Ctrl+C to stop");

    // The router is the handler registry: services are bound here by the
    // caller, no process-wide registration state
    Server::builder()
        .add_service(GreeterServer::new(service))
        .serve_with_shutdown(addr, shutdown_signal())
        .await
        .context("running gRPC server")?;

    info!("Server shut down gracefully");
    println!("\nServer stopped.");

    Ok(())
}

/// Serve on an already-bound listener. Used by tests and callers that need
/// an ephemeral port; runs until the listener task is dropped.
pub async fn serve_incoming(config: ServeConfig, listener: TcpListener) -> Result<()> {
    let service = GreeterService::new(config.stream_reply_count);

    Server::builder()
        .add_service(GreeterServer::new(service))
        .serve_with_incoming(TcpListenerStream::new(listener))
        .await
        .context("running gRPC server")?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            info!("Received SIGTERM, shutting down...");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_rejects_bad_address() {
        let config = ServeConfig {
            grpc_addr: "not an address".to_string(),
            ..ServeConfig::default()
        };
        let result = run(config).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("parsing"));
    }
}
