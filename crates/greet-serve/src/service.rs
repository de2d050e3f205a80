// ABOUTME: Greeter gRPC service implementation covering all four interaction patterns
// ABOUTME: Unary, server-streaming, client-streaming, and bidirectional handlers

use std::pin::Pin;

use greet_grpc::{CallReceiver, OutboundCall};
use greet_proto::server::Greeter;
use greet_proto::{HelloReply, HelloRequest};
use tonic::{Request, Response, Status, Streaming};
use tracing::{debug, info, warn};

use crate::DEFAULT_STREAM_REPLIES;

/// Name greeted when a call carries no usable request, matching the
/// demo's fixed fallback.
pub const DEFAULT_NAME: &str = "duty";

/// Build the greeting for one reply.
fn greeting(name: &str) -> String {
    format!("Hello {name}")
}

/// Greeter service implementation
pub struct GreeterService {
    /// Number of replies emitted per server-streaming call
    stream_reply_count: usize,
}

impl Default for GreeterService {
    fn default() -> Self {
        Self::new(DEFAULT_STREAM_REPLIES)
    }
}

impl GreeterService {
    pub fn new(stream_reply_count: usize) -> Self {
        Self { stream_reply_count }
    }
}

#[tonic::async_trait]
impl Greeter for GreeterService {
    /// Unary: exactly one request in, exactly one reply out.
    async fn say_hello(
        &self,
        request: Request<HelloRequest>,
    ) -> Result<Response<HelloReply>, Status> {
        let name = request.into_inner().name;
        info!(name = %name, "unary greeting");
        Ok(Response::new(HelloReply {
            message: greeting(&name),
        }))
    }

    type SayHelloAgainStream =
        Pin<Box<dyn futures::Stream<Item = Result<HelloReply, Status>> + Send>>;

    /// Server-streaming: one request in, a fixed count of replies out, then
    /// end-of-stream. No sends happen after the emitter finishes.
    async fn say_hello_again(
        &self,
        request: Request<HelloRequest>,
    ) -> Result<Response<Self::SayHelloAgainStream>, Status> {
        let name = request.into_inner().name;
        let count = self.stream_reply_count;
        info!(name = %name, count, "server-streaming greeting");

        let OutboundCall { sender, stream } = OutboundCall::new(count.max(1));

        // Emit the replies from a separate task so the stream is returned
        // immediately; dropping the sender at the end signals end-of-stream.
        tokio::spawn(async move {
            for i in 0..count {
                let reply = HelloReply {
                    message: greeting(&name),
                };
                if sender.send(Ok(reply)).await.is_err() {
                    // Client went away mid-stream; remaining sends are aborted
                    debug!(sent = i, "server-streaming peer dropped");
                    return;
                }
            }
            debug!(count, "server-streaming done");
        });

        Ok(Response::new(Box::pin(stream)))
    }

    /// Client-streaming: collect requests until the client half-closes, then
    /// send exactly one reply. The reply is never sent before end-of-stream
    /// is observed; a client that never half-closes keeps this handler
    /// collecting indefinitely.
    async fn say_hello_stream(
        &self,
        request: Request<Streaming<HelloRequest>>,
    ) -> Result<Response<HelloReply>, Status> {
        let mut inbound = CallReceiver::new(request.into_inner());

        let mut received = 0usize;
        let mut last_name: Option<String> = None;
        loop {
            match inbound.recv().await {
                Ok(Some(req)) => {
                    received += 1;
                    debug!(name = %req.name, received, "client-streaming request");
                    last_name = Some(req.name);
                }
                // The client's half-close: now, and only now, respond
                Ok(None) => break,
                Err(err) => {
                    warn!(error = %err, "client-streaming receive failed");
                    return Err(err.into());
                }
            }
        }

        let name = last_name.unwrap_or_else(|| DEFAULT_NAME.to_string());
        info!(received, name = %name, "client-streaming greeting");
        Ok(Response::new(HelloReply {
            message: greeting(&name),
        }))
    }

    type SayHelloStreamAllStream =
        Pin<Box<dyn futures::Stream<Item = Result<HelloReply, Status>> + Send>>;

    /// Bidirectional streaming: send one reply, then wait for the next
    /// request; end-of-stream from the client terminates the exchange
    /// normally, any other receive error aborts it.
    async fn say_hello_stream_all(
        &self,
        request: Request<Streaming<HelloRequest>>,
    ) -> Result<Response<Self::SayHelloStreamAllStream>, Status> {
        let mut inbound = CallReceiver::new(request.into_inner());
        let OutboundCall { sender, stream } = OutboundCall::with_default_buffer();

        tokio::spawn(async move {
            let mut exchanged = 0usize;
            loop {
                let reply = HelloReply {
                    message: greeting(DEFAULT_NAME),
                };
                if sender.send(Ok(reply)).await.is_err() {
                    debug!(exchanged, "bidi peer dropped");
                    break;
                }
                match inbound.recv().await {
                    Ok(Some(req)) => {
                        exchanged += 1;
                        debug!(name = %req.name, exchanged, "bidi request");
                    }
                    Ok(None) => {
                        // Client half-closed: normal termination, not an error
                        info!(exchanged, "bidi client half-closed, exchange done");
                        break;
                    }
                    Err(err) => {
                        warn!(error = %err, exchanged, "bidi receive failed");
                        let _ = sender.send(Err(err.into())).await;
                        break;
                    }
                }
            }
        });

        Ok(Response::new(Box::pin(stream)))
    }
}
