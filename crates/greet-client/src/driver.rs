// ABOUTME: GreetClient and the per-pattern call drivers
// ABOUTME: Each driver opens one call, exchanges messages, and observes termination

use greet_grpc::{create_channel, BidiCall, CallReceiver, ChannelConfig, GreetError, OutboundCall};
use greet_proto::client::GreeterClient;
use greet_proto::{HelloReply, HelloRequest};
use tonic::transport::Channel;
use tracing::{debug, info, warn};

/// Client for the Greeter service.
///
/// Owns a connected channel; each driver method runs one complete call of
/// its pattern and returns the replies observed before termination.
#[derive(Debug)]
pub struct GreetClient {
    inner: GreeterClient<Channel>,
}

impl GreetClient {
    /// Connect to a Greeter server.
    pub async fn connect(address: &str) -> Result<Self, GreetError> {
        let channel = create_channel(&ChannelConfig::new(address)).await?;
        Ok(Self {
            inner: GreeterClient::new(channel),
        })
    }

    /// Unary: send one request, wait for the one reply.
    pub async fn say_hello(&mut self, name: &str) -> Result<HelloReply, GreetError> {
        let request = HelloRequest {
            name: name.to_string(),
        };
        let reply = self.inner.say_hello(request).await?.into_inner();
        info!(message = %reply.message, "unary reply");
        Ok(reply)
    }

    /// Server-streaming: send one request, then receive until end-of-stream.
    ///
    /// End-of-stream is the terminal success signal; every reply delivered
    /// before it is returned in order.
    pub async fn say_hello_again(&mut self, name: &str) -> Result<Vec<HelloReply>, GreetError> {
        let request = HelloRequest {
            name: name.to_string(),
        };
        let response = self.inner.say_hello_again(request).await?;
        let mut inbound = CallReceiver::new(response.into_inner());

        let mut replies = Vec::new();
        while let Some(reply) = inbound.recv().await? {
            debug!(message = %reply.message, received = replies.len() + 1, "stream reply");
            replies.push(reply);
        }
        info!(count = replies.len(), "server stream ended");
        Ok(replies)
    }

    /// Client-streaming: send `count` requests, half-close, then wait for
    /// the single reply. The reply can only arrive after the half-close.
    pub async fn say_hello_stream(
        &mut self,
        name: &str,
        count: usize,
    ) -> Result<HelloReply, GreetError> {
        // Buffer sized to the whole batch so the loop below never blocks on
        // the transport picking messages up
        let OutboundCall { mut sender, stream } = OutboundCall::new(count.max(1));

        for i in 0..count {
            debug!(sent = i + 1, "client-streaming request");
            sender
                .send(HelloRequest {
                    name: name.to_string(),
                })
                .await?;
        }
        sender.close_send();

        let reply = self.inner.say_hello_stream(stream).await?.into_inner();
        info!(count, message = %reply.message, "client stream reply");
        Ok(reply)
    }

    /// Bidirectional streaming, paired policy: `pairs` strict send-then-receive
    /// exchanges, then half-close. One example policy over the pattern, not a
    /// protocol requirement; see [`Self::say_hello_stream_all_concurrent`].
    pub async fn say_hello_stream_all(
        &mut self,
        name: &str,
        pairs: usize,
    ) -> Result<Vec<HelloReply>, GreetError> {
        let OutboundCall { sender, stream } = OutboundCall::with_default_buffer();
        let response = self.inner.say_hello_stream_all(stream).await?;
        let mut call = BidiCall::new(sender, CallReceiver::new(response.into_inner()));

        let mut replies = Vec::with_capacity(pairs);
        for _ in 0..pairs {
            call.sender
                .send(HelloRequest {
                    name: name.to_string(),
                })
                .await?;
            match call.receiver.recv().await? {
                Some(reply) => {
                    debug!(message = %reply.message, received = replies.len() + 1, "bidi reply");
                    replies.push(reply);
                }
                None => {
                    // Server ended its direction early; ours closes below
                    warn!(received = replies.len(), "bidi server ended early");
                    break;
                }
            }
        }
        call.sender.close_send();
        info!(count = replies.len(), "bidi exchange done");
        Ok(replies)
    }

    /// Bidirectional streaming with genuinely independent directions: the
    /// send loop runs as its own task while this task drains replies until
    /// end-of-stream. Demonstrates that half-closing one direction does not
    /// disturb the other.
    pub async fn say_hello_stream_all_concurrent(
        &mut self,
        name: &str,
        count: usize,
    ) -> Result<Vec<HelloReply>, GreetError> {
        let OutboundCall { sender, stream } = OutboundCall::with_default_buffer();
        let response = self.inner.say_hello_stream_all(stream).await?;
        let call = BidiCall::new(sender, CallReceiver::new(response.into_inner()));
        let (mut sender, mut inbound) = call.split();

        let name = name.to_string();
        let send_task = tokio::spawn(async move {
            for i in 0..count {
                debug!(sent = i + 1, "bidi concurrent request");
                sender.send(HelloRequest { name: name.clone() }).await?;
            }
            sender.close_send();
            Ok::<_, GreetError>(())
        });

        let mut replies = Vec::new();
        while let Some(reply) = inbound.recv().await? {
            replies.push(reply);
        }

        match send_task.await {
            Ok(result) => result?,
            Err(_) => return Err(GreetError::CallDropped),
        }
        info!(count = replies.len(), "bidi concurrent exchange done");
        Ok(replies)
    }
}
