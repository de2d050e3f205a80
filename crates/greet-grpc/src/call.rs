// ABOUTME: Per-call stream management shared by both ends of a gRPC call.
// ABOUTME: Provides typed sender/receiver wrappers with explicit half-close semantics.

use std::pin::Pin;

use futures::Stream;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tonic::Streaming;

use crate::error::GreetError;

/// Default buffer size for outbound message channels.
pub const DEFAULT_CALL_BUFFER: usize = 100;

/// Send side of a call.
///
/// Wraps an mpsc sender for outgoing messages. The send side starts open,
/// becomes half-closed after [`CallSender::close_send`], and is closed when
/// the transport drops the receiving end.
#[derive(Debug)]
pub struct CallSender<T> {
    inner: Option<mpsc::Sender<T>>,
}

impl<T> CallSender<T> {
    /// Create a call sender from an mpsc sender.
    pub fn new(sender: mpsc::Sender<T>) -> Self {
        Self {
            inner: Some(sender),
        }
    }

    /// Send one message in this direction of the call.
    ///
    /// Blocks when the channel buffer is full. Fails synchronously with
    /// [`GreetError::SendClosed`] after `close_send`, without contacting
    /// the peer.
    pub async fn send(&self, msg: T) -> Result<(), GreetError> {
        let sender = self.inner.as_ref().ok_or(GreetError::SendClosed)?;
        sender.send(msg).await.map_err(|_| GreetError::CallDropped)
    }

    /// Try to send a message without waiting.
    pub fn try_send(&self, msg: T) -> Result<(), GreetError> {
        let sender = self.inner.as_ref().ok_or(GreetError::SendClosed)?;
        sender.try_send(msg).map_err(|_| GreetError::CallDropped)
    }

    /// Half-close: signal that no further messages will be sent.
    ///
    /// Idempotent. The peer observes exactly one end-of-stream on its next
    /// receive attempt regardless of how many times this is called.
    pub fn close_send(&mut self) {
        self.inner = None;
    }

    /// Whether the send side is unusable, either half-closed locally or
    /// dropped by the transport.
    pub fn is_closed(&self) -> bool {
        match &self.inner {
            Some(sender) => sender.is_closed(),
            None => true,
        }
    }

    /// Remaining capacity of the underlying channel, zero after half-close.
    pub fn capacity(&self) -> usize {
        self.inner.as_ref().map_or(0, |s| s.capacity())
    }
}

/// Receive side of a call.
///
/// Wraps a tonic [`Streaming`] and distinguishes the three receive outcomes:
/// a message, end-of-stream, or a terminal error.
pub struct CallReceiver<T> {
    inner: Streaming<T>,
}

impl<T> CallReceiver<T> {
    /// Create a call receiver from a tonic Streaming.
    pub fn new(streaming: Streaming<T>) -> Self {
        Self { inner: streaming }
    }

    /// Receive the next message from the peer.
    ///
    /// Returns `Ok(Some(msg))` for a message, `Ok(None)` when the peer has
    /// half-closed (end-of-stream, terminal success), or `Err` when the call
    /// failed. End-of-stream and failure are never conflated.
    pub async fn recv(&mut self) -> Result<Option<T>, GreetError> {
        self.inner.message().await.map_err(GreetError::Rpc)
    }

    /// Get the raw tonic Streaming (for advanced use cases).
    pub fn into_inner(self) -> Streaming<T> {
        self.inner
    }
}

impl<T> Stream for CallReceiver<T> {
    type Item = Result<T, GreetError>;

    fn poll_next(
        mut self: Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner)
            .poll_next(cx)
            .map(|opt| opt.map(|res| res.map_err(GreetError::Rpc)))
    }
}

/// A sender and outbound stream pair for initiating a streaming call.
///
/// The stream is passed to the gRPC client method; the sender feeds it.
/// Dropping or half-closing the sender ends the stream.
pub struct OutboundCall<T> {
    /// Sender for pushing messages onto the call.
    pub sender: CallSender<T>,
    /// The stream to pass to the gRPC method.
    pub stream: ReceiverStream<T>,
}

impl<T> OutboundCall<T> {
    /// Create an outbound call pair with the specified buffer size.
    pub fn new(buffer_size: usize) -> Self {
        let (tx, rx) = mpsc::channel(buffer_size);
        Self {
            sender: CallSender::new(tx),
            stream: ReceiverStream::new(rx),
        }
    }

    /// Create an outbound call pair with the default buffer size.
    pub fn with_default_buffer() -> Self {
        Self::new(DEFAULT_CALL_BUFFER)
    }
}

/// Both halves of an established bidirectional call.
///
/// The two directions are independent: half-closing the sender does not
/// disturb the receiver, and the call is done only when the send side is
/// closed and the receiver has reported end-of-stream.
pub struct BidiCall<TSend, TRecv> {
    /// Sender for outgoing messages.
    pub sender: CallSender<TSend>,
    /// Receiver for incoming messages.
    pub receiver: CallReceiver<TRecv>,
}

impl<TSend, TRecv> BidiCall<TSend, TRecv> {
    /// Create a bidirectional call from sender and receiver.
    pub fn new(sender: CallSender<TSend>, receiver: CallReceiver<TRecv>) -> Self {
        Self { sender, receiver }
    }

    /// Split into sender and receiver.
    pub fn split(self) -> (CallSender<TSend>, CallReceiver<TRecv>) {
        (self.sender, self.receiver)
    }
}
