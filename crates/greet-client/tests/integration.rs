// ABOUTME: End-to-end tests driving a real Greeter server over loopback
// ABOUTME: Covers all four interaction patterns plus termination and error behavior

use greet_client::GreetClient;
use greet_grpc::CallReceiver;
use greet_proto::client::GreeterClient;
use greet_proto::HelloRequest;
use greet_serve::server::serve_incoming;
use greet_serve::ServeConfig;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Start a Greeter server on an ephemeral loopback port.
async fn spawn_server(config: ServeConfig) -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        serve_incoming(config, listener).await.unwrap();
    });
    (format!("http://{}", addr), handle)
}

async fn spawn_default_server() -> (String, JoinHandle<()>) {
    spawn_server(ServeConfig::default()).await
}

#[tokio::test]
async fn unary_greets_by_name() {
    let (addr, server) = spawn_default_server().await;
    let mut client = GreetClient::connect(&addr).await.unwrap();

    let reply = client.say_hello("duty").await.unwrap();
    assert_eq!(reply.message, "Hello duty");

    server.abort();
}

#[tokio::test]
async fn server_stream_emits_fixed_count_then_ends() {
    let (addr, server) = spawn_default_server().await;
    let mut client = GreetClient::connect(&addr).await.unwrap();

    let replies = client.say_hello_again("duty").await.unwrap();
    assert_eq!(replies.len(), 10);
    assert!(replies.iter().all(|r| r.message == "Hello duty"));

    server.abort();
}

#[tokio::test]
async fn server_stream_end_of_stream_follows_last_reply() {
    let config = ServeConfig {
        stream_reply_count: 3,
        ..ServeConfig::default()
    };
    let (addr, server) = spawn_server(config).await;

    // Drive the raw call so the terminal signal itself is observable
    let channel = greet_grpc::create_simple_channel(&addr).await.unwrap();
    let mut client = GreeterClient::new(channel);
    let response = client
        .say_hello_again(HelloRequest {
            name: "duty".to_string(),
        })
        .await
        .unwrap();
    let mut inbound = CallReceiver::new(response.into_inner());

    for _ in 0..3 {
        let reply = inbound.recv().await.unwrap();
        assert_eq!(reply.unwrap().message, "Hello duty");
    }
    // End-of-stream arrives exactly once, strictly after the last reply,
    // and is not an error
    assert!(inbound.recv().await.unwrap().is_none());

    server.abort();
}

#[tokio::test]
async fn server_stream_respects_configured_count() {
    let config = ServeConfig {
        stream_reply_count: 25,
        ..ServeConfig::default()
    };
    let (addr, server) = spawn_server(config).await;
    let mut client = GreetClient::connect(&addr).await.unwrap();

    let replies = client.say_hello_again("duty").await.unwrap();
    assert_eq!(replies.len(), 25);

    server.abort();
}

#[tokio::test]
async fn client_stream_replies_once_after_half_close() {
    let (addr, server) = spawn_default_server().await;
    let mut client = GreetClient::connect(&addr).await.unwrap();

    let reply = client.say_hello_stream("duty", 10).await.unwrap();
    assert_eq!(reply.message, "Hello duty");

    server.abort();
}

#[tokio::test]
async fn client_stream_with_zero_requests_still_replies() {
    let (addr, server) = spawn_default_server().await;
    let mut client = GreetClient::connect(&addr).await.unwrap();

    // Half-close with nothing sent: the server falls back to the demo name
    let reply = client.say_hello_stream("ignored", 0).await.unwrap();
    assert_eq!(reply.message, "Hello duty");

    server.abort();
}

#[tokio::test]
async fn client_stream_greets_last_received_name() {
    let (addr, server) = spawn_default_server().await;

    let channel = greet_grpc::create_simple_channel(&addr).await.unwrap();
    let mut client = GreeterClient::new(channel);

    let requests = tokio_stream::iter(vec![
        HelloRequest {
            name: "first".to_string(),
        },
        HelloRequest {
            name: "last".to_string(),
        },
    ]);
    let reply = client.say_hello_stream(requests).await.unwrap().into_inner();
    assert_eq!(reply.message, "Hello last");

    server.abort();
}

#[tokio::test]
async fn bidi_paired_exchange_completes_without_error() {
    let (addr, server) = spawn_default_server().await;
    let mut client = GreetClient::connect(&addr).await.unwrap();

    let replies = client.say_hello_stream_all("duty", 10).await.unwrap();
    assert_eq!(replies.len(), 10);
    assert!(replies.iter().all(|r| r.message == "Hello duty"));

    server.abort();
}

#[tokio::test]
async fn bidi_concurrent_drains_to_end_of_stream() {
    let (addr, server) = spawn_default_server().await;
    let mut client = GreetClient::connect(&addr).await.unwrap();

    // The server leads each exchange with a reply, so closing after `count`
    // requests yields one extra in-flight reply before end-of-stream
    let replies = client
        .say_hello_stream_all_concurrent("duty", 10)
        .await
        .unwrap();
    assert_eq!(replies.len(), 11);

    server.abort();
}

#[tokio::test]
async fn bidi_immediate_half_close_ends_cleanly() {
    let (addr, server) = spawn_default_server().await;
    let mut client = GreetClient::connect(&addr).await.unwrap();

    // No requests at all: the server's first receive sees end-of-stream and
    // terminates normally after its leading reply
    let replies = client
        .say_hello_stream_all_concurrent("duty", 0)
        .await
        .unwrap();
    assert_eq!(replies.len(), 1);

    server.abort();
}

#[tokio::test]
async fn connect_failure_is_a_structured_error() {
    let result = GreetClient::connect("http://127.0.0.1:1").await;
    assert!(matches!(
        result.unwrap_err(),
        greet_grpc::GreetError::ConnectionFailed(_)
    ));
}

#[tokio::test]
async fn calls_are_isolated_per_connection() {
    let (addr, server) = spawn_default_server().await;

    // Two clients on independent channels; a completed stream on one does
    // not disturb the other's call
    let mut a = GreetClient::connect(&addr).await.unwrap();
    let mut b = GreetClient::connect(&addr).await.unwrap();

    let (ra, rb) = tokio::join!(a.say_hello_again("duty"), b.say_hello_stream("duty", 5));
    assert_eq!(ra.unwrap().len(), 10);
    assert_eq!(rb.unwrap().message, "Hello duty");

    server.abort();
}
