// ABOUTME: Entry point for the Greeter demo client binary
// ABOUTME: Selects an interaction pattern and drives one call against a server

use anyhow::Result;
use clap::{Parser, ValueEnum};
use greet_client::GreetClient;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Pattern {
    /// One request, one reply
    Unary,
    /// One request, a stream of replies
    ServerStream,
    /// A stream of requests, one reply
    ClientStream,
    /// Paired send/receive exchanges on one call
    Bidi,
    /// Independent send and receive loops on one call
    BidiConcurrent,
}

#[derive(Parser, Debug)]
#[command(name = "greet-client", about = "Greeter gRPC demo client")]
struct Args {
    /// Server address to connect to
    #[arg(long, default_value = "http://127.0.0.1:50051")]
    server: String,

    /// Interaction pattern to drive
    #[arg(long, value_enum, default_value_t = Pattern::Unary)]
    pattern: Pattern,

    /// Name to greet
    #[arg(long, default_value = "duty")]
    name: String,

    /// Number of requests for the streaming patterns
    #[arg(long, default_value_t = 10)]
    count: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    greet_log::init();

    let args = Args::parse();
    let mut client = GreetClient::connect(&args.server).await?;

    match args.pattern {
        Pattern::Unary => {
            let reply = client.say_hello(&args.name).await?;
            println!("Greeting: {}", reply.message);
        }
        Pattern::ServerStream => {
            let replies = client.say_hello_again(&args.name).await?;
            for reply in &replies {
                println!("Greeting: {}", reply.message);
            }
            println!("({} replies, then end-of-stream)", replies.len());
        }
        Pattern::ClientStream => {
            let reply = client.say_hello_stream(&args.name, args.count).await?;
            println!("Greeting after {} requests: {}", args.count, reply.message);
        }
        Pattern::Bidi => {
            let replies = client.say_hello_stream_all(&args.name, args.count).await?;
            for reply in &replies {
                println!("Greeting: {}", reply.message);
            }
        }
        Pattern::BidiConcurrent => {
            let replies = client
                .say_hello_stream_all_concurrent(&args.name, args.count)
                .await?;
            println!("Received {} replies", replies.len());
        }
    }

    Ok(())
}
