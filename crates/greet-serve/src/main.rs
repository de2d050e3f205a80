// ABOUTME: Entry point for the Greeter demo server binary
// ABOUTME: Parses CLI flags into ServeConfig and runs the server

use anyhow::Result;
use clap::Parser;
use greet_serve::{ServeConfig, DEFAULT_STREAM_REPLIES};

#[derive(Parser, Debug)]
#[command(name = "greet-serve", about = "Greeter gRPC demo server")]
struct Args {
    /// gRPC listen address
    #[arg(long, default_value = "127.0.0.1:50051")]
    addr: String,

    /// Number of replies emitted per server-streaming call
    #[arg(long, default_value_t = DEFAULT_STREAM_REPLIES)]
    stream_replies: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    greet_log::init();

    let args = Args::parse();
    let config = ServeConfig {
        grpc_addr: args.addr,
        stream_reply_count: args.stream_replies,
    };

    greet_serve::run(config).await
}
