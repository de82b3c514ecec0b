//! Hiroma CLI chat client with reconnection support.
//!
//! Connects to a Hiroma server, identifies with `--name`, joins `--room`, and
//! sends every line typed on stdin to the current room. Lines starting with
//! `/` are commands (type `/help`). Reconnects on disconnection (by default
//! up to 5 attempts, 5 seconds apart). A rejected name exits immediately.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroma-client -- --name alice --room general
//! cargo run --bin hiroma-client -- -u ws://127.0.0.1:3000/ws -n bob
//! ```

use std::time::Duration;

use clap::Parser;
use hiroma_client::{ClientOptions, domain::ReconnectPolicy, run_client};
use hiroma_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "hiroma-client")]
#[command(about = "CLI client for the Hiroma multi-room chat server", long_about = None)]
struct Args {
    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:5000/ws")]
    url: String,

    /// Display name to identify with on connect
    #[arg(short = 'n', long)]
    name: Option<String>,

    /// Room to join on connect (requires --name)
    #[arg(short = 'r', long, requires = "name")]
    room: Option<String>,

    /// Give up after this many lost connections
    #[arg(long, default_value_t = 5)]
    max_attempts: u32,

    /// Seconds to wait between reconnect attempts
    #[arg(long, default_value_t = 5)]
    retry_interval: u64,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    // Run the client
    let options = ClientOptions {
        url: args.url,
        name: args.name,
        room: args.room,
        reconnect: ReconnectPolicy {
            max_attempts: args.max_attempts,
            interval: Duration::from_secs(args.retry_interval),
        },
    };
    if let Err(e) = run_client(options).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
