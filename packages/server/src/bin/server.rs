//! Synchronized video playback server.
//!
//! Keeps every connected viewer on the same file, play/pause state and
//! position, and serves the video files themselves under `/videos`.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin sajiki-server
//! cargo run --bin sajiki-server -- --host 127.0.0.1 --port 8080 --videos-dir ./videos
//! ```

use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use sajiki_server::{
    app::build_server,
    config::{DEFAULT_HOST, DEFAULT_PORT, DEFAULT_SEND_BUFFER, DEFAULT_VIDEOS_DIR, ServerConfig},
};
use sajiki_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "sajiki-server")]
#[command(about = "Synchronized video playback server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = DEFAULT_HOST)]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Directory containing the video files
    #[arg(short = 'd', long, default_value = DEFAULT_VIDEOS_DIR)]
    videos_dir: PathBuf,

    /// Outbound message queue capacity per viewer
    #[arg(long, default_value_t = DEFAULT_SEND_BUFFER)]
    send_buffer: usize,

    /// Look up and log the public IPv4/IPv6 address after startup
    #[arg(long)]
    announce_public_ip: bool,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            videos_dir: args.videos_dir,
            send_buffer: args.send_buffer,
            announce_public_ip: args.announce_public_ip,
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    let server = build_server(args.into(), Arc::new(SystemClock)).await;
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
