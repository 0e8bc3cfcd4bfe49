//! BNet forwarding gateway.
//!
//! A thin HTTP gateway in front of an external simulation controller
//! ("BNet"), built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌───────────────────────────────────────────┐
//!                      │              BNET GATEWAY                  │
//!                      │                                            │
//!   Client Request     │  ┌─────────┐     ┌──────────────────┐     │
//!   ──────────────────▶│  │  http   │────▶│ resource path    │     │
//!                      │  │ server  │     │ table lookup     │     │
//!                      │  └─────────┘     └────────┬─────────┘     │
//!                      │                           │                │
//!                      │                           ▼                │
//!   Client Response    │  ┌─────────┐     ┌──────────────────┐     │      BNet
//!   ◀──────────────────│  │ relayed │◀────│   bnet client    │◀────┼───── Backend
//!                      │  │response │     │  (GET / POST)    │     │      Server
//!                      │  └─────────┘     └──────────────────┘     │
//!                      │                                            │
//!                      │  ┌──────────────────────────────────────┐ │
//!                      │  │        Cross-Cutting Concerns         │ │
//!                      │  │  ┌────────┐ ┌──────────┐ ┌─────────┐ │ │
//!                      │  │  │ config │ │ request  │ │ tracing │ │ │
//!                      │  │  │        │ │ IDs      │ │         │ │ │
//!                      │  │  └────────┘ └──────────┘ └─────────┘ │ │
//!                      │  └──────────────────────────────────────┘ │
//!                      └───────────────────────────────────────────┘
//! ```
//!
//! Every route under `/bnet` resolves a logical resource name to a
//! backend path, forwards the call with a short fail-fast timeout, and
//! relays the backend's response to the caller.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bnet_gateway::config::{loader, GatewayConfig};
use bnet_gateway::http::HttpServer;

#[derive(Parser)]
#[command(name = "bnet-gateway")]
#[command(about = "HTTP forwarding gateway for a BNet simulation server", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match cli.config {
        Some(path) => loader::load_config(&path)?,
        None => GatewayConfig::default(),
    };

    // Initialize tracing subscriber; RUST_LOG overrides the configured level.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(format!(
                    "bnet_gateway={},tower_http={}",
                    config.observability.log_level, config.observability.log_level
                ))
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("bnet-gateway v0.1.0 starting");

    tracing::info!(
        bind_address = %config.listener.bind_address,
        backend_host = %config.backend.host,
        backend_port = config.backend.port,
        backend_request_ms = config.timeouts.backend_request_ms,
        "Configuration loaded"
    );

    // Bind TCP listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    // Create and run HTTP server
    let server = HttpServer::new(config);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
