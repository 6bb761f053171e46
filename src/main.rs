//! Webhook Receiver
//!
//! A small production-hardened webhook endpoint built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │               WEBHOOK RECEIVER               │
//!                    │                                              │
//!  POST / ───────────┼─▶ ┌────────┐   ┌──────────┐   "hello world"  │
//!                    │   │  http  │──▶│ handlers │──▶                │
//!  POST /event_ ─────┼─▶ │ server │   │  + form  │   "Well, it      │
//!       handler      │   └────────┘   │  decode  │    worked!"      │
//!                    │                └──────────┘                  │
//!                    │                                              │
//!                    │  ┌────────────────────────────────────────┐  │
//!                    │  │          Cross-Cutting Concerns        │  │
//!                    │  │  ┌────────┐ ┌───────────┐ ┌─────────┐  │  │
//!                    │  │  │ config │ │ observa-  │ │lifecycle│  │  │
//!                    │  │  │        │ │ bility    │ │         │  │  │
//!                    │  │  └────────┘ └───────────┘ └─────────┘  │  │
//!                    │  └────────────────────────────────────────┘  │
//!                    └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use webhook_receiver::config::{load_config, ReceiverConfig};
use webhook_receiver::http::HttpServer;
use webhook_receiver::lifecycle::{signals, Shutdown};
use webhook_receiver::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "webhook-receiver")]
#[command(about = "HTTP webhook receiver", long_about = None)]
struct Cli {
    /// Path to a TOML config file; defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Fail fast: any config problem is fatal before we touch the network.
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ReceiverConfig::default(),
    };

    logging::init(&config.observability);

    tracing::info!("webhook-receiver v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        config_file = ?cli.config,
        "Configuration loaded"
    );

    // Bind TCP listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    // Metrics exporter is opt-in; addresses were validated at load time.
    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    // Graceful shutdown on SIGINT/SIGTERM
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(signals::listen(shutdown));

    // Create and run HTTP server
    let server = HttpServer::new(config);
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
