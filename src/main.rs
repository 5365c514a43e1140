//! Server entry point: initialize logging, resolve configuration from the
//! environment, and start the selected transport.

use mod19_server::core::config::{ServerConfig, TransportMode};
use mod19_server::core::server;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("mod19_server=info,actix_web=info"));

    // Everything goes to stderr: stdout belongs to the JSON-RPC stream in
    // STDIO mode.
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    init_tracing();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(%err, "invalid configuration");
            std::process::exit(1);
        }
    };

    match config.transport {
        TransportMode::Stdio => server::run_stdio(config).await,
        TransportMode::Http => server::run_http(config).await,
        TransportMode::Both => {
            // STDIO runs in the background while HTTP owns the foreground;
            // when the HTTP server exits, the STDIO task goes with it.
            let stdio_config = config.clone();
            let stdio = tokio::spawn(async move {
                if let Err(err) = server::run_stdio(stdio_config).await {
                    tracing::error!(%err, "STDIO server error");
                }
            });

            let result = server::run_http(config).await;
            stdio.abort();
            result
        }
    }
}
