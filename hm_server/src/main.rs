//! Hangman server using the async actor model.
//!
//! Every WebSocket connection gets its own SessionActor, spawned and tracked
//! by a SessionManager.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Error};
use hangman::SessionManager;
use hm_server::{
    api,
    config::{CliOverrides, ServerConfig},
    logging, metrics,
};
use log::info;
use pico_args::Arguments;

const HELP: &str = "\
Run a hangman game server

USAGE:
  hm_server [OPTIONS]

OPTIONS:
  --bind       IP:PORT     Server socket bind address  [default: env SERVER_BIND or 127.0.0.1:4000]
  --secret     NAMES       Comma separated secret names  [default: env SECRET_NAMES or \"kanna kamui\"]

FLAGS:
  --rotate                 Pick a random secret name on every restart
  -h, --help               Print help information

ENVIRONMENT:
  SERVER_BIND              Server bind address (e.g., 0.0.0.0:4000)
  SECRET_NAMES             Comma separated secret names
  ROTATE_SECRETS           Pick a random secret name on restart (true/false, 1/0)
  MAX_CHANCES              Wrong guesses allowed per game [default: 6]
  MAX_SESSIONS             Concurrent sessions allowed [default: 1000]
  SESSION_INBOX_CAPACITY   Session actor inbox size [default: 32]
  SESSION_OUTBOX_CAPACITY  Per-connection event queue size [default: 32]
  METRICS_BIND             Prometheus exporter address, disabled when unset
  RUST_LOG                 Log filter [default: info,hyper=warn,tower_http=warn]
";

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let overrides = CliOverrides {
        bind: pargs.opt_value_from_str::<_, SocketAddr>("--bind")?,
        secrets: pargs.opt_value_from_str("--secret")?,
        rotate: pargs.contains("--rotate"),
    };

    let config = ServerConfig::from_env(overrides).context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    logging::init();
    info!("Starting hangman server at {}", config.bind);

    if let Some(metrics_bind) = config.metrics_bind {
        metrics::init_metrics(metrics_bind).map_err(|e| anyhow::anyhow!(e))?;
        info!("Prometheus metrics exported on http://{}/metrics", metrics_bind);
    }

    info!(
        "Sessions: {} secret name(s), rotation {}, {} chances, up to {} sessions",
        config.session.secret_names.len(),
        if config.session.rotate_secrets { "on" } else { "off" },
        config.session.max_chances,
        config.max_sessions
    );

    let session_manager = Arc::new(SessionManager::new(
        config.session.clone(),
        config.max_sessions,
    )?);

    let app = api::create_router(api::AppState {
        session_manager: session_manager.clone(),
    });

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind))?;

    info!(
        "Server is running at ws://{}/ws. Press Ctrl+C to stop.",
        config.bind
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shutting down server...");
    session_manager.close_all().await;

    Ok(())
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for Ctrl+C: {}", e);
        // Without a signal handler, keep serving until the process is killed
        std::future::pending::<()>().await;
    }
}
