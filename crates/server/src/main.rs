//! Video chat token service.
//!
//! Serves the join page and `POST /login`, which hands out Twilio access
//! tokens for the video room and enrolls the user in the chat conversation.
//! Nothing is stored locally; every login round-trips to Twilio.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::borrow::Cow;
use std::net::SocketAddr;

use axum::Router;
use sentry::integrations::tracing as sentry_tracing;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use video_chat_server::config::{ConfigError, ServerConfig};
use video_chat_server::state::AppState;
use video_chat_server::twilio::TwilioError;

const DEFAULT_LOG_FILTER: &str = "video_chat_server=info,tower_http=debug";

/// Reasons the server can fail to come up.
#[derive(Debug, Error)]
enum StartupError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("twilio client: {0}")]
    Twilio(#[from] TwilioError),

    #[error("listener on {addr}: {source}")]
    Io {
        addr: SocketAddr,
        source: std::io::Error,
    },
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let config = ServerConfig::from_env()?;

    // Sentry goes first so the tracing layer below has a client to report to.
    let _sentry = init_sentry(&config);
    init_tracing();

    let state = AppState::new(config.clone())?;
    info!(
        chat_room = %config.chat_room,
        chat_enabled = state.conversations().is_some(),
        token_ttl_secs = config.token_ttl.as_secs(),
        "Starting video chat server"
    );

    let app = video_chat_server::app(state)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction());

    serve(app, config.socket_addr()).await
}

fn init_sentry(config: &ServerConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_deref()?;

    let options = sentry::ClientOptions {
        release: sentry::release_name!(),
        environment: config.sentry_environment.clone().map(Cow::Owned),
        attach_stacktrace: true,
        ..Default::default()
    };
    Some(sentry::init((dsn, options)))
}

/// Text logs locally, flattened JSON on Fly.io, Sentry for warnings and up.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let json = std::env::var_os("FLY_APP_NAME").is_some();

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json().flatten_event(true)))
        .with((!json).then(tracing_subscriber::fmt::layer))
        .with(sentry_tracing::layer().event_filter(|metadata| match *metadata.level() {
            tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
            tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
            _ => sentry_tracing::EventFilter::Ignore,
        }))
        .init();
}

async fn serve(app: Router, addr: SocketAddr) -> Result<(), StartupError> {
    let io_error = |source| StartupError::Io { addr, source };

    let listener = tokio::net::TcpListener::bind(addr).await.map_err(io_error)?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(io_error)?;

    info!("Server stopped");
    Ok(())
}

/// Resolve on Ctrl+C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %err, "Ctrl+C handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}
