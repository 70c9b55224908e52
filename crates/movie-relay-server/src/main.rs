//! movie-relay - HTTP relay for TMDB movie lookups.

/// Application configuration (TOML).
mod config;
/// Relay error taxonomy.
mod error;
/// Relay operations.
mod relay;
/// HTTP routes.
mod routes;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use movie_relay_api::tmdb::{Credential, TmdbClient};
use tokio::net::TcpListener;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{AppConfig, resolve_config_path};
use crate::relay::MovieRelay;
use crate::routes::{AppState, build_router};

/// Version string including the git revision.
const APP_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (rev:",
    env!("GIT_HASH"),
    ")",
);

/// User-Agent sent to TMDB.
const USER_AGENT: &str = concat!("movie-relay/", env!("CARGO_PKG_VERSION"));

/// CLI argument parser.
#[derive(Parser)]
#[command(name = "movie-relay", about, version = APP_VERSION)]
struct Cli {
    /// Config file path. Takes precedence over --dir.
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Config directory (reads `{dir}/config.toml`).
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Override `server.host`.
    #[arg(long)]
    host: Option<String>,

    /// Override `server.port`.
    #[arg(long, short = 'p')]
    port: Option<u16>,
}

/// Reads the TMDB API key from `env_name` and reports whether it is set.
///
/// A missing key is not fatal: the relay starts and answers every request
/// with the configuration error.
fn load_credential(env_name: &str) -> Option<Credential> {
    let credential = Credential::from_env(env_name);
    report_credential(env_name, credential.as_ref());
    credential
}

/// Logs the startup credential status. The key itself is never logged.
fn report_credential(env_name: &str, credential: Option<&Credential>) {
    if credential.is_some() {
        tracing::info!("TMDB API key loaded from ${env_name}");
    } else {
        tracing::warn!("${env_name} is not set; all movie endpoints will answer 400");
    }
}

/// Resolves config, builds the relay, and serves until shutdown.
///
/// # Errors
///
/// Returns an error if config loading or validation fails, the listener
/// cannot bind, or the server exits abnormally.
async fn run(cli: Cli) -> Result<()> {
    let config_path = resolve_config_path(cli.config.as_deref(), cli.dir.as_deref())
        .context("failed to resolve config path")?;
    let mut config = AppConfig::load(&config_path).context("failed to load config")?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    config.validate().context("invalid configuration")?;

    let credential = load_credential(&config.tmdb.api_key_env);
    let client = TmdbClient::builder()
        .base_url(config.tmdb.base_url.clone())
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(config.tmdb.timeout_secs))
        .build()
        .context("failed to build TMDB client")?;

    let relay = MovieRelay::new(client, credential);
    let state = AppState::new(relay, config.server.expose_error_details);
    let app = build_router(state, config.server.cors_allow_any_origin);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(
        "movie-relay {} listening on http://{}",
        APP_VERSION,
        listener.local_addr().context("failed to read local address")?
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    tracing::info!("movie-relay stopped");
    Ok(())
}

/// Resolves when Ctrl-C (or SIGTERM on Unix) is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to listen for SIGTERM: {e}");
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
    tracing::info!("shutdown signal received");
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if the server fails to start or exits abnormally.
#[tokio::main]
async fn main() -> Result<()> {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    let cli = Cli::parse();
    run(cli).await
}
