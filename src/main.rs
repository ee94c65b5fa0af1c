use std::{
    net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr},
    time::Duration,
};

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};

mod api;
mod config;

pub use config::Config;
use config::{LogFormat, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // When invoked as a Docker HEALTHCHECK, hit /health and exit immediately.
    // This avoids needing any external tool (curl/wget) in the container image.
    if std::env::args().nth(1).as_deref() == Some("--healthcheck") {
        return healthcheck().await;
    }

    let config = Config::from_env().context("Failed to load configuration")?;
    init_tracing(&config.server)?;

    let addr = config.server.addr()?;
    info!(%addr, log_format = %config.server.log_format, "hello-service starting");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, "listening");

    axum::serve(listener, app())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("shutdown complete");
    Ok(())
}

/// The full application: route table plus request tracing.
fn app() -> axum::Router {
    api::router().layer(
        tower_http::trace::TraceLayer::new_for_http()
            .make_span_with(tower_http::trace::DefaultMakeSpan::new().level(tracing::Level::INFO))
            .on_response(tower_http::trace::DefaultOnResponse::new().level(tracing::Level::INFO)),
    )
}

/// `RUST_LOG` wins; otherwise the configured `log_level`, otherwise info.
fn init_tracing(server: &ServerConfig) -> anyhow::Result<()> {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => server.env_filter()?,
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match server.log_format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}

const HEALTHCHECK_TIMEOUT: Duration = Duration::from_secs(3);

/// Lightweight healthcheck: GET /health on the configured address and exit 0
/// on 2xx, 1 otherwise. Invoked via `hello-service --healthcheck`.
async fn healthcheck() -> anyhow::Result<()> {
    let addr = Config::from_env()?.server.addr()?;
    let healthy = check_health(healthcheck_target(addr)).await;
    std::process::exit(if healthy { 0 } else { 1 })
}

/// Where to reach a server bound to `bind`. A wildcard bind is reached via
/// loopback of the same address family.
fn healthcheck_target(bind: SocketAddr) -> SocketAddr {
    let ip = match bind.ip() {
        IpAddr::V4(ip) if ip.is_unspecified() => IpAddr::V4(Ipv4Addr::LOCALHOST),
        IpAddr::V6(ip) if ip.is_unspecified() => IpAddr::V6(Ipv6Addr::LOCALHOST),
        ip => ip,
    };
    SocketAddr::new(ip, bind.port())
}

/// `true` when `GET /health` at `addr` answers 2xx within [`HEALTHCHECK_TIMEOUT`].
async fn check_health(addr: SocketAddr) -> bool {
    let client = match reqwest::Client::builder().timeout(HEALTHCHECK_TIMEOUT).build() {
        Ok(client) => client,
        Err(e) => {
            warn!(error = %e, "could not build healthcheck client");
            return false;
        }
    };

    match client.get(format!("http://{addr}/health")).send().await {
        Ok(resp) => resp.status().is_success(),
        Err(e) => {
            warn!(%addr, error = %e, "healthcheck request failed");
            false
        }
    }
}
