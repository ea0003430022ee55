use super::handlers::{
    handle_api_get, handle_api_list, handle_api_run, handle_health, handle_index,
    handle_solution_page, handle_solution_submit,
};
use super::{AppState, MAX_BODY_SIZE};

use crate::config::Config;
use crate::llm::{ModelClient, OpenAiCompatibleClient};
use crate::solutions::{Catalog, SolutionRunner};
use anyhow::{Context, Result};
use axum::{
    Router,
    http::StatusCode,
    routing::{get, post},
};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;

fn strip_brackets(host: &str) -> &str {
    host.strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host)
}

/// Returns true when the bind address is not a loopback address.
fn is_public_bind(host: &str) -> bool {
    let host = strip_brackets(host);
    if host.eq_ignore_ascii_case("localhost") {
        return false;
    }
    host.parse::<IpAddr>().map_or(true, |ip| !ip.is_loopback())
}

/// `host:port` in a form the resolver accepts: IP literals (IPv6 with or
/// without brackets) become socket addresses, names are left for lookup.
fn bind_target(host: &str, port: u16) -> String {
    let host = strip_brackets(host);
    match host.parse::<IpAddr>() {
        Ok(ip) => SocketAddr::new(ip, port).to_string(),
        Err(_) => format!("{host}:{port}"),
    }
}

async fn bind_listener(host: &str, port: u16) -> Result<tokio::net::TcpListener> {
    let target = bind_target(host, port);
    tokio::net::TcpListener::bind(target.as_str())
        .await
        .with_context(|| format!("bind gateway socket {target}"))
}

/// Bind the configured address and serve until the task is dropped.
pub async fn run_gateway(config: Arc<Config>) -> Result<()> {
    let host = config.gateway.host.clone();
    let port = config.gateway.port;

    if is_public_bind(&host) && !config.gateway.allow_public_bind {
        anyhow::bail!(
            "Refusing to bind to {host}: the explorer would be reachable from other machines.\n\
             Fix: use --host 127.0.0.1 (default), or set\n\
             [gateway] allow_public_bind = true in config.toml."
        );
    }

    let listener = bind_listener(&host, port).await?;
    run_gateway_with_listener(listener, config).await
}

/// Serve from a pre-bound listener. The model client, catalog and runner
/// are built once here and shared by every request.
pub async fn run_gateway_with_listener(
    listener: tokio::net::TcpListener,
    config: Arc<Config>,
) -> Result<()> {
    let local = listener
        .local_addr()
        .context("get gateway listener local address")?;

    let client: Arc<dyn ModelClient> = Arc::new(OpenAiCompatibleClient::from_config(&config));
    let catalog = Catalog::from_config(&config).context("load solution catalog")?;
    let runner =
        SolutionRunner::new(client, config.models.clone()).context("compile prompt templates")?;
    let state = AppState::new(catalog, runner).context("build gateway templates")?;

    print_gateway_banner(&local.to_string(), state.catalog.len());
    tracing::info!(addr = %local, "gateway listening");

    let app = build_app(state, config.gateway.request_timeout_secs);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serve HTTP gateway")?;

    Ok(())
}

/// Resolves on Ctrl-C. If the handler cannot be installed the gateway
/// simply runs until its task is dropped.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutting down gateway"),
        Err(error) => {
            tracing::warn!(%error, "could not install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    }
}

fn print_gateway_banner(display_addr: &str, solutions: usize) {
    println!("Solution Explorer listening on http://{display_addr}");
    println!("  GET  /                       catalog ({solutions} solutions)");
    println!("  GET  /solutions/{{id}}");
    println!("  POST /solutions/{{id}}");
    println!("  GET  /api/solutions");
    println!("  GET  /api/solutions/{{id}}");
    println!("  POST /api/solutions/{{id}}/run");
    println!("  GET  /health");
}

pub fn build_app(state: AppState, timeout_secs: u64) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/", get(handle_index))
        .route(
            "/solutions/{id}",
            get(handle_solution_page).post(handle_solution_submit),
        )
        .route("/api/solutions", get(handle_api_list))
        .route("/api/solutions/{id}", get(handle_api_get))
        .route("/api/solutions/{id}/run", post(handle_api_run))
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(timeout_secs),
        ))
}
