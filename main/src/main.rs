use std::{future::IntoFuture, sync::Arc};

use anyhow::Context;
use api_router::{api_routes, api_state::ApiState};
use axum::{extract::FromRef, Router};
use common::utils::{
    config::{get_config, AppConfig},
    heartbeat::{watch_heartbeat, HeartbeatMonitor},
};
use html_router::{html_routes, html_state::HtmlState};
use tokio::sync::watch;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Set up tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init()
        .ok();

    // Get config
    let config = get_config().context("failed to load configuration")?;

    // The browser has not pinged yet; the clock starts now
    let heartbeat = Arc::new(HeartbeatMonitor::with_system_clock(
        config.heartbeat_timeout(),
    ));

    let app = build_app(&config, heartbeat.clone());

    let serve_address = config.serve_address();
    let listener = tokio::net::TcpListener::bind(&serve_address)
        .await
        .with_context(|| format!("failed to bind {serve_address}"))?;

    log_startup_banner(&config);

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    tokio::spawn(watch_heartbeat(
        heartbeat,
        config.heartbeat_check_interval(),
        shutdown_tx,
    ));

    // No draining: whichever finishes first ends the process
    tokio::select! {
        result = axum::serve(listener, app).into_future() => {
            result.context("server error")?;
        }
        _ = shutdown_rx.wait_for(|stop| *stop) => {
            info!("Heartbeat lost, exiting");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted, exiting");
        }
    }

    Ok(())
}

fn build_app(config: &AppConfig, heartbeat: Arc<HeartbeatMonitor>) -> Router {
    let api_state = ApiState::new(config, heartbeat.clone());
    let html_state = HtmlState::new(config, heartbeat);

    Router::new()
        .nest("/api", api_routes(&api_state))
        .merge(html_routes(&html_state))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(AppState {
            api_state,
            html_state,
        })
}

fn log_startup_banner(config: &AppConfig) {
    info!("========================================");
    info!("      LIFE HUB RUNNING");
    info!("========================================");
    info!("Open in the browser: http://localhost:{}", config.http_port);
    info!("Data saved to: {}", config.data_file);
    info!("Front-end served from: {}", config.frontend_dir);
    info!(
        "From a phone on the same network: http://<this machine's IP>:{}",
        config.http_port
    );
    info!(
        timeout_secs = config.heartbeat_timeout_secs,
        "Close the browser tab to stop the server, or press Ctrl+C"
    );
}

#[derive(Clone, FromRef)]
struct AppState {
    api_state: ApiState,
    html_state: HtmlState,
}
