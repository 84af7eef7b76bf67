//! HTTP endpoint for help and Prometheus metrics.
//!
//! Runs as a supervised background task and serves:
//! - `GET /`: JSON help index of every listener, grouped by plugin
//! - `GET /metrics`: Prometheus text format

use crate::bot::Bot;
use crate::handlers::ListenerRegistry;
use axum::extract::State;
use axum::{Json, Router, routing::get};
use serde::Serialize;
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HelpIndex {
    pub nickname: String,
    pub plugins: Vec<PluginHelp>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginHelp {
    pub name: String,
    pub listeners: Vec<ListenerHelp>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListenerHelp {
    pub pattern: String,
    /// Gate flags, e.g. `mention+oper`.
    pub gate: String,
    pub help: String,
}

/// Build the help index, plugins sorted by name, listeners in registration
/// order.
pub fn help_index(registry: &ListenerRegistry, nickname: &str) -> HelpIndex {
    let mut grouped: BTreeMap<&str, Vec<ListenerHelp>> = BTreeMap::new();
    for listener in registry.listeners() {
        grouped
            .entry(listener.plugin())
            .or_default()
            .push(ListenerHelp {
                pattern: listener.pattern().as_str().to_string(),
                gate: listener.gate().to_string(),
                help: listener.help().to_string(),
            });
    }

    HelpIndex {
        nickname: nickname.to_string(),
        plugins: grouped
            .into_iter()
            .map(|(name, listeners)| PluginHelp {
                name: name.to_string(),
                listeners,
            })
            .collect(),
    }
}

async fn index_handler(State(bot): State<Arc<Bot>>) -> Json<HelpIndex> {
    Json(help_index(bot.registry(), bot.nickname()))
}

async fn metrics_handler() -> String {
    crate::metrics::gather_metrics()
}

pub fn router(bot: Arc<Bot>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(bot)
}

/// Run the HTTP server on `0.0.0.0:port`. Only returns on failure.
pub async fn run_http_server(bot: Arc<Bot>, port: u16) -> anyhow::Result<()> {
    let app = router(bot);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Help and metrics HTTP server listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
