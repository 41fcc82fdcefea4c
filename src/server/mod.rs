pub mod page;

use std::sync::Arc;

use axum::{Json, Router, extract::State, response::Html, routing::get};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::net::TcpListener;
use tracing::info;

use crate::portfolio::ValueCache;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<ValueCache>,
}

/// Wire format of the value endpoint.
#[derive(Debug, Serialize)]
pub struct PortfolioValueResponse {
    pub value: f64,
    pub previous_value: f64,
    pub timestamp: String,
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/api/health", get(health_check))
        .route("/api/portfolio-value", get(api_portfolio_value))
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Current portfolio total, served from the cache (refreshing it when
/// stale). Never an error status: a degraded valuation pass shows up as
/// a lower number, not a failure.
async fn api_portfolio_value(State(state): State<AppState>) -> Json<PortfolioValueResponse> {
    let reading = state.cache.read().await;

    Json(PortfolioValueResponse {
        value: reading.value,
        previous_value: reading.previous_value,
        timestamp: rfc3339(reading.at_ms),
    })
}

async fn index_page() -> Html<String> {
    Html(page::render_index())
}

fn rfc3339(ms: u64) -> String {
    DateTime::<Utc>::from_timestamp_millis(ms as i64)
        .unwrap_or_default()
        .to_rfc3339()
}

pub async fn start_server(addr: &str, state: AppState) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "portfolio server listening");

    axum::serve(listener, create_router(state)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_serializes_expected_fields() {
        let json = serde_json::to_value(PortfolioValueResponse {
            value: 30.0,
            previous_value: 25.0,
            timestamp: "2026-01-01T00:00:00+00:00".to_string(),
        })
        .expect("serializes");

        assert_eq!(json["value"], 30.0);
        assert_eq!(json["previous_value"], 25.0);
        assert_eq!(json["timestamp"], "2026-01-01T00:00:00+00:00");
    }

    #[test]
    fn timestamps_render_as_rfc3339() {
        assert_eq!(rfc3339(0), "1970-01-01T00:00:00+00:00");
        assert_eq!(rfc3339(1_700_000_000_000), "2023-11-14T22:13:20+00:00");
    }
}
