//! HTTP route handlers for the sentiment API.

use super::envelope::Envelope;
use crate::consts::cli_consts::server::SUCCESS_MESSAGE;
use crate::provider::{DataProvider, ProviderError};
use axum::Json;
use axum::extract::State;
use std::sync::Arc;

/// Current snapshot wrapped in an envelope. Failures become a 500 with a generic message.
pub async fn get_sentiment(
    State(provider): State<Arc<DataProvider>>,
) -> Result<Json<Envelope>, ProviderError> {
    let snapshot = provider.snapshot().await?;
    log::debug!("Served snapshot taken at {}", snapshot.datetime);
    Ok(Json(Envelope::success(snapshot, SUCCESS_MESSAGE)))
}

pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
