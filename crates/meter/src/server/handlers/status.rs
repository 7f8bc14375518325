//! Status endpoint handler

use axum::{extract::State, response::Json};

use crate::server::state::AppState;
use crate::server::types::StatusResponse;

/// GET /status - Health check endpoint
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
  let info = &state.info;

  Json(StatusResponse {
    status: "healthy".to_string(),
    version: env!("CARGO_PKG_VERSION").to_string(),
    table: info.table.clone(),
    function: info.function.clone(),
    backend: info.backend.as_str().to_string(),
    started_at: info.started_at,
  })
}
