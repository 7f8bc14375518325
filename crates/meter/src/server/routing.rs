//! Axum router configuration for all endpoints

use axum::{
  middleware,
  routing::{get, post},
  Router,
};

use crate::server::handlers::{compare, predict, records, status};
use crate::server::middleware::request_context_middleware;
use crate::server::state::AppState;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
  Router::new()
    // Health
    .route("/status", get(status::status))
    // Records
    .route("/upload-data", post(records::upload_data))
    .route("/get-local-data", get(records::get_local_data))
    // Prediction and comparison
    .route("/predict", post(predict::predict))
    .route("/compare-data", post(compare::compare_data))
    .layer(middleware::from_fn(request_context_middleware))
    .with_state(state)
}
