//! REST API types with schemars annotations for OpenAPI generation

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::server::models::{ComparisonMap, Record};

pub use crate::error::ErrorResponse;

// Record Endpoints
// ================

/// Response for POST /upload-data
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UploadResponse {
  /// Confirmation message
  pub message: String,
}

/// Response for GET /get-local-data
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct LocalDataResponse {
  /// Every stored record, in scan order
  pub data: Vec<Record>,
}

// Prediction Endpoint
// ===================

/// Response for POST /predict
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct PredictionResponse {
  /// Raw result of the prediction function
  pub prediction: Value,
}

// Comparison Endpoint
// ===================

/// Response for POST /compare-data
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ComparisonResponse {
  /// One comparison map per stored record
  pub comparison_results: Vec<ComparisonMap>,
}

// Status Endpoint
// ===============

/// Response for GET /status
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct StatusResponse {
  pub status: String,
  pub version: String,
  /// Table backing the record store
  pub table: String,
  /// Function answering predictions
  pub function: String,
  /// `aws` or `memory`
  pub backend: String,
  pub started_at: DateTime<Utc>,
}
