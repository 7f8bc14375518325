//! Error taxonomy shared by the record store, predictor and comparison engine
//!
//! Every variant maps to exactly one HTTP status; the response body is always
//! `{"error": "<message>"}`.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use schemars::JsonSchema;
use thiserror::Error;

/// Errors surfaced at the endpoint boundary
#[derive(Debug, Error)]
pub enum MeterError {
  /// Request body missing, unparseable, not an object, or empty
  #[error("{0}")]
  Validation(String),

  /// Record store unreachable or rejected the request
  #[error("Record store unavailable: {0}")]
  StoreUnavailable(String),

  /// Prediction function missing, failed, or returned garbage
  #[error("Prediction invocation failed: {0}")]
  Invocation(String),

  /// A stored or submitted value could not be read as a number
  #[error("Could not convert value to float: {0}")]
  TypeConversion(String),
}

pub type MeterResult<T> = std::result::Result<T, MeterError>;

/// Error body returned by every endpoint
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ErrorResponse {
  /// Human readable error message
  pub error: String,
}

impl MeterError {
  pub fn status_code(&self) -> StatusCode {
    match self {
      MeterError::Validation(_) => StatusCode::BAD_REQUEST,
      MeterError::StoreUnavailable(_)
      | MeterError::Invocation(_)
      | MeterError::TypeConversion(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl IntoResponse for MeterError {
  fn into_response(self) -> Response {
    let status = self.status_code();
    let message = self.to_string();

    if status.is_server_error() {
      tracing::error!(status = status.as_u16(), "{message}");
    } else {
      tracing::warn!(status = status.as_u16(), "{message}");
    }

    (status, Json(ErrorResponse { error: message })).into_response()
  }
}
