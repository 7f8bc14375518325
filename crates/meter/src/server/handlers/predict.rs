//! Prediction handler

use axum::{
  body::Bytes,
  extract::{Extension, State},
  response::Json,
};

use super::json_object;
use crate::error::MeterError;
use crate::server::middleware::RequestContext;
use crate::server::services::predictor;
use crate::server::state::AppState;
use crate::server::types::PredictionResponse;

/// POST /predict - Forward the body to the prediction function
pub async fn predict(
  State(state): State<AppState>,
  Extension(context): Extension<RequestContext>,
  body: Bytes,
) -> Result<Json<PredictionResponse>, MeterError> {
  let payload = json_object(&body, "No input provided")?;

  match predictor::predict(state.predictor.as_ref(), payload).await {
    Ok(prediction) => {
      context.log_info("Prediction returned", "predict-api");
      Ok(Json(PredictionResponse { prediction }))
    }
    Err(e) => {
      context.log_error(&format!("Prediction failed: {e}"), "predict-api");
      Err(e)
    }
  }
}
