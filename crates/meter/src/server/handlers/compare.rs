//! Comparison handler

use axum::{
  body::Bytes,
  extract::{Extension, State},
  response::Json,
};

use super::json_object;
use crate::error::MeterError;
use crate::server::middleware::RequestContext;
use crate::server::services::comparison;
use crate::server::state::AppState;
use crate::server::types::ComparisonResponse;

/// POST /compare-data - Compare the submitted metrics against every stored record
pub async fn compare_data(
  State(state): State<AppState>,
  Extension(context): Extension<RequestContext>,
  body: Bytes,
) -> Result<Json<ComparisonResponse>, MeterError> {
  let user_metrics = json_object(&body, "No user data provided")?;

  match comparison::compare_with_store(state.store.as_ref(), &user_metrics).await {
    Ok(comparison_results) => {
      context.log_info(
        &format!(
          "Compared {} metrics against {} records",
          user_metrics.len(),
          comparison_results.len()
        ),
        "compare-api",
      );
      Ok(Json(ComparisonResponse { comparison_results }))
    }
    Err(e) => {
      context.log_error(&format!("Comparison failed: {e}"), "compare-api");
      Err(e)
    }
  }
}
