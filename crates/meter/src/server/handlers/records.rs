//! Record upload and retrieval handlers

use axum::{
  body::Bytes,
  extract::{Extension, State},
  response::Json,
};

use super::json_object;
use crate::error::MeterError;
use crate::server::middleware::RequestContext;
use crate::server::services::record_store;
use crate::server::state::AppState;
use crate::server::types::{LocalDataResponse, UploadResponse};

/// POST /upload-data - Store one JSON record
pub async fn upload_data(
  State(state): State<AppState>,
  Extension(context): Extension<RequestContext>,
  body: Bytes,
) -> Result<Json<UploadResponse>, MeterError> {
  let record = json_object(&body, "No data provided")?;

  if let Err(e) = record_store::upload(state.store.as_ref(), record).await {
    context.log_error(&format!("Upload failed: {e}"), "records-api");
    return Err(e);
  }

  context.log_info("Stored uploaded record", "records-api");
  Ok(Json(UploadResponse { message: "Data uploaded successfully".to_string() }))
}

/// GET /get-local-data - Return every stored record
pub async fn get_local_data(
  State(state): State<AppState>,
  Extension(context): Extension<RequestContext>,
) -> Result<Json<LocalDataResponse>, MeterError> {
  match record_store::fetch_all(state.store.as_ref()).await {
    Ok(data) => {
      context.log_info(&format!("Fetched {} records", data.len()), "records-api");
      Ok(Json(LocalDataResponse { data }))
    }
    Err(e) => {
      context.log_error(&format!("Scan failed: {e}"), "records-api");
      Err(e)
    }
  }
}
