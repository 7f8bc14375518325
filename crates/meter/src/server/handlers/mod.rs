pub mod compare;
pub mod predict;
pub mod records;
pub mod status;

use axum::body::Bytes;
use serde_json::Value;

use crate::error::{MeterError, MeterResult};
use crate::server::models::Record;

/// Parse a request body that must be a non-empty JSON object.
///
/// Missing, unparseable, `null`, non-object and empty-object bodies all fail
/// with the same validation message.
pub(crate) fn json_object(body: &Bytes, missing_message: &str) -> MeterResult<Record> {
  let missing = || MeterError::Validation(missing_message.to_string());

  if body.iter().all(|b| b.is_ascii_whitespace()) {
    return Err(missing());
  }

  match serde_json::from_slice::<Value>(body) {
    Ok(Value::Object(map)) if !map.is_empty() => Ok(map),
    _ => Err(missing()),
  }
}
