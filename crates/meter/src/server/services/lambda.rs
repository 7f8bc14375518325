//! Lambda-backed predictor

use async_trait::async_trait;
use aws_sdk_lambda::error::DisplayErrorContext;
use aws_sdk_lambda::primitives::Blob;
use aws_sdk_lambda::types::InvocationType;
use aws_sdk_lambda::Client;
use serde_json::Value;

use super::predictor::Predictor;
use crate::error::{MeterError, MeterResult};

pub struct LambdaPredictor {
  client: Client,
  function_name: String,
}

impl LambdaPredictor {
  pub fn new(client: Client, function_name: impl Into<String>) -> Self {
    Self { client, function_name: function_name.into() }
  }

  pub fn from_config(config: &aws_config::SdkConfig, function_name: impl Into<String>) -> Self {
    Self::new(Client::new(config), function_name)
  }
}

#[async_trait]
impl Predictor for LambdaPredictor {
  async fn invoke(&self, payload: &Value) -> MeterResult<Value> {
    let body = serde_json::to_vec(payload)
      .map_err(|e| MeterError::Invocation(format!("could not encode payload: {e}")))?;

    let output = self
      .client
      .invoke()
      .function_name(&self.function_name)
      .invocation_type(InvocationType::RequestResponse)
      .payload(Blob::new(body))
      .send()
      .await
      .map_err(|e| MeterError::Invocation(DisplayErrorContext(&e).to_string()))?;

    tracing::debug!(function = %self.function_name, status = output.status_code(), "invoked");

    decode_response(output.function_error(), output.payload().map(|blob| blob.as_ref()))
  }
}

/// Turn an invoke response into the function's JSON result
///
/// A reported function error fails the call with the error payload as its
/// message. An empty payload decodes as `null`.
pub fn decode_response(function_error: Option<&str>, payload: Option<&[u8]>) -> MeterResult<Value> {
  let payload = payload.unwrap_or_default();

  if let Some(kind) = function_error {
    let detail = String::from_utf8_lossy(payload);
    return Err(MeterError::Invocation(format!("{kind}: {detail}")));
  }

  if payload.iter().all(|b| b.is_ascii_whitespace()) {
    return Ok(Value::Null);
  }

  serde_json::from_slice(payload)
    .map_err(|e| MeterError::Invocation(format!("function returned invalid JSON: {e}")))
}
