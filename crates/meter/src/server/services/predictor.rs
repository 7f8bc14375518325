//! Prediction function abstraction
//!
//! A predictor receives the caller's JSON object verbatim and hands back
//! whatever JSON the remote function produced.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{MeterError, MeterResult};
use crate::server::models::Record;

/// Synchronous invoke-by-name against a function service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Predictor: Send + Sync {
  /// Invoke the function and wait for its decoded response
  async fn invoke(&self, payload: &Value) -> MeterResult<Value>;
}

/// Validate the payload and forward it unchanged
pub async fn predict(predictor: &dyn Predictor, payload: Record) -> MeterResult<Value> {
  if payload.is_empty() {
    return Err(MeterError::Validation("No input provided".to_string()));
  }
  predictor.invoke(&Value::Object(payload)).await
}

/// Development predictor that answers with its own input
pub struct EchoPredictor;

#[async_trait]
impl Predictor for EchoPredictor {
  async fn invoke(&self, payload: &Value) -> MeterResult<Value> {
    Ok(payload.clone())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use mockall::predicate::eq;
  use serde_json::json;

  #[tokio::test]
  async fn test_predict_forwards_payload_verbatim() {
    let mut predictor = MockPredictor::new();
    predictor
      .expect_invoke()
      .with(eq(json!({"x": 1})))
      .times(1)
      .returning(|_| Ok(json!({"score": 0.87, "label": "high"})));

    let payload = json!({"x": 1}).as_object().cloned().unwrap();
    let result = predict(&predictor, payload).await.unwrap();
    assert_eq!(result, json!({"score": 0.87, "label": "high"}));
  }

  #[tokio::test]
  async fn test_predict_rejects_empty_payload_before_invoking() {
    let mut predictor = MockPredictor::new();
    predictor.expect_invoke().times(0);

    let result = predict(&predictor, Record::new()).await;
    assert!(matches!(result, Err(MeterError::Validation(_))));
  }

  #[tokio::test]
  async fn test_predict_passes_through_invocation_error() {
    let mut predictor = MockPredictor::new();
    predictor
      .expect_invoke()
      .returning(|_| Err(MeterError::Invocation("Function not found".to_string())));

    let payload = json!({"x": 1}).as_object().cloned().unwrap();
    let result = predict(&predictor, payload).await;
    assert!(matches!(result, Err(MeterError::Invocation(message)) if message == "Function not found"));
  }

  #[tokio::test]
  async fn test_echo_predictor_returns_input() {
    let payload = json!({"usage": [1, 2, 3]});
    assert_eq!(EchoPredictor.invoke(&payload).await.unwrap(), payload);
  }
}
