use async_trait::async_trait;
use axum::{
  body::Body,
  http::{Request, StatusCode},
  Router,
};
use chrono::Utc;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

use meter::config::Backend;
use meter::error::{MeterError, MeterResult};
use meter::server::models::Record;
use meter::server::routing::create_router;
use meter::server::services::memory::MemoryRecordStore;
use meter::server::services::predictor::Predictor;
use meter::server::services::record_store::RecordStore;
use meter::server::state::{AppState, ServiceInfo};

fn record(value: Value) -> Record {
  value.as_object().cloned().unwrap()
}

fn info() -> ServiceInfo {
  ServiceInfo {
    table: "usage".to_string(),
    function: "predictor".to_string(),
    backend: Backend::Memory,
    started_at: Utc::now(),
  }
}

fn memory_app(records: Vec<Value>) -> Router {
  let store = MemoryRecordStore::with_records("id", records.into_iter().map(record).collect());
  create_router(AppState::in_memory(store))
}

/// Predictor that records every payload and answers with a canned result
struct RecordingPredictor {
  calls: Mutex<Vec<Value>>,
  answer: Result<Value, String>,
}

#[async_trait]
impl Predictor for RecordingPredictor {
  async fn invoke(&self, payload: &Value) -> MeterResult<Value> {
    self.calls.lock().unwrap().push(payload.clone());
    match &self.answer {
      Ok(value) => Ok(value.clone()),
      Err(message) => Err(MeterError::Invocation(message.clone())),
    }
  }
}

/// Store that fails every call and counts how often it was reached
#[derive(Default)]
struct UnavailableStore {
  calls: Mutex<usize>,
}

#[async_trait]
impl RecordStore for UnavailableStore {
  async fn put_record(&self, _record: Record) -> MeterResult<()> {
    *self.calls.lock().unwrap() += 1;
    Err(MeterError::StoreUnavailable("ResourceNotFoundException: table missing".to_string()))
  }

  async fn scan_all(&self) -> MeterResult<Vec<Record>> {
    *self.calls.lock().unwrap() += 1;
    Err(MeterError::StoreUnavailable("ResourceNotFoundException: table missing".to_string()))
  }
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
  let builder = Request::builder().method(method).uri(uri);
  let request = match body {
    Some(text) => builder
      .header("content-type", "application/json")
      .body(Body::from(text.to_string()))
      .unwrap(),
    None => builder.body(Body::empty()).unwrap(),
  };

  let response = app.clone().oneshot(request).await.unwrap();
  let status = response.status();
  let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
  let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
  (status, value)
}

#[tokio::test]
async fn test_upload_then_fetch_includes_record() {
  let app = memory_app(vec![]);

  let (status, body) = send(&app, "POST", "/upload-data", Some(r#"{"id": 1, "usage": 10}"#)).await;
  assert_eq!(status, StatusCode::OK);
  assert!(body["message"].is_string());

  let (status, body) = send(&app, "GET", "/get-local-data", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body, json!({"data": [{"id": 1, "usage": 10}]}));
}

#[tokio::test]
async fn test_upload_overwrites_same_primary_key() {
  let app = memory_app(vec![json!({"id": 1, "usage": 10})]);

  send(&app, "POST", "/upload-data", Some(r#"{"id": 1, "usage": 12}"#)).await;
  let (_, body) = send(&app, "GET", "/get-local-data", None).await;

  assert_eq!(body["data"], json!([{"id": 1, "usage": 12}]));
}

#[tokio::test]
async fn test_empty_bodies_are_rejected_before_store_access() {
  let store = Arc::new(UnavailableStore::default());
  let predictor = Arc::new(RecordingPredictor { calls: Mutex::new(Vec::new()), answer: Ok(json!(1)) });
  let app = create_router(AppState::new(store.clone(), predictor.clone(), info()));

  let cases = [
    ("/upload-data", "No data provided"),
    ("/predict", "No input provided"),
    ("/compare-data", "No user data provided"),
  ];
  for (uri, message) in cases {
    for body in [None, Some(""), Some("{}"), Some("null")] {
      let (status, response) = send(&app, "POST", uri, body).await;
      assert_eq!(status, StatusCode::BAD_REQUEST, "{uri} {body:?}");
      assert_eq!(response, json!({"error": message}));
    }
  }

  assert_eq!(*store.calls.lock().unwrap(), 0);
  assert!(predictor.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_compare_reports_difference() {
  let app = memory_app(vec![json!({"id": 1, "usage": 10})]);

  let (status, body) = send(&app, "POST", "/compare-data", Some(r#"{"usage": 15}"#)).await;
  assert_eq!(status, StatusCode::OK);

  let usage = &body["comparison_results"][0]["usage"];
  assert_eq!(usage["user"], json!(15));
  assert_eq!(usage["local"], json!(10));
  assert_eq!(usage["difference"].as_f64(), Some(5.0));
}

#[tokio::test]
async fn test_compare_treats_stored_zero_as_missing() {
  let app = memory_app(vec![json!({"id": 1, "usage": 0})]);

  let (status, body) = send(&app, "POST", "/compare-data", Some(r#"{"usage": 5}"#)).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body, json!({"comparison_results": [{}]}));
}

#[tokio::test]
async fn test_compare_non_numeric_local_value_is_server_error() {
  let app = memory_app(vec![json!({"id": 1, "usage": "abc"})]);

  let (status, body) = send(&app, "POST", "/compare-data", Some(r#"{"usage": 5}"#)).await;
  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  assert!(body["error"].as_str().unwrap().contains("abc"));
}

#[tokio::test]
async fn test_compare_accepts_boolean_user_value() {
  let app = memory_app(vec![json!({"id": 1, "usage": 10})]);

  let (status, body) = send(&app, "POST", "/compare-data", Some(r#"{"usage": true}"#)).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["comparison_results"][0]["usage"]["difference"].as_f64(), Some(-9.0));
}

#[tokio::test]
async fn test_compare_non_finite_local_text_is_server_error() {
  let app = memory_app(vec![json!({"id": 1, "usage": "nan"})]);

  let (status, body) = send(&app, "POST", "/compare-data", Some(r#"{"usage": 5}"#)).await;
  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  assert!(body["error"].as_str().unwrap().contains("nan"));
}

#[tokio::test]
async fn test_compare_with_no_records() {
  let app = memory_app(vec![]);

  let (status, body) = send(&app, "POST", "/compare-data", Some(r#"{"usage": 5}"#)).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body, json!({"comparison_results": []}));
}

#[tokio::test]
async fn test_predict_forwards_payload_and_wraps_result() {
  let predictor = Arc::new(RecordingPredictor {
    calls: Mutex::new(Vec::new()),
    answer: Ok(json!({"forecast": [3.2, 4.1]})),
  });
  let store = Arc::new(MemoryRecordStore::new("id"));
  let app = create_router(AppState::new(store, predictor.clone(), info()));

  let (status, body) = send(&app, "POST", "/predict", Some(r#"{"x": 1}"#)).await;

  assert_eq!(status, StatusCode::OK);
  assert_eq!(body, json!({"prediction": {"forecast": [3.2, 4.1]}}));
  assert_eq!(*predictor.calls.lock().unwrap(), vec![json!({"x": 1})]);
}

#[tokio::test]
async fn test_predict_failure_is_server_error() {
  let predictor = Arc::new(RecordingPredictor {
    calls: Mutex::new(Vec::new()),
    answer: Err("Function not found".to_string()),
  });
  let store = Arc::new(MemoryRecordStore::new("id"));
  let app = create_router(AppState::new(store, predictor, info()));

  let (status, body) = send(&app, "POST", "/predict", Some(r#"{"x": 1}"#)).await;

  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  assert!(body["error"].as_str().unwrap().contains("Function not found"));
}

#[tokio::test]
async fn test_store_failures_are_server_errors() {
  let store = Arc::new(UnavailableStore::default());
  let predictor = Arc::new(RecordingPredictor { calls: Mutex::new(Vec::new()), answer: Ok(json!(1)) });
  let app = create_router(AppState::new(store, predictor, info()));

  let (status, body) = send(&app, "GET", "/get-local-data", None).await;
  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  assert!(body["error"].as_str().unwrap().contains("table missing"));

  let (status, _) = send(&app, "POST", "/upload-data", Some(r#"{"id": 1}"#)).await;
  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

  let (status, _) = send(&app, "POST", "/compare-data", Some(r#"{"usage": 1}"#)).await;
  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_status_reports_configuration() {
  let app = memory_app(vec![]);

  let (status, body) = send(&app, "GET", "/status", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["status"], json!("healthy"));
  assert_eq!(body["backend"], json!("memory"));
  assert_eq!(body["version"], json!(env!("CARGO_PKG_VERSION")));
}
