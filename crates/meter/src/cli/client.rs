//! HTTP client for the meter REST API
//!
//! Thin wrapper used by the `meter` CLI; every method maps to one endpoint and
//! turns non-2xx responses into errors carrying the server's message.

use anyhow::{anyhow, Result};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tokio::time::timeout;

use crate::error::ErrorResponse;
use crate::server::models::{ComparisonMap, Record};
use crate::server::types::{
  ComparisonResponse, LocalDataResponse, PredictionResponse, StatusResponse, UploadResponse,
};

pub const DEFAULT_SERVER_URL: &str = "http://localhost:5000";

/// Configuration for the meter HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
  /// Base URL of the meter server (e.g., "http://localhost:5000")
  pub base_url: String,
  /// Request timeout in seconds
  pub timeout_secs: u64,
}

impl Default for ClientConfig {
  fn default() -> Self {
    Self { base_url: DEFAULT_SERVER_URL.to_string(), timeout_secs: 30 }
  }
}

pub struct MeterClient {
  client: Client,
  config: ClientConfig,
}

impl MeterClient {
  pub fn with_config(config: ClientConfig) -> Result<Self> {
    let client = Client::builder().timeout(Duration::from_secs(config.timeout_secs)).build()?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
  }

  /// Upload one record, returning the server's confirmation
  pub async fn upload(&self, record: &Value) -> Result<String> {
    let response = self.send(self.client.post(self.url("/upload-data")).json(record)).await?;
    let result: UploadResponse = parse(response, "upload data").await?;
    Ok(result.message)
  }

  /// Ask the prediction function for a result
  pub async fn predict(&self, payload: &Value) -> Result<Value> {
    let response = self.send(self.client.post(self.url("/predict")).json(payload)).await?;
    let result: PredictionResponse = parse(response, "predict").await?;
    Ok(result.prediction)
  }

  /// Fetch every stored record
  pub async fn local_data(&self) -> Result<Vec<Record>> {
    let response = self.send(self.client.get(self.url("/get-local-data"))).await?;
    let result: LocalDataResponse = parse(response, "fetch local data").await?;
    Ok(result.data)
  }

  /// Compare metrics against every stored record
  pub async fn compare(&self, metrics: &Value) -> Result<Vec<ComparisonMap>> {
    let response = self.send(self.client.post(self.url("/compare-data")).json(metrics)).await?;
    let result: ComparisonResponse = parse(response, "compare data").await?;
    Ok(result.comparison_results)
  }

  /// Server health and configuration
  pub async fn status(&self) -> Result<StatusResponse> {
    let response = self.send(self.client.get(self.url("/status"))).await?;
    parse(response, "get status").await
  }

  async fn send(&self, request: reqwest::RequestBuilder) -> Result<Response> {
    let response = timeout(Duration::from_secs(self.config.timeout_secs), request.send()).await??;
    Ok(response)
  }
}

async fn parse<T: DeserializeOwned>(response: Response, action: &str) -> Result<T> {
  let status = response.status();

  if !status.is_success() {
    let text = response.text().await?;
    let message = serde_json::from_str::<ErrorResponse>(&text).map(|e| e.error).unwrap_or(text);
    return Err(anyhow!("Failed to {} (HTTP {}): {}", action, status.as_u16(), message));
  }

  Ok(response.json().await?)
}
