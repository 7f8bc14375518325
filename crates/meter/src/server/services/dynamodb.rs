//! DynamoDB-backed record store
//!
//! Records are written with `PutItem` and read back with a full, paginated
//! `Scan`. JSON values are mapped onto DynamoDB attribute values and back.

use async_trait::async_trait;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde_json::{Map, Number, Value};
use std::collections::HashMap;
use std::future::Future;

use super::record_store::RecordStore;
use crate::error::{MeterError, MeterResult};
use crate::server::models::Record;

/// Raw DynamoDB item, also the shape of a `LastEvaluatedKey`
pub type Item = HashMap<String, AttributeValue>;

pub struct DynamoRecordStore {
  client: Client,
  table_name: String,
}

impl DynamoRecordStore {
  pub fn new(client: Client, table_name: impl Into<String>) -> Self {
    Self { client, table_name: table_name.into() }
  }

  pub fn from_config(config: &aws_config::SdkConfig, table_name: impl Into<String>) -> Self {
    Self::new(Client::new(config), table_name)
  }

  async fn scan_page(&self, start_key: Option<Item>) -> MeterResult<(Vec<Item>, Option<Item>)> {
    let output = self
      .client
      .scan()
      .table_name(&self.table_name)
      .set_exclusive_start_key(start_key)
      .send()
      .await
      .map_err(|e| MeterError::StoreUnavailable(DisplayErrorContext(&e).to_string()))?;

    Ok((output.items.unwrap_or_default(), output.last_evaluated_key))
  }
}

#[async_trait]
impl RecordStore for DynamoRecordStore {
  async fn put_record(&self, record: Record) -> MeterResult<()> {
    let item = record_to_item(&record);

    self
      .client
      .put_item()
      .table_name(&self.table_name)
      .set_item(Some(item))
      .send()
      .await
      .map_err(|e| MeterError::StoreUnavailable(DisplayErrorContext(&e).to_string()))?;

    tracing::debug!(table = %self.table_name, "stored record");
    Ok(())
  }

  async fn scan_all(&self) -> MeterResult<Vec<Record>> {
    let records = scan_pages(|start_key| self.scan_page(start_key)).await?;
    tracing::debug!(table = %self.table_name, count = records.len(), "scanned table");
    Ok(records)
  }
}

/// Drive a paginated scan until the store stops returning a continuation key
pub async fn scan_pages<F, Fut>(mut fetch_page: F) -> MeterResult<Vec<Record>>
where
  F: FnMut(Option<Item>) -> Fut,
  Fut: Future<Output = MeterResult<(Vec<Item>, Option<Item>)>>,
{
  let mut records = Vec::new();
  let mut start_key = None;

  loop {
    let (items, last_key) = fetch_page(start_key).await?;
    records.extend(items.iter().map(item_to_record));

    match last_key {
      Some(key) if !key.is_empty() => start_key = Some(key),
      _ => break,
    }
  }

  Ok(records)
}

// JSON -> DynamoDB
// ================

pub fn record_to_item(record: &Record) -> Item {
  record.iter().map(|(name, value)| (name.clone(), to_attribute(value))).collect()
}

pub fn to_attribute(value: &Value) -> AttributeValue {
  match value {
    Value::Null => AttributeValue::Null(true),
    Value::Bool(b) => AttributeValue::Bool(*b),
    Value::Number(n) => AttributeValue::N(n.to_string()),
    Value::String(s) => AttributeValue::S(s.clone()),
    Value::Array(items) => AttributeValue::L(items.iter().map(to_attribute).collect()),
    Value::Object(map) => {
      AttributeValue::M(map.iter().map(|(k, v)| (k.clone(), to_attribute(v))).collect())
    }
  }
}

// DynamoDB -> JSON
// ================

/// Convert a scanned item; attributes come back unordered so keys are sorted
pub fn item_to_record(item: &Item) -> Record {
  let mut names: Vec<&String> = item.keys().collect();
  names.sort();

  names.into_iter().map(|name| (name.clone(), from_attribute(&item[name]))).collect()
}

pub fn from_attribute(attribute: &AttributeValue) -> Value {
  match attribute {
    AttributeValue::Null(_) => Value::Null,
    AttributeValue::Bool(b) => Value::Bool(*b),
    AttributeValue::N(n) => number_value(n),
    AttributeValue::S(s) => Value::String(s.clone()),
    AttributeValue::L(items) => Value::Array(items.iter().map(from_attribute).collect()),
    AttributeValue::M(map) => {
      let mut names: Vec<&String> = map.keys().collect();
      names.sort();
      Value::Object(
        names.into_iter().map(|k| (k.clone(), from_attribute(&map[k]))).collect::<Map<_, _>>(),
      )
    }
    AttributeValue::Ss(strings) => {
      Value::Array(strings.iter().cloned().map(Value::String).collect())
    }
    AttributeValue::Ns(numbers) => Value::Array(numbers.iter().map(|n| number_value(n)).collect()),
    AttributeValue::B(blob) => Value::String(BASE64.encode(blob.as_ref())),
    AttributeValue::Bs(blobs) => {
      Value::Array(blobs.iter().map(|b| Value::String(BASE64.encode(b.as_ref()))).collect())
    }
    _ => Value::Null,
  }
}

/// DynamoDB numbers are decimal text; keep integers exact, fall back to the text
fn number_value(text: &str) -> Value {
  if let Ok(i) = text.parse::<i64>() {
    return Value::Number(i.into());
  }
  if let Ok(u) = text.parse::<u64>() {
    return Value::Number(u.into());
  }
  text
    .parse::<f64>()
    .ok()
    .and_then(Number::from_f64)
    .map(Value::Number)
    .unwrap_or_else(|| Value::String(text.to_string()))
}
