use anyhow::{anyhow, Context, Result};
use colored::*;
use serde_json::Value;
use std::path::Path;

use crate::cli::client::MeterClient;
use crate::cli::display::{display_comparisons, display_records};

/// Read a JSON argument given inline or as `@path/to/file.json`
pub fn read_json_arg(arg: &str) -> Result<Value> {
  let text = match arg.strip_prefix('@') {
    Some(path) => std::fs::read_to_string(Path::new(path))
      .with_context(|| format!("could not read {path}"))?,
    None => arg.to_string(),
  };

  let value: Value = serde_json::from_str(&text).context("argument is not valid JSON")?;
  match &value {
    Value::Object(map) if !map.is_empty() => Ok(value),
    _ => Err(anyhow!("expected a non-empty JSON object")),
  }
}

pub async fn upload(client: &MeterClient, input: &str) -> Result<()> {
  let record = read_json_arg(input)?;
  let message = client.upload(&record).await?;

  println!("{} {}", "✓".green(), message);
  Ok(())
}

pub async fn predict(client: &MeterClient, input: &str) -> Result<()> {
  let payload = read_json_arg(input)?;
  let prediction = client.predict(&payload).await?;

  println!("{}", serde_json::to_string_pretty(&prediction)?);
  Ok(())
}

pub async fn local_data(client: &MeterClient, json: bool) -> Result<()> {
  let records = client.local_data().await?;

  if json {
    println!("{}", serde_json::to_string_pretty(&records)?);
  } else {
    display_records(&records);
  }
  Ok(())
}

pub async fn compare(client: &MeterClient, input: &str, json: bool) -> Result<()> {
  let metrics = read_json_arg(input)?;
  let results = client.compare(&metrics).await?;

  if json {
    println!("{}", serde_json::to_string_pretty(&results)?);
  } else {
    display_comparisons(&results);
  }
  Ok(())
}

pub async fn status(client: &MeterClient) -> Result<()> {
  let status = client.status().await?;

  println!("{} meter server v{} is {}", "●".green(), status.version, status.status.green());
  println!("  backend  {}", status.backend.cyan());
  println!("  table    {}", status.table);
  println!("  function {}", status.function);
  println!("  started  {}", status.started_at.to_rfc3339());
  Ok(())
}
