//! Server configuration
//!
//! Settings are read once at startup from flags or `METER_*` environment
//! variables and handed to the router as read-only state.

use anyhow::{anyhow, Result};
use clap::{Parser, ValueEnum};
use std::net::SocketAddr;

pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_PRIMARY_KEY: &str = "id";

/// Which implementation backs the record store and the predictor
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
  /// DynamoDB table and Lambda function
  Aws,
  /// In-process store and an echoing predictor, for local development
  Memory,
}

impl Backend {
  pub fn as_str(&self) -> &'static str {
    match self {
      Backend::Aws => "aws",
      Backend::Memory => "memory",
    }
  }
}

#[derive(Debug, Parser)]
#[command(name = "meter_server")]
#[command(about = "Meter REST API Server")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), ", courtesy of Kernelle Software"))]
pub struct ServerArgs {
  /// Server bind address
  #[arg(long, env = "METER_BIND", default_value = "0.0.0.0:5000")]
  pub bind: SocketAddr,

  /// AWS region for the table and the function
  #[arg(long, env = "METER_REGION", default_value = DEFAULT_REGION)]
  pub region: String,

  /// DynamoDB table holding the local records
  #[arg(long, env = "METER_TABLE")]
  pub table: Option<String>,

  /// Lambda function answering prediction requests
  #[arg(long, env = "METER_FUNCTION")]
  pub function: Option<String>,

  /// Override the AWS endpoint (e.g. a local DynamoDB or Lambda emulator)
  #[arg(long, env = "METER_ENDPOINT_URL")]
  pub endpoint_url: Option<String>,

  /// Storage and prediction backend
  #[arg(long, env = "METER_BACKEND", value_enum, default_value = "aws")]
  pub backend: Backend,

  /// Primary key field used by the in-memory store
  #[arg(long, env = "METER_PRIMARY_KEY", default_value = DEFAULT_PRIMARY_KEY)]
  pub primary_key: String,

  /// Enable verbose logging
  #[arg(short, long)]
  pub verbose: bool,
}

/// Validated, process-wide settings
#[derive(Debug, Clone)]
pub struct Settings {
  pub bind: SocketAddr,
  pub region: String,
  pub table_name: String,
  pub function_name: String,
  pub endpoint_url: Option<String>,
  pub backend: Backend,
  pub primary_key: String,
}

impl ServerArgs {
  /// Check backend requirements and freeze the arguments into `Settings`
  pub fn settings(&self) -> Result<Settings> {
    let (table_name, function_name) = match self.backend {
      Backend::Aws => {
        let table = self
          .table
          .clone()
          .ok_or_else(|| anyhow!("--table (or METER_TABLE) is required for the aws backend"))?;
        let function = self.function.clone().ok_or_else(|| {
          anyhow!("--function (or METER_FUNCTION) is required for the aws backend")
        })?;
        (table, function)
      }
      Backend::Memory => (
        self.table.clone().unwrap_or_else(|| "memory".to_string()),
        self.function.clone().unwrap_or_else(|| "echo".to_string()),
      ),
    };

    if self.primary_key.trim().is_empty() {
      return Err(anyhow!("--primary-key must not be empty"));
    }

    Ok(Settings {
      bind: self.bind,
      region: self.region.clone(),
      table_name,
      function_name,
      endpoint_url: self.endpoint_url.clone(),
      backend: self.backend,
      primary_key: self.primary_key.clone(),
    })
  }
}

impl Settings {
  /// Load the shared AWS SDK configuration for this region and endpoint
  pub async fn aws_config(&self) -> aws_config::SdkConfig {
    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
      .region(aws_config::Region::new(self.region.clone()));

    if let Some(endpoint) = &self.endpoint_url {
      loader = loader.endpoint_url(endpoint);
    }

    loader.load().await
  }
}
