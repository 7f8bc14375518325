//! Shared, read-only application state handed to every handler

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::config::{Backend, Settings};
use crate::server::services::dynamodb::DynamoRecordStore;
use crate::server::services::lambda::LambdaPredictor;
use crate::server::services::memory::MemoryRecordStore;
use crate::server::services::predictor::{EchoPredictor, Predictor};
use crate::server::services::record_store::RecordStore;

#[derive(Clone)]
pub struct AppState {
  pub store: Arc<dyn RecordStore>,
  pub predictor: Arc<dyn Predictor>,
  pub info: Arc<ServiceInfo>,
}

/// Descriptive details reported by /status
#[derive(Debug, Clone)]
pub struct ServiceInfo {
  pub table: String,
  pub function: String,
  pub backend: Backend,
  pub started_at: DateTime<Utc>,
}

impl AppState {
  pub fn new(
    store: Arc<dyn RecordStore>,
    predictor: Arc<dyn Predictor>,
    info: ServiceInfo,
  ) -> Self {
    Self { store, predictor, info: Arc::new(info) }
  }

  /// Build the clients named by the settings
  pub async fn from_settings(settings: &Settings) -> Self {
    let info = ServiceInfo {
      table: settings.table_name.clone(),
      function: settings.function_name.clone(),
      backend: settings.backend,
      started_at: Utc::now(),
    };

    match settings.backend {
      Backend::Aws => {
        let aws = settings.aws_config().await;
        Self::new(
          Arc::new(DynamoRecordStore::from_config(&aws, &settings.table_name)),
          Arc::new(LambdaPredictor::from_config(&aws, &settings.function_name)),
          info,
        )
      }
      Backend::Memory => Self::new(
        Arc::new(MemoryRecordStore::new(&settings.primary_key)),
        Arc::new(EchoPredictor),
        info,
      ),
    }
  }

  /// In-memory state for tests and local runs
  pub fn in_memory(store: MemoryRecordStore) -> Self {
    Self::new(
      Arc::new(store),
      Arc::new(EchoPredictor),
      ServiceInfo {
        table: "memory".to_string(),
        function: "echo".to_string(),
        backend: Backend::Memory,
        started_at: Utc::now(),
      },
    )
  }
}
