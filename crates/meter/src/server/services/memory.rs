//! In-process record store for local development and tests

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::record_store::RecordStore;
use crate::error::MeterResult;
use crate::server::models::Record;

/// Vector-backed store that mimics put-item overwrite semantics on one key field
pub struct MemoryRecordStore {
  primary_key: String,
  records: RwLock<Vec<Record>>,
}

impl MemoryRecordStore {
  pub fn new(primary_key: impl Into<String>) -> Self {
    Self { primary_key: primary_key.into(), records: RwLock::new(Vec::new()) }
  }

  /// Start with a fixed collection, as if every record had been uploaded in order
  pub fn with_records(primary_key: impl Into<String>, records: Vec<Record>) -> Self {
    Self { primary_key: primary_key.into(), records: RwLock::new(records) }
  }

  pub async fn len(&self) -> usize {
    self.records.read().await.len()
  }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
  async fn put_record(&self, record: Record) -> MeterResult<()> {
    let mut records = self.records.write().await;

    let existing = record.get(&self.primary_key).and_then(|key| {
      records.iter().position(|stored| stored.get(&self.primary_key) == Some(key))
    });

    match existing {
      Some(index) => records[index] = record,
      None => records.push(record),
    }
    Ok(())
  }

  async fn scan_all(&self) -> MeterResult<Vec<Record>> {
    Ok(self.records.read().await.clone())
  }
}
