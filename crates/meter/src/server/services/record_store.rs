//! Record store abstraction
//!
//! The store holds schema-free JSON records keyed by a primary key field that
//! only the backing store knows about. Implementations never cache: every scan
//! reads the whole collection again.

use async_trait::async_trait;

use crate::error::{MeterError, MeterResult};
use crate::server::models::Record;

/// Create/read-all access to the backing document store
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
  /// Write one record, replacing any item that shares its primary key
  async fn put_record(&self, record: Record) -> MeterResult<()>;

  /// Read every record, following the store's pagination to the end
  async fn scan_all(&self) -> MeterResult<Vec<Record>>;
}

/// Validate and write an uploaded record
pub async fn upload(store: &dyn RecordStore, record: Record) -> MeterResult<()> {
  if record.is_empty() {
    return Err(MeterError::Validation("No data provided".to_string()));
  }
  store.put_record(record).await
}

/// Read the full collection in scan order
pub async fn fetch_all(store: &dyn RecordStore) -> MeterResult<Vec<Record>> {
  store.scan_all().await
}
