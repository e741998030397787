//! Storage collaborator interface.
//!
//! The engine never persists anything itself. Callers that keep calculation
//! history hand results to a [`TaxRecordStore`], which lays them out over a
//! generic [`KeyValueStore`] using keys namespaced by user and timestamp:
//!
//! ```text
//! tax-record:{user_id}:{unix_millis}
//! ```
//!
//! [`MemoryStore`] is an in-process implementation for tests and tooling.

pub mod memory;
pub mod record;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub use memory::MemoryStore;
pub use record::{RECORD_TYPE_CALCULATION, TaxRecord, TaxRecordStore, record_key, record_prefix};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Backend error: {0}")]
    Backend(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Generic key-value persistence, as provided by the hosting backend.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn set(
        &self,
        key: &str,
        value: Value,
    ) -> Result<(), StoreError>;

    async fn get(
        &self,
        key: &str,
    ) -> Result<Option<Value>, StoreError>;

    /// Every value whose key starts with `prefix`, in key order.
    async fn get_by_prefix(
        &self,
        prefix: &str,
    ) -> Result<Vec<Value>, StoreError>;
}
