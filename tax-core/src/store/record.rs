use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{KeyValueStore, StoreError};
use crate::models::CalculationResult;

/// `type` tag written on calculation records. The same key space also holds
/// manually entered payment records, which are skipped when listing.
pub const RECORD_TYPE_CALCULATION: &str = "calculation";

/// A saved calculation as it is laid out in the key-value store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRecord {
    #[serde(rename = "type")]
    pub record_type: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub result: CalculationResult,
}

impl TaxRecord {
    pub fn calculation(
        user_id: &str,
        result: CalculationResult,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            record_type: RECORD_TYPE_CALCULATION.to_string(),
            user_id: user_id.to_string(),
            created_at,
            result,
        }
    }
}

/// Key prefix shared by every record of `user_id`.
pub fn record_prefix(user_id: &str) -> String {
    format!("tax-record:{user_id}:")
}

/// Key for a record of `user_id` created at `created_at`.
pub fn record_key(
    user_id: &str,
    created_at: DateTime<Utc>,
) -> String {
    format!("{}{}", record_prefix(user_id), created_at.timestamp_millis())
}

/// Saves and lists calculation records over any [`KeyValueStore`].
pub struct TaxRecordStore<K> {
    kv: K,
}

impl<K: KeyValueStore> TaxRecordStore<K> {
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    pub fn inner(&self) -> &K {
        &self.kv
    }

    /// Persists `result` for `user_id` and returns the key it was stored under.
    pub async fn save_calculation(
        &self,
        user_id: &str,
        result: &CalculationResult,
        created_at: DateTime<Utc>,
    ) -> Result<String, StoreError> {
        let key = record_key(user_id, created_at);
        let record = TaxRecord::calculation(user_id, result.clone(), created_at);

        self.kv.set(&key, serde_json::to_value(&record)?).await?;
        debug!(%key, "tax record saved");

        Ok(key)
    }

    /// Calculation records of `user_id`, newest first.
    pub async fn list_records(
        &self,
        user_id: &str,
    ) -> Result<Vec<TaxRecord>, StoreError> {
        let values = self.kv.get_by_prefix(&record_prefix(user_id)).await?;

        let mut records = Vec::with_capacity(values.len());
        for value in values {
            if value.get("type").and_then(|t| t.as_str()) != Some(RECORD_TYPE_CALCULATION) {
                continue;
            }
            records.push(serde_json::from_value::<TaxRecord>(value)?);
        }

        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }
}
