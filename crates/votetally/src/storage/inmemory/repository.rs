//! In-memory store implementations.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use votetally_core::storage::{ItemStore, Result, StoreError};
use votetally_core::tally::VoteRecord;

/// In-memory table of vote records.
///
/// Records keep insertion order. A failure set with [`fail_with`] is returned
/// by every subsequent operation, standing in for a backend rejection.
///
/// [`fail_with`]: InMemoryItemStore::fail_with
#[derive(Debug, Clone)]
pub struct InMemoryItemStore {
    table_name: String,
    partition_key: String,
    records: Arc<RwLock<Vec<VoteRecord>>>,
    failure: Arc<RwLock<Option<StoreError>>>,
}

impl InMemoryItemStore {
    /// Creates a new empty table.
    pub fn new(table_name: impl Into<String>, partition_key: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            partition_key: partition_key.into(),
            records: Arc::new(RwLock::new(Vec::new())),
            failure: Arc::new(RwLock::new(None)),
        }
    }

    /// Inserts a record, replacing any record with the same id.
    pub async fn put(&self, record: VoteRecord) {
        let mut records = self.records.write().await;
        match records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => *existing = record,
            None => records.push(record),
        }
    }

    /// Makes every later operation fail with `error`.
    #[cfg(test)]
    pub async fn fail_with(&self, error: StoreError) {
        *self.failure.write().await = Some(error);
    }

    async fn check_failure(&self) -> Result<()> {
        match self.failure.read().await.as_ref() {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ItemStore for InMemoryItemStore {
    async fn query(&self, search_value: &str) -> Result<VoteRecord> {
        self.check_failure().await?;
        let records = self.records.read().await;
        records
            .iter()
            .find(|r| r.id == search_value)
            .cloned()
            .ok_or_else(|| StoreError::EmptyQueryResult {
                table_name: self.table_name.clone(),
                partition_key: self.partition_key.clone(),
                search_value: search_value.to_string(),
            })
    }

    async fn scan(&self) -> Result<Vec<VoteRecord>> {
        self.check_failure().await?;
        let records = self.records.read().await;
        if records.is_empty() {
            return Err(StoreError::EmptyScanResult {
                table_name: self.table_name.clone(),
            });
        }
        Ok(records.clone())
    }
}
