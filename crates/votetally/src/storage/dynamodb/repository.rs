//! DynamoDB item store implementation.
//!
//! Implements `votetally_core::storage::ItemStore` using DynamoDB.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::operation::query::builders::QueryFluentBuilder;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;

use votetally_core::storage::{ItemStore, Result, StoreError};
use votetally_core::tally::VoteRecord;

use super::conversions::item_to_vote_record;
use super::error::map_sdk_error;

type Item = HashMap<String, AttributeValue>;

/// DynamoDB-backed table of vote records.
///
/// Both operations issue a single request; result pagination is not
/// followed.
pub struct DynamoDbItemStore {
    client: Client,
    table_name: String,
    partition_key: String,
    sort_key: Option<String>,
}

impl DynamoDbItemStore {
    /// Creates a new store over `table_name`, keyed by `partition_key`.
    pub fn new(
        client: Client,
        table_name: impl Into<String>,
        partition_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            table_name: table_name.into(),
            partition_key: partition_key.into(),
            sort_key: None,
        }
    }

    /// Records the table's sort-key attribute.
    pub fn with_sort_key(mut self, sort_key: impl Into<String>) -> Self {
        self.sort_key = Some(sort_key.into());
        self
    }

    /// Get the sort-key attribute, if the table has one.
    pub fn sort_key(&self) -> Option<&str> {
        self.sort_key.as_deref()
    }

    /// Query matching `search_value` on the partition key only.
    fn query_request(&self, search_value: &str) -> QueryFluentBuilder {
        self.client
            .query()
            .table_name(&self.table_name)
            .key_condition_expression("#pk = :value")
            .expression_attribute_names("#pk", &self.partition_key)
            .expression_attribute_values(":value", AttributeValue::S(search_value.to_string()))
    }

    /// First item of a query response, or `EmptyQueryResult` when there is none.
    fn first_record(&self, items: Option<Vec<Item>>, search_value: &str) -> Result<VoteRecord> {
        let item = items
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::EmptyQueryResult {
                table_name: self.table_name.clone(),
                partition_key: self.partition_key.clone(),
                search_value: search_value.to_string(),
            })?;

        item_to_vote_record(&item, &self.partition_key, &self.table_name)
    }

    /// Every item of a scan response, or `EmptyScanResult` when there are none.
    fn all_records(&self, items: Option<Vec<Item>>) -> Result<Vec<VoteRecord>> {
        let items = items.unwrap_or_default();
        if items.is_empty() {
            return Err(StoreError::EmptyScanResult {
                table_name: self.table_name.clone(),
            });
        }

        items
            .iter()
            .map(|item| item_to_vote_record(item, &self.partition_key, &self.table_name))
            .collect()
    }
}

#[async_trait]
impl ItemStore for DynamoDbItemStore {
    async fn query(&self, search_value: &str) -> Result<VoteRecord> {
        tracing::trace!(
            table = %self.table_name,
            partition_key = %self.partition_key,
            sort_key = ?self.sort_key,
            search_value,
            "Querying votes table"
        );

        let result = self
            .query_request(search_value)
            .send()
            .await
            .map_err(map_sdk_error)?;

        self.first_record(result.items, search_value)
    }

    async fn scan(&self) -> Result<Vec<VoteRecord>> {
        tracing::trace!(table = %self.table_name, "Scanning votes table");

        let result = self
            .client
            .scan()
            .table_name(&self.table_name)
            .send()
            .await
            .map_err(map_sdk_error)?;

        self.all_records(result.items)
    }
}
