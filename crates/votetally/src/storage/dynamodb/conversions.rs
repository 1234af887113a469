//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting DynamoDB items into vote records.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use votetally_core::storage::StoreError;
use votetally_core::tally::VoteRecord;

/// Attribute holding a vote type's tally.
pub const COUNT_ATTRIBUTE: &str = "Count";

/// Convert a DynamoDB item to VoteRecord.
///
/// The id is read from the table's partition-key attribute.
pub fn item_to_vote_record(
    item: &HashMap<String, AttributeValue>,
    partition_key: &str,
    table_name: &str,
) -> Result<VoteRecord, StoreError> {
    let invalid = |reason: String| StoreError::InvalidItem {
        table_name: table_name.to_string(),
        reason,
    };

    let id = item
        .get(partition_key)
        .and_then(|v| v.as_s().ok())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| invalid(format!("Missing or invalid field: {partition_key}")))?;

    let raw_count = match item.get(COUNT_ATTRIBUTE) {
        Some(AttributeValue::N(n)) => n,
        Some(AttributeValue::S(s)) => s,
        _ => return Err(invalid(format!("Missing or invalid field: {COUNT_ATTRIBUTE}"))),
    };
    let count = parse_count(raw_count)
        .ok_or_else(|| invalid(format!("{COUNT_ATTRIBUTE} of '{id}' is not a count: {raw_count}")))?;

    Ok(VoteRecord::new(id.clone(), count))
}

/// Parses a non-negative integer, allowing an all-zero fraction (`"3.0"`).
fn parse_count(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    match raw.split_once('.') {
        None => raw.parse().ok(),
        Some((whole, fraction)) if fraction.chars().all(|c| c == '0') => whole.parse().ok(),
        Some(_) => None,
    }
}
