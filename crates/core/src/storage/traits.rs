use async_trait::async_trait;

use crate::tally::VoteRecord;

use super::Result;

/// Keyed lookup and full scan over the table of vote records.
///
/// An empty answer is never a success: both operations fail with the
/// matching `EmptyQueryResult` / `EmptyScanResult` variant instead.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Returns the first record whose partition key equals `search_value`.
    async fn query(&self, search_value: &str) -> Result<VoteRecord>;

    /// Returns every record in the table in a single pass.
    async fn scan(&self) -> Result<Vec<VoteRecord>>;
}

/// Destructive access to a bucket of objects.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Name of the backing bucket.
    fn bucket_name(&self) -> &str;

    /// Deletes every object in the bucket, one at a time.
    ///
    /// Returns the number of deleted objects. Deletions that completed before
    /// a failure stay deleted.
    async fn delete_all(&self) -> Result<usize>;
}
