//! S3 object store implementation.

use async_trait::async_trait;
use aws_sdk_s3::operation::list_objects_v2::ListObjectsV2Output;
use aws_sdk_s3::Client;

use votetally_core::storage::{ObjectStore, Result};

use super::error::map_sdk_error;

/// S3-backed bucket.
pub struct S3ObjectStore {
    client: Client,
    bucket_name: String,
}

impl S3ObjectStore {
    /// Creates a new store over `bucket_name`.
    pub fn new(client: Client, bucket_name: impl Into<String>) -> Self {
        Self {
            client,
            bucket_name: bucket_name.into(),
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    fn bucket_name(&self) -> &str {
        &self.bucket_name
    }

    async fn delete_all(&self) -> Result<usize> {
        delete_every_object(&self.client, &self.bucket_name).await
    }
}

/// One page of a bucket listing.
#[derive(Debug, Default, PartialEq)]
struct ListPage {
    keys: Vec<String>,
    /// Token for the next page; `None` on the last page.
    next_token: Option<String>,
}

impl From<ListObjectsV2Output> for ListPage {
    fn from(output: ListObjectsV2Output) -> Self {
        let keys = output
            .contents()
            .iter()
            .filter_map(|object| object.key())
            .map(str::to_string)
            .collect();
        let next_token = match (output.is_truncated(), output.next_continuation_token()) {
            (Some(true), Some(token)) => Some(token.to_string()),
            _ => None,
        };

        Self { keys, next_token }
    }
}

/// The two bucket calls a bulk delete needs.
#[async_trait]
trait BucketApi: Send + Sync {
    async fn list_page(&self, bucket: &str, token: Option<String>) -> Result<ListPage>;
    async fn delete_key(&self, bucket: &str, key: &str) -> Result<()>;
}

#[async_trait]
impl BucketApi for Client {
    async fn list_page(&self, bucket: &str, token: Option<String>) -> Result<ListPage> {
        let output = self
            .list_objects_v2()
            .bucket(bucket)
            .set_continuation_token(token)
            .send()
            .await
            .map_err(map_sdk_error)?;

        Ok(output.into())
    }

    async fn delete_key(&self, bucket: &str, key: &str) -> Result<()> {
        self.delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(map_sdk_error)?;

        Ok(())
    }
}

/// Lists every page and deletes each object in turn.
///
/// Stops at the first failure. Objects deleted before it stay deleted.
async fn delete_every_object(api: &dyn BucketApi, bucket: &str) -> Result<usize> {
    let mut deleted = 0;
    let mut continuation_token = None;

    loop {
        let page = api.list_page(bucket, continuation_token).await?;

        for key in &page.keys {
            api.delete_key(bucket, key).await?;
            tracing::debug!(bucket, key = %key, "Deleted object");
            deleted += 1;
        }

        match page.next_token {
            Some(token) => continuation_token = Some(token),
            None => break,
        }
    }

    Ok(deleted)
}
