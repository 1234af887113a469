//! Storage backend implementations.
//!
//! Concrete implementations of the store traits defined in
//! `votetally_core::storage`:
//!
//! - `dynamodb`: the votes table, using `aws-sdk-dynamodb`
//! - `s3`: bucket purging, using `aws-sdk-s3`
//! - `inmemory`: seeded tables for tests and `votetally invoke --seed`

pub mod dynamodb;
pub mod inmemory;
pub mod s3;

pub use dynamodb::DynamoDbItemStore;
pub use inmemory::InMemoryItemStore;
pub use s3::S3ObjectStore;
