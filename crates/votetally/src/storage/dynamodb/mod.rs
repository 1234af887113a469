//! DynamoDB item store backend.
//!
//! Provides the production `ItemStore` using `aws-sdk-dynamodb`.

mod conversions;
mod error;
mod repository;

pub use repository::DynamoDbItemStore;
