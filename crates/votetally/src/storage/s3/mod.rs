//! S3 object store backend using `aws-sdk-s3`.

mod error;
mod repository;

pub use repository::S3ObjectStore;
