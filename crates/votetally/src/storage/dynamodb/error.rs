//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `StoreError` from `votetally_core::storage`.

use std::error::Error;
use std::fmt::Debug;

use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use votetally_core::storage::StoreError;

/// Code reported when the service response carries none.
pub const UNKNOWN_ERROR_CODE: &str = "Unknown";

/// Map a Query or Scan SDK error to StoreError.
///
/// Errors returned by the service keep their code and message. Failures
/// before a response (construction, dispatch, timeout) become
/// `StoreError::Unavailable`.
pub fn map_sdk_error<E, R>(err: SdkError<E, R>) -> StoreError
where
    E: ProvideErrorMetadata + Error + Send + Sync + 'static,
    R: Debug + Send + Sync + 'static,
{
    match err {
        SdkError::ServiceError(service) => {
            let err = service.err();
            StoreError::DynamoService {
                code: err.code().unwrap_or(UNKNOWN_ERROR_CODE).to_string(),
                message: err.message().unwrap_or_default().to_string(),
            }
        }
        other => StoreError::Unavailable(DisplayErrorContext(other).to_string()),
    }
}
