//! S3 error mapping.

use std::error::Error;
use std::fmt::Debug;

use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use votetally_core::storage::StoreError;

const UNKNOWN_ERROR_CODE: &str = "Unknown";

/// Map a ListObjectsV2 or DeleteObject SDK error to StoreError.
///
/// Any rejection reported by S3 during a bulk delete is a
/// `StoreError::S3DeleteObject`.
pub fn map_sdk_error<E, R>(err: SdkError<E, R>) -> StoreError
where
    E: ProvideErrorMetadata + Error + Send + Sync + 'static,
    R: Debug + Send + Sync + 'static,
{
    match err {
        SdkError::ServiceError(service) => {
            let err = service.err();
            StoreError::S3DeleteObject {
                code: err.code().unwrap_or(UNKNOWN_ERROR_CODE).to_string(),
                message: err.message().unwrap_or_default().to_string(),
            }
        }
        other => StoreError::Unavailable(DisplayErrorContext(other).to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_s3::error::ErrorMetadata;
    use aws_sdk_s3::operation::delete_object::DeleteObjectError;
    use aws_sdk_s3::operation::list_objects_v2::ListObjectsV2Error;

    #[test]
    fn test_delete_rejection() {
        let err: SdkError<DeleteObjectError, ()> = SdkError::service_error(
            DeleteObjectError::generic(
                ErrorMetadata::builder()
                    .code("AccessDenied")
                    .message("Access Denied")
                    .build(),
            ),
            (),
        );

        let mapped = map_sdk_error(err);
        assert_eq!(
            mapped.to_string(),
            "S3DeleteObjectError: Exception 'AccessDenied' raised: Access Denied"
        );
    }

    #[test]
    fn test_list_rejection_is_delete_error() {
        let err: SdkError<ListObjectsV2Error, ()> = SdkError::service_error(
            ListObjectsV2Error::generic(ErrorMetadata::builder().code("NoSuchBucket").build()),
            (),
        );

        assert!(matches!(
            map_sdk_error(err),
            StoreError::S3DeleteObject { code, .. } if code == "NoSuchBucket"
        ));
    }

    #[test]
    fn test_dispatch_failure_is_unavailable() {
        let err: SdkError<ListObjectsV2Error, ()> = SdkError::timeout_error("connect timeout");
        assert!(matches!(map_sdk_error(err), StoreError::Unavailable(_)));
    }
}
