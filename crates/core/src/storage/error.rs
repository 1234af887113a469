use thiserror::Error;

/// Errors that can occur during item-store and object-store operations.
///
/// The first four variants belong to the reportable taxonomy: the handler
/// logs their message and terminates the invocation. `InvalidItem` and
/// `Unavailable` are faults outside it and propagate to the runtime as-is.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("DynamoServiceError: Exception '{code}' raised: {message}")]
    DynamoService { code: String, message: String },
    #[error("S3DeleteObjectError: Exception '{code}' raised: {message}")]
    S3DeleteObject { code: String, message: String },
    #[error(
        "EmptyDynamoResultError: Empty DynamoDB response received: No key '{partition_key}' with value '{search_value}' in table '{table_name}'"
    )]
    EmptyQueryResult {
        table_name: String,
        partition_key: String,
        search_value: String,
    },
    #[error(
        "EmptyDynamoResultError: Empty DynamoDB response received: scan of table '{table_name}' returned empty response."
    )]
    EmptyScanResult { table_name: String },
    #[error("Invalid item in table '{table_name}': {reason}")]
    InvalidItem { table_name: String, reason: String },
    #[error("Backend unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Name of the failure class, shared by both empty-result forms.
    pub fn kind(&self) -> &'static str {
        match self {
            StoreError::DynamoService { .. } => "DynamoServiceError",
            StoreError::S3DeleteObject { .. } => "S3DeleteObjectError",
            StoreError::EmptyQueryResult { .. } | StoreError::EmptyScanResult { .. } => {
                "EmptyDynamoResultError"
            }
            StoreError::InvalidItem { .. } => "InvalidItem",
            StoreError::Unavailable(_) => "Unavailable",
        }
    }

    /// Whether the handler boundary logs and terminates on this error.
    pub fn is_taxonomy(&self) -> bool {
        !matches!(
            self,
            StoreError::InvalidItem { .. } | StoreError::Unavailable(_)
        )
    }
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;
