use thiserror::Error;

use crate::storage::StoreError;

/// Errors raised while validating an inbound event.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EventError {
    #[error("MissingEventKeyError: Key '{key}' is missing from received event")]
    MissingEventKey { key: String },
    #[error("EmptyEventValue: Key '{key}' in received event references empty value")]
    EmptyEventValue { key: String },
    #[error("EventValidationError: Value '{value}' at key '{key}' failed to satisfy constraint: {constraint}")]
    EventValidation {
        key: String,
        value: String,
        constraint: String,
    },
}

impl EventError {
    pub fn kind(&self) -> &'static str {
        match self {
            EventError::MissingEventKey { .. } => "MissingEventKeyError",
            EventError::EmptyEventValue { .. } => "EmptyEventValue",
            EventError::EventValidation { .. } => "EventValidationError",
        }
    }
}

/// Any failure of a single tally invocation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TallyError {
    #[error(transparent)]
    Event(#[from] EventError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Vote count overflow: total of {records} records exceeds {}", u64::MAX)]
    CountOverflow { records: usize },
}

impl TallyError {
    pub fn kind(&self) -> &'static str {
        match self {
            TallyError::Event(e) => e.kind(),
            TallyError::Store(e) => e.kind(),
            TallyError::CountOverflow { .. } => "CountOverflow",
        }
    }

    /// Whether the entry boundary logs this error and terminates, rather than
    /// letting it escape as an unhandled fault.
    pub fn is_taxonomy(&self) -> bool {
        match self {
            TallyError::Event(_) => true,
            TallyError::Store(e) => e.is_taxonomy(),
            TallyError::CountOverflow { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_event_key_display() {
        let error = EventError::MissingEventKey {
            key: "VoteType".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "MissingEventKeyError: Key 'VoteType' is missing from received event"
        );
    }

    #[test]
    fn test_empty_event_value_display() {
        let error = EventError::EmptyEventValue {
            key: "VoteType".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "EmptyEventValue: Key 'VoteType' in received event references empty value"
        );
    }

    #[test]
    fn test_event_validation_display() {
        let error = EventError::EventValidation {
            key: "VoteType".to_string(),
            value: "MAYBE".to_string(),
            constraint: "Member must satisfy enum value set: [YES, NO]".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "EventValidationError: Value 'MAYBE' at key 'VoteType' failed to satisfy constraint: Member must satisfy enum value set: [YES, NO]"
        );
    }

    #[test]
    fn test_tally_error_is_transparent() {
        let inner = EventError::EmptyEventValue {
            key: "VoteType".to_string(),
        };
        let error = TallyError::from(inner.clone());
        assert_eq!(error.to_string(), inner.to_string());
        assert_eq!(error.kind(), "EmptyEventValue");
        assert!(error.is_taxonomy());
    }

    #[test]
    fn test_tally_error_store_faults() {
        let error = TallyError::from(StoreError::Unavailable("timeout".to_string()));
        assert!(!error.is_taxonomy());

        let error = TallyError::from(StoreError::EmptyScanResult {
            table_name: "Votes".to_string(),
        });
        assert!(error.is_taxonomy());
        assert_eq!(error.kind(), "EmptyDynamoResultError");
    }

    #[test]
    fn test_count_overflow_display() {
        let error = TallyError::CountOverflow { records: 2 };
        assert_eq!(
            error.to_string(),
            "Vote count overflow: total of 2 records exceeds 18446744073709551615"
        );
        assert_eq!(error.kind(), "CountOverflow");
        assert!(!error.is_taxonomy());
    }
}
