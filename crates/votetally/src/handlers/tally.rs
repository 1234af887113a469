//! Vote tally handler.
//!
//! Validates the event, answers from the votes table, and is the single
//! place where reportable failures are logged.

use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;

use votetally_core::tally::{parse_event, tally_all, TallyError, TallyResult, VoteRequest};

use crate::error::{HandlerError, InvocationTerminated};
use crate::state::AppState;

/// Lambda entry point.
pub async fn function_handler(
    state: &AppState,
    event: LambdaEvent<Value>,
) -> Result<TallyResult, Error> {
    let (payload, context) = event.into_parts();
    tracing::trace!(request_id = %context.request_id, "Processing event");

    Ok(handle(state, payload).await?)
}

/// Runs one invocation and applies the failure policy.
///
/// Reportable failures are logged once at ERROR and replaced by
/// [`InvocationTerminated`]. Anything else escapes as [`HandlerError::Fault`].
/// Success logs nothing above TRACE.
pub async fn handle(state: &AppState, event: Value) -> Result<TallyResult, HandlerError> {
    match get_count(state, &event).await {
        Ok(result) => Ok(result),
        Err(err) if err.is_taxonomy() => {
            tracing::error!(kind = err.kind(), "{err}");
            Err(InvocationTerminated.into())
        }
        Err(err) => Err(HandlerError::Fault(err)),
    }
}

/// Returns the count for the requested vote type, or the sum for `ALL`.
pub async fn get_count(state: &AppState, event: &Value) -> Result<TallyResult, TallyError> {
    let request = parse_event(event, &state.valid_vote_types)?;
    tracing::trace!(vote_type = request.vote_type(), "Validated event");

    match request {
        VoteRequest::All => {
            let records = state.votes.scan().await?;
            Ok(tally_all(&records)?)
        }
        VoteRequest::Single(vote_type) => Ok(state.votes.query(&vote_type).await?.into()),
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use serde_json::json;
    use tracing_subscriber::fmt::MakeWriter;
    use votetally_core::storage::StoreError;
    use votetally_core::tally::{EventError, VoteRecord, VoteTypes};

    use super::*;
    use crate::storage::InMemoryItemStore;

    /// Captures formatted log output for assertions.
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }

        fn error_lines(&self) -> Vec<String> {
            self.contents()
                .lines()
                .filter(|line| line.contains("ERROR"))
                .map(str::to_string)
                .collect()
        }
    }

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for LogBuffer {
        type Writer = LogBuffer;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn capture_logs() -> (LogBuffer, tracing::subscriber::DefaultGuard) {
        let buffer = LogBuffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(buffer.clone())
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .without_time()
            .finish();
        let guard = tracing::subscriber::set_default(subscriber);
        (buffer, guard)
    }

    fn event(vote_type: &str) -> Value {
        json!({ "Details": { "Parameters": { "VoteType": vote_type } } })
    }

    async fn state_with(records: &[(&str, u64)]) -> (AppState, InMemoryItemStore) {
        let store = InMemoryItemStore::new("Votes", "Id");
        for (id, count) in records {
            store.put(VoteRecord::new(*id, *count)).await;
        }
        let state = AppState::new(Arc::new(store.clone()), VoteTypes::parse("YES,NO"));
        (state, store)
    }

    // ==================== get_count ====================

    #[tokio::test]
    async fn test_all_sums_every_record() {
        let (state, _) = state_with(&[("YES", 3), ("NO", 5)]).await;
        let result = get_count(&state, &event("ALL")).await.unwrap();
        assert_eq!(result, TallyResult::all(8));
    }

    #[tokio::test]
    async fn test_single_type_passes_record_through() {
        let (state, _) = state_with(&[("YES", 3), ("NO", 5)]).await;
        let result = get_count(&state, &event("yes")).await.unwrap();
        assert_eq!(
            result,
            TallyResult {
                id: "YES".to_string(),
                count: 3
            }
        );
    }

    #[tokio::test]
    async fn test_valid_type_absent_from_table() {
        let (state, _) = state_with(&[("YES", 3)]).await;
        let err = get_count(&state, &event("NO")).await.unwrap_err();
        assert_eq!(
            err,
            TallyError::Store(StoreError::EmptyQueryResult {
                table_name: "Votes".to_string(),
                partition_key: "Id".to_string(),
                search_value: "NO".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_validation_runs_before_storage() {
        let (state, store) = state_with(&[("YES", 3)]).await;
        store
            .fail_with(StoreError::Unavailable("should not be reached".to_string()))
            .await;

        let err = get_count(&state, &event("MAYBE")).await.unwrap_err();
        assert!(matches!(
            err,
            TallyError::Event(EventError::EventValidation { .. })
        ));
    }

    #[tokio::test]
    async fn test_service_error_propagates() {
        let (state, store) = state_with(&[("YES", 3)]).await;
        store
            .fail_with(StoreError::DynamoService {
                code: "ResourceNotFoundException".to_string(),
                message: "Requested resource not found".to_string(),
            })
            .await;

        let err = get_count(&state, &event("ALL")).await.unwrap_err();
        assert_eq!(err.kind(), "DynamoServiceError");
    }

    // ==================== handle: success ====================

    #[tokio::test]
    async fn test_scenario_a_all() {
        let (state, _) = state_with(&[("YES", 3), ("NO", 5)]).await;
        let (logs, _guard) = capture_logs();

        let result = handle(&state, event("ALL")).await.unwrap();

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({ "Id": "ALL", "Count": 8 })
        );
        assert!(logs.contents().is_empty());
    }

    #[tokio::test]
    async fn test_scenario_b_lowercase_single_type() {
        let (state, _) = state_with(&[("YES", 3), ("NO", 5)]).await;
        let (logs, _guard) = capture_logs();

        let result = handle(&state, event("yes")).await.unwrap();

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({ "Id": "YES", "Count": 3 })
        );
        assert!(logs.contents().is_empty());
    }

    // ==================== handle: terminated ====================

    #[tokio::test]
    async fn test_scenario_c_empty_table() {
        let (state, _) = state_with(&[]).await;
        let (logs, _guard) = capture_logs();

        let err = handle(&state, event("ALL")).await.unwrap_err();

        assert!(matches!(err, HandlerError::Terminated(InvocationTerminated)));
        let errors = logs.error_lines();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("scan of table 'Votes' returned empty response."));
    }

    #[tokio::test]
    async fn test_scenario_d_missing_vote_type() {
        let (state, _) = state_with(&[("YES", 3)]).await;
        let (logs, _guard) = capture_logs();

        let err = handle(&state, json!({ "Details": { "Parameters": {} } }))
            .await
            .unwrap_err();

        assert!(matches!(err, HandlerError::Terminated(_)));
        let errors = logs.error_lines();
        assert_eq!(errors.len(), 1);
        assert!(errors[0]
            .contains("MissingEventKeyError: Key 'VoteType' is missing from received event"));
    }

    #[tokio::test]
    async fn test_scenario_e_value_outside_set() {
        let (state, _) = state_with(&[("YES", 3), ("NO", 5)]).await;
        let (logs, _guard) = capture_logs();

        let err = handle(&state, event("MAYBE")).await.unwrap_err();

        assert!(matches!(err, HandlerError::Terminated(_)));
        let errors = logs.error_lines();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("Value 'MAYBE' at key 'VoteType'"));
        assert!(errors[0].contains("Member must satisfy enum value set: [YES, NO]"));
    }

    #[tokio::test]
    async fn test_empty_vote_type_is_terminated() {
        let (state, _) = state_with(&[("YES", 3)]).await;
        let (logs, _guard) = capture_logs();

        let err = handle(&state, event("")).await.unwrap_err();

        assert!(matches!(err, HandlerError::Terminated(_)));
        assert!(logs.error_lines()[0].contains("EmptyEventValue: Key 'VoteType'"));
    }

    // ==================== handle: faults ====================

    #[tokio::test]
    async fn test_all_overflow_is_fault() {
        let (state, _) = state_with(&[("YES", u64::MAX), ("NO", 1)]).await;
        let (logs, _guard) = capture_logs();

        let err = handle(&state, event("ALL")).await.unwrap_err();

        assert!(matches!(
            err,
            HandlerError::Fault(TallyError::CountOverflow { records: 2 })
        ));
        assert!(logs.error_lines().is_empty());
    }

    #[tokio::test]
    async fn test_fault_outside_taxonomy_is_not_logged() {
        let (state, store) = state_with(&[("YES", 3)]).await;
        store
            .fail_with(StoreError::Unavailable("dispatch failure".to_string()))
            .await;
        let (logs, _guard) = capture_logs();

        let err = handle(&state, event("YES")).await.unwrap_err();

        assert!(matches!(
            err,
            HandlerError::Fault(TallyError::Store(StoreError::Unavailable(_)))
        ));
        assert!(logs.error_lines().is_empty());
    }
}
