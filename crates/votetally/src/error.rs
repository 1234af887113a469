use thiserror::Error;
use votetally_core::tally::TallyError;

/// Signals that an invocation was logged and aborted.
///
/// Its text carries no request data; the cause is only in the logs.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Undefined error.  See CloudWatch logs for more details.")]
pub struct InvocationTerminated;

/// Outcome of a failed invocation, as seen by the runtime.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// A reportable failure, already logged at the boundary.
    #[error(transparent)]
    Terminated(#[from] InvocationTerminated),
    /// A fault outside the reportable taxonomy, propagated unhandled.
    #[error(transparent)]
    Fault(TallyError),
}
