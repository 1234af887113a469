//! Validation of inbound tally events.
//!
//! The event follows the Amazon Connect contact-flow shape; the only field
//! read is `Details.Parameters.VoteType`. Validation produces a typed
//! [`VoteRequest`] or the matching [`EventError`], with no I/O.

use serde_json::Value;

use super::error::EventError;
use super::types::{VoteTypes, ALL_VOTE_TYPE};

/// Name of the event key holding the requested vote type.
pub const VOTE_TYPE_KEY: &str = "VoteType";

const VOTE_TYPE_PATH: [&str; 3] = ["Details", "Parameters", VOTE_TYPE_KEY];

/// A validated tally request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteRequest {
    /// Sum over every stored vote type.
    All,
    /// Count of one vote type, uppercase.
    Single(String),
}

impl VoteRequest {
    /// The normalized vote type as it appears in responses.
    pub fn vote_type(&self) -> &str {
        match self {
            VoteRequest::All => ALL_VOTE_TYPE,
            VoteRequest::Single(vote_type) => vote_type,
        }
    }
}

/// Extracts and validates the vote type from a raw event.
///
/// `ALL` is accepted before the membership check, so it never has to be
/// part of `valid_types`.
pub fn parse_event(event: &Value, valid_types: &VoteTypes) -> Result<VoteRequest, EventError> {
    let raw = VOTE_TYPE_PATH
        .iter()
        .try_fold(event, |node, key| node.get(key))
        .ok_or_else(|| EventError::MissingEventKey {
            key: VOTE_TYPE_KEY.to_string(),
        })?;

    let vote_type = match raw {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.to_uppercase()),
        other => {
            return Err(EventError::EventValidation {
                key: VOTE_TYPE_KEY.to_string(),
                value: other.to_string(),
                constraint: "Member must be of type string".to_string(),
            })
        }
    }
    .ok_or_else(|| EventError::EmptyEventValue {
        key: VOTE_TYPE_KEY.to_string(),
    })?;

    if vote_type == ALL_VOTE_TYPE {
        return Ok(VoteRequest::All);
    }

    if !valid_types.contains(&vote_type) {
        return Err(EventError::EventValidation {
            key: VOTE_TYPE_KEY.to_string(),
            value: vote_type,
            constraint: valid_types.constraint(),
        });
    }

    Ok(VoteRequest::Single(vote_type))
}
