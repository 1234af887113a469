//! Shared state passed to every invocation.
//!
//! Built once at process start; handlers only read from it.

use std::sync::Arc;

use votetally_core::storage::ItemStore;
use votetally_core::tally::VoteTypes;

#[derive(Clone)]
pub struct AppState {
    /// Table of vote records.
    pub votes: Arc<dyn ItemStore>,
    /// Vote types accepted in events.
    pub valid_vote_types: Arc<VoteTypes>,
}

impl AppState {
    pub fn new(votes: Arc<dyn ItemStore>, valid_vote_types: VoteTypes) -> Self {
        Self {
            votes,
            valid_vote_types: Arc::new(valid_vote_types),
        }
    }
}
