mod error;
mod operations;
mod requests;
mod types;

pub use error::{EventError, TallyError};
pub use operations::{sum_counts, tally_all};
pub use requests::{parse_event, VoteRequest, VOTE_TYPE_KEY};
pub use types::{TallyResult, VoteRecord, VoteTypes, ALL_VOTE_TYPE};
