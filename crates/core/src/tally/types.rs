use std::fmt;

use serde::{Deserialize, Serialize};

/// Reserved vote type that asks for the sum over every record.
pub const ALL_VOTE_TYPE: &str = "ALL";

/// One vote type's tally as stored in the item store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VoteRecord {
    pub id: String,
    pub count: u64,
}

impl VoteRecord {
    pub fn new(id: impl Into<String>, count: u64) -> Self {
        Self {
            id: id.into(),
            count,
        }
    }
}

/// Response payload of a tally invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TallyResult {
    pub id: String,
    pub count: u64,
}

impl TallyResult {
    /// Result for the `ALL` aggregate.
    pub fn all(count: u64) -> Self {
        Self {
            id: ALL_VOTE_TYPE.to_string(),
            count,
        }
    }
}

impl From<VoteRecord> for TallyResult {
    fn from(record: VoteRecord) -> Self {
        Self {
            id: record.id,
            count: record.count,
        }
    }
}

/// The configured set of valid vote types, stored uppercase.
///
/// `ALL` is never added implicitly; the aggregate is recognised before
/// membership is checked.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VoteTypes(Vec<String>);

impl VoteTypes {
    /// Parses a comma-separated list such as `YES,NO`.
    ///
    /// Entries are trimmed and uppercased; blank entries and duplicates are
    /// dropped while keeping the first-seen order.
    pub fn parse(raw: &str) -> Self {
        let mut types: Vec<String> = Vec::new();
        for entry in raw.split(',') {
            let entry = entry.trim().to_uppercase();
            if !entry.is_empty() && !types.contains(&entry) {
                types.push(entry);
            }
        }
        Self(types)
    }

    pub fn contains(&self, vote_type: &str) -> bool {
        self.0.iter().any(|t| t == vote_type)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Text of the membership constraint used in validation messages.
    pub fn constraint(&self) -> String {
        format!("Member must satisfy enum value set: {self}")
    }
}

impl fmt::Display for VoteTypes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}

impl<S: Into<String>> FromIterator<S> for VoteTypes {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let joined: Vec<String> = iter.into_iter().map(Into::into).collect();
        Self::parse(&joined.join(","))
    }
}
