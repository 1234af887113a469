//! Functional core for the votetally function.
//!
//! Pure types, validation and aggregation live here together with the
//! storage contracts. Backends and the Lambda entry point live in the
//! `votetally` crate.

pub mod storage;
pub mod tally;
