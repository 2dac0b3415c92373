//! Address Matcher - fuzzy postal address resolution
//!
//! This library resolves a loosely formatted address against a list of
//! canonical catalog entries. Each field is scored with a typo-tolerant
//! similarity ratio, the field scores are combined with configurable weights,
//! and candidates below the cutoff are dropped.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;

// Re-export commonly used types
pub use crate::core::{match_addresses, AddressMatcher, MatchOptions, MatchOutcome, ResultOrder, Scorer, similarity::ratio};
pub use crate::models::{AddressInput, AddressCandidate, FieldWeights, FieldScores, MatchResult, MatchAddressRequest, MatchAddressResponse};
