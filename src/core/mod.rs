// Core algorithm exports
pub mod filters;
pub mod matcher;
pub mod scoring;
pub mod similarity;

pub use filters::{order_matches, passes_cutoff};
pub use matcher::{match_addresses, AddressMatcher, MatchOptions, MatchOutcome, ResultOrder, DEFAULT_CUTOFF};
pub use scoring::{calculate_match_score, score_fields};
pub use similarity::{indel_distance, partial_ratio, ratio, token_set_ratio, token_sort_ratio, weighted_ratio, Scorer};
