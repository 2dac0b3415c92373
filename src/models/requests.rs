use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::{matcher::ResultOrder, similarity::Scorer};
use crate::models::domain::{AddressCandidate, AddressInput, FieldWeights};

/// Request to match one address against a list of candidates
///
/// Every tuning field is optional and falls back to the server's configured
/// matching options.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MatchAddressRequest {
    pub input: AddressInput,
    #[serde(default)]
    pub candidates: Vec<AddressCandidate>,
    #[serde(default)]
    pub weights: Option<FieldWeights>,
    #[validate(range(min = 0.0, max = 1.0))]
    #[serde(default)]
    pub cutoff: Option<f64>,
    #[serde(default)]
    pub scorer: Option<Scorer>,
    #[serde(default)]
    pub order: Option<ResultOrder>,
    #[validate(range(min = 1))]
    #[serde(default)]
    pub limit: Option<usize>,
}
