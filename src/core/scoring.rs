use crate::core::similarity::Scorer;
use crate::models::{AddressCandidate, AddressInput, FieldScores, FieldWeights};

/// Score each field of a candidate against the input (0-1 per field)
#[inline]
pub fn score_fields(
    input: &AddressInput,
    candidate: &AddressCandidate,
    scorer: Scorer,
) -> FieldScores {
    FieldScores {
        street_line: scorer.score(&input.street_line, &candidate.street_line),
        city: scorer.score(&input.city, &candidate.city),
        parish: scorer.score(&input.parish, &candidate.parish),
    }
}

/// Calculate the weighted match score for a candidate
///
/// Scoring formula:
/// score = (
///     street_line_score * weights.street_line +   # 0.6 by default
///     city_score * weights.city +                 # 0.2 by default
///     parish_score * weights.parish               # 0.2 by default
/// )
///
/// The total is not clamped: weights that don't sum to 1.0 scale it freely.
pub fn calculate_match_score(
    input: &AddressInput,
    candidate: &AddressCandidate,
    weights: &FieldWeights,
    scorer: Scorer,
) -> (f64, FieldScores) {
    let scores = score_fields(input, candidate, scorer);
    (scores.weighted_total(weights), scores)
}
