use crate::core::matcher::ResultOrder;
use crate::models::MatchResult;
use std::cmp::Ordering;

/// Accept a candidate iff its weighted score reaches the cutoff
///
/// A NaN score is never accepted.
#[inline]
pub fn passes_cutoff(total_score: f64, cutoff: f64) -> bool {
    total_score >= cutoff
}

/// Put accepted matches in the requested order
///
/// `CandidateOrder` leaves them untouched. `ScoreDescending` is a stable sort,
/// so equal scores keep their candidate order.
pub fn order_matches(matches: &mut [MatchResult], order: ResultOrder) {
    match order {
        ResultOrder::CandidateOrder => {}
        ResultOrder::ScoreDescending => {
            matches.sort_by(|a, b| {
                b.total_score
                    .partial_cmp(&a.total_score)
                    .unwrap_or(Ordering::Equal)
            });
        }
    }
}
