use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::{
    filters::{order_matches, passes_cutoff},
    scoring::{calculate_match_score, score_fields},
    similarity::Scorer,
};
use crate::models::{AddressCandidate, AddressInput, FieldScores, FieldWeights, MatchResult};

/// Default minimum weighted score for a candidate to be accepted
pub const DEFAULT_CUTOFF: f64 = 0.8;

/// Order of accepted matches in the output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultOrder {
    /// Same order the candidates were supplied in
    #[default]
    #[serde(alias = "candidate")]
    CandidateOrder,
    /// Highest total score first; ties keep candidate order
    ScoreDescending,
}

/// Everything that tunes a match call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchOptions {
    pub weights: FieldWeights,
    pub cutoff: f64,
    pub scorer: Scorer,
    pub order: ResultOrder,
    pub limit: Option<usize>,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            weights: FieldWeights::default(),
            cutoff: DEFAULT_CUTOFF,
            scorer: Scorer::default(),
            order: ResultOrder::default(),
            limit: None,
        }
    }
}

/// Result of the matching process
#[derive(Debug, Clone)]
pub struct MatchOutcome {
    pub matches: Vec<MatchResult>,
    pub total_candidates: usize,
}

/// Match one address against candidates with explicit weights and cutoff
///
/// Plain ratio scoring, results in candidate order. Empty `candidates` gives
/// an empty result.
pub fn match_addresses(
    input: &AddressInput,
    candidates: &[AddressCandidate],
    weights: &FieldWeights,
    cutoff: f64,
) -> Vec<MatchResult> {
    candidates
        .iter()
        .filter_map(|candidate| evaluate(input, candidate, weights, cutoff, Scorer::Ratio))
        .collect()
}

/// Address matching orchestrator
///
/// # Pipeline Stages
/// 1. Per-field similarity (street line, city, parish)
/// 2. Weighted aggregation
/// 3. Cutoff filtering
/// 4. Optional re-ranking and limit
#[derive(Debug, Clone, Default)]
pub struct AddressMatcher {
    options: MatchOptions,
}

impl AddressMatcher {
    pub fn new(options: MatchOptions) -> Self {
        Self { options }
    }

    pub fn with_weights(weights: FieldWeights, cutoff: f64) -> Self {
        Self {
            options: MatchOptions {
                weights,
                cutoff,
                ..MatchOptions::default()
            },
        }
    }

    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    /// Per-field scores of one candidate, no cutoff applied
    pub fn score_candidate(&self, input: &AddressInput, candidate: &AddressCandidate) -> FieldScores {
        score_fields(input, candidate, self.options.scorer)
    }

    /// Find every candidate whose weighted score reaches the cutoff
    ///
    /// # Arguments
    /// * `input` - The address to resolve
    /// * `candidates` - Catalog entries, in the order results should follow
    ///
    /// # Returns
    /// MatchOutcome with accepted matches and the number of candidates seen
    pub fn find_matches(
        &self,
        input: &AddressInput,
        candidates: &[AddressCandidate],
    ) -> MatchOutcome {
        let opts = &self.options;

        let matches: Vec<MatchResult> = candidates
            .iter()
            .filter_map(|candidate| evaluate(input, candidate, &opts.weights, opts.cutoff, opts.scorer))
            .collect();

        self.finish(matches, candidates.len())
    }

    /// Same as [`find_matches`](Self::find_matches), scoring candidates on the
    /// rayon pool
    ///
    /// Indexed collection keeps candidate order, so the output is identical.
    pub fn find_matches_parallel(
        &self,
        input: &AddressInput,
        candidates: &[AddressCandidate],
    ) -> MatchOutcome {
        let opts = &self.options;

        let matches: Vec<MatchResult> = candidates
            .par_iter()
            .filter_map(|candidate| evaluate(input, candidate, &opts.weights, opts.cutoff, opts.scorer))
            .collect();

        self.finish(matches, candidates.len())
    }

    fn finish(&self, mut matches: Vec<MatchResult>, total_candidates: usize) -> MatchOutcome {
        order_matches(&mut matches, self.options.order);

        if let Some(limit) = self.options.limit {
            matches.truncate(limit);
        }

        tracing::debug!(
            accepted = matches.len(),
            total_candidates,
            cutoff = self.options.cutoff,
            "Address matching complete"
        );

        MatchOutcome {
            matches,
            total_candidates,
        }
    }
}

fn evaluate(
    input: &AddressInput,
    candidate: &AddressCandidate,
    weights: &FieldWeights,
    cutoff: f64,
    scorer: Scorer,
) -> Option<MatchResult> {
    let (total, scores) = calculate_match_score(input, candidate, weights, scorer);

    if passes_cutoff(total, cutoff) {
        tracing::trace!(candidate = %candidate.identity(), total, "accepted");
        Some(MatchResult::new(candidate, scores, total))
    } else {
        tracing::trace!(candidate = %candidate.identity(), total, "rejected");
        None
    }
}
