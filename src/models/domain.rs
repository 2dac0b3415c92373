use serde::{Deserialize, Serialize};
use std::fmt;

/// Free-text address supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressInput {
    #[serde(rename = "streetLine", alias = "address_ln_1")]
    pub street_line: String,
    #[serde(alias = "address_city")]
    pub city: String,
    #[serde(alias = "address_parish")]
    pub parish: String,
}

impl AddressInput {
    pub fn new(
        street_line: impl Into<String>,
        city: impl Into<String>,
        parish: impl Into<String>,
    ) -> Self {
        Self {
            street_line: street_line.into(),
            city: city.into(),
            parish: parish.into(),
        }
    }

    /// Length in chars of the longest field
    pub fn longest_field(&self) -> usize {
        longest_of(&self.street_line, &self.city, &self.parish)
    }
}

/// Canonically formatted catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressCandidate {
    #[serde(rename = "streetLine", alias = "address_ln")]
    pub street_line: String,
    #[serde(alias = "address_city")]
    pub city: String,
    #[serde(alias = "address_parish")]
    pub parish: String,
}

impl AddressCandidate {
    pub fn new(
        street_line: impl Into<String>,
        city: impl Into<String>,
        parish: impl Into<String>,
    ) -> Self {
        Self {
            street_line: street_line.into(),
            city: city.into(),
            parish: parish.into(),
        }
    }

    /// Length in chars of the longest field
    pub fn longest_field(&self) -> usize {
        longest_of(&self.street_line, &self.city, &self.parish)
    }

    /// Identity string used in match results: `street/city/parish`
    pub fn identity(&self) -> String {
        format!("{}/{}/{}", self.street_line, self.city, self.parish)
    }
}

fn longest_of(street_line: &str, city: &str, parish: &str) -> usize {
    [street_line, city, parish]
        .iter()
        .map(|field| field.chars().count())
        .max()
        .unwrap_or(0)
}

/// Per-field weights
///
/// Expected to sum to 1.0 but never normalised or rejected; a total of 1.2
/// simply lets scores run past 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldWeights {
    #[serde(rename = "streetLine", alias = "street_line")]
    pub street_line: f64,
    pub city: f64,
    pub parish: f64,
}

impl FieldWeights {
    pub fn sum(&self) -> f64 {
        self.street_line + self.city + self.parish
    }

    /// Whether the weights add up to 1.0 (within 1e-9)
    pub fn is_normalized(&self) -> bool {
        (self.sum() - 1.0).abs() < 1e-9
    }
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self {
            street_line: 0.6,
            city: 0.2,
            parish: 0.2,
        }
    }
}

/// Similarity of each address field, all in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldScores {
    #[serde(rename = "streetLine")]
    pub street_line: f64,
    pub city: f64,
    pub parish: f64,
}

impl FieldScores {
    /// Weighted aggregate of the three field scores
    #[inline]
    pub fn weighted_total(&self, weights: &FieldWeights) -> f64 {
        self.street_line * weights.street_line
            + self.city * weights.city
            + self.parish * weights.parish
    }
}

/// Accepted candidate with its score breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub address: String,
    #[serde(rename = "streetLineScore")]
    pub street_line_score: f64,
    #[serde(rename = "cityScore")]
    pub city_score: f64,
    #[serde(rename = "parishScore")]
    pub parish_score: f64,
    #[serde(rename = "totalScore")]
    pub total_score: f64,
}

impl MatchResult {
    pub fn new(candidate: &AddressCandidate, scores: FieldScores, total_score: f64) -> Self {
        Self {
            address: candidate.identity(),
            street_line_score: scores.street_line,
            city_score: scores.city,
            parish_score: scores.parish,
            total_score,
        }
    }

    pub fn field_scores(&self) -> FieldScores {
        FieldScores {
            street_line: self.street_line_score,
            city: self.city_score,
            parish: self.parish_score,
        }
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - Total Score: {:.2}% (StreetLine: {:.2}%, City: {:.2}%, Parish: {:.2}%)",
            self.address,
            self.total_score * 100.0,
            self.street_line_score * 100.0,
            self.city_score * 100.0,
            self.parish_score * 100.0,
        )
    }
}
