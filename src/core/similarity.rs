//! Fuzzy string similarity.
//!
//! Every scorer returns a ratio in `[0, 1]` where `1.0` means the two strings
//! are identical after case folding. Comparison is done over `char`s, never
//! bytes, so accented street names are measured in letters.
//!
//! The base measure is the indel ratio: `2 * M / (len(a) + len(b))`, where
//! `M` is the length of the longest common subsequence. It is the Levenshtein
//! alignment restricted to insertions and deletions, so a substitution costs
//! two edits.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Length ratio above which the weighted ratio starts trying substring matches
const PARTIAL_LENGTH_RATIO: f64 = 1.5;

/// Length ratio above which substring matches are heavily discounted
const LONG_PARTIAL_LENGTH_RATIO: f64 = 8.0;

const PARTIAL_SCALE: f64 = 0.9;
const LONG_PARTIAL_SCALE: f64 = 0.6;
const TOKEN_SCALE: f64 = 0.95;

/// Field similarity strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scorer {
    /// Plain indel ratio over the case-folded strings
    #[default]
    Ratio,
    /// Best ratio of the shorter string against any window of the longer one
    PartialRatio,
    /// Ratio after tokenizing and sorting words
    TokenSortRatio,
    /// Ratio over shared and unshared word sets
    TokenSetRatio,
    /// Best of the above, scaled by how different the lengths are
    WeightedRatio,
}

impl Scorer {
    /// Score two strings with this strategy
    pub fn score(self, a: &str, b: &str) -> f64 {
        match self {
            Scorer::Ratio => ratio(a, b),
            Scorer::PartialRatio => partial_ratio(a, b),
            Scorer::TokenSortRatio => token_sort_ratio(a, b),
            Scorer::TokenSetRatio => token_set_ratio(a, b),
            Scorer::WeightedRatio => weighted_ratio(a, b),
        }
    }
}

/// Similarity ratio of two strings (0-1), case-insensitive
///
/// Both empty scores `1.0`; exactly one empty scores `0.0`.
///
/// # Example
/// ```
/// use address_matcher::core::similarity::ratio;
///
/// assert_eq!(ratio("Garden Close", "garden close"), 1.0);
/// assert!(ratio("Gorden Close", "Garden Close") > 0.9);
/// ```
pub fn ratio(a: &str, b: &str) -> f64 {
    ratio_chars(&fold(a), &fold(b))
}

/// Number of single-character insertions and deletions turning `a` into `b`
///
/// Case-insensitive, counted in chars.
pub fn indel_distance(a: &str, b: &str) -> usize {
    let a = fold(a);
    let b = fold(b);
    a.len() + b.len() - 2 * lcs_len(&a, &b)
}

/// Best ratio of the shorter string against every equal-length window of the longer
///
/// "kingston" inside "barbican, kingston" scores `1.0`.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    partial_ratio_chars(&fold(a), &fold(b))
}

/// Ratio after sorting words, so word order is ignored
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    with_processed(a, b, token_sort_ratio_processed)
}

/// Ratio over word sets, so repeated and extra words weigh less
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    with_processed(a, b, |pa, pb| token_set_with(pa, pb, ratio_chars))
}

/// Best-of strategy used for free-text input against catalog entries
///
/// Strings of similar length are compared whole and by tokens. Once one is at
/// least 1.5x the length of the other, substring matches are tried instead
/// and discounted.
pub fn weighted_ratio(a: &str, b: &str) -> f64 {
    with_processed(a, b, |pa, pb| {
        let ca = chars(pa);
        let cb = chars(pb);
        let base = ratio_chars(&ca, &cb);

        let (shorter, longer) = if ca.len() <= cb.len() {
            (ca.len(), cb.len())
        } else {
            (cb.len(), ca.len())
        };
        let length_ratio = longer as f64 / shorter as f64;

        if length_ratio < PARTIAL_LENGTH_RATIO {
            let sort = token_sort_ratio_processed(pa, pb) * TOKEN_SCALE;
            let set = token_set_with(pa, pb, ratio_chars) * TOKEN_SCALE;
            return base.max(sort).max(set);
        }

        let scale = if length_ratio <= LONG_PARTIAL_LENGTH_RATIO {
            PARTIAL_SCALE
        } else {
            LONG_PARTIAL_SCALE
        };

        let partial = partial_ratio_chars(&ca, &cb) * scale;
        let partial_sort = partial_ratio_chars(
            &chars(&sorted_tokens(pa)),
            &chars(&sorted_tokens(pb)),
        ) * TOKEN_SCALE
            * scale;
        let partial_set = token_set_with(pa, pb, partial_ratio_chars) * TOKEN_SCALE * scale;

        base.max(partial).max(partial_sort).max(partial_set)
    })
}

/// Lowercase, replace anything that isn't alphanumeric with a space and
/// collapse runs of whitespace
pub fn full_process(s: &str) -> String {
    let replaced: String = s
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[inline]
fn fold(s: &str) -> Vec<char> {
    s.chars().flat_map(char::to_lowercase).collect()
}

#[inline]
fn chars(s: &str) -> Vec<char> {
    s.chars().collect()
}

#[inline]
fn empty_rule(a: &[char], b: &[char]) -> Option<f64> {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => Some(1.0),
        (true, false) | (false, true) => Some(0.0),
        (false, false) => None,
    }
}

/// Longest common subsequence length, two-row DP over the shorter side
fn lcs_len(a: &[char], b: &[char]) -> usize {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };

    let mut prev = vec![0usize; short.len() + 1];
    let mut curr = vec![0usize; short.len() + 1];

    for &lc in long {
        for (j, &sc) in short.iter().enumerate() {
            curr[j + 1] = if lc == sc {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[short.len()]
}

fn ratio_chars(a: &[char], b: &[char]) -> f64 {
    if let Some(score) = empty_rule(a, b) {
        return score;
    }

    let matched = lcs_len(a, b);
    (2 * matched) as f64 / (a.len() + b.len()) as f64
}

fn partial_ratio_chars(a: &[char], b: &[char]) -> f64 {
    if let Some(score) = empty_rule(a, b) {
        return score;
    }

    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    let mut best = 0.0_f64;
    for window in long.windows(short.len()) {
        best = best.max(ratio_chars(short, window));
        if best >= 1.0 {
            break;
        }
    }
    best
}

/// Run a token-based scorer on fully processed strings.
///
/// The empty rule is applied to the raw (case-folded) input first. Inputs that
/// are non-empty but have no alphanumeric content fall back to the plain ratio.
fn with_processed<F>(a: &str, b: &str, score: F) -> f64
where
    F: FnOnce(&str, &str) -> f64,
{
    let fa = fold(a);
    let fb = fold(b);
    if let Some(s) = empty_rule(&fa, &fb) {
        return s;
    }

    let pa = full_process(a);
    let pb = full_process(b);
    if pa.is_empty() || pb.is_empty() {
        return ratio_chars(&fa, &fb);
    }

    score(&pa, &pb)
}

fn sorted_tokens(processed: &str) -> String {
    let mut tokens: Vec<&str> = processed.split(' ').collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

fn token_sort_ratio_processed(pa: &str, pb: &str) -> f64 {
    ratio_chars(&chars(&sorted_tokens(pa)), &chars(&sorted_tokens(pb)))
}

fn join_tokens(head: &str, tail: &str) -> String {
    match (head.is_empty(), tail.is_empty()) {
        (_, true) => head.to_string(),
        (true, false) => tail.to_string(),
        (false, false) => format!("{} {}", head, tail),
    }
}

fn token_set_with(pa: &str, pb: &str, score: fn(&[char], &[char]) -> f64) -> f64 {
    let ta: BTreeSet<&str> = pa.split(' ').collect();
    let tb: BTreeSet<&str> = pb.split(' ').collect();

    let shared = ta.intersection(&tb).copied().collect::<Vec<_>>().join(" ");
    let only_a = ta.difference(&tb).copied().collect::<Vec<_>>().join(" ");
    let only_b = tb.difference(&ta).copied().collect::<Vec<_>>().join(" ");

    let t0 = chars(&shared);
    let t1 = chars(&join_tokens(&shared, &only_a));
    let t2 = chars(&join_tokens(&shared, &only_b));

    score(&t0, &t1).max(score(&t0, &t2)).max(score(&t1, &t2))
}
