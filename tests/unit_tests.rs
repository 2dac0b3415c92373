// Unit tests for Address Matcher

use address_matcher::core::{
    filters::passes_cutoff,
    scoring::calculate_match_score,
    similarity::{indel_distance, partial_ratio, ratio, token_sort_ratio, weighted_ratio, Scorer},
};
use address_matcher::models::{AddressCandidate, AddressInput, FieldWeights};

#[test]
fn test_ratio_identical() {
    assert_eq!(ratio("Hill City", "Hill City"), 1.0);
}

#[test]
fn test_ratio_case_insensitive() {
    assert_eq!(ratio("Garden Close", "garden close"), 1.0);
    assert_eq!(ratio("BARBICAN", "barbican"), 1.0);
}

#[test]
fn test_ratio_empty_strings() {
    assert_eq!(ratio("", ""), 1.0);
    assert_eq!(ratio("", "Kingston"), 0.0);
    assert_eq!(ratio("Kingston", ""), 0.0);
}

#[test]
fn test_ratio_whitespace_is_a_character() {
    // extra whitespace costs an insertion, nothing more
    let score = ratio("garden  close", "garden close");
    assert!(score < 1.0);
    assert!(score > 0.95);
}

#[test]
fn test_ratio_typo_tolerance() {
    assert!(ratio("Gorden Close", "Garden Close") > 0.9);
    assert!(ratio("Kingstn", "Kingston") > 0.9);
    assert!(ratio("Barbcian", "Barbican") > 0.85);
}

#[test]
fn test_ratio_degrades_with_more_edits() {
    let one = ratio("Garden Close", "Gardan Close");
    let two = ratio("Garden Close", "Gardan Clise");
    let three = ratio("Garden Close", "Gordan Clise");

    assert!(one > two);
    assert!(two > three);
}

#[test]
fn test_single_insertion_strictly_decreases() {
    let exact = ratio("Saint Andrew", "Saint Andrew");
    let inserted = ratio("Saint Andrew", "Saint Andrews");

    assert_eq!(exact, 1.0);
    assert!(inserted < exact);
    assert!(inserted > 0.0);
}

#[test]
fn test_indel_distance_counts_edits() {
    assert_eq!(indel_distance("Close", "Closes"), 1);
    assert_eq!(indel_distance("Close", "Clse"), 1);
    assert_eq!(indel_distance("Gorden", "Garden"), 2);
}

#[test]
fn test_partial_and_token_scorers() {
    assert_eq!(partial_ratio("Kingston", "Hill City, Kingston"), 1.0);
    assert_eq!(token_sort_ratio("Close Garden", "Garden Close"), 1.0);
    assert!(weighted_ratio("standrew", "Saint Andrew") >= ratio("standrew", "Saint Andrew"));
}

#[test]
fn test_cutoff_boundary() {
    assert!(passes_cutoff(0.8, 0.8));
    assert!(!passes_cutoff(0.79, 0.8));
}

#[test]
fn test_match_score_within_valid_range() {
    let input = AddressInput::new("garden close", "barbican kingston", "standrew");
    let candidate = AddressCandidate::new("25 Gordon Cl", "Portmore", "Saint Catherine");
    let weights = FieldWeights::default();

    for scorer in [Scorer::Ratio, Scorer::TokenSetRatio, Scorer::WeightedRatio] {
        let (total, scores) = calculate_match_score(&input, &candidate, &weights, scorer);

        assert!((0.0..=1.0).contains(&total), "Score should be in valid range");
        assert!((0.0..=1.0).contains(&scores.street_line));
        assert!((0.0..=1.0).contains(&scores.city));
        assert!((0.0..=1.0).contains(&scores.parish));
    }
}

#[test]
fn test_closer_street_scores_higher() {
    let input = AddressInput::new("garden close", "kingston", "saint andrew");
    let close = AddressCandidate::new("Garden Close", "Kingston", "Saint Andrew");
    let far = AddressCandidate::new("Gordon Town", "Kingston", "Saint Andrew");
    let weights = FieldWeights::default();

    let (close_score, _) = calculate_match_score(&input, &close, &weights, Scorer::Ratio);
    let (far_score, _) = calculate_match_score(&input, &far, &weights, Scorer::Ratio);

    assert!(close_score > far_score, "Closer street line should score higher");
}
