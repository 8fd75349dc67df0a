use proptest::prelude::*;
use sheetmap_map::{ColumnMatcher, DEFAULT_MIN_SIMILARITY, suggest};

#[test]
fn suggests_email_for_email_address() {
    let candidates = ["Email", "Phone", "Name"];
    assert_eq!(suggest("Email Address", &candidates), Some("Email"));
}

#[test]
fn no_suggestion_below_threshold() {
    let candidates = ["Email", "Phone", "Name"];
    assert_eq!(suggest("XYZ123", &candidates), None);
}

#[test]
fn stricter_threshold_drops_weak_matches() {
    let candidates = ["Email", "Phone", "Name"];
    let matcher = ColumnMatcher::with_min_similarity(0.9);
    assert_eq!(matcher.suggest("Email Address", &candidates), None);
    assert_eq!(matcher.suggest("Email", &candidates), Some("Email"));
}

#[test]
fn default_threshold_is_point_three() {
    assert_eq!(
        ColumnMatcher::default().options().min_similarity,
        DEFAULT_MIN_SIMILARITY
    );
    assert!((DEFAULT_MIN_SIMILARITY - 0.3).abs() < f64::EPSILON);
}

#[test]
fn works_with_owned_names() {
    let candidates = vec!["Customer ID".to_string(), "Order Date".to_string()];
    assert_eq!(suggest("Order_Date", &candidates), Some("Order Date"));
}

proptest! {
    #[test]
    fn suggestion_is_a_candidate(
        target in "[A-Za-z ]{0,12}",
        candidates in proptest::collection::vec("[A-Za-z ]{1,12}", 1..8),
    ) {
        if let Some(found) = suggest(&target, &candidates) {
            prop_assert!(candidates.iter().any(|c| c == found));
        }
    }

    #[test]
    fn exact_name_is_suggested(
        target in "[A-Za-z][A-Za-z ]{0,11}",
        mut candidates in proptest::collection::vec("[A-Za-z ]{1,12}", 0..8),
        position in 0usize..8,
    ) {
        let at = position.min(candidates.len());
        candidates.insert(at, target.clone());
        prop_assert_eq!(suggest(&target, &candidates), Some(target.as_str()));
    }

    #[test]
    fn similarity_stays_in_unit_range(left in ".{0,16}", right in ".{0,16}") {
        let score = ColumnMatcher::similarity(&left, &right);
        prop_assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn suggestion_matches_top_ranked_candidate(
        target in "[A-Za-z ]{1,12}",
        candidates in proptest::collection::vec("[A-Za-z ]{1,12}", 1..8),
    ) {
        let matcher = ColumnMatcher::default();
        let ranked = matcher.score_all(&target, &candidates);
        let expected = ranked
            .first()
            .filter(|top| matcher.accepts(top.score))
            .map(|top| top.column);
        prop_assert_eq!(matcher.suggest(&target, &candidates), expected);
    }
}
