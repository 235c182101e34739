use super::*;
use std::collections::BTreeSet;

fn candidate(ingredients: &str) -> Candidate {
    Candidate {
        id: 1,
        title: "제육볶음".to_string(),
        description: String::new(),
        ingredients: ingredients.to_string(),
        nutrition: Nutrition::default(),
        categories: BTreeSet::from([RecipeCategory::MuscleGain]),
    }
}

#[test]
fn test_split_ingredients_handles_all_separators() {
    let tokens = split_ingredients("돼지고기, 양파;고추장\n 설탕 ,, \r\n");
    assert_eq!(tokens, vec!["돼지고기", "양파", "고추장", "설탕"]);
}

#[test]
fn test_split_ingredients_empty_input() {
    assert!(split_ingredients("").is_empty());
    assert!(split_ingredients(" , ; \n").is_empty());
}

#[test]
fn test_normalize_item_collapses_whitespace_and_case() {
    assert_eq!(normalize_item("  Green   Onion "), "green onion");
    assert_eq!(normalize_item("돼지고기"), "돼지고기");
}

#[test]
fn test_normalize_title() {
    assert_eq!(normalize_title("  Kimchi Stew "), "kimchi stew");
}

#[test]
fn test_candidate_tokens_keep_spelling() {
    let c = candidate("Pork Belly, 양파");
    assert_eq!(c.ingredient_tokens(), vec!["Pork Belly", "양파"]);
    assert!(c.has_category(RecipeCategory::MuscleGain));
    assert!(!c.has_category(RecipeCategory::Other));
}

#[test]
fn test_scored_candidate_exclusion() {
    assert!(ScoredCandidate::new(candidate("a"), 0.0).is_excluded());
    assert!(ScoredCandidate::new(candidate("a"), f32::NAN).is_excluded());
    assert!(!ScoredCandidate::new(candidate("a"), 0.5).is_excluded());
}

#[test]
fn test_category_from_str_case_insensitive() {
    assert_eq!(
        "weight_loss".parse::<RecipeCategory>(),
        Ok(RecipeCategory::WeightLoss)
    );
    assert_eq!(
        " DIGESTION ".parse::<RecipeCategory>(),
        Ok(RecipeCategory::Digestion)
    );
    let err = "DESSERT".parse::<RecipeCategory>().unwrap_err();
    assert_eq!(err.name, "DESSERT");
}

#[test]
fn test_category_parse_list_skips_invalid_and_repeats() {
    let parsed = RecipeCategory::parse_list("WEIGHT_LOSS, bogus, cholesterol,WEIGHT_LOSS");
    assert_eq!(
        parsed,
        vec![RecipeCategory::WeightLoss, RecipeCategory::Cholesterol]
    );
}

#[test]
fn test_category_serde_uses_wire_names() {
    let json = serde_json::to_string(&RecipeCategory::BodyWeightManagement).unwrap();
    assert_eq!(json, "\"BODY_WEIGHT_MANAGEMENT\"");
    let back: RecipeCategory = serde_json::from_str("\"SUGAR_REDUCTION\"").unwrap();
    assert_eq!(back, RecipeCategory::SugarReduction);
}

#[test]
fn test_signal_bundle_trims_and_dedups() {
    let bundle = SignalBundle::new(
        vec![" peanut ".to_string(), "peanut".to_string(), "".to_string()],
        vec!["WEIGHT_LOSS".to_string(), "WEIGHT_LOSS".to_string()],
        vec![("blood sugar".to_string(), " 130 ".to_string())],
        vec!["양파".to_string(), " ".to_string()],
    );

    assert_eq!(bundle.exclusions().len(), 1);
    assert_eq!(bundle.goals(), ["WEIGHT_LOSS"]);
    assert_eq!(bundle.health_metrics()["blood sugar"], "130");
    assert_eq!(bundle.owned_items(), ["양파"]);
}

#[test]
fn test_signal_bundle_mask_keeps_exclusions() {
    let bundle = SignalBundle::new(
        vec!["peanut".to_string()],
        vec!["WEIGHT_LOSS".to_string()],
        vec![("bmi".to_string(), "24".to_string())],
        vec!["양파".to_string()],
    );

    let masked = bundle.masked(SignalMask::EXCLUSIONS_ONLY);
    assert_eq!(masked.exclusions().len(), 1);
    assert!(masked.goals().is_empty());
    assert!(masked.health_metrics().is_empty());
    assert!(masked.owned_items().is_empty());
    assert!(!masked.is_empty());

    assert_eq!(bundle.masked(SignalMask::ALL), bundle);
}

#[test]
fn test_match_result_partition_check() {
    let universe = vec!["a".to_string(), "b".to_string(), "c".to_string()];
    let result = MatchResult {
        matched: vec!["a".to_string()],
        replaceable: vec![Replacement::new("b", "x")],
        mismatched: vec!["c".to_string()],
    };
    assert!(result.is_partition_of(&universe));
    assert!(!result.is_degenerate());

    let missing = MatchResult {
        matched: vec!["a".to_string()],
        replaceable: vec![],
        mismatched: vec!["c".to_string()],
    };
    assert!(!missing.is_partition_of(&universe));

    let duplicated = MatchResult {
        matched: vec!["a".to_string()],
        replaceable: vec![Replacement::new("a", "x")],
        mismatched: vec!["b".to_string(), "c".to_string()],
    };
    assert!(!duplicated.is_partition_of(&universe));
}
