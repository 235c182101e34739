use super::*;
use crate::model::{NewRecipe, RecipeCategory};
use crate::oracle::{MockOracle, OracleClient};
use crate::prompt::PromptBuilder;
use crate::repository::{MemoryRecipeRepository, MemoryUserDirectory, RecipeOp, UserProfile};
use crate::signals::SignalSources;
use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

fn corpus() -> Vec<NewRecipe> {
    let mut recipes = vec![
        NewRecipe {
            title: "땅콩조림".to_string(),
            description: String::new(),
            ingredients: "땅콩, 간장, 물엿".to_string(),
            nutrition: Default::default(),
            categories: BTreeSet::from([RecipeCategory::MuscleGain]),
        },
        NewRecipe {
            title: "닭가슴살 샐러드".to_string(),
            description: String::new(),
            ingredients: "닭가슴살, 양상추".to_string(),
            nutrition: Default::default(),
            categories: BTreeSet::from([RecipeCategory::WeightLoss]),
        },
    ];
    recipes.extend((0..8).map(|i| NewRecipe {
        title: format!("기타 요리 {i}"),
        description: String::new(),
        ingredients: "양파, 마늘".to_string(),
        nutrition: Default::default(),
        categories: BTreeSet::from([RecipeCategory::Other]),
    }));
    recipes
}

fn profile() -> UserProfile {
    UserProfile {
        id: 1,
        nickname: "tester".to_string(),
        allergies: vec!["땅콩".to_string()],
        health_goals: vec!["WEIGHT_LOSS".to_string()],
        health_metrics: BTreeMap::from([("ldl".to_string(), "160".to_string())]),
        owned_ingredients: vec!["양파".to_string()],
    }
}

struct Fixture {
    recommender: Recommender,
    oracle: Arc<MockOracle>,
    recipes: Arc<MemoryRecipeRepository>,
}

fn fixture(oracle: MockOracle, profile: UserProfile) -> Fixture {
    let recipes = Arc::new(MemoryRecipeRepository::with_recipes(corpus()));
    let users = Arc::new(MemoryUserDirectory::with_profiles(vec![profile]));
    let oracle = Arc::new(oracle);
    let scorer = BatchScorer::new(
        OracleClient::new(oracle.clone(), Duration::from_secs(5)),
        PromptBuilder::default(),
    );
    let recommender = Recommender::new(
        SignalAggregator::new(SignalSources::from_directory(users)),
        recipes.clone(),
        scorer,
    );
    Fixture {
        recommender,
        oracle,
        recipes,
    }
}

#[test]
fn test_mode_from_name() {
    assert_eq!(RecommendMode::from_name("Ingredient"), Ok(RecommendMode::Ingredient));
    assert_eq!(RecommendMode::from_name("random"), Ok(RecommendMode::Random));
    assert_eq!(RecommendMode::from_name("health"), Ok(RecommendMode::HealthMetric));
    assert_eq!(RecommendMode::from_name("COMBINED"), Ok(RecommendMode::Combined));
    assert_eq!(
        RecommendMode::from_name("category:weight_loss, bogus,DIGESTION"),
        Ok(RecommendMode::Category(vec![
            RecipeCategory::WeightLoss,
            RecipeCategory::Digestion
        ]))
    );
    assert_eq!(
        "dessert".parse::<RecommendMode>(),
        Err(ParseModeError {
            name: "dessert".to_string()
        })
    );
}

#[test]
fn test_mode_display_round_trips() {
    let mode = RecommendMode::Category(vec![RecipeCategory::Cholesterol]);
    assert_eq!(mode.to_string(), "category:CHOLESTEROL");
    assert_eq!(RecommendMode::from_name(&mode.to_string()), Ok(mode));
}

#[test]
fn test_mode_signal_masks() {
    assert!(RecommendMode::Random.signal_mask().is_none());
    let ingredient = RecommendMode::Ingredient.signal_mask().unwrap();
    assert!(ingredient.owned_items && !ingredient.goals && !ingredient.health_metrics);
    assert!(RecommendMode::HealthMetric.include_nutrition());
    assert!(!RecommendMode::Category(vec![]).include_nutrition());
}

#[tokio::test]
async fn test_excluded_recipe_never_surfaces() {
    // The oracle rates the peanut dish highest; the exclusion guard still removes it.
    let fx = fixture(
        MockOracle::always(r#"{"scores": {"땅콩조림": 10, "닭가슴살 샐러드": 8}}"#),
        profile(),
    );
    let ranked = fx
        .recommender
        .recommend(1, &RecommendMode::Combined)
        .await
        .unwrap();

    assert!(ranked.iter().all(|s| s.title() != "땅콩조림"));
    assert_eq!(ranked[0].title(), "닭가슴살 샐러드");
    assert_eq!(ranked.len(), 6);
}

#[tokio::test]
async fn test_ingredient_mode_renders_only_owned_items() {
    let fx = fixture(MockOracle::always("{\"scores\": {}}"), profile());
    fx.recommender
        .recommend(1, &RecommendMode::Ingredient)
        .await
        .unwrap();

    let prompt = &fx.oracle.prompts()[0];
    assert!(prompt.contains("Exclusions"));
    assert!(prompt.contains("already owns"));
    assert!(!prompt.contains("Health goals"));
    assert!(!prompt.contains("Health metrics"));
    assert!(!prompt.contains("kcal"));
}

#[tokio::test]
async fn test_health_mode_renders_metrics_and_nutrition() {
    let fx = fixture(MockOracle::always("{\"scores\": {}}"), profile());
    fx.recommender
        .recommend(1, &RecommendMode::HealthMetric)
        .await
        .unwrap();

    let prompt = &fx.oracle.prompts()[0];
    assert!(prompt.contains("Health goals"));
    assert!(prompt.contains("ldl: 160"));
    assert!(prompt.contains("kcal"));
    assert!(!prompt.contains("already owns"));
}

#[tokio::test]
async fn test_category_mode_uses_category_lookup() {
    let fx = fixture(MockOracle::always("{\"scores\": {}}"), profile());
    let ranked = fx
        .recommender
        .recommend(1, &RecommendMode::Category(vec![RecipeCategory::WeightLoss]))
        .await
        .unwrap();

    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].title(), "닭가슴살 샐러드");
}

#[tokio::test]
async fn test_random_mode_skips_oracle_but_guards_exclusions() {
    let fx = fixture(MockOracle::failing(), profile());
    let ranked = fx
        .recommender
        .recommend(1, &RecommendMode::Random)
        .await
        .unwrap();

    assert_eq!(fx.oracle.call_count(), 0);
    assert_eq!(ranked.len(), 6);
    assert!(ranked.iter().all(|s| s.score == DEFAULT_SCORE));
    assert!(ranked.iter().all(|s| s.title() != "땅콩조림"));
}

#[tokio::test]
async fn test_no_signals_skips_oracle() {
    let fx = fixture(
        MockOracle::failing(),
        UserProfile {
            id: 1,
            ..Default::default()
        },
    );
    let ranked = fx
        .recommender
        .recommend(1, &RecommendMode::Combined)
        .await
        .unwrap();
    assert_eq!(fx.oracle.call_count(), 0);
    assert_eq!(ranked.len(), 6);
}

#[tokio::test]
async fn test_unknown_user_fails_in_every_mode() {
    let fx = fixture(MockOracle::failing(), profile());
    for mode in [RecommendMode::Random, RecommendMode::Combined] {
        let err = fx.recommender.recommend(7, &mode).await.unwrap_err();
        assert!(matches!(err, RecommendError::UserNotFound { user_id: 7 }));
    }
}

#[tokio::test]
async fn test_empty_pool_returns_empty_list() {
    let fx = fixture(MockOracle::failing(), profile());
    fx.recipes.fail_on(RecipeOp::Count);
    fx.recipes.fail_on(RecipeOp::FindAll);
    fx.recipes.fail_on(RecipeOp::FindByCategories);

    assert!(fx
        .recommender
        .recommend(1, &RecommendMode::Combined)
        .await
        .unwrap()
        .is_empty());
    assert!(fx
        .recommender
        .recommend(1, &RecommendMode::Category(vec![RecipeCategory::Other]))
        .await
        .unwrap()
        .is_empty());
    assert_eq!(fx.oracle.call_count(), 0);
}
