use super::*;
use crate::model::Nutrition;
use std::collections::BTreeSet;

fn recipe(title: &str, categories: &[RecipeCategory]) -> NewRecipe {
    NewRecipe {
        title: title.to_string(),
        description: String::new(),
        ingredients: "양파, 마늘".to_string(),
        nutrition: Nutrition::default(),
        categories: categories.iter().copied().collect::<BTreeSet<_>>(),
    }
}

fn corpus(n: usize) -> MemoryRecipeRepository {
    MemoryRecipeRepository::with_recipes((0..n).map(|i| recipe(&format!("recipe-{i}"), &[])))
}

#[tokio::test]
async fn test_memory_repo_assigns_sequential_ids() {
    let repo = corpus(3);
    let all = repo.find_all().await.unwrap();
    assert_eq!(all.iter().map(|c| c.id).collect::<Vec<_>>(), vec![1, 2, 3]);
    assert_eq!(repo.count().await.unwrap(), 3);
}

#[tokio::test]
async fn test_find_random_returns_distinct_rows() {
    let repo = corpus(20);
    let picked = repo.find_random(8).await.unwrap();
    assert_eq!(picked.len(), 8);
    let ids: BTreeSet<u64> = picked.iter().map(|c| c.id).collect();
    assert_eq!(ids.len(), 8);
}

#[tokio::test]
async fn test_find_random_by_pk_range_is_contiguous() {
    let repo = corpus(20);
    let picked = repo.find_random_by_pk_range(5).await.unwrap();
    assert!(!picked.is_empty());
    assert!(picked.len() <= 5);
    for pair in picked.windows(2) {
        assert_eq!(pair[1].id, pair[0].id + 1);
    }
}

#[tokio::test]
async fn test_find_random_by_pk_range_empty_repo() {
    let repo = MemoryRecipeRepository::new();
    assert!(repo.find_random_by_pk_range(5).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_find_by_categories_matches_any() {
    let repo = MemoryRecipeRepository::with_recipes(vec![
        recipe("a", &[RecipeCategory::WeightLoss]),
        recipe("b", &[RecipeCategory::Digestion]),
        recipe("c", &[RecipeCategory::Digestion, RecipeCategory::Other]),
    ]);

    let found = repo
        .find_by_categories(&[RecipeCategory::Digestion], 10)
        .await
        .unwrap();
    assert_eq!(
        found.iter().map(|c| c.title.as_str()).collect::<Vec<_>>(),
        vec!["b", "c"]
    );

    let limited = repo
        .find_by_categories(&[RecipeCategory::Digestion, RecipeCategory::WeightLoss], 1)
        .await
        .unwrap();
    assert_eq!(limited.len(), 1);
}

#[tokio::test]
async fn test_save_enforces_unique_title() {
    let repo = corpus(1);
    let saved = repo.save(recipe("new", &[])).await.unwrap();
    assert_eq!(saved.id, 2);
    assert!(repo.exists_by_title("new").await.unwrap());

    let err = repo.save(recipe("new", &[])).await.unwrap_err();
    assert!(matches!(err, RepositoryError::UniqueViolation { ref title } if title == "new"));
    assert_eq!(repo.len(), 2);
}

#[tokio::test]
async fn test_injected_failure_is_backend_error() {
    let repo = corpus(2);
    repo.fail_on(RecipeOp::FindRandom);
    assert!(matches!(
        repo.find_random(1).await,
        Err(RepositoryError::Backend { .. })
    ));
    assert!(repo.find_all().await.is_ok());

    repo.clear_failures();
    assert!(repo.find_random(1).await.is_ok());
}

#[tokio::test]
async fn test_user_directory_serves_all_readers() {
    let directory = MemoryUserDirectory::with_profiles(vec![UserProfile {
        id: 7,
        nickname: "mumuk".to_string(),
        allergies: vec!["peanut".to_string()],
        health_goals: vec!["WEIGHT_LOSS".to_string()],
        health_metrics: BTreeMap::from([("bmi".to_string(), "24".to_string())]),
        owned_ingredients: vec!["양파".to_string()],
    }]);

    let user = UserRepository::find_by_id(&directory, 7).await.unwrap();
    assert_eq!(user.map(|u| u.nickname), Some("mumuk".to_string()));
    assert_eq!(directory.get_exclusions(7).await.unwrap(), vec!["peanut"]);
    assert_eq!(directory.get_goals(7).await.unwrap(), vec!["WEIGHT_LOSS"]);
    assert_eq!(directory.get_latest(7).await.unwrap()["bmi"], "24");
    assert_eq!(directory.get_owned(7).await.unwrap(), vec!["양파"]);

    assert!(UserRepository::find_by_id(&directory, 8).await.unwrap().is_none());
    assert!(directory.get_owned(8).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_user_directory_failure_injection() {
    let directory = MemoryUserDirectory::with_profiles(vec![UserProfile {
        id: 1,
        ..Default::default()
    }]);
    directory.fail_on(SignalSource::Goals);
    assert!(directory.get_goals(1).await.is_err());
    assert!(directory.get_exclusions(1).await.is_ok());
}

#[test]
fn test_seed_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("seed.json");
    std::fs::write(
        &path,
        r#"{
            "recipes": [
                {"title": "두부조림", "ingredients": "두부, 간장",
                 "nutrition": {"calories": 210, "cookingMinutes": 20},
                 "categories": ["DIGESTION"]}
            ],
            "users": [{"id": 1, "ownedIngredients": ["두부"]}]
        }"#,
    )
    .unwrap();

    let seed = Seed::load(&path).unwrap();
    assert_eq!(seed.recipes.len(), 1);
    assert_eq!(seed.recipes[0].nutrition.calories, 210);
    assert_eq!(seed.recipes[0].nutrition.cooking_minutes, 20);
    assert_eq!(seed.users[0].owned_ingredients, vec!["두부"]);

    let (recipes, _users) = seed.into_repositories();
    assert_eq!(recipes.len(), 1);
}

#[test]
fn test_seed_load_errors() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.json");
    assert!(matches!(
        Seed::load(&missing),
        Err(RepositoryError::SeedIo { .. })
    ));

    let bad = dir.path().join("bad.json");
    std::fs::write(&bad, "not json").unwrap();
    assert!(matches!(
        Seed::load(&bad),
        Err(RepositoryError::SeedFormat { .. })
    ));
}
