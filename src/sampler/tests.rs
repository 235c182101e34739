use super::*;
use crate::model::NewRecipe;
use crate::repository::{MemoryRecipeRepository, RecipeOp};
use std::collections::BTreeSet;

fn repo(n: usize) -> Arc<MemoryRecipeRepository> {
    Arc::new(MemoryRecipeRepository::with_recipes((0..n).map(|i| NewRecipe {
        title: format!("recipe-{i}"),
        description: String::new(),
        ingredients: "양파".to_string(),
        nutrition: Default::default(),
        categories: BTreeSet::new(),
    })))
}

fn distinct(rows: &[Candidate]) -> usize {
    rows.iter().map(|c| c.id).collect::<BTreeSet<_>>().len()
}

#[tokio::test]
async fn test_small_corpus_returns_everything() {
    let sampler = CandidateSampler::new(repo(10));
    let rows = sampler.sample(48).await;
    assert_eq!(rows.len(), 10);
}

#[tokio::test]
async fn test_large_corpus_returns_desired() {
    let sampler = CandidateSampler::new(repo(200));
    let rows = sampler.sample(48).await;
    assert_eq!(rows.len(), 48);
    assert_eq!(distinct(&rows), 48);
}

#[tokio::test]
async fn test_falls_through_to_full_shuffle() {
    let recipes = repo(100);
    recipes.fail_on(RecipeOp::FindRandom);
    recipes.fail_on(RecipeOp::FindRandomByPkRange);
    let rows = CandidateSampler::new(recipes).sample(30).await;
    assert_eq!(rows.len(), 30);
    assert_eq!(distinct(&rows), 30);
}

#[tokio::test]
async fn test_primary_key_range_is_accepted() {
    let recipes = repo(100);
    recipes.fail_on(RecipeOp::FindRandom);
    // A fall-through to the full shuffle would come back empty.
    recipes.fail_on(RecipeOp::FindAll);
    let rows = CandidateSampler::new(recipes).sample(30).await;

    assert_eq!(rows.len(), 30);
    for pair in rows.windows(2) {
        assert_eq!(pair[1].id, pair[0].id + 1);
    }
}

#[tokio::test]
async fn test_count_failure_uses_full_shuffle() {
    let recipes = repo(5);
    recipes.fail_on(RecipeOp::Count);
    let rows = CandidateSampler::new(recipes).sample(3).await;
    assert_eq!(rows.len(), 3);
}

#[tokio::test]
async fn test_total_failure_yields_empty() {
    let recipes = repo(100);
    recipes.fail_on(RecipeOp::FindRandom);
    recipes.fail_on(RecipeOp::FindRandomByPkRange);
    recipes.fail_on(RecipeOp::FindAll);
    assert!(CandidateSampler::new(recipes).sample(10).await.is_empty());
}

#[tokio::test]
async fn test_empty_corpus_and_zero_request() {
    assert!(CandidateSampler::new(repo(0)).sample(6).await.is_empty());
    assert!(CandidateSampler::new(repo(6)).sample(0).await.is_empty());
}
