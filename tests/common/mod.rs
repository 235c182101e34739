//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::time::Duration;

use savor::model::{NewRecipe, Nutrition, RecipeCategory};
use savor::oracle::{MockOracle, OracleClient};
use savor::prompt::PromptBuilder;
use savor::recommend::Recommender;
use savor::repository::{MemoryRecipeRepository, MemoryUserDirectory, UserProfile};
use savor::scoring::BatchScorer;
use savor::signals::{SignalAggregator, SignalSources};

pub const USER_ID: u64 = 1;

pub fn recipe(title: &str, ingredients: &str, categories: &[RecipeCategory]) -> NewRecipe {
    NewRecipe {
        title: title.to_string(),
        description: format!("{title} 레시피"),
        ingredients: ingredients.to_string(),
        nutrition: Nutrition {
            calories: 450,
            ..Default::default()
        },
        categories: categories.iter().copied().collect::<BTreeSet<_>>(),
    }
}

/// `n` plain recipes titled `recipe-0` .. `recipe-{n-1}`.
pub fn corpus(n: usize) -> Vec<NewRecipe> {
    (0..n)
        .map(|i| recipe(&format!("recipe-{i}"), "양파, 마늘, 간장", &[]))
        .collect()
}

#[derive(Default)]
pub struct ProfileBuilder {
    profile: UserProfile,
}

impl ProfileBuilder {
    pub fn new(id: u64) -> Self {
        Self {
            profile: UserProfile {
                id,
                nickname: format!("user-{id}"),
                ..Default::default()
            },
        }
    }

    pub fn allergies(mut self, items: &[&str]) -> Self {
        self.profile.allergies = items.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn goals(mut self, items: &[&str]) -> Self {
        self.profile.health_goals = items.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn metric(mut self, name: &str, value: &str) -> Self {
        self.profile
            .health_metrics
            .insert(name.to_string(), value.to_string());
        self
    }

    pub fn owned(mut self, items: &[&str]) -> Self {
        self.profile.owned_ingredients = items.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn build(self) -> UserProfile {
        self.profile
    }
}

/// Everything a recommendation test needs, wired over in-memory stores.
pub struct Pipeline {
    pub recommender: Recommender,
    pub oracle: Arc<MockOracle>,
    pub recipes: Arc<MemoryRecipeRepository>,
    pub users: Arc<MemoryUserDirectory>,
}

pub fn pipeline(oracle: MockOracle, recipes: Vec<NewRecipe>, profile: UserProfile) -> Pipeline {
    let recipes = Arc::new(MemoryRecipeRepository::with_recipes(recipes));
    let users = Arc::new(MemoryUserDirectory::with_profiles(vec![profile]));
    let oracle = Arc::new(oracle);

    let client = OracleClient::new(oracle.clone(), Duration::from_secs(5));
    let scorer = BatchScorer::new(client, PromptBuilder::default());
    let signals = SignalAggregator::new(SignalSources::from_directory(users.clone()));
    let recommender = Recommender::new(signals, recipes.clone(), scorer);

    Pipeline {
        recommender,
        oracle,
        recipes,
        users,
    }
}

/// Answers a batch prompt with `score_of(title)` for every title in its JSON template.
pub fn answer_batch(prompt: &str, score_of: impl Fn(&str) -> f32) -> String {
    let Some(template) = prompt.rsplit("\"scores\"").next() else {
        return String::new();
    };
    let scores: BTreeMap<String, f32> = template
        .lines()
        .filter_map(|line| {
            let title = line.trim().strip_prefix('"')?.split('"').next()?;
            (!title.is_empty()).then(|| (title.to_string(), score_of(title)))
        })
        .collect();
    serde_json::json!({ "scores": scores }).to_string()
}
