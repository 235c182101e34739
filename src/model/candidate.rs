use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::category::RecipeCategory;
use super::text::split_ingredients;
use crate::constants::EXCLUDED_SCORE;

/// Nutrition facts for one serving. All values are non-negative by construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Nutrition {
    /// Energy in kcal.
    #[serde(default)]
    pub calories: u32,
    /// Protein in grams.
    #[serde(default)]
    pub protein: u32,
    /// Carbohydrate in grams.
    #[serde(default)]
    pub carbohydrate: u32,
    /// Fat in grams.
    #[serde(default)]
    pub fat: u32,
    /// Preparation time in minutes.
    #[serde(default)]
    pub cooking_minutes: u32,
}

/// A persisted recipe eligible for scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Primary key assigned by the repository.
    pub id: u64,
    /// Unique display title.
    pub title: String,
    /// Short description.
    #[serde(default)]
    pub description: String,
    /// Free-text ingredient list (comma / semicolon / newline separated).
    pub ingredients: String,
    /// Nutrition facts.
    #[serde(default)]
    pub nutrition: Nutrition,
    /// Category tags.
    #[serde(default)]
    pub categories: BTreeSet<RecipeCategory>,
}

impl Candidate {
    /// Returns the parsed ingredient tokens in their original spelling.
    pub fn ingredient_tokens(&self) -> Vec<String> {
        split_ingredients(&self.ingredients)
    }

    /// Returns `true` if the candidate carries `category`.
    pub fn has_category(&self, category: RecipeCategory) -> bool {
        self.categories.contains(&category)
    }
}

/// A recipe that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRecipe {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub ingredients: String,
    #[serde(default)]
    pub nutrition: Nutrition,
    #[serde(default)]
    pub categories: BTreeSet<RecipeCategory>,
}

impl NewRecipe {
    /// Attaches a repository id.
    pub fn into_candidate(self, id: u64) -> Candidate {
        Candidate {
            id,
            title: self.title,
            description: self.description,
            ingredients: self.ingredients,
            nutrition: self.nutrition,
            categories: self.categories,
        }
    }
}

/// A candidate paired with its suitability score in `[0, 10]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCandidate {
    pub candidate: Candidate,
    pub score: f32,
}

impl ScoredCandidate {
    pub fn new(candidate: Candidate, score: f32) -> Self {
        Self { candidate, score }
    }

    /// Returns `true` if the candidate must never be shown (score 0 or unusable).
    #[inline]
    pub fn is_excluded(&self) -> bool {
        self.score.is_nan() || self.score <= EXCLUDED_SCORE
    }

    pub fn title(&self) -> &str {
        &self.candidate.title
    }
}
