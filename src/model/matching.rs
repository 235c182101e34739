use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// A recipe ingredient the user can cover with something they own.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Replacement {
    pub recipe_ingredient: String,
    pub user_ingredient: String,
}

impl Replacement {
    pub fn new(recipe_ingredient: impl Into<String>, user_ingredient: impl Into<String>) -> Self {
        Self {
            recipe_ingredient: recipe_ingredient.into(),
            user_ingredient: user_ingredient.into(),
        }
    }
}

/// Classification of a recipe's ingredients against what a user owns.
///
/// Every recipe token appears in exactly one of the three lists, exactly once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub matched: Vec<String>,
    pub replaceable: Vec<Replacement>,
    pub mismatched: Vec<String>,
}

impl MatchResult {
    /// Returns `true` if nothing matched and nothing is replaceable.
    pub fn is_degenerate(&self) -> bool {
        self.matched.is_empty() && self.replaceable.is_empty()
    }

    /// Number of classified tokens.
    pub fn len(&self) -> usize {
        self.matched.len() + self.replaceable.len() + self.mismatched.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates every classified recipe token across the three buckets.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.matched
            .iter()
            .map(String::as_str)
            .chain(self.replaceable.iter().map(|r| r.recipe_ingredient.as_str()))
            .chain(self.mismatched.iter().map(String::as_str))
    }

    /// Returns `true` if the buckets cover `universe` exactly once each.
    pub fn is_partition_of(&self, universe: &[String]) -> bool {
        let expected: HashSet<&str> = universe.iter().map(String::as_str).collect();
        let mut seen = HashSet::with_capacity(self.len());
        for token in self.tokens() {
            if !expected.contains(token) || !seen.insert(token) {
                return false;
            }
        }
        seen.len() == expected.len()
    }
}
