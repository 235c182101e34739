//! Domain records shared by every pipeline stage.

pub mod candidate;
pub mod category;
pub mod matching;
pub mod signals;
pub mod text;

#[cfg(test)]
mod tests;

pub use candidate::{Candidate, NewRecipe, Nutrition, ScoredCandidate};
pub use category::{ParseCategoryError, RecipeCategory};
pub use matching::{MatchResult, Replacement};
pub use signals::{SignalBundle, SignalMask};
pub use text::{normalize_item, normalize_title, split_ingredients};
