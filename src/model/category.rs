use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Category tag attached to a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecipeCategory {
    BodyWeightManagement,
    HealthManagement,
    WeightLoss,
    MuscleGain,
    SugarReduction,
    BloodPressure,
    Cholesterol,
    Digestion,
    Other,
}

/// Error returned when a category name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown recipe category: {name}")]
pub struct ParseCategoryError {
    /// The rejected input.
    pub name: String,
}

impl RecipeCategory {
    /// All categories in declaration order.
    pub const ALL: [RecipeCategory; 9] = [
        RecipeCategory::BodyWeightManagement,
        RecipeCategory::HealthManagement,
        RecipeCategory::WeightLoss,
        RecipeCategory::MuscleGain,
        RecipeCategory::SugarReduction,
        RecipeCategory::BloodPressure,
        RecipeCategory::Cholesterol,
        RecipeCategory::Digestion,
        RecipeCategory::Other,
    ];

    /// Wire name, e.g. `"WEIGHT_LOSS"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecipeCategory::BodyWeightManagement => "BODY_WEIGHT_MANAGEMENT",
            RecipeCategory::HealthManagement => "HEALTH_MANAGEMENT",
            RecipeCategory::WeightLoss => "WEIGHT_LOSS",
            RecipeCategory::MuscleGain => "MUSCLE_GAIN",
            RecipeCategory::SugarReduction => "SUGAR_REDUCTION",
            RecipeCategory::BloodPressure => "BLOOD_PRESSURE",
            RecipeCategory::Cholesterol => "CHOLESTEROL",
            RecipeCategory::Digestion => "DIGESTION",
            RecipeCategory::Other => "OTHER",
        }
    }

    /// Display label shown to end users.
    pub fn label(&self) -> &'static str {
        match self {
            RecipeCategory::BodyWeightManagement => "체형/체중 관리식단",
            RecipeCategory::HealthManagement => "건강 관리식단",
            RecipeCategory::WeightLoss => "체중 감량",
            RecipeCategory::MuscleGain => "근육 증가",
            RecipeCategory::SugarReduction => "당 줄이기",
            RecipeCategory::BloodPressure => "혈압관리",
            RecipeCategory::Cholesterol => "콜레스테롤 관리",
            RecipeCategory::Digestion => "소화 건강",
            RecipeCategory::Other => "기타",
        }
    }

    /// Parses a comma-separated list, skipping names that are not recognized.
    pub fn parse_list(csv: &str) -> Vec<RecipeCategory> {
        let mut categories = Vec::new();
        for name in csv.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            match name.parse::<RecipeCategory>() {
                Ok(category) if !categories.contains(&category) => categories.push(category),
                Ok(_) => {}
                Err(e) => tracing::warn!(error = %e, "Skipping invalid category"),
            }
        }
        categories
    }
}

impl std::str::FromStr for RecipeCategory {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_uppercase();
        RecipeCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| ParseCategoryError {
                name: s.trim().to_string(),
            })
    }
}

impl std::fmt::Display for RecipeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
