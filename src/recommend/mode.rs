use tracing::warn;

use super::error::ParseModeError;
use crate::model::{RecipeCategory, SignalMask};

/// Which signals a recommendation request uses and where candidates come from.
///
/// | Mode         | Candidates      | Signals                    | Nutrition |
/// |--------------|-----------------|----------------------------|-----------|
/// | Ingredient   | sampler         | exclusions, owned items    | no        |
/// | Category     | category lookup | exclusions, goals          | no        |
/// | Random       | sampler         | none (no oracle)           | no        |
/// | HealthMetric | sampler         | exclusions, goals, metrics | yes       |
/// | Combined     | sampler         | all                        | yes       |
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecommendMode {
    Ingredient,
    Category(Vec<RecipeCategory>),
    Random,
    HealthMetric,
    Combined,
}

impl RecommendMode {
    /// Parses `ingredient`, `random`, `health`, `combined` or
    /// `category:NAME[,NAME...]` (case-insensitive).
    ///
    /// Unknown category names are dropped with a warning.
    pub fn from_name(name: &str) -> Result<Self, ParseModeError> {
        let trimmed = name.trim();
        let (head, args) = match trimmed.split_once(':') {
            Some((head, args)) => (head, Some(args)),
            None => (trimmed, None),
        };

        match head.to_ascii_lowercase().as_str() {
            "ingredient" => Ok(Self::Ingredient),
            "category" => Ok(Self::Category(Self::categories_from_csv(
                args.unwrap_or_default(),
            ))),
            "random" => Ok(Self::Random),
            "health" | "health_metric" | "healthmetric" => Ok(Self::HealthMetric),
            "combined" => Ok(Self::Combined),
            _ => Err(ParseModeError {
                name: trimmed.to_string(),
            }),
        }
    }

    /// Parses a comma-separated category list.
    pub fn categories_from_csv(csv: &str) -> Vec<RecipeCategory> {
        let categories = RecipeCategory::parse_list(csv);
        if categories.is_empty() && !csv.trim().is_empty() {
            warn!(csv, "No valid categories in request");
        }
        categories
    }

    /// Signal sections rendered for this mode, or `None` when the oracle is not used.
    pub fn signal_mask(&self) -> Option<SignalMask> {
        match self {
            Self::Ingredient => Some(SignalMask {
                goals: false,
                health_metrics: false,
                owned_items: true,
            }),
            Self::Category(_) => Some(SignalMask {
                goals: true,
                health_metrics: false,
                owned_items: false,
            }),
            Self::Random => None,
            Self::HealthMetric => Some(SignalMask {
                goals: true,
                health_metrics: true,
                owned_items: false,
            }),
            Self::Combined => Some(SignalMask::ALL),
        }
    }

    pub fn include_nutrition(&self) -> bool {
        matches!(self, Self::HealthMetric | Self::Combined)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Ingredient => "ingredient",
            Self::Category(_) => "category",
            Self::Random => "random",
            Self::HealthMetric => "health",
            Self::Combined => "combined",
        }
    }
}

impl std::str::FromStr for RecommendMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl std::fmt::Display for RecommendMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Category(categories) => {
                let names: Vec<&str> = categories.iter().map(|c| c.as_str()).collect();
                write!(f, "category:{}", names.join(","))
            }
            other => f.write_str(other.name()),
        }
    }
}
