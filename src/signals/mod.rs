//! Collection of the per-user signals that drive scoring.

pub mod error;


use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::model::SignalBundle;
use crate::repository::{
    AllergyReader, HealthGoalReader, HealthMetricsReader, IngredientReader, RepositoryResult,
    UserRepository,
};

pub use error::SignalError;

/// Handles to every collaborator the aggregator reads from.
#[derive(Clone)]
pub struct SignalSources {
    pub users: Arc<dyn UserRepository>,
    pub allergies: Arc<dyn AllergyReader>,
    pub goals: Arc<dyn HealthGoalReader>,
    pub metrics: Arc<dyn HealthMetricsReader>,
    pub ingredients: Arc<dyn IngredientReader>,
}

impl SignalSources {
    /// Uses one object for the user store and all four readers.
    pub fn from_directory<D>(directory: Arc<D>) -> Self
    where
        D: UserRepository
            + AllergyReader
            + HealthGoalReader
            + HealthMetricsReader
            + IngredientReader
            + 'static,
    {
        Self {
            users: directory.clone(),
            allergies: directory.clone(),
            goals: directory.clone(),
            metrics: directory.clone(),
            ingredients: directory,
        }
    }
}

/// Builds a [`SignalBundle`] for a user.
#[derive(Clone)]
pub struct SignalAggregator {
    sources: SignalSources,
}

impl SignalAggregator {
    pub fn new(sources: SignalSources) -> Self {
        Self { sources }
    }

    pub fn sources(&self) -> &SignalSources {
        &self.sources
    }

    /// Fails only if the user does not exist. Each signal source is read
    /// independently; a failing source contributes an empty value.
    #[instrument(skip(self))]
    pub async fn aggregate(&self, user_id: u64) -> Result<SignalBundle, SignalError> {
        self.ensure_user(user_id).await?;

        let (exclusions, goals, metrics, owned) = tokio::join!(
            self.sources.allergies.get_exclusions(user_id),
            self.sources.goals.get_goals(user_id),
            self.sources.metrics.get_latest(user_id),
            self.sources.ingredients.get_owned(user_id),
        );

        let bundle = SignalBundle::new(
            or_empty(exclusions, "allergies", user_id),
            or_empty(goals, "health_goals", user_id),
            or_empty(metrics, "health_metrics", user_id),
            or_empty(owned, "owned_ingredients", user_id),
        );

        debug!(
            exclusions = bundle.exclusions().len(),
            goals = bundle.goals().len(),
            metrics = bundle.health_metrics().len(),
            owned = bundle.owned_items().len(),
            "Aggregated user signals"
        );
        Ok(bundle)
    }

    /// Returns [`SignalError::UserNotFound`] unless the user exists.
    pub async fn ensure_user(&self, user_id: u64) -> Result<(), SignalError> {
        match self.sources.users.find_by_id(user_id).await? {
            Some(_) => Ok(()),
            None => Err(SignalError::UserNotFound { user_id }),
        }
    }
}

fn or_empty<T: Default>(result: RepositoryResult<T>, source: &'static str, user_id: u64) -> T {
    result.unwrap_or_else(|e| {
        warn!(source, user_id, error = %e, "Signal source failed, using empty value");
        T::default()
    })
}
