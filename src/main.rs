//! Savor command-line entrypoint.
//!
//! ```text
//! savor recommend <user_id> [mode]
//! savor match <user_id> <recipe_id>
//! savor generate <user_id> [count]
//! ```

use std::sync::Arc;

use anyhow::{Context, bail};
use mimalloc::MiMalloc;

use savor::catalog::RecipeCatalog;
use savor::config::Config;
use savor::dedup::{DedupCache, MemoryTimeOrderedSet};
use savor::matcher::{IngredientMatcher, MatchCache};
use savor::oracle::{GenaiOracle, OracleClient};
use savor::prompt::PromptBuilder;
use savor::recommend::{RecommendMode, Recommender};
use savor::repository::{MemoryRecipeRepository, MemoryUserDirectory, RecipeRepository, Seed};
use savor::scoring::BatchScorer;
use savor::signals::{SignalAggregator, SignalSources};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const USAGE: &str = "usage: savor <recommend <user_id> [mode] | match <user_id> <recipe_id> | generate <user_id> [count]>";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    config.validate()?;

    tracing::info!(
        model = %config.oracle_model,
        top_k = config.top_k,
        pool = config.candidate_pool_size,
        "Savor starting"
    );

    let (recipes, directory) = match &config.seed_path {
        Some(path) => Seed::load(path)?.into_repositories(),
        None => {
            tracing::warn!("No SAVOR_SEED_PATH configured, starting with empty repositories");
            (MemoryRecipeRepository::new(), MemoryUserDirectory::new())
        }
    };
    let recipes: Arc<dyn RecipeRepository> = Arc::new(recipes);
    let directory = Arc::new(directory);
    tracing::info!(recipes = recipes.count().await?, "Repositories loaded");

    let oracle = OracleClient::new(
        Arc::new(GenaiOracle::new(config.oracle_model.clone())),
        config.oracle_timeout,
    );
    let signals = SignalAggregator::new(SignalSources::from_directory(Arc::clone(&directory)));

    let dedup = DedupCache::new(Arc::new(MemoryTimeOrderedSet::new()));
    let sweeper = dedup.spawn_sweeper(config.dedup_sweep_interval, config.dedup_retention);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = args.first().map(String::as_str).unwrap_or_default();
    let output = match command {
        "recommend" => {
            let user_id = parse_id(args.get(1), "user_id")?;
            let mode = match args.get(2) {
                Some(name) => name.parse::<RecommendMode>()?,
                None => RecommendMode::Combined,
            };
            let prompts =
                PromptBuilder::new(config.prompt_char_budget, config.max_owned_items_in_prompt);
            let scorer = BatchScorer::new(oracle.clone(), prompts)
                .with_batch_size(config.batch_size)
                .with_individual_concurrency(config.individual_concurrency);
            let recommender = Recommender::new(signals.clone(), Arc::clone(&recipes), scorer)
                .with_top_k(config.top_k)
                .with_candidate_pool_size(config.candidate_pool_size);

            let ranked = recommender.recommend(user_id, &mode).await?;
            serde_json::to_string_pretty(&ranked)?
        }
        "match" => {
            let user_id = parse_id(args.get(1), "user_id")?;
            let recipe_id = parse_id(args.get(2), "recipe_id")?;
            let matcher = IngredientMatcher::new(
                Arc::clone(&recipes),
                directory.clone(),
                directory.clone(),
                oracle.clone(),
                MatchCache::new(config.match_cache_capacity, config.match_cache_ttl),
            );

            let result = matcher.match_ingredients(user_id, recipe_id).await?;
            serde_json::to_string_pretty(&result)?
        }
        "generate" => {
            let user_id = parse_id(args.get(1), "user_id")?;
            let count = match args.get(2) {
                Some(raw) => raw.parse().context("count must be a positive integer")?,
                None => 3,
            };
            let catalog = RecipeCatalog::new(Arc::clone(&recipes), dedup.clone(), signals, oracle)
                .with_max_owned_items(config.max_owned_items_in_prompt);

            let created = catalog.generate_from_owned(user_id, count).await?;
            serde_json::to_string_pretty(&created)?
        }
        _ => bail!(USAGE),
    };

    println!("{output}");

    dedup.stop_sweeper();
    sweeper.abort();
    tracing::info!("Savor done");
    Ok(())
}

fn parse_id(raw: Option<&String>, name: &str) -> anyhow::Result<u64> {
    let Some(raw) = raw else {
        bail!("missing {name}\n{USAGE}");
    };
    raw.parse()
        .with_context(|| format!("{name} must be an unsigned integer, got '{raw}'"))
}
