use super::*;
use serial_test::serial;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, value) in vars {
        unsafe { env::set_var(key, value) };
    }

    let result = f();

    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, _) in vars {
        unsafe { env::remove_var(key) };
    }

    result
}

fn clear_savor_env() {
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    unsafe {
        env::remove_var("SAVOR_ORACLE_MODEL");
        env::remove_var("SAVOR_ORACLE_TIMEOUT_SECS");
        env::remove_var("SAVOR_TOP_K");
        env::remove_var("SAVOR_CANDIDATE_POOL_SIZE");
        env::remove_var("SAVOR_BATCH_SIZE");
        env::remove_var("SAVOR_PROMPT_CHAR_BUDGET");
        env::remove_var("SAVOR_MAX_OWNED_ITEMS");
        env::remove_var("SAVOR_INDIVIDUAL_CONCURRENCY");
        env::remove_var("SAVOR_MATCH_CACHE_CAPACITY");
        env::remove_var("SAVOR_MATCH_CACHE_TTL_SECS");
        env::remove_var("SAVOR_DEDUP_RETENTION_DAYS");
        env::remove_var("SAVOR_DEDUP_SWEEP_INTERVAL_SECS");
        env::remove_var("SAVOR_SEED_PATH");
    }
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.oracle_model, "gpt-4o-mini");
    assert_eq!(config.oracle_timeout, Duration::from_secs(30));
    assert_eq!(config.top_k, 6);
    assert_eq!(config.candidate_pool_size, 48);
    assert_eq!(config.batch_size, 20);
    assert_eq!(config.prompt_char_budget, 12_000);
    assert_eq!(config.max_owned_items_in_prompt, 5);
    assert_eq!(config.individual_concurrency, 4);
    assert_eq!(config.match_cache_capacity, 10_000);
    assert_eq!(config.match_cache_ttl, Duration::from_secs(7 * 24 * 60 * 60));
    assert_eq!(config.dedup_retention, Duration::from_secs(30 * 24 * 60 * 60));
    assert_eq!(config.dedup_sweep_interval, Duration::from_secs(24 * 60 * 60));
    assert!(config.seed_path.is_none());
}

#[test]
#[serial]
fn test_from_env_with_defaults() {
    clear_savor_env();

    let config = Config::from_env().expect("should parse with defaults");
    assert_eq!(config, Config::default());
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_savor_env();

    with_env_vars(
        &[
            ("SAVOR_ORACLE_MODEL", "gpt-4o"),
            ("SAVOR_ORACLE_TIMEOUT_SECS", "5"),
            ("SAVOR_TOP_K", "3"),
            ("SAVOR_CANDIDATE_POOL_SIZE", " 24 "),
            ("SAVOR_BATCH_SIZE", "8"),
            ("SAVOR_DEDUP_RETENTION_DAYS", "2"),
            ("SAVOR_SEED_PATH", "/srv/seed.json"),
        ],
        || {
            let config = Config::from_env().expect("should parse");
            assert_eq!(config.oracle_model, "gpt-4o");
            assert_eq!(config.oracle_timeout, Duration::from_secs(5));
            assert_eq!(config.top_k, 3);
            assert_eq!(config.candidate_pool_size, 24);
            assert_eq!(config.batch_size, 8);
            assert_eq!(config.dedup_retention, Duration::from_secs(2 * 86_400));
            assert_eq!(config.seed_path, Some(PathBuf::from("/srv/seed.json")));
            assert_eq!(config.prompt_char_budget, 12_000);
        },
    );
}

#[test]
#[serial]
fn test_from_env_blank_seed_path_is_none() {
    clear_savor_env();

    with_env_vars(&[("SAVOR_SEED_PATH", "   ")], || {
        let config = Config::from_env().expect("should parse");
        assert!(config.seed_path.is_none());
    });
}

#[test]
#[serial]
fn test_from_env_invalid_number() {
    clear_savor_env();

    with_env_vars(&[("SAVOR_TOP_K", "six")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidNumber { name: "SAVOR_TOP_K", .. }
        ));
        assert!(err.to_string().contains("SAVOR_TOP_K='six'"));
    });
}

#[test]
#[serial]
fn test_from_env_invalid_duration() {
    clear_savor_env();

    with_env_vars(&[("SAVOR_ORACLE_TIMEOUT_SECS", "-1")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { .. }));
    });
}

#[test]
fn test_validate_success_with_defaults() {
    assert!(Config::default().validate().is_ok());
}

#[test]
fn test_validate_zero_values() {
    let config = Config {
        top_k: 0,
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ZeroValue { name: "SAVOR_TOP_K" })
    ));

    let config = Config {
        oracle_timeout: Duration::ZERO,
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ZeroValue {
            name: "SAVOR_ORACLE_TIMEOUT_SECS"
        })
    ));

    let config = Config {
        individual_concurrency: 0,
        ..Default::default()
    };
    assert!(matches!(config.validate(), Err(ConfigError::ZeroValue { .. })));
}

#[test]
fn test_validate_blank_model() {
    let config = Config {
        oracle_model: "  ".to_string(),
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::EmptyValue { .. })
    ));
}

#[test]
fn test_validate_budget_too_small() {
    let config = Config {
        prompt_char_budget: 10,
        ..Default::default()
    };
    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::BudgetTooSmall { value: 10, .. }));
    assert!(err.to_string().contains("below the minimum"));
}

#[test]
fn test_validate_nonexistent_seed_path() {
    let config = Config {
        seed_path: Some(PathBuf::from("/nonexistent/path/to/seed.json")),
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::PathNotFound { .. })
    ));
}

#[test]
fn test_validate_seed_path_is_directory() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config = Config {
        seed_path: Some(temp_dir.path().to_path_buf()),
        ..Default::default()
    };
    assert!(matches!(config.validate(), Err(ConfigError::NotAFile { .. })));
}

#[test]
fn test_validate_success_with_seed_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let seed = temp_dir.path().join("seed.json");
    std::fs::write(&seed, "{}").unwrap();

    let config = Config {
        seed_path: Some(seed),
        ..Default::default()
    };
    assert!(config.validate().is_ok());
}
