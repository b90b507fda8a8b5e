//! Layered configuration.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use tempfile::TempDir;

use calcfind::{Config, FinderError, ResolverConfig};

#[test]
fn defaults_match_documented_constants() {
    let config = Config::default();
    assert_eq!(config.resolver, ResolverConfig::default());
    assert!((config.resolver.keyword_weight - 3.0).abs() < f64::EPSILON);
    assert!((config.resolver.name_weight - 2.0).abs() < f64::EPSILON);
    assert!((config.resolver.description_weight - 1.0).abs() < f64::EPSILON);
    assert!((config.resolver.fuzzy_weight - 0.5).abs() < f64::EPSILON);
    assert_eq!(config.resolver.fuzzy_max_distance, 2);
    assert_eq!(config.resolver.max_results, 5);
    assert!(!config.semantic.enabled);
    assert_eq!(config.semantic.timeout, Duration::from_secs(2));
}

#[test]
fn explicit_file_replaces_lookup() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom.toml");
    std::fs::write(
        &path,
        r#"
[catalog]
path = "catalogs/sample.json"

[resolver]
min_confidence = 0.25
max_results = 3

[semantic]
enabled = true
endpoint = "http://localhost:8080/resolve"
timeout = "750ms"
"#,
    )
    .unwrap();

    let config = Config::load(Some(path.as_path()), dir.path()).unwrap();
    assert_eq!(config.catalog.path, Some(PathBuf::from("catalogs/sample.json")));
    assert!((config.resolver.min_confidence - 0.25).abs() < f64::EPSILON);
    assert_eq!(config.resolver.max_results, 3);
    assert_eq!(config.resolver.max_query_chars, 512);
    assert!(config.semantic.enabled);
    assert_eq!(config.semantic.timeout, Duration::from_millis(750));
    assert_eq!(config.semantic.max_retries, 1);
}

#[test]
fn missing_explicit_file_is_config_error() {
    let dir = TempDir::new().unwrap();
    let err = Config::load(Some(dir.path().join("absent.toml").as_path()), dir.path()).unwrap_err();
    assert!(matches!(err, FinderError::Config(_)));
}

#[test]
fn env_style_overrides_win() {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("CALCFIND_MAX_RESULTS", "8"),
        ("CALCFIND_SEMANTIC_ENABLED", "yes"),
        ("CALCFIND_SEMANTIC_TIMEOUT_MS", "150"),
    ]);
    let mut config = Config::from_toml("[resolver]\nmax_results = 2\n").unwrap();
    config
        .apply_overrides(|key| vars.get(key).map(|v| (*v).to_string()))
        .unwrap();

    assert_eq!(config.resolver.max_results, 8);
    assert!(config.semantic.enabled);
    assert_eq!(config.semantic.timeout, Duration::from_millis(150));
}

#[test]
fn malformed_override_names_the_variable() {
    let mut config = Config::default();
    let err = config
        .apply_overrides(|key| (key == "CALCFIND_MIN_CONFIDENCE").then(|| "high".to_string()))
        .unwrap_err();
    assert!(err.to_string().contains("CALCFIND_MIN_CONFIDENCE"));
}
