// Tests for AppConfig
// Most cases use from_lookup with a map; the from_env case mutates the
// process environment and is serialized.

use super::*;
use serial_test::serial;
use std::collections::HashMap;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn test_defaults_without_variables() {
    let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();

    assert_eq!(config.bind, DEFAULT_BIND);
    assert_eq!(config.limits, LookupLimits::default());
    assert!(config.data_dir.ends_with("yuedict"));
}

#[test]
fn test_variables_override_defaults() {
    let config = AppConfig::from_lookup(lookup_from(&[
        (ENV_BIND, "0.0.0.0:8080"),
        (ENV_DATA_DIR, "/tmp/yuedict-data"),
        (ENV_EXACT_LIMIT, "10"),
        (ENV_PARTIAL_LIMIT, " 4 "),
    ]))
    .unwrap();

    assert_eq!(config.bind, "0.0.0.0:8080");
    assert_eq!(config.data_dir, PathBuf::from("/tmp/yuedict-data"));
    assert_eq!(config.limits, LookupLimits { exact: 10, partial: 4 });
}

#[test]
fn test_blank_variables_are_ignored() {
    let config = AppConfig::from_lookup(lookup_from(&[(ENV_BIND, "  "), (ENV_EXACT_LIMIT, "")]))
        .unwrap();

    assert_eq!(config.bind, DEFAULT_BIND);
    assert_eq!(config.limits.exact, LookupLimits::default().exact);
}

#[test]
fn test_invalid_limits_rejected() {
    let result = AppConfig::from_lookup(lookup_from(&[(ENV_EXACT_LIMIT, "0")]));
    assert_eq!(
        result,
        Err(ConfigError::InvalidNumber {
            key: ENV_EXACT_LIMIT.to_string(),
            value: "0".to_string()
        })
    );

    let result = AppConfig::from_lookup(lookup_from(&[(ENV_PARTIAL_LIMIT, "three")]));
    assert!(matches!(result, Err(ConfigError::InvalidNumber { .. })));
}

#[test]
#[serial]
fn test_from_env_reads_process_environment() {
    std::env::set_var(ENV_PARTIAL_LIMIT, "7");
    let config = AppConfig::from_env();
    std::env::remove_var(ENV_PARTIAL_LIMIT);

    assert_eq!(config.unwrap().limits.partial, 7);
}
