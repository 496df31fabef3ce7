use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

/// Returns a map with all required env vars populated with valid defaults.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("MPSDK_BASE_URL", "https://marketplace.example.com/api/v1/");
    m
}

#[test]
fn build_sdk_config_fails_without_base_url() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_sdk_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "MPSDK_BASE_URL"),
        "expected MissingEnvVar(MPSDK_BASE_URL), got: {result:?}"
    );
}

#[test]
fn build_sdk_config_rejects_non_http_base_url() {
    let mut map = full_env();
    map.insert("MPSDK_BASE_URL", "ftp://marketplace.example.com");
    let result = build_sdk_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "MPSDK_BASE_URL"),
        "expected InvalidEnvVar(MPSDK_BASE_URL), got: {result:?}"
    );
}

#[test]
fn build_sdk_config_succeeds_with_defaults() {
    let map = full_env();
    let cfg = build_sdk_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.credentials.is_none());
    assert!(cfg.language.is_none());
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "mpsdk/0.1 (marketplace-client)");
    assert_eq!(cfg.log_level, "info");
}

#[test]
fn api_key_requires_user_id() {
    let mut map = full_env();
    map.insert("MPSDK_API_KEY", "secret-key");
    let result = build_sdk_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "MPSDK_USER_ID"),
        "expected MissingEnvVar(MPSDK_USER_ID), got: {result:?}"
    );
}

#[test]
fn api_key_with_user_id_builds_credentials() {
    let mut map = full_env();
    map.insert("MPSDK_API_KEY", "secret-key");
    map.insert("MPSDK_USER_ID", "7");
    let cfg = build_sdk_config(lookup_from_map(&map)).unwrap();
    let credentials = cfg.credentials.unwrap();
    assert_eq!(credentials.user_id, 7);
    assert_eq!(credentials.api_key, "secret-key");
}

#[test]
fn invalid_user_id_is_rejected() {
    let mut map = full_env();
    map.insert("MPSDK_API_KEY", "secret-key");
    map.insert("MPSDK_USER_ID", "seven");
    let result = build_sdk_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "MPSDK_USER_ID"),
        "expected InvalidEnvVar(MPSDK_USER_ID), got: {result:?}"
    );
}

#[test]
fn request_timeout_override() {
    let mut map = full_env();
    map.insert("MPSDK_REQUEST_TIMEOUT_SECS", "5");
    let cfg = build_sdk_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.request_timeout_secs, 5);
}

#[test]
fn request_timeout_invalid() {
    let mut map = full_env();
    map.insert("MPSDK_REQUEST_TIMEOUT_SECS", "not-a-number");
    let result = build_sdk_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "MPSDK_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(MPSDK_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn language_is_optional() {
    let mut map = full_env();
    map.insert("MPSDK_LANGUAGE", "fr");
    let cfg = build_sdk_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.language.as_deref(), Some("fr"));
}

#[test]
fn debug_redacts_api_key() {
    let mut map = full_env();
    map.insert("MPSDK_API_KEY", "secret-key");
    map.insert("MPSDK_USER_ID", "7");
    let cfg = build_sdk_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("secret-key"));
    assert!(rendered.contains("[redacted]"));
}
