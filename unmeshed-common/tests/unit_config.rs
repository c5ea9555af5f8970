use std::collections::HashMap;
use unmeshed_common::{ClientConfig, UnmeshedError};

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> =
        vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    move |key: &str| map.get(key).cloned()
}

const CREDS: [(&str, &str); 2] = [("UNMESHED_AUTH_ID", "client-1"), ("UNMESHED_AUTH_TOKEN", "secret")];

#[test]
fn test_builder_defaults() {
    let config = ClientConfig::builder("id", "token").build().unwrap();
    assert_eq!(config.base_url, "http://localhost");
    assert_eq!(config.port, 8080);
    assert_eq!(config.work_request_batch_size, 10);
    assert_eq!(config.initial_delay_millis, 20);
    assert!(config.step_timeout_millis.is_none());
}

#[test]
fn test_builder_rejects_blank_credentials() {
    let result = ClientConfig::builder("  ", "token").build();
    assert!(matches!(result, Err(UnmeshedError::InvalidConfig(msg)) if msg.contains("auth_id")));

    let result = ClientConfig::builder("id", "").build();
    assert!(matches!(result, Err(UnmeshedError::InvalidConfig(msg)) if msg.contains("auth_token")));
}

#[test]
fn test_builder_setters() {
    let config = ClientConfig::builder("id", "token")
        .base_url("https://acme.unmeshed.io")
        .port(9443)
        .work_request_batch_size(2000)
        .response_submit_batch_size(2000)
        .initial_delay_millis(50)
        .step_timeout_millis(Some(30_000))
        .build()
        .unwrap();
    assert_eq!(config.engine_url(), "https://acme.unmeshed.io:9443");
    assert_eq!(config.response_submit_batch_size, 2000);
    assert_eq!(config.step_timeout_millis, Some(30_000));
}

#[test]
fn test_from_lookup_requires_credentials() {
    let result = ClientConfig::from_lookup(lookup(&[]));
    assert_eq!(result, Err(UnmeshedError::MissingEnv("UNMESHED_AUTH_ID".to_string())));

    let result = ClientConfig::from_lookup(lookup(&[("UNMESHED_AUTH_ID", "client-1")]));
    assert_eq!(result, Err(UnmeshedError::MissingEnv("UNMESHED_AUTH_TOKEN".to_string())));
}

#[test]
fn test_from_lookup_local_defaults() {
    let config = ClientConfig::from_lookup(lookup(&CREDS)).unwrap();
    assert_eq!(config.auth_id, "client-1");
    assert_eq!(config.engine_url(), "http://localhost:8080");
}

#[test]
fn test_from_lookup_base_url_defaults_to_https_port() {
    let mut vars = CREDS.to_vec();
    vars.push(("UNMESHED_BASE_URL", "https://acme.unmeshed.io"));
    let config = ClientConfig::from_lookup(lookup(&vars)).unwrap();
    assert_eq!(config.port, 443);

    vars.push(("UNMESHED_BASE_URL_PORT", ""));
    let config = ClientConfig::from_lookup(lookup(&vars)).unwrap();
    assert_eq!(config.port, 443, "empty port counts as unset");
}

#[test]
fn test_from_lookup_engine_host_fallback() {
    let mut vars = CREDS.to_vec();
    vars.push(("UNMESHED_ENGINE_HOST", "http://engine.internal"));
    vars.push(("UNMESHED_ENGINE_PORT", "8081"));
    let config = ClientConfig::from_lookup(lookup(&vars)).unwrap();
    assert_eq!(config.engine_url(), "http://engine.internal:8081");

    // The primary variables win over the engine ones.
    vars.push(("UNMESHED_BASE_URL", "https://primary.example"));
    vars.push(("UNMESHED_BASE_URL_PORT", "8443"));
    let config = ClientConfig::from_lookup(lookup(&vars)).unwrap();
    assert_eq!(config.engine_url(), "https://primary.example:8443");
}

#[test]
fn test_from_lookup_invalid_port() {
    let mut vars = CREDS.to_vec();
    vars.push(("UNMESHED_BASE_URL_PORT", "https"));
    let result = ClientConfig::from_lookup(lookup(&vars));
    assert!(matches!(result, Err(UnmeshedError::InvalidConfig(_))));
}
