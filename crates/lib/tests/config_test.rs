//! # Configuration Tests
//!
//! Configuration is layered: programmatic defaults, an optional YAML file,
//! then environment overrides. A bare setup must come up with a usable
//! local provider without any file at all.

use classmark::config::get_config;
use std::io::Write;

/// With no file present the defaults apply and a local provider is
/// injected.
#[test]
fn test_defaults_without_config_file() {
    let config = get_config(None).expect("defaults should load");
    assert_eq!(config.analysis.provider, "local_default");
    assert_eq!(config.analysis.model_name, "qwen2.5:7b");
    assert_eq!(config.analysis.request_timeout_secs, 60);
    assert_eq!(config.analysis.max_retries, 1);

    let local = config
        .providers
        .get("local_default")
        .expect("a local provider is always present");
    assert_eq!(local.provider, "local");
    assert!(local.api_url.is_some());
}

/// A config file overrides the defaults and contributes provider entries.
#[test]
fn test_config_file_overrides() {
    let mut file = tempfile::Builder::new()
        .suffix(".yml")
        .tempfile()
        .expect("temp config");
    write!(
        file,
        r#"
analysis:
  provider: gemini_default
  model_name: "llama3:8b"
  request_timeout_secs: 20
  max_retries: 2

providers:
  gemini_default:
    provider: gemini
    api_url: null
    api_key: "test-key"
    model_name: gemini-2.0-flash
"#
    )
    .expect("write config");
    file.flush().expect("flush");

    let config = get_config(file.path().to_str()).expect("file should load");
    assert_eq!(config.analysis.provider, "gemini_default");
    assert_eq!(config.analysis.model_name, "llama3:8b");
    assert_eq!(config.analysis.request_timeout_secs, 20);
    assert_eq!(config.analysis.max_retries, 2);

    let gemini = config.providers.get("gemini_default").expect("gemini entry");
    assert_eq!(gemini.provider, "gemini");
    assert_eq!(gemini.api_key.as_deref(), Some("test-key"));
    // The injected local entry still exists alongside the configured one.
    assert!(config.providers.contains_key("local_default"));
}

/// An explicitly requested config path that does not exist is an error,
/// not a silent fallback to defaults.
#[test]
fn test_missing_override_path_is_an_error() {
    let err = get_config(Some("/nonexistent/classmark-config.yml"))
        .expect_err("missing explicit path must fail");
    assert!(err.to_string().contains("not found"));
}
