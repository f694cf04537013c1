// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the LightUp configuration system.

use figment::Jail;
use lightup_config::diagnostic::ConfigError;
use lightup_config::{LightupConfig, load_and_validate_str, load_config, load_config_from_str};

#[test]
fn full_toml_deserializes() {
    let toml = r#"
[app]
log_level = "debug"

[storage]
database_path = "/tmp/lightup-test.db"

[memory]
max_buffer_size = 30
context_window_size = 12
summary_trigger_size = 20
long_term_limit = 10
max_relevant_results = 3

[providers]
openai_base_url = "http://localhost:9000/v1"
basic_max_attempts = 5

[rate_limit]
enabled = false
daily_limit = 100

[follow_up]
debounce_ms = 40
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.app.log_level, "debug");
    assert_eq!(config.storage.database_path, "/tmp/lightup-test.db");
    assert_eq!(config.memory.max_buffer_size, 30);
    assert_eq!(config.memory.context_window_size, 12);
    assert_eq!(config.memory.summary_trigger_size, 20);
    assert_eq!(config.memory.long_term_limit, 10);
    assert_eq!(config.memory.max_relevant_results, 3);
    assert_eq!(config.providers.openai_base_url, "http://localhost:9000/v1");
    assert_eq!(config.providers.basic_max_attempts, 5);
    assert!(!config.rate_limit.enabled);
    assert_eq!(config.rate_limit.daily_limit, 100);
    assert_eq!(config.follow_up.debounce_ms, 40);
}

#[test]
fn empty_toml_yields_defaults() {
    let config = load_config_from_str("").unwrap();
    let defaults = LightupConfig::default();
    assert_eq!(config.memory, defaults.memory);
    assert_eq!(config.memory.max_buffer_size, 20);
    assert_eq!(config.memory.context_window_size, 10);
    assert_eq!(config.memory.summary_trigger_size, 15);
    assert_eq!(config.memory.long_term_limit, 50);
    assert_eq!(config.follow_up.debounce_ms, 80);
    assert_eq!(config.providers.basic_max_attempts, 3);
}

#[test]
fn unknown_key_gets_a_suggestion() {
    let toml = r#"
[memory]
max_bufer_size = 3
"#;
    let errors = load_and_validate_str(toml).expect_err("unknown key should fail");
    match &errors[0] {
        ConfigError::UnknownKey {
            key, suggestion, ..
        } => {
            assert_eq!(key, "max_bufer_size");
            assert_eq!(suggestion.as_deref(), Some("max_buffer_size"));
        }
        other => panic!("expected UnknownKey, got {other:?}"),
    }
}

#[test]
fn unknown_section_is_rejected() {
    let errors = load_and_validate_str("[telemetry]\nenabled = true\n").unwrap_err();
    assert!(matches!(errors[0], ConfigError::UnknownKey { .. }));
}

#[test]
fn wrong_type_is_reported() {
    let errors = load_and_validate_str("[memory]\nmax_buffer_size = \"many\"\n").unwrap_err();
    assert!(
        matches!(&errors[0], ConfigError::InvalidType { key, .. } if key.contains("max_buffer_size")),
        "got {:?}",
        errors[0]
    );
}

#[test]
fn semantic_validation_runs_after_parsing() {
    let errors = load_and_validate_str("[memory]\ncontext_window_size = 40\n").unwrap_err();
    assert!(matches!(errors[0], ConfigError::Validation { .. }));
}

#[test]
fn env_overrides_keys_with_underscores() {
    Jail::expect_with(|jail| {
        jail.create_file("lightup.toml", "[memory]\nmax_buffer_size = 25\n")?;
        jail.set_env("LIGHTUP_MEMORY_CONTEXT_WINDOW_SIZE", "8");
        jail.set_env("LIGHTUP_RATE_LIMIT_DAILY_LIMIT", "7");

        let config = load_config().expect("config should load");
        assert_eq!(config.memory.max_buffer_size, 25);
        assert_eq!(config.memory.context_window_size, 8);
        assert_eq!(config.rate_limit.daily_limit, 7);
        Ok(())
    });
}
