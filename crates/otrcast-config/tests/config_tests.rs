// SPDX-FileCopyrightText: 2026 Otrcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the otrcast configuration system.

use otrcast_config::diagnostic::ConfigError;
use otrcast_config::model::OtrcastConfig;
use otrcast_config::{load_and_validate_path, load_and_validate_str, load_config_from_str};
use otrcast_core::WireEncoding;

/// Every known key deserializes.
#[test]
fn valid_toml_deserializes_into_otrcast_config() {
    let toml = r#"
[backend]
base_url = "https://staging-nginz-https.example.com"
access_token = "token-123"
request_timeout_secs = 5
max_retries = 3
retry_delay_ms = 250

[broadcast]
encoding = "json"
native_push = false

[logging]
level = "debug"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(
        config.backend.base_url,
        "https://staging-nginz-https.example.com"
    );
    assert_eq!(config.backend.access_token.as_deref(), Some("token-123"));
    assert_eq!(config.backend.request_timeout_secs, 5);
    assert_eq!(config.backend.max_retries, 3);
    assert_eq!(config.backend.retry_delay_ms, 250);
    assert_eq!(config.broadcast.encoding, WireEncoding::Json);
    assert!(!config.broadcast.native_push);
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn empty_toml_uses_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert_eq!(config.backend.base_url, "https://prod-nginz-https.wire.com");
    assert!(config.backend.access_token.is_none());
    assert_eq!(config.backend.request_timeout_secs, 30);
    assert_eq!(config.backend.max_retries, 1);
    assert_eq!(config.backend.retry_delay_ms, 1000);
    assert_eq!(config.broadcast.encoding, WireEncoding::Protobuf);
    assert!(config.broadcast.native_push);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn partial_section_keeps_other_defaults() {
    let toml = r#"
[backend]
max_retries = 4
"#;

    let config = load_config_from_str(toml).expect("partial section should parse");
    assert_eq!(config.backend.max_retries, 4);
    assert_eq!(config.backend.request_timeout_secs, 30);
    assert_eq!(config.backend.base_url, "https://prod-nginz-https.wire.com");
}

/// Dotted overrides reach keys containing underscores intact.
#[test]
fn dotted_override_sets_underscored_key() {
    use figment::{providers::Serialized, Figment};

    let config: OtrcastConfig = Figment::new()
        .merge(Serialized::defaults(OtrcastConfig::default()))
        .merge(("backend.access_token", "xyz-from-env"))
        .extract()
        .expect("should set access_token via dot notation");

    assert_eq!(config.backend.access_token.as_deref(), Some("xyz-from-env"));
}

#[test]
fn missing_config_files_silently_skipped() {
    use figment::{
        providers::{Format, Serialized, Toml},
        Figment,
    };

    let config: OtrcastConfig = Figment::new()
        .merge(Serialized::defaults(OtrcastConfig::default()))
        .merge(Toml::file("/nonexistent/path/otrcast.toml"))
        .extract()
        .expect("missing file should be silently skipped");

    assert_eq!(config.broadcast.encoding, WireEncoding::Protobuf);
}

#[test]
fn default_config_round_trips_through_toml() {
    let rendered = toml::to_string(&OtrcastConfig::default()).expect("defaults serialize");
    let config = load_and_validate_str(&rendered).expect("rendered defaults should validate");
    assert_eq!(config.backend.base_url, OtrcastConfig::default().backend.base_url);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn unknown_top_level_section_is_rejected() {
    let toml = r#"
[agent]
name = "bot"
"#;

    let err = load_config_from_str(toml).expect_err("unknown section should be rejected");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("agent"),
        "error should mention unknown field, got: {err_str}"
    );
}

#[test]
fn unknown_key_carries_suggestion_and_valid_keys() {
    let toml = r#"
[backend]
base_ulr = "https://example.com"
"#;

    let errors = load_and_validate_str(toml).expect_err("should produce errors");
    let matched = errors.iter().any(|e| {
        matches!(e, ConfigError::UnknownKey { key, suggestion, valid_keys, .. } if {
            key == "base_ulr"
                && suggestion.as_deref() == Some("base_url")
                && valid_keys.contains("access_token")
                && valid_keys.contains("retry_delay_ms")
        })
    });
    assert!(matched, "expected UnknownKey for base_ulr, got: {errors:?}");
}

#[test]
fn unknown_encoding_is_an_invalid_value() {
    let toml = r#"
[broadcast]
encoding = "xml"
"#;

    let errors = load_and_validate_str(toml).expect_err("unknown encoding should fail");
    let matched = errors.iter().any(|e| {
        matches!(e, ConfigError::InvalidValue { detail, .. } if detail.contains("xml"))
    });
    assert!(matched, "expected InvalidValue for xml, got: {errors:?}");
}

#[test]
fn wrong_type_is_reported() {
    let toml = r#"
[backend]
max_retries = "many"
"#;

    let err = load_config_from_str(toml).expect_err("should reject invalid type");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("invalid type") || err_str.contains("max_retries"),
        "error should mention type mismatch, got: {err_str}"
    );
}

#[test]
fn validation_errors_surface_through_load_and_validate() {
    let toml = r#"
[backend]
base_url = "nginz.example.com"
request_timeout_secs = 0
"#;

    let errors = load_and_validate_str(toml).expect_err("invalid values should fail");
    let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
    assert_eq!(errors.len(), 2, "got: {messages:?}");
    assert!(messages.iter().any(|m| m.contains("base_url")));
    assert!(messages.iter().any(|m| m.contains("request_timeout_secs")));
}

#[test]
fn unknown_key_in_explicit_file_is_diagnosed() {
    figment::Jail::expect_with(|jail| {
        jail.create_file(
            "otrcast.toml",
            "[logging]\nlevel = \"info\"\n\n[broadcast]\nnative_psh = true\n",
        )?;
        let path = jail.directory().join("otrcast.toml");

        let errors = load_and_validate_path(&path).expect_err("typo should fail");
        let matched = errors.iter().any(|e| {
            matches!(e, ConfigError::UnknownKey { key, suggestion, .. }
                if key == "native_psh" && suggestion.as_deref() == Some("native_push"))
        });
        assert!(matched, "expected UnknownKey for native_psh, got: {errors:?}");
        Ok(())
    });
}

#[test]
fn config_error_renders_with_miette() {
    use miette::{Diagnostic, GraphicalReportHandler};

    let error = ConfigError::UnknownKey {
        key: "acess_token".to_string(),
        suggestion: Some("access_token".to_string()),
        valid_keys: "base_url, access_token".to_string(),
        span: None,
        src: None,
    };

    let help = error.help().expect("should have help text").to_string();
    assert!(help.contains("did you mean `access_token`"), "got: {help}");
    assert!(error.code().is_some());

    let mut buf = String::new();
    GraphicalReportHandler::new()
        .render_report(&mut buf, &error)
        .expect("should render without error");
    assert!(buf.contains("acess_token"));
}

#[test]
fn load_and_validate_without_files_uses_defaults() {
    figment::Jail::expect_with(|_jail| {
        let config = otrcast_config::load_and_validate()
            .map_err(|errors| format!("{errors:?}"))?;
        assert_eq!(config.broadcast.encoding, WireEncoding::Protobuf);
        Ok(())
    });
}
