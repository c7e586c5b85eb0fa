// SPDX-FileCopyrightText: 2026 Otrcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as URL schemes, non-zero timeouts and known log levels.

use crate::diagnostic::ConfigError;
use crate::model::OtrcastConfig;

/// Upper bound for `backend.max_retries`.
const MAX_RETRIES_LIMIT: u32 = 10;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &OtrcastConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let base_url = config.backend.base_url.trim();
    if base_url.is_empty() {
        errors.push(ConfigError::Validation {
            message: "backend.base_url must not be empty".to_string(),
        });
    } else if !(base_url.starts_with("https://") || base_url.starts_with("http://")) {
        errors.push(ConfigError::Validation {
            message: format!("backend.base_url `{base_url}` must start with http:// or https://"),
        });
    }

    if let Some(token) = &config.backend.access_token
        && token.trim().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "backend.access_token must not be empty when set".to_string(),
        });
    }

    if config.backend.request_timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "backend.request_timeout_secs must be greater than 0".to_string(),
        });
    }

    if config.backend.max_retries > MAX_RETRIES_LIMIT {
        errors.push(ConfigError::Validation {
            message: format!(
                "backend.max_retries must be at most {MAX_RETRIES_LIMIT}, got {}",
                config.backend.max_retries
            ),
        });
    }

    let level = config.logging.level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "logging.level `{}` is not one of {}",
                config.logging.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_error(errors: &[ConfigError], needle: &str) -> bool {
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains(needle)))
    }

    #[test]
    fn default_config_validates() {
        let config = OtrcastConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn non_http_base_url_fails_validation() {
        let mut config = OtrcastConfig::default();
        config.backend.base_url = "ftp://backend.example.com".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "backend.base_url"));
    }

    #[test]
    fn empty_base_url_fails_validation() {
        let mut config = OtrcastConfig::default();
        config.backend.base_url = "  ".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "must not be empty"));
    }

    #[test]
    fn zero_timeout_fails_validation() {
        let mut config = OtrcastConfig::default();
        config.backend.request_timeout_secs = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "request_timeout_secs"));
    }

    #[test]
    fn blank_access_token_fails_validation() {
        let mut config = OtrcastConfig::default();
        config.backend.access_token = Some(String::new());
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "access_token"));
    }

    #[test]
    fn errors_are_collected_not_fail_fast() {
        let mut config = OtrcastConfig::default();
        config.backend.max_retries = 50;
        config.logging.level = "loud".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(has_error(&errors, "max_retries"));
        assert!(has_error(&errors, "logging.level"));
    }

    #[test]
    fn log_level_is_case_insensitive() {
        let mut config = OtrcastConfig::default();
        config.logging.level = "DEBUG".to_string();
        assert!(validate_config(&config).is_ok());
    }
}
