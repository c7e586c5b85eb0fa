// SPDX-FileCopyrightText: 2026 Otrcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for otrcast.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use otrcast_core::WireEncoding;
use serde::{Deserialize, Deserializer, Serialize};

/// Top-level otrcast configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OtrcastConfig {
    /// Messaging backend connection settings.
    #[serde(default)]
    pub backend: BackendConfig,

    /// Broadcast encoding defaults.
    #[serde(default)]
    pub broadcast: BroadcastConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Messaging backend connection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BackendConfig {
    /// Base URL of the backend API, without a trailing path.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token sent with every request. `None` sends no Authorization header.
    #[serde(default, deserialize_with = "deserialize_token")]
    pub access_token: Option<String>,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Retries after a transient failure (429, 500, 502, 503).
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Delay between retries in milliseconds.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            access_token: None,
            request_timeout_secs: default_request_timeout_secs(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

/// Env values are type-inferred, so an all-digit token arrives as a number.
fn deserialize_token<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Token {
        Text(String),
        Unsigned(u64),
        Signed(i64),
    }

    Ok(Option::<Token>::deserialize(deserializer)?.map(|token| match token {
        Token::Text(text) => text,
        Token::Unsigned(n) => n.to_string(),
        Token::Signed(n) => n.to_string(),
    }))
}

fn default_base_url() -> String {
    "https://prod-nginz-https.wire.com".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    1
}

fn default_retry_delay_ms() -> u64 {
    1000
}

/// Broadcast encoding defaults.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BroadcastConfig {
    /// Wire representation (`json` or `protobuf`).
    #[serde(default)]
    pub encoding: WireEncoding,

    /// Whether broadcasts trigger native push notifications.
    #[serde(default = "default_native_push")]
    pub native_push: bool,
}

impl Default for BroadcastConfig {
    fn default() -> Self {
        Self {
            encoding: WireEncoding::default(),
            native_push: default_native_push(),
        }
    }
}

fn default_native_push() -> bool {
    true
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
