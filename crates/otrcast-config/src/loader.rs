// SPDX-FileCopyrightText: 2026 Otrcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./otrcast.toml` > `~/.config/otrcast/otrcast.toml` > `/etc/otrcast/otrcast.toml`
//! with environment variable overrides via `OTRCAST_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::OtrcastConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/otrcast/otrcast.toml` (system-wide)
/// 3. `~/.config/otrcast/otrcast.toml` (user XDG config)
/// 4. `./otrcast.toml` (local directory)
/// 5. `OTRCAST_*` environment variables
pub fn load_config() -> Result<OtrcastConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<OtrcastConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(OtrcastConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<OtrcastConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(OtrcastConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(OtrcastConfig::default()))
        .merge(Toml::file("/etc/otrcast/otrcast.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("otrcast/otrcast.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("otrcast.toml"))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `OTRCAST_BACKEND_ACCESS_TOKEN` must map to
/// `backend.access_token`, not `backend.access.token`.
fn env_provider() -> Env {
    Env::prefixed("OTRCAST_").map(|key| map_env_key(key.as_str()).into())
}

/// Map a prefix-stripped env var name to its dotted config path.
///
/// Figment hands the key over in its original case.
pub(crate) fn map_env_key(key: &str) -> String {
    key.to_ascii_lowercase()
        .replacen("backend_", "backend.", 1)
        .replacen("broadcast_", "broadcast.", 1)
        .replacen("logging_", "logging.", 1)
}
