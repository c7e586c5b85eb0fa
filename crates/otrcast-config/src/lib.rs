// SPDX-FileCopyrightText: 2026 Otrcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for otrcast.
//!
//! TOML files are layered through the XDG hierarchy, `OTRCAST_*` environment
//! variables override them, and every key is checked with `deny_unknown_fields`.
//! Failures come back as miette diagnostics with typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use otrcast_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("backend: {}", config.backend.base_url);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::{Path, PathBuf};

pub use diagnostic::{render_errors, ConfigError, SourceFile};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{BackendConfig, BroadcastConfig, LoggingConfig, OtrcastConfig};

/// Load configuration from the XDG hierarchy and validate it.
///
/// Extraction errors are converted to diagnostics pointing into whichever
/// `otrcast.toml` files were found. Validation errors are all reported at once.
pub fn load_and_validate() -> Result<OtrcastConfig, Vec<ConfigError>> {
    match loader::load_config() {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(
            err,
            &read_sources(&config_search_paths()),
        )),
    }
}

/// Load configuration from a TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<OtrcastConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = [SourceFile::new("<inline>", toml_content)];
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Load configuration from an explicit file (plus env overrides) and validate it.
pub fn load_and_validate_path(path: &Path) -> Result<OtrcastConfig, Vec<ConfigError>> {
    match loader::load_config_from_path(path) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(
            err,
            &read_sources(&[absolute(path)]),
        )),
    }
}

/// Files consulted by [`load_config`], highest precedence first.
fn config_search_paths() -> Vec<PathBuf> {
    let mut paths = vec![absolute(Path::new("otrcast.toml"))];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("otrcast/otrcast.toml"));
    }
    paths.push(PathBuf::from("/etc/otrcast/otrcast.toml"));
    paths
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|dir| dir.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

fn read_sources(paths: &[PathBuf]) -> Vec<SourceFile> {
    paths
        .iter()
        .filter_map(|path| {
            std::fs::read_to_string(path)
                .ok()
                .map(|content| SourceFile::new(path.display().to_string(), content))
        })
        .collect()
}
