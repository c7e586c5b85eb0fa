// SPDX-FileCopyrightText: 2026 Otrcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use otrcast_core::OtrcastError;
use tracing_subscriber::EnvFilter;

/// Installs a global fmt subscriber filtered to `otrcast*` targets at `level`.
///
/// `RUST_LOG` wins over `level` when set. Fails if a global subscriber is
/// already installed.
pub fn init_tracing(level: &str) -> Result<(), OtrcastError> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_target(true)
        .with_thread_names(false)
        .try_init()
        .map_err(|e| OtrcastError::Internal(format!("failed to install tracing subscriber: {e}")))
}

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level)))
}

fn default_directives(level: &str) -> String {
    format!("otrcast={},warn", level.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_scope_level_to_otrcast_crates() {
        assert_eq!(default_directives("DEBUG"), "otrcast=debug,warn");
        assert_eq!(default_directives("info"), "otrcast=info,warn");
    }

    #[test]
    fn second_install_fails() {
        let _ = init_tracing("info");
        assert!(matches!(init_tracing("info"), Err(OtrcastError::Internal(_))));
    }
}
