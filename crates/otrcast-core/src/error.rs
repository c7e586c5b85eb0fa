// SPDX-FileCopyrightText: 2026 Otrcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the otrcast broadcast encoder.

use thiserror::Error;

use crate::types::{ClientMismatch, IdentifierRole};

/// The primary error type shared by the encoder, the service and transports.
#[derive(Debug, Error)]
pub enum OtrcastError {
    /// Configuration errors (invalid base URL, bad header values, unknown encoding).
    #[error("configuration error: {0}")]
    Config(String),

    /// A user or client identifier failed its format or range check.
    ///
    /// Raised only while building a protobuf payload, before any transport call.
    #[error("malformed {role} identifier `{value}`: {reason}")]
    MalformedIdentifier {
        role: IdentifierRole,
        value: String,
        reason: String,
    },

    /// Transport failures (network, auth, rate limiting, unexpected status).
    #[error("transport error: {message}")]
    Transport {
        message: String,
        status: Option<u16>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The backend rejected the broadcast because devices were missing.
    #[error(
        "backend rejected broadcast: {} user(s) with missing clients",
        .0.missing.len()
    )]
    MissingClients(ClientMismatch),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl OtrcastError {
    /// Shorthand for a [`OtrcastError::MalformedIdentifier`].
    pub fn malformed(role: IdentifierRole, value: &str, reason: impl Into<String>) -> Self {
        Self::MalformedIdentifier {
            role,
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Returns the HTTP status attached to a transport failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => *status,
            Self::MissingClients(_) => Some(412),
            _ => None,
        }
    }
}
