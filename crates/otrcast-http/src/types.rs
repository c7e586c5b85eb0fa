// SPDX-FileCopyrightText: 2026 Otrcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Backend response bodies that are not part of the broadcast contract.

use serde::Deserialize;

/// Error body returned by the backend for failed requests.
///
/// ```json
/// {"code": 403, "label": "invalid-credentials", "message": "Authentication failed."}
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct BackendErrorBody {
    #[serde(default)]
    pub code: Option<u16>,
    /// Machine-readable error label.
    pub label: String,
    #[serde(default)]
    pub message: String,
}

/// Content type of an outgoing broadcast body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Json,
    Protobuf,
}

impl BodyKind {
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Protobuf => "application/x-protobuf",
        }
    }
}
