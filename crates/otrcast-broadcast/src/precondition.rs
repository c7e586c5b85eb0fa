// SPDX-FileCopyrightText: 2026 Otrcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Missing-recipient precondition resolution.
//!
//! The backend understands three mutually exclusive strategies for devices
//! the sender did not encrypt for: reject the broadcast (the default), ignore
//! every missing device, or report missing devices only for named users.

use serde::{Deserialize, Serialize};

/// Precondition as it arrives from loosely typed callers: a flag or a user list.
///
/// Deserializes from JSON `true`/`false` or `["<user id>", ...]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PreconditionInput {
    Users(Vec<String>),
    Flag(bool),
}

/// The resolved missing-recipient strategy for one broadcast.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PreconditionOption {
    /// No directive; the backend rejects the broadcast if any device is missing.
    #[default]
    Default,
    /// Ask the backend to skip its missing-device check entirely.
    IgnoreMissing,
    /// Report missing devices only for these users. Order and duplicates are kept.
    ReportOnly(Vec<String>),
}

impl PreconditionOption {
    /// Classify a raw precondition. Every input maps to exactly one strategy.
    pub fn classify(input: Option<PreconditionInput>) -> Self {
        match input {
            Some(PreconditionInput::Users(users)) => Self::ReportOnly(users),
            Some(PreconditionInput::Flag(true)) => Self::IgnoreMissing,
            Some(PreconditionInput::Flag(false)) | None => Self::Default,
        }
    }

    /// Value for the transport-level `ignore_missing` flag.
    pub fn ignore_missing(&self) -> Option<bool> {
        match self {
            Self::IgnoreMissing => Some(true),
            _ => None,
        }
    }

    /// Users whose missing devices should be reported, when restricted.
    pub fn report_missing(&self) -> Option<&[String]> {
        match self {
            Self::ReportOnly(users) => Some(users),
            _ => None,
        }
    }

    /// Short name for logs.
    pub fn mode(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::IgnoreMissing => "ignore_missing",
            Self::ReportOnly(_) => "report_only",
        }
    }
}

impl From<bool> for PreconditionOption {
    fn from(ignore_missing: bool) -> Self {
        Self::classify(Some(PreconditionInput::Flag(ignore_missing)))
    }
}

impl From<Vec<String>> for PreconditionOption {
    fn from(users: Vec<String>) -> Self {
        Self::ReportOnly(users)
    }
}

impl From<PreconditionInput> for PreconditionOption {
    fn from(input: PreconditionInput) -> Self {
        Self::classify(Some(input))
    }
}

impl From<Option<PreconditionInput>> for PreconditionOption {
    fn from(input: Option<PreconditionInput>) -> Self {
        Self::classify(input)
    }
}
