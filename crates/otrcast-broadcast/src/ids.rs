// SPDX-FileCopyrightText: 2026 Otrcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversion between textual identifiers and their protobuf forms.
//!
//! User ids travel as 16 raw UUID bytes, client ids as unsigned 64-bit
//! integers parsed from hex.

use std::fmt;

use otrcast_core::{IdentifierRole, OtrcastError};
use uuid::Uuid;

/// Length of a hyphenated UUID string.
const HYPHENATED_UUID_LEN: usize = 36;

/// A user reference in its 16-byte wire form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserRef(pub [u8; 16]);

impl UserRef {
    /// Parse a hyphenated UUID string.
    ///
    /// Simple, braced and URN forms are rejected.
    pub fn parse(value: &str, role: IdentifierRole) -> Result<Self, OtrcastError> {
        if value.len() != HYPHENATED_UUID_LEN {
            return Err(OtrcastError::malformed(
                role,
                value,
                format!("expected a {HYPHENATED_UUID_LEN}-character hyphenated UUID"),
            ));
        }
        Uuid::try_parse(value)
            .map(|uuid| Self(uuid.into_bytes()))
            .map_err(|e| OtrcastError::malformed(role, value, e.to_string()))
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

impl fmt::Display for UserRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Uuid::from_bytes(self.0).hyphenated())
    }
}

/// A client (device) reference in its integer wire form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClientRef(pub u64);

impl ClientRef {
    /// Parse a base-16 client id of at most 64 bits.
    ///
    /// Leading zeros are accepted. Signs, prefixes and whitespace are not.
    pub fn parse(value: &str, role: IdentifierRole) -> Result<Self, OtrcastError> {
        if value.is_empty() {
            return Err(OtrcastError::malformed(role, value, "empty client id"));
        }
        if let Some(bad) = value.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(OtrcastError::malformed(
                role,
                value,
                format!("non-hex character `{bad}`"),
            ));
        }
        u64::from_str_radix(value, 16)
            .map(Self)
            .map_err(|_| OtrcastError::malformed(role, value, "does not fit in 64 bits"))
    }
}

impl fmt::Display for ClientRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}", self.0)
    }
}
