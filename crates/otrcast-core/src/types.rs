// SPDX-FileCopyrightText: 2026 Otrcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the encoders, the broadcast service and transports.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Ciphertexts for one user's devices, keyed by hex client id.
pub type DeviceCipherMap<C> = BTreeMap<String, C>;

/// Per-device ciphertexts for every recipient, keyed by user id.
///
/// Ordered maps give a deterministic iteration order (sorted by user id,
/// then client id) for both wire encodings.
pub type RecipientMap<C> = BTreeMap<String, DeviceCipherMap<C>>;

/// Client ids per user, as reported by the backend.
pub type UserClients = BTreeMap<String, Vec<String>>;

/// Which identifier failed conversion while building a protobuf payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum IdentifierRole {
    #[strum(serialize = "sender")]
    Sender,
    #[strum(serialize = "recipient-user")]
    RecipientUser,
    #[strum(serialize = "recipient-client")]
    RecipientClient,
    #[strum(serialize = "report-missing-user")]
    ReportMissingUser,
}

/// Wire representation used for a broadcast.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum WireEncoding {
    Json,
    #[default]
    Protobuf,
}

/// Priority hint for native push notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NativePriority {
    Low,
    High,
}

impl NativePriority {
    /// Protobuf enum value (`LOW_PRIORITY = 1`, `HIGH_PRIORITY = 2`).
    pub fn wire_value(self) -> u64 {
        match self {
            Self::Low => 1,
            Self::High => 2,
        }
    }

    /// Inverse of [`NativePriority::wire_value`].
    pub fn from_wire_value(value: u64) -> Option<Self> {
        match value {
            1 => Some(Self::Low),
            2 => Some(Self::High),
            _ => None,
        }
    }
}

/// One logical message addressed to many devices.
///
/// `C` is the ciphertext representation: `String` (base64) for the JSON
/// encoding, `Vec<u8>` for the protobuf encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEnvelope<C> {
    /// Hex client id of the sending device.
    pub sender: String,
    /// Whether the backend should trigger native push notifications.
    pub native_push: bool,
    /// Per-device ciphertexts.
    pub recipients: RecipientMap<C>,
    /// Transient messages are not stored for offline devices.
    #[serde(default)]
    pub transient: bool,
    /// Optional push priority hint.
    #[serde(default)]
    pub native_priority: Option<NativePriority>,
    /// Optional external blob shared by all recipients.
    #[serde(default)]
    pub data: Option<C>,
}

impl<C> MessageEnvelope<C> {
    /// Create an envelope with native push enabled and no optional fields.
    pub fn new(sender: impl Into<String>, recipients: RecipientMap<C>) -> Self {
        Self {
            sender: sender.into(),
            native_push: true,
            recipients,
            transient: false,
            native_priority: None,
            data: None,
        }
    }

    pub fn with_native_push(mut self, native_push: bool) -> Self {
        self.native_push = native_push;
        self
    }

    pub fn with_transient(mut self, transient: bool) -> Self {
        self.transient = transient;
        self
    }

    pub fn with_native_priority(mut self, priority: NativePriority) -> Self {
        self.native_priority = Some(priority);
        self
    }

    pub fn with_data(mut self, data: C) -> Self {
        self.data = Some(data);
        self
    }

    /// Number of distinct recipient users.
    pub fn user_count(&self) -> usize {
        self.recipients.len()
    }

    /// Total number of recipient devices across all users.
    pub fn client_count(&self) -> usize {
        self.recipients.values().map(|clients| clients.len()).sum()
    }

    /// Convert every ciphertext (and the blob) into another representation.
    ///
    /// Identifiers and flags are carried over unchanged.
    pub fn map_ciphertexts<D, F>(self, mut f: F) -> MessageEnvelope<D>
    where
        F: FnMut(C) -> D,
    {
        let recipients = self
            .recipients
            .into_iter()
            .map(|(user, clients)| {
                let clients = clients
                    .into_iter()
                    .map(|(client, text)| (client, f(text)))
                    .collect();
                (user, clients)
            })
            .collect();

        MessageEnvelope {
            sender: self.sender,
            native_push: self.native_push,
            recipients,
            transient: self.transient,
            native_priority: self.native_priority,
            data: self.data.map(f),
        }
    }
}

/// JSON body of a broadcast request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonBroadcastPayload {
    pub sender: String,
    pub recipients: RecipientMap<String>,
    pub native_push: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub transient: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_priority: Option<NativePriority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_missing: Option<Vec<String>>,
}

/// The backend's report of devices that did not match the supplied recipients.
///
/// Forwarded to callers without interpretation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientMismatch {
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub missing: UserClients,
    #[serde(default)]
    pub redundant: UserClients,
    #[serde(default)]
    pub deleted: UserClients,
}

impl ClientMismatch {
    /// True when the backend reported no missing, redundant or deleted clients.
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.redundant.is_empty() && self.deleted.is_empty()
    }
}
