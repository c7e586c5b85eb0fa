// SPDX-FileCopyrightText: 2026 Otrcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Broadcast service: resolve the precondition, encode, hand off to the transport.

use otrcast_core::{BroadcastTransport, ClientMismatch, MessageEnvelope, OtrcastError};
use tracing::debug;

use crate::json::encode_json;
use crate::precondition::PreconditionOption;
use crate::proto::encode_protobuf;

/// Posts encrypted broadcasts through an injected transport.
///
/// Holds no state besides the transport, so one service can serve any
/// number of concurrent sends. The transport's result, success or failure,
/// is returned without inspection.
#[derive(Debug, Clone)]
pub struct BroadcastService<T> {
    transport: T,
}

impl<T: BroadcastTransport> BroadcastService<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Post a broadcast whose ciphertexts are base64 text.
    pub async fn post_broadcast(
        &self,
        envelope: &MessageEnvelope<String>,
        precondition: impl Into<PreconditionOption>,
    ) -> Result<ClientMismatch, OtrcastError> {
        let precondition = precondition.into();
        let payload = encode_json(envelope, &precondition);

        debug!(
            transport = self.transport.name(),
            mode = precondition.mode(),
            users = envelope.user_count(),
            clients = envelope.client_count(),
            "posting JSON broadcast"
        );

        self.transport
            .send_json(&envelope.sender, &payload, precondition.ignore_missing())
            .await
    }

    /// Post a broadcast whose ciphertexts are raw bytes, encoded as protobuf.
    ///
    /// Fails with [`OtrcastError::MalformedIdentifier`] before contacting the
    /// transport if any identifier cannot be converted.
    pub async fn post_broadcast_protobuf(
        &self,
        envelope: &MessageEnvelope<Vec<u8>>,
        precondition: impl Into<PreconditionOption>,
    ) -> Result<ClientMismatch, OtrcastError> {
        let precondition = precondition.into();
        let message = encode_protobuf(envelope, &precondition)?;
        let payload = message.encode_to_bytes();

        debug!(
            transport = self.transport.name(),
            mode = precondition.mode(),
            users = message.recipients.len(),
            clients = envelope.client_count(),
            bytes = payload.len(),
            "posting protobuf broadcast"
        );

        self.transport
            .send_protobuf(&envelope.sender, payload, precondition.ignore_missing())
            .await
    }
}
