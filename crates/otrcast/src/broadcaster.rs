// SPDX-FileCopyrightText: 2026 Otrcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configured entry point that picks the wire encoding for each broadcast.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use otrcast_broadcast::{BroadcastService, PreconditionOption};
use otrcast_config::{BackendConfig, OtrcastConfig};
use otrcast_core::{
    BroadcastTransport, ClientMismatch, MessageEnvelope, OtrcastError, RecipientMap, WireEncoding,
};
use otrcast_http::HttpTransport;
use tracing::info;

/// Sends broadcasts through a [`BroadcastService`] using a fixed wire encoding.
///
/// Ciphertexts are always supplied as raw bytes. For [`WireEncoding::Json`]
/// they are base64-encoded (standard alphabet, padded) before encoding.
pub struct Broadcaster<T: BroadcastTransport> {
    service: BroadcastService<T>,
    encoding: WireEncoding,
    native_push: bool,
}

impl Broadcaster<HttpTransport> {
    /// Builds a broadcaster talking HTTP to the configured backend.
    pub fn from_config(config: &OtrcastConfig) -> Result<Self, OtrcastError> {
        Self::from_config_with(config, HttpTransport::new)
    }
}

impl<T: BroadcastTransport> Broadcaster<T> {
    pub fn new(transport: T, encoding: WireEncoding, native_push: bool) -> Self {
        Self {
            service: BroadcastService::new(transport),
            encoding,
            native_push,
        }
    }

    /// Builds a broadcaster whose transport comes from `factory`.
    pub fn from_config_with<F>(config: &OtrcastConfig, factory: F) -> Result<Self, OtrcastError>
    where
        F: FnOnce(&BackendConfig) -> Result<T, OtrcastError>,
    {
        let transport = factory(&config.backend)?;
        info!(
            transport = transport.name(),
            encoding = %config.broadcast.encoding,
            native_push = config.broadcast.native_push,
            "broadcaster ready"
        );
        Ok(Self::new(
            transport,
            config.broadcast.encoding,
            config.broadcast.native_push,
        ))
    }

    pub fn encoding(&self) -> WireEncoding {
        self.encoding
    }

    pub fn service(&self) -> &BroadcastService<T> {
        &self.service
    }

    /// An envelope carrying this broadcaster's `native_push` default.
    pub fn envelope(
        &self,
        sender: impl Into<String>,
        recipients: RecipientMap<Vec<u8>>,
    ) -> MessageEnvelope<Vec<u8>> {
        MessageEnvelope::new(sender, recipients).with_native_push(self.native_push)
    }

    /// Broadcasts `recipients` from `sender` under `precondition`.
    pub async fn broadcast(
        &self,
        sender: impl Into<String>,
        recipients: RecipientMap<Vec<u8>>,
        precondition: impl Into<PreconditionOption>,
    ) -> Result<ClientMismatch, OtrcastError> {
        let envelope = self.envelope(sender, recipients);
        self.send(&envelope, precondition).await
    }

    /// Sends a caller-built envelope in the configured encoding.
    pub async fn send(
        &self,
        envelope: &MessageEnvelope<Vec<u8>>,
        precondition: impl Into<PreconditionOption>,
    ) -> Result<ClientMismatch, OtrcastError> {
        match self.encoding {
            WireEncoding::Protobuf => {
                self.service
                    .post_broadcast_protobuf(envelope, precondition)
                    .await
            }
            WireEncoding::Json => {
                let text = envelope.clone().map_ciphertexts(|c| STANDARD.encode(c));
                self.service.post_broadcast(&text, precondition).await
            }
        }
    }
}
