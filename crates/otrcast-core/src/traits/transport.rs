// SPDX-FileCopyrightText: 2026 Otrcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Transport trait for delivering encoded broadcasts to a messaging backend.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::OtrcastError;
use crate::types::{ClientMismatch, JsonBroadcastPayload};

/// Delivers fully encoded broadcast payloads to the backend.
///
/// Implementations own retry, backoff, timeout and cancellation. Whatever
/// they return is handed back to the caller of the broadcast service as is.
#[async_trait]
pub trait BroadcastTransport: Send + Sync + 'static {
    /// Returns the human-readable name of this transport.
    fn name(&self) -> &str;

    /// Sends a JSON broadcast body.
    ///
    /// `sender` repeats the sending client id already carried in the payload.
    /// Transports may use it for routing or logging only.
    ///
    /// `ignore_missing` is `Some(true)` only when the caller asked the backend
    /// to skip its missing-device check.
    async fn send_json(
        &self,
        sender: &str,
        payload: &JsonBroadcastPayload,
        ignore_missing: Option<bool>,
    ) -> Result<ClientMismatch, OtrcastError>;

    /// Sends a serialized protobuf `NewOtrMessage`.
    ///
    /// As with [`send_json`](Self::send_json), `sender` is informational.
    async fn send_protobuf(
        &self,
        sender: &str,
        payload: Bytes,
        ignore_missing: Option<bool>,
    ) -> Result<ClientMismatch, OtrcastError>;
}

#[async_trait]
impl<T: BroadcastTransport + ?Sized> BroadcastTransport for Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn send_json(
        &self,
        sender: &str,
        payload: &JsonBroadcastPayload,
        ignore_missing: Option<bool>,
    ) -> Result<ClientMismatch, OtrcastError> {
        (**self).send_json(sender, payload, ignore_missing).await
    }

    async fn send_protobuf(
        &self,
        sender: &str,
        payload: Bytes,
        ignore_missing: Option<bool>,
    ) -> Result<ClientMismatch, OtrcastError> {
        (**self).send_protobuf(sender, payload, ignore_missing).await
    }
}
