// SPDX-FileCopyrightText: 2026 Otrcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock broadcast transport for deterministic testing.
//!
//! `MockTransport` implements `BroadcastTransport` with scripted results and
//! captured requests for assertion in tests.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::Mutex;

use otrcast_core::{BroadcastTransport, ClientMismatch, JsonBroadcastPayload, OtrcastError};

/// A request captured by [`MockTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SentBroadcast {
    Json {
        sender: String,
        payload: JsonBroadcastPayload,
        ignore_missing: Option<bool>,
    },
    Protobuf {
        sender: String,
        payload: Bytes,
        ignore_missing: Option<bool>,
    },
}

impl SentBroadcast {
    pub fn sender(&self) -> &str {
        match self {
            Self::Json { sender, .. } | Self::Protobuf { sender, .. } => sender,
        }
    }

    pub fn ignore_missing(&self) -> Option<bool> {
        match self {
            Self::Json { ignore_missing, .. } | Self::Protobuf { ignore_missing, .. } => {
                *ignore_missing
            }
        }
    }
}

/// A mock transport for testing.
///
/// Provides two queues:
/// - **responses**: results queued via `push_response()` are returned in order;
///   once empty, every send returns a clean `ClientMismatch`
/// - **sent**: every request is captured and retrievable via `sent_broadcasts()`
pub struct MockTransport {
    responses: Arc<Mutex<VecDeque<Result<ClientMismatch, OtrcastError>>>>,
    sent: Arc<Mutex<Vec<SentBroadcast>>>,
}

impl MockTransport {
    /// Create a new mock transport with empty queues.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue the result of the next send.
    pub async fn push_response(&self, result: Result<ClientMismatch, OtrcastError>) {
        self.responses.lock().await.push_back(result);
    }

    /// Get all requests captured so far.
    pub async fn sent_broadcasts(&self) -> Vec<SentBroadcast> {
        self.sent.lock().await.clone()
    }

    /// Get the count of captured requests.
    pub async fn sent_count(&self) -> usize {
        self.sent.lock().await.len()
    }

    /// Clear all captured requests.
    pub async fn clear_sent(&self) {
        self.sent.lock().await.clear();
    }

    async fn record(&self, sent: SentBroadcast) -> Result<ClientMismatch, OtrcastError> {
        self.sent.lock().await.push(sent);
        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok(ClientMismatch::default()))
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BroadcastTransport for MockTransport {
    fn name(&self) -> &str {
        "mock-transport"
    }

    async fn send_json(
        &self,
        sender: &str,
        payload: &JsonBroadcastPayload,
        ignore_missing: Option<bool>,
    ) -> Result<ClientMismatch, OtrcastError> {
        self.record(SentBroadcast::Json {
            sender: sender.to_string(),
            payload: payload.clone(),
            ignore_missing,
        })
        .await
    }

    async fn send_protobuf(
        &self,
        sender: &str,
        payload: Bytes,
        ignore_missing: Option<bool>,
    ) -> Result<ClientMismatch, OtrcastError> {
        self.record(SentBroadcast::Protobuf {
            sender: sender.to_string(),
            payload,
            ignore_missing,
        })
        .await
    }
}
