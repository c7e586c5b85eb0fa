// SPDX-FileCopyrightText: 2026 Otrcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP transport for otrcast.
//!
//! Implements [`BroadcastTransport`] against a Wire-style backend's
//! `POST /broadcast/otr/messages` endpoint, for both JSON and protobuf bodies.

pub mod client;
pub mod types;

use async_trait::async_trait;
use bytes::Bytes;
use otrcast_config::BackendConfig;
use otrcast_core::{BroadcastTransport, ClientMismatch, JsonBroadcastPayload, OtrcastError};
use tracing::{debug, info};

use crate::client::BackendClient;
use crate::types::BodyKind;

/// Broadcast transport speaking HTTP to the backend.
pub struct HttpTransport {
    client: BackendClient,
}

impl HttpTransport {
    /// Creates a transport from the `[backend]` configuration section.
    pub fn new(config: &BackendConfig) -> Result<Self, OtrcastError> {
        let client = BackendClient::new(config)?;
        info!(
            base_url = client.base_url(),
            authenticated = config.access_token.is_some(),
            "HTTP transport initialized"
        );
        Ok(Self { client })
    }

    /// Wraps an already configured client.
    pub fn from_client(client: BackendClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &BackendClient {
        &self.client
    }
}

#[async_trait]
impl BroadcastTransport for HttpTransport {
    fn name(&self) -> &str {
        "http"
    }

    async fn send_json(
        &self,
        sender: &str,
        payload: &JsonBroadcastPayload,
        ignore_missing: Option<bool>,
    ) -> Result<ClientMismatch, OtrcastError> {
        let body = serde_json::to_vec(payload)
            .map_err(|e| OtrcastError::Internal(format!("failed to serialize payload: {e}")))?;
        debug!(sender, bytes = body.len(), "posting JSON broadcast");
        self.client
            .post_broadcast(BodyKind::Json, Bytes::from(body), ignore_missing)
            .await
    }

    async fn send_protobuf(
        &self,
        sender: &str,
        payload: Bytes,
        ignore_missing: Option<bool>,
    ) -> Result<ClientMismatch, OtrcastError> {
        debug!(sender, bytes = payload.len(), "posting protobuf broadcast");
        self.client
            .post_broadcast(BodyKind::Protobuf, payload, ignore_missing)
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use otrcast_core::RecipientMap;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn transport(base_url: &str) -> HttpTransport {
        let config = BackendConfig {
            base_url: base_url.to_string(),
            access_token: Some("token".to_string()),
            request_timeout_secs: 5,
            max_retries: 0,
            retry_delay_ms: 0,
        };
        HttpTransport::new(&config).unwrap()
    }

    fn payload() -> JsonBroadcastPayload {
        let mut recipients = RecipientMap::new();
        recipients.insert(
            "user-1".to_string(),
            BTreeMap::from([("c1".to_string(), "Y2lwaGVy".to_string())]),
        );
        JsonBroadcastPayload {
            sender: "a1".to_string(),
            recipients,
            native_push: true,
            transient: false,
            native_priority: None,
            data: None,
            report_missing: Some(vec!["user-1".to_string()]),
        }
    }

    #[tokio::test]
    async fn send_json_posts_serialized_payload() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/broadcast/otr/messages"))
            .and(header("content-type", "application/json"))
            .and(body_json(serde_json::json!({
                "sender": "a1",
                "recipients": {"user-1": {"c1": "Y2lwaGVy"}},
                "native_push": true,
                "report_missing": ["user-1"]
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({"time": "t"})))
            .expect(1)
            .mount(&server)
            .await;

        let mismatch = transport(&server.uri())
            .send_json("a1", &payload(), None)
            .await
            .unwrap();
        assert_eq!(mismatch.time, "t");
    }

    #[tokio::test]
    async fn send_protobuf_with_ignore_missing() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/broadcast/otr/messages"))
            .and(query_param("ignore_missing", "true"))
            .and(header("content-type", "application/x-protobuf"))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let mismatch = transport(&server.uri())
            .send_protobuf("a1", Bytes::from_static(&[0x0a, 0x00]), Some(true))
            .await
            .unwrap();
        assert!(mismatch.is_clean());
    }

    #[tokio::test]
    async fn from_client_uses_overridden_base_url() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/broadcast/otr/messages"))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let client = BackendClient::new(&BackendConfig::default())
            .unwrap()
            .with_base_url(format!("{}/", server.uri()));
        let transport = HttpTransport::from_client(client);
        assert_eq!(transport.client().base_url(), server.uri());

        transport
            .send_protobuf("a1", Bytes::from_static(&[0x0a, 0x00]), None)
            .await
            .unwrap();
    }

    #[test]
    fn transport_name() {
        assert_eq!(transport("http://localhost:1").name(), "http");
    }
}
