// SPDX-FileCopyrightText: 2026 Otrcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the backend broadcast endpoint.
//!
//! Provides [`BackendClient`] which handles request construction,
//! bearer authentication, response mapping and transient error retry.

use std::time::Duration;

use bytes::Bytes;
use otrcast_config::BackendConfig;
use otrcast_core::{ClientMismatch, OtrcastError};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::types::{BackendErrorBody, BodyKind};

/// Path of the broadcast endpoint, relative to the backend base URL.
const BROADCAST_PATH: &str = "/broadcast/otr/messages";

/// HTTP client for backend communication.
///
/// Owns the connection pool, default headers and the retry policy for
/// transient statuses (429, 500, 502, 503).
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
    max_retries: u32,
    retry_delay: Duration,
}

impl BackendClient {
    /// Creates a client from the `[backend]` configuration section.
    pub fn new(config: &BackendConfig) -> Result<Self, OtrcastError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = &config.access_token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| {
                OtrcastError::Config(format!("invalid access token header value: {e}"))
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| OtrcastError::Transport {
                message: format!("failed to build HTTP client: {e}"),
                status: None,
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_retries: config.max_retries,
            retry_delay: Duration::from_millis(config.retry_delay_ms),
        })
    }

    /// Overrides the base URL (for pointing at a mock server).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full endpoint URL, with `ignore_missing=true` only when asked for.
    pub fn broadcast_url(&self, ignore_missing: Option<bool>) -> String {
        match ignore_missing {
            Some(true) => format!("{}{BROADCAST_PATH}?ignore_missing=true", self.base_url),
            _ => format!("{}{BROADCAST_PATH}", self.base_url),
        }
    }

    /// Posts one broadcast body and maps the backend response.
    ///
    /// - 2xx: the body is a [`ClientMismatch`] (an empty body is a clean one).
    /// - 412: the backend refused delivery; returns [`OtrcastError::MissingClients`].
    /// - 429/500/502/503: retried up to `max_retries` times.
    /// - anything else: [`OtrcastError::Transport`] with the status attached.
    pub async fn post_broadcast(
        &self,
        kind: BodyKind,
        body: Bytes,
        ignore_missing: Option<bool>,
    ) -> Result<ClientMismatch, OtrcastError> {
        let url = self.broadcast_url(ignore_missing);
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, "retrying broadcast after transient error");
                tokio::time::sleep(self.retry_delay).await;
            }

            let response = self
                .client
                .post(&url)
                .header(CONTENT_TYPE, kind.content_type())
                .body(body.clone())
                .send()
                .await
                .map_err(|e| OtrcastError::Transport {
                    message: format!("HTTP request failed: {e}"),
                    status: None,
                    source: Some(Box::new(e)),
                })?;

            let status = response.status();
            debug!(status = %status, attempt, "broadcast response received");

            let text = response.text().await.map_err(|e| OtrcastError::Transport {
                message: format!("failed to read response body: {e}"),
                status: Some(status.as_u16()),
                source: Some(Box::new(e)),
            })?;

            if status.is_success() {
                return parse_mismatch(status, &text);
            }

            if status == StatusCode::PRECONDITION_FAILED {
                return Err(OtrcastError::MissingClients(parse_mismatch(status, &text)?));
            }

            if is_transient_error(status) && attempt < self.max_retries {
                warn!(status = %status, body = %text, "transient error, will retry");
                last_error = Some(error_from_body(status, &text));
                continue;
            }

            return Err(error_from_body(status, &text));
        }

        Err(last_error.unwrap_or_else(|| OtrcastError::Transport {
            message: "broadcast failed after retries".into(),
            status: None,
            source: None,
        }))
    }
}

fn parse_mismatch(status: StatusCode, body: &str) -> Result<ClientMismatch, OtrcastError> {
    if body.trim().is_empty() {
        return Ok(ClientMismatch::default());
    }
    serde_json::from_str(body).map_err(|e| OtrcastError::Transport {
        message: format!("failed to parse client mismatch: {e}"),
        status: Some(status.as_u16()),
        source: Some(Box::new(e)),
    })
}

fn error_from_body(status: StatusCode, body: &str) -> OtrcastError {
    let message = match serde_json::from_str::<BackendErrorBody>(body) {
        Ok(err) => format!("backend error ({}): {}", err.label, err.message),
        Err(_) => format!("backend returned {status}: {body}"),
    };
    OtrcastError::Transport {
        message,
        status: Some(status.as_u16()),
        source: None,
    }
}

/// Returns true for HTTP status codes that indicate transient errors worth retrying.
fn is_transient_error(status: StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 502 | 503)
}
