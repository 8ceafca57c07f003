// SPDX-FileCopyrightText: 2026 Notegram Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock Bot API transport for deterministic testing.
//!
//! `MockTransport` implements `Transport` with a FIFO queue of scripted
//! outcomes and records every request it receives.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use notegram_core::error::NotegramError;
use notegram_core::traits::{ApiRequest, ApiResponse, Transport};

use crate::fixtures;

/// A mock transport that answers from a script.
///
/// Outcomes are popped in order. When the script is empty every request
/// succeeds with `{"ok":true,"result":{"message_id":1}}`.
pub struct MockTransport {
    script: Arc<Mutex<VecDeque<Result<ApiResponse, NotegramError>>>>,
    requests: Arc<Mutex<Vec<ApiRequest>>>,
}

impl MockTransport {
    /// Create a mock transport with an empty script.
    pub fn new() -> Self {
        Self {
            script: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a successful answer.
    pub async fn push_ok(&self) {
        self.push_response(200, fixtures::ok_body()).await;
    }

    /// Queue a raw answer.
    pub async fn push_response(&self, status: u16, body: impl Into<String>) {
        self.script
            .lock()
            .await
            .push_back(Ok(ApiResponse::new(status, body)));
    }

    /// Queue a provider error (`ok: false`) with the given HTTP status.
    pub async fn push_api_error(&self, status: u16, description: &str) {
        self.push_response(status, fixtures::error_body(status, description))
            .await;
    }

    /// Queue a transport failure (no answer at all).
    pub async fn push_error(&self, error: NotegramError) {
        self.script.lock().await.push_back(Err(error));
    }

    /// All requests received so far.
    pub async fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().await.clone()
    }

    /// Number of requests received so far.
    pub async fn request_count(&self) -> usize {
        self.requests.lock().await.len()
    }

    /// Bot API method names in call order.
    pub async fn methods(&self) -> Vec<String> {
        self.requests
            .lock()
            .await
            .iter()
            .map(|r| r.method.clone())
            .collect()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn request(&self, request: ApiRequest) -> Result<ApiResponse, NotegramError> {
        self.requests.lock().await.push(request);
        self.script
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok(ApiResponse::new(200, fixtures::ok_body())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notegram_core::traits::RequestBody;

    fn request(method: &str) -> ApiRequest {
        ApiRequest {
            url: format!("http://mock/bot1:x/{method}"),
            method: method.to_string(),
            body: RequestBody::Empty,
        }
    }

    #[tokio::test]
    async fn script_is_consumed_in_order() {
        let transport = MockTransport::new();
        transport.push_response(500, "boom").await;
        transport.push_api_error(400, "Bad Request: chat not found").await;

        let first = transport.request(request("getMe")).await.unwrap();
        assert_eq!(first.status, 500);
        let second = transport.request(request("sendMessage")).await.unwrap();
        assert_eq!(second.json.unwrap()["ok"], false);
        let third = transport.request(request("sendMessage")).await.unwrap();
        assert_eq!(third.status, 200);

        assert_eq!(transport.methods().await, ["getMe", "sendMessage", "sendMessage"]);
    }

    #[tokio::test]
    async fn scripted_errors_are_returned() {
        let transport = MockTransport::new();
        transport
            .push_error(NotegramError::Transport {
                message: "connection refused".into(),
                status: None,
                source: None,
            })
            .await;

        assert!(transport.request(request("getMe")).await.is_err());
        assert_eq!(transport.request_count().await, 1);
    }
}
