// SPDX-FileCopyrightText: 2026 Notegram Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! reqwest-backed [`Transport`].

use std::time::Duration;

use async_trait::async_trait;
use notegram_core::error::NotegramError;
use notegram_core::traits::{ApiRequest, ApiResponse, FormPart, RequestBody, Transport};
use reqwest::multipart::{Form, Part};
use tracing::debug;

/// HTTP transport for the Bot API.
///
/// Request URLs carry the bot token, so reqwest errors are stripped of
/// their URL before they are wrapped.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport with a per-request timeout.
    pub fn new(timeout: Duration) -> Result<Self, NotegramError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NotegramError::Transport {
                message: format!("failed to build HTTP client: {e}"),
                status: None,
                source: Some(Box::new(e)),
            })?;
        Ok(Self { client })
    }
}

fn build_form(parts: Vec<FormPart>) -> Form {
    parts.into_iter().fold(Form::new(), |form, part| match part {
        FormPart::Text { name, value } => form.text(name, value),
        FormPart::File {
            name,
            filename,
            bytes,
        } => form.part(name, Part::bytes(bytes).file_name(filename)),
    })
}

fn transport_error(e: reqwest::Error) -> NotegramError {
    let e = e.without_url();
    NotegramError::Transport {
        message: format!("HTTP request failed: {e}"),
        status: e.status().map(|s| s.as_u16()),
        source: Some(Box::new(e)),
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn request(&self, request: ApiRequest) -> Result<ApiResponse, NotegramError> {
        let ApiRequest { url, method, body } = request;

        let builder = self.client.post(url);
        let builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(parts) => builder.multipart(build_form(parts)),
        };

        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status().as_u16();
        debug!(method = %method, status, "Bot API response received");

        let text = response.text().await.map_err(transport_error)?;
        Ok(ApiResponse::new(status, text))
    }
}
