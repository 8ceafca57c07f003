// SPDX-FileCopyrightText: 2026 Notegram Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP transport boundary used by the Bot API client.

use async_trait::async_trait;

use crate::error::NotegramError;

/// A single form field of a multipart request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        filename: String,
        bytes: Vec<u8>,
    },
}

impl FormPart {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Text {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Field name of this part.
    pub fn name(&self) -> &str {
        match self {
            Self::Text { name, .. } | Self::File { name, .. } => name,
        }
    }
}

/// Request payload.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    Multipart(Vec<FormPart>),
}

/// A POST request to the Bot API.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// Full URL. Contains the bot token, so it must never be logged.
    pub url: String,
    /// Bot API method name (`sendMessage`, `sendMediaGroup`, ...).
    pub method: String,
    pub body: RequestBody,
}

impl ApiRequest {
    /// Returns the text value of a form field or top-level JSON key.
    pub fn field(&self, name: &str) -> Option<String> {
        match &self.body {
            RequestBody::Empty => None,
            RequestBody::Json(value) => value.get(name).map(|v| match v {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            }),
            RequestBody::Multipart(parts) => parts.iter().find_map(|part| match part {
                FormPart::Text { name: n, value } if n == name => Some(value.clone()),
                _ => None,
            }),
        }
    }
}

/// Raw answer from the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub text: String,
    /// Parsed body, when it was valid JSON.
    pub json: Option<serde_json::Value>,
}

impl ApiResponse {
    /// Builds a response from a status and body, parsing the body as JSON.
    pub fn new(status: u16, text: impl Into<String>) -> Self {
        let text = text.into();
        let json = serde_json::from_str(&text).ok();
        Self { status, text, json }
    }
}

/// Performs HTTP requests on behalf of the Bot API client.
///
/// Implementations report connection-level failures as
/// [`NotegramError::Transport`] and return every received response, whatever
/// its status, as `Ok`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn request(&self, request: ApiRequest) -> Result<ApiResponse, NotegramError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_parses_json_body() {
        let resp = ApiResponse::new(200, r#"{"ok":true,"result":{}}"#);
        assert_eq!(resp.json.unwrap()["ok"], serde_json::Value::Bool(true));
    }

    #[test]
    fn response_keeps_non_json_body_as_text() {
        let resp = ApiResponse::new(502, "Bad Gateway");
        assert!(resp.json.is_none());
        assert_eq!(resp.text, "Bad Gateway");
    }

    #[test]
    fn field_reads_json_and_multipart() {
        let json = ApiRequest {
            url: "u".into(),
            method: "sendMessage".into(),
            body: RequestBody::Json(serde_json::json!({"chat_id": "42", "n": 1})),
        };
        assert_eq!(json.field("chat_id").as_deref(), Some("42"));
        assert_eq!(json.field("n").as_deref(), Some("1"));

        let form = ApiRequest {
            url: "u".into(),
            method: "sendPhoto".into(),
            body: RequestBody::Multipart(vec![FormPart::text("caption", "hi")]),
        };
        assert_eq!(form.field("caption").as_deref(), Some("hi"));
        assert_eq!(form.field("missing"), None);
    }
}
