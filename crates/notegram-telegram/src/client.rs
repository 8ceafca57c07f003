// SPDX-FileCopyrightText: 2026 Notegram Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bot API client for one bot/chat pair.
//!
//! Builds Bot API requests, hands them to a [`Transport`], and turns raw
//! responses into results or classified [`NotegramError`]s.

use notegram_config::model::TelegramConfig;
use notegram_core::error::NotegramError;
use notegram_core::traits::{ApiRequest, ApiResponse, FormPart, RequestBody, Transport};
use notegram_core::types::{BotInfo, BotTarget, MediaItem};
use serde_json::{Value, json};
use tracing::debug;

use crate::media;

/// Parse mode used for every formatted text and caption.
pub const PARSE_MODE: &str = "MarkdownV2";

/// Plain text sent by [`BotApi::test_connection`].
pub const CONNECTION_TEST_MESSAGE: &str = "🔧 Connection test from notegram";

/// Immutable Bot API settings shared by all bots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiSettings {
    pub base_url: String,
    pub disable_link_preview: bool,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self::from(&TelegramConfig::default())
    }
}

impl From<&TelegramConfig> for ApiSettings {
    fn from(config: &TelegramConfig) -> Self {
        Self {
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            disable_link_preview: config.disable_link_preview,
        }
    }
}

/// Rejects targets that cannot be used for any call.
pub fn check_credentials(target: &BotTarget) -> Result<(), NotegramError> {
    if target.token.trim().is_empty() {
        return Err(NotegramError::Config(format!(
            "bot `{}` has no token",
            target.name
        )));
    }
    if target.chat_id.trim().is_empty() {
        return Err(NotegramError::Config(format!(
            "bot `{}` has no chat_id",
            target.name
        )));
    }
    Ok(())
}

/// Interprets a Bot API response.
///
/// Returns the `result` payload when the provider reports `ok: true`. A body
/// with `ok: false` becomes an API (or formatting) error whatever the HTTP
/// status; a non-2xx status without such a body is a transport error.
pub fn check_response(response: ApiResponse) -> Result<Value, NotegramError> {
    let ApiResponse { status, text, json } = response;
    let success = (200..300).contains(&status);

    match json {
        Some(mut body) => match body.get("ok").and_then(Value::as_bool) {
            Some(true) if success => Ok(body.get_mut("result").map(Value::take).unwrap_or(Value::Null)),
            Some(_) => {
                let code = body.get("error_code").and_then(Value::as_i64);
                let description = body
                    .get("description")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown error");
                Err(NotegramError::from_api(status, code, description))
            }
            None if success => Err(NotegramError::from_api(
                status,
                None,
                format!("unexpected response: {text}"),
            )),
            None => Err(http_error(status, &text)),
        },
        None if success => Err(NotegramError::from_api(
            status,
            None,
            format!("unexpected response: {text}"),
        )),
        None => Err(http_error(status, &text)),
    }
}

fn http_error(status: u16, text: &str) -> NotegramError {
    NotegramError::Transport {
        message: format!("HTTP {status}: {text}"),
        status: Some(status),
        source: None,
    }
}

/// Bot API client bound to one target.
///
/// Cheap to build; construct a fresh one per send from the current
/// configuration snapshot.
pub struct BotApi<'a> {
    transport: &'a dyn Transport,
    settings: &'a ApiSettings,
    target: &'a BotTarget,
}

impl<'a> BotApi<'a> {
    pub fn new(
        transport: &'a dyn Transport,
        settings: &'a ApiSettings,
        target: &'a BotTarget,
    ) -> Self {
        Self {
            transport,
            settings,
            target,
        }
    }

    pub fn target(&self) -> &BotTarget {
        self.target
    }

    fn url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{method}",
            self.settings.base_url, self.target.token
        )
    }

    /// Performs one Bot API call and returns its `result` payload.
    pub async fn call(&self, method: &str, body: RequestBody) -> Result<Value, NotegramError> {
        debug!(bot = %self.target.name, method, "calling Bot API");

        let request = ApiRequest {
            url: self.url(method),
            method: method.to_string(),
            body,
        };
        let result = self
            .transport
            .request(request)
            .await
            .and_then(check_response);

        let outcome = if result.is_ok() { "ok" } else { "error" };
        metrics::counter!(
            "notegram_api_calls_total",
            "method" => method.to_string(),
            "outcome" => outcome
        )
        .increment(1);

        result
    }

    /// `getMe`: identity of the bot behind the token.
    pub async fn get_me(&self) -> Result<BotInfo, NotegramError> {
        let result = self.call("getMe", RequestBody::Empty).await?;
        serde_json::from_value(result).map_err(|e| NotegramError::Internal(format!(
            "malformed getMe result: {e}"
        )))
    }

    /// `sendMessage` with MarkdownV2 text.
    pub async fn send_message(&self, text: &str) -> Result<Value, NotegramError> {
        let mut body = json!({
            "chat_id": self.target.chat_id,
            "text": text,
            "parse_mode": PARSE_MODE,
        });
        if self.settings.disable_link_preview {
            body["link_preview_options"] = json!({ "is_disabled": true });
        }
        self.call("sendMessage", RequestBody::Json(body)).await
    }

    /// `sendMessage` without a parse mode.
    pub async fn send_plain_message(&self, text: &str) -> Result<Value, NotegramError> {
        let body = json!({
            "chat_id": self.target.chat_id,
            "text": text,
        });
        self.call("sendMessage", RequestBody::Json(body)).await
    }

    /// Uploads one item through its kind-specific endpoint.
    pub async fn send_media(
        &self,
        item: &MediaItem,
        caption: Option<&str>,
    ) -> Result<Value, NotegramError> {
        let mut parts = vec![FormPart::text("chat_id", &self.target.chat_id)];
        if let Some(caption) = caption {
            parts.push(FormPart::text("caption", caption));
            parts.push(FormPart::text("parse_mode", PARSE_MODE));
        }
        parts.push(FormPart::File {
            name: item.kind.to_string(),
            filename: item.name.clone(),
            bytes: item.bytes.clone(),
        });

        self.call(media::send_method(item.kind), RequestBody::Multipart(parts))
            .await
    }

    /// Uploads 2..=10 items as one album via `sendMediaGroup`.
    ///
    /// Files are attached as `file0`, `file1`, ...; the caption rides on the
    /// first entry of the `media` array.
    pub async fn send_media_group(
        &self,
        items: &[MediaItem],
        caption: Option<&str>,
    ) -> Result<Value, NotegramError> {
        let media: Vec<Value> = items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let mut entry = json!({
                    "type": item.kind.to_string(),
                    "media": format!("attach://file{index}"),
                });
                if index == 0
                    && let Some(caption) = caption
                {
                    entry["caption"] = json!(caption);
                    entry["parse_mode"] = json!(PARSE_MODE);
                }
                entry
            })
            .collect();

        let mut parts = vec![
            FormPart::text("chat_id", &self.target.chat_id),
            FormPart::text("media", Value::Array(media).to_string()),
        ];
        parts.extend(items.iter().enumerate().map(|(index, item)| FormPart::File {
            name: format!("file{index}"),
            filename: item.name.clone(),
            bytes: item.bytes.clone(),
        }));

        self.call("sendMediaGroup", RequestBody::Multipart(parts))
            .await
    }

    /// Verifies the token with `getMe`, then sends a plain test message to
    /// the configured chat.
    pub async fn test_connection(&self) -> Result<BotInfo, NotegramError> {
        check_credentials(self.target)?;
        let info = self.get_me().await?;
        debug!(bot = %self.target.name, bot_id = info.id, "token verified");
        self.send_plain_message(CONNECTION_TEST_MESSAGE).await?;
        Ok(info)
    }
}
