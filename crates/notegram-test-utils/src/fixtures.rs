// SPDX-FileCopyrightText: 2026 Notegram Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Builders for common test values.

use notegram_core::types::{Attachment, BotTarget, MediaItem, MediaKind};
use serde_json::json;

/// An enabled target with a syntactically valid token.
pub fn target(id: &str) -> BotTarget {
    BotTarget {
        id: id.to_string(),
        name: format!("{id} bot"),
        token: format!("123456:{id}-token"),
        chat_id: "-1001234".to_string(),
        enabled: true,
    }
}

/// An attachment named `name`, extension taken from the name.
pub fn attachment(name: &str) -> Attachment {
    let extension = name.rsplit_once('.').map(|(_, e)| e).unwrap_or_default();
    Attachment {
        source: name.to_string(),
        name: name.to_string(),
        extension: extension.to_string(),
        bytes: name.as_bytes().to_vec(),
    }
}

pub fn media_item(name: &str, kind: MediaKind) -> MediaItem {
    MediaItem {
        source: name.to_string(),
        name: name.to_string(),
        bytes: name.as_bytes().to_vec(),
        kind,
    }
}

/// Successful Bot API body.
pub fn ok_body() -> String {
    json!({"ok": true, "result": {"message_id": 1}}).to_string()
}

/// `getMe` result body.
pub fn bot_info_body(id: i64, first_name: &str, username: &str) -> String {
    json!({
        "ok": true,
        "result": {"id": id, "is_bot": true, "first_name": first_name, "username": username}
    })
    .to_string()
}

/// Bot API error body.
pub fn error_body(code: u16, description: &str) -> String {
    json!({"ok": false, "error_code": code, "description": description}).to_string()
}
