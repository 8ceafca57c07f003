// SPDX-FileCopyrightText: 2026 Notegram Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for notegram.

use thiserror::Error;

/// Substring the Bot API uses when it rejects MarkdownV2 markup.
const PARSE_ERROR_MARKER: &str = "can't parse entities";

/// The primary error type used across the notegram crates.
///
/// Pure text and media functions never return this type. It is produced only
/// by configuration checks, document loading, and calls across the
/// transport boundary.
#[derive(Debug, Error)]
pub enum NotegramError {
    /// Configuration errors (missing token or chat id, unknown bot, disabled bot).
    #[error("configuration error: {0}")]
    Config(String),

    /// The request never produced a provider answer (connection failure,
    /// timeout, or a non-2xx status without a Bot API error body).
    #[error("transport error: {message}")]
    Transport {
        message: String,
        /// HTTP status, when a response was received.
        status: Option<u16>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The Bot API answered with `ok: false`.
    #[error("telegram api error: {description}")]
    Api {
        status: u16,
        code: Option<i64>,
        description: String,
    },

    /// The Bot API rejected the MarkdownV2 markup of a message or caption.
    #[error("telegram rejected message formatting: {description}")]
    Format { description: String },

    /// The source note or one of its attachments could not be read.
    #[error("document error: {message}")]
    Document {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl NotegramError {
    /// Builds the error for a provider answer carrying `ok: false`.
    ///
    /// Descriptions reporting a markup-parsing failure become
    /// [`NotegramError::Format`]; everything else stays an API error.
    pub fn from_api(status: u16, code: Option<i64>, description: impl Into<String>) -> Self {
        let description = description.into();
        if description.to_lowercase().contains(PARSE_ERROR_MARKER) {
            Self::Format { description }
        } else {
            Self::Api {
                status,
                code,
                description,
            }
        }
    }

    /// Returns a short, human-readable message suitable for end users.
    pub fn user_message(&self) -> String {
        match self {
            Self::Config(message) => message.clone(),
            Self::Format { .. } => "formatting error".to_string(),
            Self::Api {
                status,
                code,
                description,
            } => {
                let lowered = description.to_lowercase();
                if *status == 401 || *code == Some(401) || lowered.contains("unauthorized") {
                    "invalid token".to_string()
                } else if lowered.contains("chat not found") {
                    "chat not found".to_string()
                } else {
                    description.clone()
                }
            }
            Self::Transport {
                status: Some(401), ..
            } => "invalid token".to_string(),
            Self::Transport { message, .. } | Self::Document { message, .. } => message.clone(),
            Self::Internal(message) => message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_failures_become_format_errors() {
        let err = NotegramError::from_api(
            400,
            Some(400),
            "Bad Request: can't parse entities: Character '.' is reserved",
        );
        assert!(matches!(err, NotegramError::Format { .. }));
        assert_eq!(err.user_message(), "formatting error");
    }

    #[test]
    fn unauthorized_maps_to_invalid_token() {
        let err = NotegramError::from_api(401, Some(401), "Unauthorized");
        assert!(matches!(err, NotegramError::Api { .. }));
        assert_eq!(err.user_message(), "invalid token");
    }

    #[test]
    fn chat_not_found_is_recognized() {
        let err = NotegramError::from_api(400, Some(400), "Bad Request: chat not found");
        assert_eq!(err.user_message(), "chat not found");
    }

    #[test]
    fn other_descriptions_pass_through() {
        let err = NotegramError::from_api(200, None, "Bad Request: message is too long");
        assert_eq!(err.user_message(), "Bad Request: message is too long");
    }

    #[test]
    fn transport_401_maps_to_invalid_token() {
        let err = NotegramError::Transport {
            message: "HTTP 401".into(),
            status: Some(401),
            source: None,
        };
        assert_eq!(err.user_message(), "invalid token");
    }

    #[test]
    fn config_message_is_shown_verbatim() {
        let err = NotegramError::Config("bot `main` has no chat_id".into());
        assert_eq!(err.user_message(), "bot `main` has no chat_id");
        assert_eq!(
            err.to_string(),
            "configuration error: bot `main` has no chat_id"
        );
    }
}
