// SPDX-FileCopyrightText: 2026 Notegram Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the notegram crates.

use serde::{Deserialize, Serialize};
use strum::Display;

/// Semantic kind of a deliverable attachment.
///
/// The lowercase form doubles as the Bot API form-field name and the
/// `InputMedia` type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Photo,
    Video,
    Audio,
    Document,
}

/// Result of classifying a file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// Whether files with this extension can be delivered as attachments.
    pub is_media: bool,
    pub kind: MediaKind,
}

/// A resolved attachment ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaItem {
    /// Link target as written in the note (e.g. `assets/pic.png`).
    pub source: String,
    /// File name sent to the remote side.
    pub name: String,
    pub bytes: Vec<u8>,
    pub kind: MediaKind,
}

/// One network call's worth of media.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryUnit {
    /// A single item, sent through the kind-specific endpoint.
    Single {
        item: MediaItem,
        caption: Option<String>,
    },
    /// Up to ten items sent as one album. The caption, if any, rides on the
    /// first item.
    Group {
        items: Vec<MediaItem>,
        caption: Option<String>,
    },
}

impl DeliveryUnit {
    /// Items carried by this unit, in delivery order.
    pub fn items(&self) -> &[MediaItem] {
        match self {
            Self::Single { item, .. } => std::slice::from_ref(item),
            Self::Group { items, .. } => items,
        }
    }

    pub fn caption(&self) -> Option<&str> {
        match self {
            Self::Single { caption, .. } | Self::Group { caption, .. } => caption.as_deref(),
        }
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }
}

/// A configured delivery destination.
///
/// Read-only for the duration of a send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotTarget {
    pub id: String,
    pub name: String,
    pub token: String,
    pub chat_id: String,
    pub enabled: bool,
}

/// A file referenced by a note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Link target as written in the note.
    pub source: String,
    /// File name including extension.
    pub name: String,
    /// Extension without the leading dot.
    pub extension: String,
    pub bytes: Vec<u8>,
}

/// A loaded note with its resolved attachments.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    pub title: String,
    pub body: String,
    /// Attachments in the order they are referenced by the body.
    pub attachments: Vec<Attachment>,
}

/// Lifecycle of a single orchestrated send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum DeliveryState {
    Idle,
    Preparing,
    Sending,
    Succeeded,
    Failed,
}

/// Identity returned by the Bot API `getMe` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotInfo {
    pub id: i64,
    pub first_name: String,
    #[serde(default)]
    pub username: Option<String>,
}
