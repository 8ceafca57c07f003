// SPDX-FileCopyrightText: 2026 Notegram Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Attachment classification.
//!
//! Maps file extensions to the Bot API upload endpoint that accepts them.

use notegram_core::types::{Attachment, Classification, MediaItem, MediaKind};
use tracing::debug;

const PHOTO_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "wmv"];
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg"];
/// Deliverable, but only as generic documents.
const DOCUMENT_EXTENSIONS: &[&str] = &["svg", "pdf"];

/// Classifies a file extension (case-insensitive, leading dot optional).
pub fn classify(extension: &str) -> Classification {
    let ext = extension.trim_start_matches('.').to_ascii_lowercase();
    let ext = ext.as_str();

    let kind = if PHOTO_EXTENSIONS.contains(&ext) {
        MediaKind::Photo
    } else if VIDEO_EXTENSIONS.contains(&ext) {
        MediaKind::Video
    } else if AUDIO_EXTENSIONS.contains(&ext) {
        MediaKind::Audio
    } else if DOCUMENT_EXTENSIONS.contains(&ext) {
        MediaKind::Document
    } else {
        return Classification {
            is_media: false,
            kind: MediaKind::Document,
        };
    };

    Classification {
        is_media: true,
        kind,
    }
}

/// Shorthand for `classify(extension).is_media`.
pub fn is_deliverable(extension: &str) -> bool {
    classify(extension).is_media
}

/// Bot API method used to send a single item of this kind.
pub fn send_method(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Photo => "sendPhoto",
        MediaKind::Video => "sendVideo",
        MediaKind::Audio => "sendAudio",
        MediaKind::Document => "sendDocument",
    }
}

/// Turns resolved attachments into media items, dropping anything that is
/// not deliverable. Order is preserved.
pub fn media_items(attachments: Vec<Attachment>) -> Vec<MediaItem> {
    attachments
        .into_iter()
        .filter_map(|attachment| {
            let classification = classify(&attachment.extension);
            if !classification.is_media {
                debug!(name = %attachment.name, "skipping non-media attachment");
                return None;
            }
            Some(MediaItem {
                source: attachment.source,
                name: attachment.name,
                bytes: attachment.bytes,
                kind: classification.kind,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attachment(name: &str) -> Attachment {
        let extension = name.rsplit_once('.').map(|(_, e)| e).unwrap_or_default();
        Attachment {
            source: name.to_string(),
            name: name.to_string(),
            extension: extension.to_string(),
            bytes: vec![0u8; 4],
        }
    }

    #[test]
    fn classification_is_case_insensitive() {
        let expected = Classification {
            is_media: true,
            kind: MediaKind::Photo,
        };
        assert_eq!(classify("JPG"), expected);
        assert_eq!(classify("jpg"), expected);
        assert_eq!(classify(".Png"), expected);
    }

    #[test]
    fn each_table_maps_to_its_kind() {
        for ext in ["jpg", "jpeg", "png", "gif", "webp", "bmp"] {
            assert_eq!(classify(ext).kind, MediaKind::Photo, "{ext}");
        }
        for ext in ["mp4", "avi", "mov", "wmv"] {
            assert_eq!(classify(ext).kind, MediaKind::Video, "{ext}");
        }
        for ext in ["mp3", "wav", "ogg"] {
            assert_eq!(classify(ext).kind, MediaKind::Audio, "{ext}");
        }
        for ext in ["svg", "pdf"] {
            let c = classify(ext);
            assert!(c.is_media, "{ext}");
            assert_eq!(c.kind, MediaKind::Document, "{ext}");
        }
    }

    #[test]
    fn unknown_extensions_are_not_media() {
        assert!(!is_deliverable("md"));
        assert!(!is_deliverable("zip"));
        assert!(!is_deliverable(""));
    }

    #[test]
    fn send_methods() {
        assert_eq!(send_method(MediaKind::Photo), "sendPhoto");
        assert_eq!(send_method(MediaKind::Video), "sendVideo");
        assert_eq!(send_method(MediaKind::Audio), "sendAudio");
        assert_eq!(send_method(MediaKind::Document), "sendDocument");
    }

    #[test]
    fn media_items_filter_and_keep_order() {
        let items = media_items(vec![
            attachment("b.mp3"),
            attachment("notes.md"),
            attachment("a.PNG"),
            attachment("report.pdf"),
        ]);
        let summary: Vec<_> = items.iter().map(|i| (i.name.as_str(), i.kind)).collect();
        assert_eq!(
            summary,
            [
                ("b.mp3", MediaKind::Audio),
                ("a.PNG", MediaKind::Photo),
                ("report.pdf", MediaKind::Document),
            ]
        );
    }
}
