// SPDX-FileCopyrightText: 2026 Notegram Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Telegram delivery for notegram.
//!
//! Converts Obsidian-flavoured markdown into MarkdownV2, classifies and
//! batches attachments, and sends a note to a bot/chat pair through the
//! Bot API over a pluggable [`Transport`](notegram_core::traits::Transport).

pub mod batch;
pub mod client;
pub mod delivery;
pub mod images;
pub mod markdown;
pub mod media;
pub mod transport;

pub use batch::{MAX_GROUP_SIZE, batch};
pub use client::{ApiSettings, BotApi, check_credentials, check_response};
pub use delivery::{DeliveryOrchestrator, DeliveryPlan, DeliveryReport, compose, prepare};
pub use images::strip_images;
pub use markdown::{escape_markdown_v2, format_for_telegram, protect, restore};
pub use media::{classify, is_deliverable, media_items};
pub use transport::ReqwestTransport;
