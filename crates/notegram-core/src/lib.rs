// SPDX-FileCopyrightText: 2026 Notegram Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for notegram.
//!
//! This crate provides the error type, the shared data model, and the
//! collaborator traits ([`Transport`], [`DocumentSource`]) used throughout
//! the workspace.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::NotegramError;
pub use types::{
    Attachment, BotInfo, BotTarget, Classification, DeliveryState, DeliveryUnit, Document,
    MediaItem, MediaKind,
};

pub use traits::{ApiRequest, ApiResponse, DocumentSource, FormPart, RequestBody, Transport};
