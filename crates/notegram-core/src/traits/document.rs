// SPDX-FileCopyrightText: 2026 Notegram Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Source of notes and their linked files.

use async_trait::async_trait;

use crate::error::NotegramError;
use crate::types::Document;

/// Loads a note and resolves the files it embeds or links to.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Loads the note identified by `reference` (a path for filesystem vaults).
    async fn load(&self, reference: &str) -> Result<Document, NotegramError>;
}
