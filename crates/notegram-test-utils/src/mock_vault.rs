// SPDX-FileCopyrightText: 2026 Notegram Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory document source.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use notegram_core::error::NotegramError;
use notegram_core::traits::DocumentSource;
use notegram_core::types::Document;

/// Serves documents inserted ahead of time, keyed by reference.
#[derive(Default)]
pub struct MockVault {
    documents: Mutex<HashMap<String, Document>>,
}

impl MockVault {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, reference: impl Into<String>, document: Document) {
        self.documents.lock().await.insert(reference.into(), document);
    }
}

#[async_trait]
impl DocumentSource for MockVault {
    async fn load(&self, reference: &str) -> Result<Document, NotegramError> {
        self.documents
            .lock()
            .await
            .get(reference)
            .cloned()
            .ok_or_else(|| NotegramError::Document {
                message: format!("note not found: {reference}"),
                source: None,
            })
    }
}
