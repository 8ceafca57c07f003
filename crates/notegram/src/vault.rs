// SPDX-FileCopyrightText: 2026 Notegram Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Filesystem vault: loads a note and the media files it links to.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use async_trait::async_trait;
use notegram_config::model::VaultConfig;
use notegram_core::error::NotegramError;
use notegram_core::traits::DocumentSource;
use notegram_core::types::{Attachment, Document};
use notegram_telegram::media::is_deliverable;
use regex::Regex;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Wiki links and embeds (`[[x]]`, `![[x]]`) in group 1, markdown links and
/// images (`[..](x)`, `![..](x)`) in group 2.
static LINK_TARGET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!?\[\[([^\]\n]+)\]\]|!?\[[^\]\n]*\]\(([^)\n]+)\)").unwrap()
});

/// `scheme:` prefix of an absolute URL.
static URL_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.-]+:").unwrap());

/// Returns the file targets linked from `body`, in document order.
///
/// Aliases (`|alias`), headings (`#section`) and markdown link titles are
/// dropped, markdown targets are percent-decoded, and URLs are skipped.
pub fn link_targets(body: &str) -> Vec<String> {
    LINK_TARGET
        .captures_iter(body)
        .filter_map(|caps| {
            if let Some(wiki) = caps.get(1) {
                clean_target(wiki.as_str())
            } else {
                caps.get(2).and_then(|md| markdown_target(md.as_str()))
            }
        })
        .collect()
}

fn markdown_target(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let raw = match raw.strip_prefix('<') {
        Some(inner) => inner.split('>').next().unwrap_or_default(),
        None => raw.split_whitespace().next().unwrap_or_default(),
    };
    if URL_SCHEME.is_match(raw) {
        return None;
    }
    let decoded = percent_encoding::percent_decode_str(raw).decode_utf8().ok()?;
    clean_target(&decoded)
}

fn clean_target(raw: &str) -> Option<String> {
    let target = raw.split('|').next().unwrap_or_default();
    let target = target.split('#').next().unwrap_or_default().trim();
    if target.is_empty() || URL_SCHEME.is_match(target) {
        return None;
    }
    Some(target.to_string())
}

fn document_error(message: String, source: std::io::Error) -> NotegramError {
    NotegramError::Document {
        message,
        source: Some(Box::new(source)),
    }
}

/// A folder of markdown notes.
#[derive(Debug, Clone)]
pub struct FsVault {
    root: PathBuf,
    max_file_size: u64,
}

impl FsVault {
    pub fn new(root: impl Into<PathBuf>, max_file_size: u64) -> Self {
        Self {
            root: root.into(),
            max_file_size,
        }
    }

    pub fn from_config(config: &VaultConfig) -> Self {
        Self::new(&config.root, config.max_file_size_bytes)
    }

    /// Note path as given, or relative to the vault root.
    fn note_path(&self, reference: &str) -> PathBuf {
        let path = PathBuf::from(reference);
        if path.is_file() || path.is_absolute() {
            path
        } else {
            self.root.join(path)
        }
    }

    /// Finds a linked file next to the note, under the vault root, or
    /// anywhere in the vault by file name.
    fn resolve(&self, note_dir: &Path, target: &str) -> Option<PathBuf> {
        let candidates = [note_dir.join(target), self.root.join(target)];
        if let Some(found) = candidates.into_iter().find(|p| p.is_file()) {
            return Some(found);
        }

        let name = Path::new(target).file_name()?;
        WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by(|a, b| a.file_name().cmp(b.file_name()))
            .into_iter()
            .filter_map(Result::ok)
            .find(|e| e.file_type().is_file() && e.file_name() == name)
            .map(walkdir::DirEntry::into_path)
    }

    fn load_blocking(&self, reference: &str) -> Result<Document, NotegramError> {
        let path = self.note_path(reference);
        let body = std::fs::read_to_string(&path)
            .map_err(|e| document_error(format!("cannot read note {}", path.display()), e))?;
        let title = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let note_dir = path.parent().unwrap_or(Path::new("."));

        let mut seen = HashSet::new();
        let mut attachments = Vec::new();
        for target in link_targets(&body) {
            let extension = Path::new(&target)
                .extension()
                .map(|e| e.to_string_lossy().into_owned())
                .unwrap_or_default();
            if !is_deliverable(&extension) {
                debug!(target = %target, "skipping non-media link");
                continue;
            }

            let Some(file) = self.resolve(note_dir, &target) else {
                warn!(target = %target, "linked file not found");
                continue;
            };
            let key = file.canonicalize().unwrap_or_else(|_| file.clone());
            if !seen.insert(key) {
                continue;
            }

            let size = std::fs::metadata(&file)
                .map_err(|e| document_error(format!("cannot stat {}", file.display()), e))?
                .len();
            if size > self.max_file_size {
                warn!(
                    file = %file.display(),
                    size,
                    limit = self.max_file_size,
                    "attachment exceeds size limit, skipping"
                );
                continue;
            }

            let bytes = std::fs::read(&file)
                .map_err(|e| document_error(format!("cannot read {}", file.display()), e))?;
            let name = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| target.clone());
            attachments.push(Attachment {
                source: target,
                name,
                extension,
                bytes,
            });
        }

        debug!(note = %path.display(), attachments = attachments.len(), "note loaded");
        Ok(Document {
            title,
            body,
            attachments,
        })
    }
}

#[async_trait]
impl DocumentSource for FsVault {
    async fn load(&self, reference: &str) -> Result<Document, NotegramError> {
        let vault = self.clone();
        let reference = reference.to_string();
        tokio::task::spawn_blocking(move || vault.load_blocking(&reference))
            .await
            .map_err(|e| NotegramError::Internal(format!("vault task failed: {e}")))?
    }
}
