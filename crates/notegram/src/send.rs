// SPDX-FileCopyrightText: 2026 Notegram Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `notegram send` command implementation.

use std::path::Path;
use std::time::Duration;

use futures::future::join_all;
use notegram_config::model::NotegramConfig;
use notegram_core::error::NotegramError;
use notegram_core::traits::{DocumentSource, Transport};
use notegram_core::types::{BotTarget, Document};
use notegram_telegram::{ApiSettings, DeliveryOrchestrator, DeliveryReport, ReqwestTransport};

use crate::selection::select_targets;
use crate::vault::FsVault;

/// Sends `document` to every target concurrently, one orchestrator each.
///
/// Results come back in target order.
pub async fn deliver_to_targets(
    transport: &dyn Transport,
    settings: &ApiSettings,
    targets: &[BotTarget],
    document: &Document,
) -> Vec<Result<DeliveryReport, NotegramError>> {
    join_all(targets.iter().map(|target| async move {
        DeliveryOrchestrator::new(transport, settings, target)
            .deliver(document.clone())
            .await
    }))
    .await
}

/// Loads `note` and sends it. Returns whether every delivery succeeded.
pub async fn send_note(
    source: &dyn DocumentSource,
    transport: &dyn Transport,
    settings: &ApiSettings,
    targets: &[BotTarget],
    note: &str,
) -> Result<bool, NotegramError> {
    let document = source.load(note).await?;
    let results = deliver_to_targets(transport, settings, targets, &document).await;

    let mut all_ok = true;
    for (target, result) in targets.iter().zip(results) {
        match result {
            Ok(_) => println!("Note sent to {}", target.name),
            Err(e) => {
                all_ok = false;
                eprintln!("Failed to send to {}: {}", target.name, e.user_message());
            }
        }
    }
    Ok(all_ok)
}

/// Run the `notegram send` command.
pub async fn run_send(
    config: &NotegramConfig,
    note: &Path,
    bot: Option<&str>,
    all: bool,
) -> Result<bool, NotegramError> {
    let targets = select_targets(config, bot, all)?;
    let vault = FsVault::from_config(&config.vault);
    let transport = ReqwestTransport::new(Duration::from_secs(config.telegram.timeout_secs))?;
    let settings = ApiSettings::from(&config.telegram);

    send_note(
        &vault,
        &transport,
        &settings,
        &targets,
        &note.to_string_lossy(),
    )
    .await
}
