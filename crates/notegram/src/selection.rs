// SPDX-FileCopyrightText: 2026 Notegram Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Choosing which configured bots a command talks to.

use notegram_config::diagnostic::suggest_key;
use notegram_config::model::{BotConfig, NotegramConfig};
use notegram_core::error::NotegramError;
use notegram_core::types::BotTarget;

/// Resolves the bots addressed by a command.
///
/// `--all` picks every enabled bot. Otherwise an explicit `--bot` wins, then
/// `general.default_bot`, then the only enabled bot. Naming a disabled bot
/// is an error, as is leaving the choice open when several bots are enabled.
pub fn select_targets(
    config: &NotegramConfig,
    bot: Option<&str>,
    all: bool,
) -> Result<Vec<BotTarget>, NotegramError> {
    if all {
        let targets = config.enabled_targets();
        if targets.is_empty() {
            return Err(no_enabled_bots());
        }
        return Ok(targets);
    }

    if let Some(selector) = bot.or(config.general.default_bot.as_deref()) {
        let found = find_bot(config, selector)?;
        if !found.enabled {
            return Err(NotegramError::Config(format!(
                "bot `{}` is disabled",
                found.id
            )));
        }
        return Ok(vec![BotTarget::from(found)]);
    }

    let mut enabled = config.enabled_targets();
    match enabled.len() {
        0 => Err(no_enabled_bots()),
        1 => Ok(vec![enabled.remove(0)]),
        _ => {
            let ids: Vec<&str> = enabled.iter().map(|t| t.id.as_str()).collect();
            Err(NotegramError::Config(format!(
                "several bots are enabled ({}); choose one with --bot or set general.default_bot",
                ids.join(", ")
            )))
        }
    }
}

/// Looks a bot up by id, then by display name (case-insensitive).
fn find_bot<'a>(config: &'a NotegramConfig, selector: &str) -> Result<&'a BotConfig, NotegramError> {
    config
        .bots
        .iter()
        .find(|b| b.id == selector)
        .or_else(|| {
            config
                .bots
                .iter()
                .find(|b| b.display_name().eq_ignore_ascii_case(selector))
        })
        .ok_or_else(|| {
            let ids: Vec<&str> = config.bots.iter().map(|b| b.id.as_str()).collect();
            let hint = suggest_key(selector, &ids)
                .map(|s| format!(" (did you mean `{s}`?)"))
                .unwrap_or_default();
            NotegramError::Config(format!("unknown bot `{selector}`{hint}"))
        })
}

fn no_enabled_bots() -> NotegramError {
    NotegramError::Config("no enabled bots configured; add a [[bots]] entry".into())
}
