// SPDX-FileCopyrightText: 2026 Notegram Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `notegram check` command implementation.
//!
//! Verifies each selected bot's token with `getMe` and posts a test message
//! to its chat.

use std::time::Duration;

use notegram_config::model::NotegramConfig;
use notegram_core::error::NotegramError;
use notegram_core::types::BotInfo;
use notegram_telegram::{ApiSettings, BotApi, ReqwestTransport};

use crate::selection::select_targets;

/// Explains a failed connection test in terms of what to fix.
pub fn describe_connection_error(err: &NotegramError) -> String {
    match err.user_message().as_str() {
        "invalid token" => "Invalid bot token".to_string(),
        "chat not found" => "Chat ID not found or bot not added to the chat".to_string(),
        other => other.to_string(),
    }
}

fn describe_bot(info: &BotInfo) -> String {
    match &info.username {
        Some(username) => format!("@{username} ({})", info.first_name),
        None => info.first_name.clone(),
    }
}

/// Run the `notegram check` command. Returns whether every bot passed.
///
/// Without `--bot`, every enabled bot is checked.
pub async fn run_check(config: &NotegramConfig, bot: Option<&str>) -> Result<bool, NotegramError> {
    let targets = select_targets(config, bot, bot.is_none())?;
    let transport = ReqwestTransport::new(Duration::from_secs(config.telegram.timeout_secs))?;
    let settings = ApiSettings::from(&config.telegram);

    let mut all_ok = true;
    for target in &targets {
        match BotApi::new(&transport, &settings, target).test_connection().await {
            Ok(info) => println!("✓ {}: connected as {}", target.name, describe_bot(&info)),
            Err(e) => {
                all_ok = false;
                println!("✗ {}: {}", target.name, describe_connection_error(&e));
            }
        }
    }
    Ok(all_ok)
}
