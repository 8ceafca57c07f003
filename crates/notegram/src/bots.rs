// SPDX-FileCopyrightText: 2026 Notegram Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `notegram bots` command implementation.

use notegram_config::model::NotegramConfig;

/// One line per configured bot. Tokens are never included.
pub fn bot_lines(config: &NotegramConfig) -> Vec<String> {
    config
        .bots
        .iter()
        .map(|bot| {
            let marker = if config.general.default_bot.as_deref() == Some(bot.id.as_str()) {
                "*"
            } else {
                " "
            };
            let state = if bot.enabled { "enabled" } else { "disabled" };
            format!(
                "{marker} {:<16} {:<24} chat {:<16} {state}",
                bot.id,
                bot.display_name(),
                bot.chat_id
            )
        })
        .collect()
}

/// Run the `notegram bots` command.
pub fn run_bots(config: &NotegramConfig) {
    let lines = bot_lines(config);
    if lines.is_empty() {
        println!("No bots configured. Add a [[bots]] entry to notegram.toml.");
        return;
    }
    for line in lines {
        println!("{line}");
    }
}
