// SPDX-FileCopyrightText: 2026 Notegram Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for notegram.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use notegram_core::types::BotTarget;
use serde::{Deserialize, Serialize};

/// Top-level notegram configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NotegramConfig {
    /// Logging and bot selection settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Bot API connection settings.
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Note vault settings.
    #[serde(default)]
    pub vault: VaultConfig,

    /// Configured bots, in display order.
    #[serde(default)]
    pub bots: Vec<BotConfig>,
}

impl NotegramConfig {
    /// Snapshot of every configured bot as a delivery target.
    pub fn targets(&self) -> Vec<BotTarget> {
        self.bots.iter().map(BotTarget::from).collect()
    }

    /// Enabled bots only, in configuration order.
    pub fn enabled_targets(&self) -> Vec<BotTarget> {
        self.bots
            .iter()
            .filter(|b| b.enabled)
            .map(BotTarget::from)
            .collect()
    }
}

/// General behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeneralConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Id of the bot used when several are enabled and none is chosen.
    #[serde(default)]
    pub default_bot: Option<String>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            default_bot: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Telegram Bot API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TelegramConfig {
    /// Base URL of the Bot API, without the `/bot<token>` suffix.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Suppress link previews on text messages.
    #[serde(default = "default_disable_link_preview")]
    pub disable_link_preview: bool,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            timeout_secs: default_timeout_secs(),
            disable_link_preview: default_disable_link_preview(),
        }
    }
}

fn default_api_base_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_disable_link_preview() -> bool {
    true
}

/// Vault (note folder) configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VaultConfig {
    /// Root directory used to resolve links by name.
    #[serde(default = "default_vault_root")]
    pub root: String,

    /// Attachments larger than this are skipped. Defaults to the Bot API
    /// upload ceiling of 50 MiB.
    #[serde(default = "default_max_file_size_bytes")]
    pub max_file_size_bytes: u64,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            root: default_vault_root(),
            max_file_size_bytes: default_max_file_size_bytes(),
        }
    }
}

fn default_vault_root() -> String {
    ".".to_string()
}

fn default_max_file_size_bytes() -> u64 {
    50 * 1024 * 1024
}

/// A single bot entry from a `[[bots]]` table.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BotConfig {
    /// Stable identifier used by `--bot` and `general.default_bot`.
    pub id: String,

    /// Display name. Defaults to the id.
    #[serde(default)]
    pub name: Option<String>,

    /// Bot API token from @BotFather.
    #[serde(default)]
    pub token: String,

    /// Destination chat id or `@channelname`.
    #[serde(default)]
    pub chat_id: String,

    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl BotConfig {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

fn default_enabled() -> bool {
    true
}

impl From<&BotConfig> for BotTarget {
    fn from(bot: &BotConfig) -> Self {
        BotTarget {
            id: bot.id.clone(),
            name: bot.display_name().to_string(),
            token: bot.token.clone(),
            chat_id: bot.chat_id.clone(),
            enabled: bot.enabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bots_deserialize_with_defaults() {
        let toml_str = r#"
[[bots]]
id = "main"
token = "123:abc"
chat_id = "42"

[[bots]]
id = "archive"
name = "Archive channel"
enabled = false
"#;
        let config: NotegramConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.bots.len(), 2);
        assert!(config.bots[0].enabled);
        assert_eq!(config.bots[0].display_name(), "main");
        assert_eq!(config.bots[1].display_name(), "Archive channel");
        assert!(config.bots[1].token.is_empty());

        let enabled = config.enabled_targets();
        assert_eq!(enabled.len(), 1);
        assert_eq!(enabled[0].id, "main");
        assert_eq!(enabled[0].chat_id, "42");
        assert_eq!(config.targets().len(), 2);
    }

    #[test]
    fn bots_deny_unknown_fields() {
        let toml_str = r#"
[[bots]]
id = "main"
chatid = "42"
"#;
        assert!(toml::from_str::<NotegramConfig>(toml_str).is_err());
    }

    #[test]
    fn bot_id_is_required() {
        let toml_str = r#"
[[bots]]
token = "123:abc"
"#;
        assert!(toml::from_str::<NotegramConfig>(toml_str).is_err());
    }
}
