// SPDX-FileCopyrightText: 2026 Notegram Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks constraints serde cannot express: unique bot ids, a default bot
//! that exists, and non-zero limits. Missing tokens and chat ids are not
//! checked here so that incomplete bots can be kept disabled; they are
//! rejected when a send is attempted.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::NotegramConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns all collected validation errors rather than stopping at the first.
pub fn validate_config(config: &NotegramConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.telegram.api_base_url.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "telegram.api_base_url must not be empty".to_string(),
        });
    }

    if config.telegram.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "telegram.timeout_secs must be greater than 0".to_string(),
        });
    }

    if config.vault.max_file_size_bytes == 0 {
        errors.push(ConfigError::Validation {
            message: "vault.max_file_size_bytes must be greater than 0".to_string(),
        });
    }

    let mut seen_ids = HashSet::new();
    for (i, bot) in config.bots.iter().enumerate() {
        if bot.id.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("bots[{i}].id must not be empty"),
            });
        } else if !seen_ids.insert(bot.id.as_str()) {
            errors.push(ConfigError::Validation {
                message: format!("duplicate bot id `{}` in [[bots]] array", bot.id),
            });
        }
    }

    if let Some(default_bot) = &config.general.default_bot
        && !config.bots.iter().any(|b| &b.id == default_bot)
    {
        errors.push(ConfigError::Validation {
            message: format!("general.default_bot `{default_bot}` does not match any configured bot"),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BotConfig;

    fn bot(id: &str) -> BotConfig {
        BotConfig {
            id: id.to_string(),
            name: None,
            token: "123:abc".to_string(),
            chat_id: "42".to_string(),
            enabled: true,
        }
    }

    fn has_error(errors: &[ConfigError], needle: &str) -> bool {
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains(needle)))
    }

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&NotegramConfig::default()).is_ok());
    }

    #[test]
    fn duplicate_bot_ids_fail_validation() {
        let mut config = NotegramConfig::default();
        config.bots = vec![bot("main"), bot("main")];
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "duplicate bot id"));
    }

    #[test]
    fn empty_bot_id_fails_validation() {
        let mut config = NotegramConfig::default();
        config.bots = vec![bot("  ")];
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "bots[0].id"));
    }

    #[test]
    fn unknown_default_bot_fails_validation() {
        let mut config = NotegramConfig::default();
        config.bots = vec![bot("main")];
        config.general.default_bot = Some("other".to_string());
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "default_bot"));
    }

    #[test]
    fn zero_limits_fail_validation() {
        let mut config = NotegramConfig::default();
        config.telegram.timeout_secs = 0;
        config.vault.max_file_size_bytes = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn incomplete_bot_is_allowed_at_load_time() {
        let mut config = NotegramConfig::default();
        let mut draft = bot("draft");
        draft.token.clear();
        draft.chat_id.clear();
        draft.enabled = false;
        config.bots = vec![bot("main"), draft];
        config.general.default_bot = Some("main".to_string());
        assert!(validate_config(&config).is_ok());
    }
}
