// SPDX-FileCopyrightText: 2026 Notegram Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./notegram.toml` > `~/.config/notegram/notegram.toml` >
//! `/etc/notegram/notegram.toml` with environment variable overrides via `NOTEGRAM_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::NotegramConfig;

/// System-wide configuration file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/notegram/notegram.toml";

/// Configuration file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "notegram.toml";

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/notegram/notegram.toml` (system-wide)
/// 3. `~/.config/notegram/notegram.toml` (user XDG config)
/// 4. `./notegram.toml` (local directory)
/// 5. `NOTEGRAM_*` environment variables
pub fn load_config() -> Result<NotegramConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<NotegramConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(NotegramConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<NotegramConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(NotegramConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(NotegramConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// Path of the per-user configuration file, if a config directory exists.
pub fn user_config_path() -> Option<std::path::PathBuf> {
    dirs::config_dir().map(|d| d.join("notegram").join(LOCAL_CONFIG_FILE))
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `NOTEGRAM_TELEGRAM_API_BASE_URL` must map to
/// `telegram.api_base_url`, not `telegram.api.base.url`. Bots are an array of
/// tables and are configured through files only.
fn env_provider() -> Env {
    Env::prefixed("NOTEGRAM_")
        .map(|key| {
            let key_str = key.as_str();
            let mapped = key_str
                .replacen("general_", "general.", 1)
                .replacen("telegram_", "telegram.", 1)
                .replacen("vault_", "vault.", 1);
            mapped.into()
        })
        .filter(|key| !key.as_str().starts_with("bots"))
}
