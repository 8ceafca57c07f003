// SPDX-FileCopyrightText: 2026 Notegram Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! notegram - send markdown notes to Telegram chats.
//!
//! This is the binary entry point.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod bots;
mod check;
mod selection;
mod send;
mod vault;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// notegram - send markdown notes to Telegram chats.
#[derive(Parser, Debug)]
#[command(name = "notegram", version, about, long_about = None)]
struct Cli {
    /// Use this configuration file instead of the standard locations.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Send a note, with its linked media, to a chat.
    Send {
        /// Path to the note, absolute or relative to the vault root.
        note: PathBuf,
        /// Bot id or name to send with.
        #[arg(long, conflicts_with = "all")]
        bot: Option<String>,
        /// Send with every enabled bot.
        #[arg(long)]
        all: bool,
    },
    /// Verify bot tokens and chat access.
    Check {
        /// Bot id or name. Defaults to every enabled bot.
        #[arg(long)]
        bot: Option<String>,
    },
    /// List configured bots.
    Bots,
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("notegram={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => notegram_config::load_and_validate_path(path),
        None => notegram_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            notegram_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.general.log_level);
    tracing::debug!(bots = config.bots.len(), "config loaded");

    let result = match cli.command {
        Commands::Send { note, bot, all } => {
            send::run_send(&config, &note, bot.as_deref(), all).await
        }
        Commands::Check { bot } => check::run_check(&config, bot.as_deref()).await,
        Commands::Bots => {
            bots::run_bots(&config);
            Ok(true)
        }
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("notegram: {}", e.user_message());
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        // Only jemalloc supports advancing the epoch.
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn send_arguments_parse() {
        let cli = Cli::parse_from(["notegram", "--config", "n.toml", "send", "Trip.md", "--bot", "work"]);
        assert_eq!(cli.config, Some(PathBuf::from("n.toml")));
        match cli.command {
            Commands::Send { note, bot, all } => {
                assert_eq!(note, PathBuf::from("Trip.md"));
                assert_eq!(bot.as_deref(), Some("work"));
                assert!(!all);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn bot_and_all_conflict() {
        let result = Cli::try_parse_from(["notegram", "send", "a.md", "--bot", "x", "--all"]);
        assert!(result.is_err());
    }

    #[test]
    fn binary_loads_config_defaults() {
        let config = notegram_config::load_and_validate_str("").expect("empty config should be valid");
        assert_eq!(config.general.log_level, "info");
        assert!(config.bots.is_empty());
    }
}
