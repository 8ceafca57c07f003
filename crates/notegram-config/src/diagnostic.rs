// SPDX-FileCopyrightText: 2026 Notegram Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Figment-to-miette error bridge with fuzzy match suggestions.
//!
//! Turns Figment deserialization errors into miette diagnostics that point at
//! the offending key in the TOML file and suggest the closest valid key.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Minimum Jaro-Winkler similarity score to suggest a correction.
/// Catches typos like `chatid` -> `chat_id` or `tokn` -> `token`.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// A configuration error with rich diagnostic information.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// An unknown key was found in the configuration.
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(notegram::config::unknown_key),
        help("{}", format_unknown_key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        key: String,
        /// Suggested correction via fuzzy matching, if any.
        suggestion: Option<String>,
        /// Comma-separated valid keys for the section.
        valid_keys: String,
        #[label("this key is not recognized")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A configuration value has the wrong type.
    #[error("invalid type for key `{key}`: {detail}")]
    #[diagnostic(code(notegram::config::invalid_type), help("expected {expected}"))]
    InvalidType {
        key: String,
        detail: String,
        expected: String,
    },

    /// A required configuration key is missing.
    #[error("missing required key `{key}`")]
    #[diagnostic(
        code(notegram::config::missing_key),
        help("add `{key} = <value>` to your notegram.toml")
    )]
    MissingKey { key: String },

    /// A semantic validation failure.
    #[error("validation error: {message}")]
    #[diagnostic(code(notegram::config::validation))]
    Validation { message: String },

    /// Catch-all for other configuration errors.
    #[error("configuration error: {0}")]
    #[diagnostic(code(notegram::config::other))]
    Other(String),
}

fn format_unknown_key_help(suggestion: Option<&str>, valid_keys: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? Valid keys: {valid_keys}"),
        None => format!("valid keys: {valid_keys}"),
    }
}

/// Convert a `figment::Error` into a list of `ConfigError` diagnostics.
///
/// `toml_sources` pairs a file path with its contents and is used to attach
/// source spans to unknown-key errors.
pub fn figment_to_config_errors(
    err: figment::Error,
    toml_sources: &[(String, String)],
) -> Vec<ConfigError> {
    use figment::error::Kind;

    err.into_iter()
        .map(|error| match &error.kind {
            Kind::UnknownField(field, expected) => {
                let valid_keys: Vec<&str> = expected.to_vec();
                let suggestion = suggest_key(field, &valid_keys);
                let (span, src) = find_source_span(&error, field, toml_sources);
                ConfigError::UnknownKey {
                    key: field.clone(),
                    suggestion,
                    valid_keys: valid_keys.join(", "),
                    span,
                    src,
                }
            }
            Kind::MissingField(field) => ConfigError::MissingKey {
                key: qualified_key(&error, field),
            },
            Kind::InvalidType(actual, expected) => ConfigError::InvalidType {
                key: error.path.join("."),
                detail: format!("found {actual}, expected {expected}"),
                expected: expected.to_string(),
            },
            _ => ConfigError::Other(error.to_string()),
        })
        .collect()
}

/// Joins the error path and a field name (`bots.0` + `id` -> `bots.0.id`).
fn qualified_key(error: &figment::error::Error, field: &str) -> String {
    if error.path.is_empty() {
        field.to_string()
    } else {
        format!("{}.{field}", error.path.join("."))
    }
}

fn find_source_span(
    error: &figment::error::Error,
    field: &str,
    toml_sources: &[(String, String)],
) -> (Option<SourceSpan>, Option<NamedSource<String>>) {
    let source_path = error
        .metadata
        .as_ref()
        .and_then(|m| m.source.as_ref())
        .and_then(|s| match s {
            figment::Source::File(path) => Some(path.display().to_string()),
            _ => None,
        });

    let Some((path, content)) = source_path.as_ref().and_then(|path| {
        toml_sources
            .iter()
            .find(|(p, _)| p == path)
            .map(|(p, content)| (p.as_str(), content.as_str()))
    }) else {
        return (None, None);
    };

    match find_key_offset(content, &error.path, field) {
        Some(offset) => (
            Some(SourceSpan::new(offset.into(), field.len())),
            Some(NamedSource::new(path, content.to_string())),
        ),
        None => (None, None),
    }
}

/// Find the byte offset of a key in TOML content, relative to a section path.
///
/// For `path = ["telegram"]` the search starts after the `[telegram]` header;
/// for `path = ["bots", ..]` it starts after the first `[[bots]]` header.
/// Top-level keys are searched from the start of the file.
pub fn find_key_offset(content: &str, path: &[String], field: &str) -> Option<usize> {
    let search_start = match path.first() {
        None => 0,
        Some(section) => [format!("[[{section}]]"), format!("[{section}]")]
            .iter()
            .find_map(|header| content.find(header.as_str()).map(|pos| pos + header.len()))?,
    };

    let mut offset = search_start;
    for line in content[search_start..].split_inclusive('\n') {
        let trimmed = line.trim_start();
        if let Some(after) = trimmed.strip_prefix(field)
            && after.starts_with([' ', '\t', '='])
        {
            return Some(offset + (line.len() - trimmed.len()));
        }
        offset += line.len();
    }

    None
}

/// Suggest a similar key name using Jaro-Winkler string similarity.
///
/// Returns the best match above the similarity threshold.
pub fn suggest_key(unknown: &str, valid_keys: &[&str]) -> Option<String> {
    valid_keys
        .iter()
        .map(|&key| (key, strsim::jaro_winkler(unknown, key)))
        .filter(|(_, score)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(key, _)| key.to_string())
}

/// Render a list of `ConfigError`s to stderr using miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    use miette::GraphicalReportHandler;

    let handler = GraphicalReportHandler::new();
    for error in errors {
        let mut buf = String::new();
        let diagnostic: &dyn Diagnostic = error;
        if handler.render_report(&mut buf, diagnostic).is_ok() {
            eprint!("{buf}");
        } else {
            eprintln!("Error: {error}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggests_chat_id_for_chatid() {
        let valid = &["id", "name", "token", "chat_id", "enabled"];
        assert_eq!(suggest_key("chatid", valid), Some("chat_id".to_string()));
    }

    #[test]
    fn suggests_log_level_for_typo() {
        let valid = &["log_level", "default_bot"];
        assert_eq!(suggest_key("log_lvl", valid), Some("log_level".to_string()));
    }

    #[test]
    fn no_suggestion_for_distant_typo() {
        let valid = &["api_base_url", "timeout_secs", "disable_link_preview"];
        assert_eq!(suggest_key("zzzzzz", valid), None);
    }

    #[test]
    fn find_key_offset_in_section() {
        let content = "[general]\nlog_lvl = \"debug\"\n";
        let path = vec!["general".to_string()];
        let o = find_key_offset(content, &path, "log_lvl").expect("offset");
        assert_eq!(&content[o..o + 7], "log_lvl");
    }

    #[test]
    fn find_key_offset_in_array_of_tables() {
        let content = "[general]\nlog_level = \"info\"\n\n[[bots]]\nid = \"a\"\n  chatid = \"1\"\n";
        let path = vec!["bots".to_string(), "0".to_string()];
        let o = find_key_offset(content, &path, "chatid").expect("offset");
        assert_eq!(&content[o..o + 6], "chatid");
    }

    #[test]
    fn find_key_offset_missing_section() {
        let content = "[general]\n";
        let path = vec!["vault".to_string()];
        assert_eq!(find_key_offset(content, &path, "root"), None);
    }
}
