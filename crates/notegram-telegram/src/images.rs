// SPDX-FileCopyrightText: 2026 Notegram Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Removal of inline image references from note bodies.
//!
//! Images travel as attachments, so their inline references are dropped
//! before the text is converted.

use std::sync::LazyLock;

use regex::Regex;

/// Image reference forms, longest first so `![alt](x)` is not cut down to
/// `(x)` by the bracket-only pattern. Each also eats the spaces and tabs that
/// follow it.
static IMAGE_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        // Wiki embed: ![[pic.png]]
        Regex::new(r"!\[\[[^\]\n]*\]\][ \t]*").unwrap(),
        // Markdown image: ![alt](pic.png)
        Regex::new(r"!\[[^\]\n]*\]\([^)\n]*\)[ \t]*").unwrap(),
        // Bracket-only: ![alt]
        Regex::new(r"!\[[^\]\n]*\][ \t]*").unwrap(),
    ]
});

/// Removes every image reference from `text`, leaving ordinary links alone.
pub fn strip_images(text: &str) -> String {
    IMAGE_PATTERNS
        .iter()
        .fold(text.to_string(), |acc, pattern| {
            pattern.replace_all(&acc, "").into_owned()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_all_three_forms() {
        assert_eq!(
            strip_images("![[pic.png]] see [[note]] and ![alt](x.png)"),
            "see [[note]] and "
        );
        assert_eq!(strip_images("a ![just alt] b"), "a b");
    }

    #[test]
    fn keeps_ordinary_links() {
        let text = "read [the docs](https://example.com) and [[other note]]";
        assert_eq!(strip_images(text), text);
    }

    #[test]
    fn keeps_line_structure() {
        assert_eq!(
            strip_images("intro\n![[a.png]]\n![b](b.jpg)\noutro"),
            "intro\n\n\noutro"
        );
    }

    #[test]
    fn embed_with_size_suffix() {
        assert_eq!(strip_images("![[photo.jpg|300]]caption"), "caption");
    }

    #[test]
    fn lone_bang_is_untouched() {
        assert_eq!(strip_images("Wow! [x]"), "Wow! [x]");
    }

    #[test]
    fn empty_input() {
        assert_eq!(strip_images(""), "");
    }
}
