// SPDX-FileCopyrightText: 2026 Notegram Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property tests for MarkdownV2 escaping and conversion.

use notegram_telegram::markdown::{escape_markdown_v2, format_for_telegram};
use proptest::prelude::*;

const RESERVED: &str = "_*[]()~`>#+-=|{}.!";

fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\\'
            && let Some(&next) = chars.peek()
            && RESERVED.contains(next)
        {
            continue;
        }
        out.push(ch);
    }
    out
}

/// Whether every backslash in `text` starts a complete escape pair.
fn escapes_are_well_formed(text: &str) -> bool {
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some(next) if next == '\\' || RESERVED.contains(next) => {}
                _ => return false,
            }
        }
    }
    true
}

proptest! {
    #[test]
    fn prop_plain_text_is_unchanged(s in "[a-zA-Z0-9 ,;:'\"?/@$%^&]*") {
        prop_assert_eq!(escape_markdown_v2(&s), s.clone());
        prop_assert_eq!(format_for_telegram(&s), s);
    }

    #[test]
    fn prop_each_reserved_char_gets_one_backslash(s in "[^\\\\]*") {
        let escaped = escape_markdown_v2(&s);
        let reserved = s.chars().filter(|c| RESERVED.contains(*c)).count();
        prop_assert_eq!(escaped.chars().count(), s.chars().count() + reserved);
        prop_assert_eq!(unescape(&escaped), s);
    }

    #[test]
    fn prop_conversion_never_leaks_placeholders(s in "\\PC*") {
        let out = format_for_telegram(&s);
        prop_assert!(!out.contains('\u{E000}'), "output leaked placeholder U+E000");
        prop_assert!(!out.contains('\u{E001}'), "output leaked placeholder U+E001");
    }

    #[test]
    fn prop_text_without_markup_is_fully_escaped(s in "[a-z .!#+=|{}>()-]*") {
        prop_assert_eq!(format_for_telegram(&s), escape_markdown_v2(&s));
    }

    #[test]
    fn prop_backslashes_always_form_escapes(s in "[a-z \\\\_*`~\\[\\]().!]*") {
        let out = format_for_telegram(&s);
        prop_assert!(escapes_are_well_formed(&out), "input {:?} gave {:?}", s, out);
    }
}
