// SPDX-FileCopyrightText: 2026 Notegram Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Note markdown to Telegram MarkdownV2 conversion.
//!
//! MarkdownV2 requires 18 reserved characters to be backslash-escaped
//! everywhere outside formatting entities. Escaping a whole note naively would
//! also escape the note's own bold, code, and link markup, so conversion runs
//! in three steps:
//!
//! 1. [`protect`] swaps each recognized markup span for a placeholder token
//!    made only of private-use sentinels, a kind tag, and a decimal index.
//! 2. [`escape_markdown_v2`] escapes the protected text. Tokens contain no
//!    reserved characters and pass through unchanged.
//! 3. [`restore`] replaces every token with the MarkdownV2 form of its span,
//!    escaping the span's inner content on the way.
//!
//! Only the outermost span is protected; markup nested inside a span is
//! escaped as literal text.
//!
//! Backslashes in the source follow markdown rules: `\` before a reserved
//! character (or another backslash) keeps that character literal, and any
//! other backslash is itself a literal backslash.

use std::sync::LazyLock;

use regex::Regex;

/// Characters that must be escaped in MarkdownV2 outside code entities.
const SPECIAL_CHARS: &[char] = &[
    '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
];

/// Opens a placeholder token. Private-use code point, never reserved.
const TOKEN_OPEN: char = '\u{E000}';

/// Closes a placeholder token.
const TOKEN_CLOSE: char = '\u{E001}';

static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\*\*([^\n]+?)\*\*").unwrap());
static ITALIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\*([^*\n]+)\*").unwrap());
static STRIKE_DOUBLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^~~([^~\n]+)~~").unwrap());
static STRIKE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^~([^~\n]+)~").unwrap());
static UNDERLINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^__([^\n]+?)__").unwrap());
static INLINE_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^`([^`\n]+)`").unwrap());
static CODE_BLOCK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)^```(.+?)```").unwrap());
/// Link URLs may contain one level of balanced parentheses.
static LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[([^\]\n]+)\]\(((?:[^()\s]|\([^()\s]*\))+)\)").unwrap()
});

/// Kind of a recognized markup span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    Bold,
    Italic,
    Strikethrough,
    Underline,
    InlineCode,
    CodeBlock,
    Link,
    /// A single literal character written as a backslash escape.
    Escaped,
}

impl SpanKind {
    /// Single ASCII letter identifying the kind inside a token.
    fn tag(self) -> char {
        match self {
            Self::Bold => 'B',
            Self::Italic => 'I',
            Self::Strikethrough => 'S',
            Self::Underline => 'U',
            Self::InlineCode => 'C',
            Self::CodeBlock => 'P',
            Self::Link => 'L',
            Self::Escaped => 'E',
        }
    }

    fn from_tag(tag: char) -> Option<Self> {
        Some(match tag {
            'B' => Self::Bold,
            'I' => Self::Italic,
            'S' => Self::Strikethrough,
            'U' => Self::Underline,
            'C' => Self::InlineCode,
            'P' => Self::CodeBlock,
            'L' => Self::Link,
            'E' => Self::Escaped,
            _ => return None,
        })
    }

    /// MarkdownV2 delimiter wrapping the span's content.
    fn delimiter(self) -> &'static str {
        match self {
            Self::Bold => "*",
            Self::Italic => "_",
            Self::Strikethrough => "~",
            Self::Underline => "__",
            Self::InlineCode => "`",
            Self::CodeBlock => "```",
            Self::Link | Self::Escaped => "",
        }
    }
}

/// A markup span lifted out of the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupSpan {
    pub kind: SpanKind,
    /// Raw inner content (link text for links).
    pub content: String,
    /// Link target, for [`SpanKind::Link`] only.
    pub url: Option<String>,
}

/// Spans removed by [`protect`], indexed by their placeholder tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placeholders {
    spans: Vec<MarkupSpan>,
}

impl Placeholders {
    /// Stores a span and returns the token that stands in for it.
    fn insert(&mut self, span: MarkupSpan) -> String {
        let token = format!("{TOKEN_OPEN}{}{}{TOKEN_CLOSE}", span.kind.tag(), self.spans.len());
        self.spans.push(span);
        token
    }

    /// Looks up the span for a token body such as `B3`.
    ///
    /// Returns `None` when the tag is unknown, the index is out of range, or
    /// the tag does not match the stored span's kind.
    fn resolve(&self, body: &str) -> Option<&MarkupSpan> {
        let mut chars = body.chars();
        let kind = SpanKind::from_tag(chars.next()?)?;
        let index: usize = chars.as_str().parse().ok()?;
        self.spans.get(index).filter(|span| span.kind == kind)
    }

    pub fn spans(&self) -> &[MarkupSpan] {
        &self.spans
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

/// Escapes every MarkdownV2 reserved character with a backslash.
///
/// Not idempotent: escaping already escaped text escapes it again.
pub fn escape_markdown_v2(text: &str) -> String {
    let mut result = String::with_capacity(text.len() * 2);
    for ch in text.chars() {
        if SPECIAL_CHARS.contains(&ch) {
            result.push('\\');
        }
        result.push(ch);
    }
    result
}

/// Escapes text for use inside `code` and `pre` entities, where only
/// backticks and backslashes are reserved.
pub fn escape_code(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        if ch == '`' || ch == '\\' {
            result.push('\\');
        }
        result.push(ch);
    }
    result
}

/// Whether `ch` may follow a backslash as a markdown escape.
fn is_escapable(ch: char) -> bool {
    ch == '\\' || SPECIAL_CHARS.contains(&ch)
}

/// Escapes span content that may carry source backslashes.
///
/// `\x` with an escapable `x` is kept as one escape; any other backslash
/// becomes `\\`; reserved characters are escaped as usual.
fn escape_span_text(text: &str) -> String {
    let mut result = String::with_capacity(text.len() * 2);
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            result.push('\\');
            match chars.next_if(|&next| is_escapable(next)) {
                Some(next) => result.push(next),
                None => result.push('\\'),
            }
            continue;
        }
        if SPECIAL_CHARS.contains(&ch) {
            result.push('\\');
        }
        result.push(ch);
    }
    result
}

/// Escapes a link URL, where only `)` and `\` are reserved.
fn escape_url(url: &str) -> String {
    let mut result = String::with_capacity(url.len() + 4);
    for ch in url.chars() {
        if ch == ')' || ch == '\\' {
            result.push('\\');
        }
        result.push(ch);
    }
    result
}

/// Replaces recognized markup spans with placeholder tokens.
///
/// The text is scanned left to right. At each position the span kinds are
/// tried in precedence order: bold, italic, strikethrough, underline, inline
/// code, code block, link. The first match is substituted and scanning
/// resumes after it, so spans never overlap. Unmatched delimiters stay in the
/// output as literal text.
///
/// A backslash becomes an [`SpanKind::Escaped`] span holding the character
/// it escapes, or a literal backslash when nothing escapable follows it.
///
/// Any sentinel characters already present in `text` are dropped so that
/// document content can never be mistaken for a token.
pub fn protect(text: &str) -> (String, Placeholders) {
    let text: String = text
        .chars()
        .filter(|&c| c != TOKEN_OPEN && c != TOKEN_CLOSE)
        .collect();

    let mut protected = String::with_capacity(text.len());
    let mut placeholders = Placeholders::default();
    let mut prev: Option<char> = None;
    let mut pos = 0;

    while let Some(ch) = text[pos..].chars().next() {
        if ch == '\\' {
            let literal = text[pos + 1..]
                .chars()
                .next()
                .filter(|&next| is_escapable(next))
                .unwrap_or('\\');
            let consumed = if literal == '\\' && !text[pos + 1..].starts_with('\\') {
                1
            } else {
                1 + literal.len_utf8()
            };
            protected.push_str(&placeholders.insert(MarkupSpan {
                kind: SpanKind::Escaped,
                content: literal.to_string(),
                url: None,
            }));
            prev = Some(literal);
            pos += consumed;
            continue;
        }

        if matches!(ch, '*' | '~' | '_' | '`' | '[')
            && let Some((span, consumed)) = match_span(&text[pos..], prev)
        {
            protected.push_str(&placeholders.insert(span));
            prev = text[pos..pos + consumed].chars().next_back();
            pos += consumed;
            continue;
        }

        protected.push(ch);
        prev = Some(ch);
        pos += ch.len_utf8();
    }

    (protected, placeholders)
}

/// Tries every span kind, in precedence order, at the start of `rest`.
///
/// `prev` is the character immediately before `rest` and is used for the
/// lone-delimiter rules of italic and inline code.
fn match_span(rest: &str, prev: Option<char>) -> Option<(MarkupSpan, usize)> {
    let simple = |re: &Regex, kind: SpanKind| {
        re.captures(rest).map(|caps| {
            (
                MarkupSpan {
                    kind,
                    content: caps[1].to_string(),
                    url: None,
                },
                caps[0].len(),
            )
        })
    };
    let lone = |re: &Regex, kind: SpanKind, delimiter: char| {
        if prev == Some(delimiter) {
            return None;
        }
        simple(re, kind).filter(|(_, consumed)| !rest[*consumed..].starts_with(delimiter))
    };

    simple(&BOLD, SpanKind::Bold)
        .or_else(|| lone(&ITALIC, SpanKind::Italic, '*'))
        .or_else(|| simple(&STRIKE_DOUBLE, SpanKind::Strikethrough))
        .or_else(|| simple(&STRIKE, SpanKind::Strikethrough))
        .or_else(|| simple(&UNDERLINE, SpanKind::Underline))
        .or_else(|| lone(&INLINE_CODE, SpanKind::InlineCode, '`'))
        .or_else(|| simple(&CODE_BLOCK, SpanKind::CodeBlock))
        .or_else(|| {
            LINK.captures(rest).map(|caps| {
                (
                    MarkupSpan {
                        kind: SpanKind::Link,
                        content: caps[1].to_string(),
                        url: Some(caps[2].to_string()),
                    },
                    caps[0].len(),
                )
            })
        })
}

/// Replaces placeholder tokens in escaped text with MarkdownV2 markup.
///
/// Text spans get their content escaped like body text, code spans with
/// [`escape_code`]. Inside link URLs only `)` and `\` are escaped. Tokens
/// that do not resolve are dropped.
pub fn restore(escaped: &str, placeholders: &Placeholders) -> String {
    let mut result = String::with_capacity(escaped.len() + placeholders.len() * 8);
    let mut rest = escaped;

    while let Some(start) = rest.find(TOKEN_OPEN) {
        result.push_str(&rest[..start]);
        let after = &rest[start + TOKEN_OPEN.len_utf8()..];
        let Some(end) = after.find(TOKEN_CLOSE) else {
            rest = after;
            continue;
        };
        if let Some(span) = placeholders.resolve(&after[..end]) {
            render_span(span, &mut result);
        }
        rest = &after[end + TOKEN_CLOSE.len_utf8()..];
    }

    result.push_str(rest);
    result
}

fn render_span(span: &MarkupSpan, out: &mut String) {
    match span.kind {
        SpanKind::Link => {
            out.push('[');
            out.push_str(&escape_span_text(&span.content));
            out.push_str("](");
            out.push_str(&escape_url(span.url.as_deref().unwrap_or_default()));
            out.push(')');
        }
        SpanKind::Escaped => {
            out.push('\\');
            out.push_str(&span.content);
        }
        SpanKind::InlineCode | SpanKind::CodeBlock => {
            let delimiter = span.kind.delimiter();
            out.push_str(delimiter);
            out.push_str(&escape_code(&span.content));
            out.push_str(delimiter);
        }
        kind => {
            let delimiter = kind.delimiter();
            out.push_str(delimiter);
            out.push_str(&escape_span_text(&span.content));
            out.push_str(delimiter);
        }
    }
}

/// Converts note markdown into MarkdownV2 text ready for the Bot API.
///
/// Runs [`protect`], [`escape_markdown_v2`] and [`restore`] in sequence.
pub fn format_for_telegram(text: &str) -> String {
    let (protected, placeholders) = protect(text);
    restore(&escape_markdown_v2(&protected), &placeholders)
}
