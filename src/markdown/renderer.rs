//! Markdown subset tokenizer producing styled spans.
//!
//! Recognizes fenced code blocks, inline code, bold and `#` headings. Any
//! construct that fails to close degrades to plain text, so rendering never
//! fails and never loses input.

use std::ops::Range;

use super::scanner::Scanner;

/// Characters that may open a styled construct.
const TRIGGERS: [char; 3] = ['`', '*', '#'];

const FENCE: &str = "```";
const BACKTICK: &str = "`";
const BOLD: &str = "**";
const LINE_BREAKS: [char; 2] = ['\n', '\r'];

/// Presentation style attached to a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleTag {
    Plain,
    Bold,
    InlineCode,
    CodeBlock,
    /// Heading with its level, the number of leading `#` characters.
    Heading(usize),
}

/// Run of display text sharing one style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSpan {
    /// Display text with delimiters stripped.
    pub text: String,
    pub style: StyleTag,
    /// Byte range of the input this span was produced from, delimiters
    /// included.
    pub source: Range<usize>,
    /// Fence info string of a code block.
    pub language: Option<String>,
}

impl StyledSpan {
    /// Creates a span without a language tag.
    pub fn new(text: impl Into<String>, style: StyleTag, source: Range<usize>) -> Self {
        Self {
            text: text.into(),
            style,
            source,
            language: None,
        }
    }

    fn plain(text: &str, source: Range<usize>) -> Self {
        Self::new(text, StyleTag::Plain, source)
    }
}

/// Converts Markdown subset text into styled spans.
///
/// Scans left to right, trying at each position a code fence, an inline
/// code span, bold and a heading, in that order, before falling back to a
/// plain run. Every branch consumes at least one character, so the output
/// is finite for any input. The renderer holds no state and may be shared
/// freely between threads.
///
/// # Examples
///
/// ```
/// use arxshelf::{MarkdownRenderer, StyleTag};
///
/// let spans = MarkdownRenderer::new().render("Hello **world**");
/// assert_eq!(spans.len(), 2);
/// assert_eq!(spans[1].style, StyleTag::Bold);
/// assert_eq!(spans[1].text, "world");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Renders `text` into spans in document order.
    ///
    /// Adjacent spans of the same style are not merged. The source ranges
    /// of the returned spans are contiguous and cover `text` exactly.
    pub fn render(&self, text: &str) -> Vec<StyledSpan> {
        let mut scanner = Scanner::new(text);
        let mut spans = Vec::new();

        while !scanner.is_at_end() {
            let start = scanner.position();

            let span = if scanner.try_consume_literal(FENCE) {
                fenced_block(&mut scanner, start)
            } else if scanner.try_consume_literal(BACKTICK) {
                delimited(&mut scanner, start, BACKTICK, StyleTag::InlineCode)
            } else if scanner.try_consume_literal(BOLD) {
                delimited(&mut scanner, start, BOLD, StyleTag::Bold)
            } else if let Some(span) = heading(&mut scanner) {
                span
            } else {
                plain_run(&mut scanner, start)
            };

            spans.push(span);
        }

        spans
    }

    /// Renders `text` and concatenates the display text of every span.
    pub fn plain_text(&self, text: &str) -> String {
        self.render(text).into_iter().map(|span| span.text).collect()
    }
}

/// Scans a fenced block after its opening fence.
///
/// The rest of the opening line is the language tag and is dropped from the
/// text along with one line break. Without a closing fence the whole
/// construct becomes plain text, verbatim from the opening fence.
fn fenced_block(scanner: &mut Scanner<'_>, start: usize) -> StyledSpan {
    let info = scanner.consume_until_any(&LINE_BREAKS);
    if !scanner.try_consume_literal("\r\n") && !scanner.try_consume_literal("\n") {
        scanner.try_consume_literal("\r");
    }

    let Some(code) = scanner.consume_until_literal(FENCE) else {
        scanner.consume_rest();
        return StyledSpan::plain(scanner.since(start), start..scanner.position());
    };
    scanner.try_consume_literal(FENCE);

    let info = info.trim();
    StyledSpan {
        text: code.to_string(),
        style: StyleTag::CodeBlock,
        source: start..scanner.position(),
        language: (!info.is_empty()).then(|| info.to_string()),
    }
}

/// Scans content up to a closing `delimiter`, already past the opener.
fn delimited(
    scanner: &mut Scanner<'_>,
    start: usize,
    delimiter: &str,
    style: StyleTag,
) -> StyledSpan {
    match scanner.consume_until_literal(delimiter) {
        Some(content) => {
            scanner.try_consume_literal(delimiter);
            StyledSpan::new(content, style, start..scanner.position())
        }
        None => {
            scanner.consume_rest();
            StyledSpan::plain(scanner.since(start), start..scanner.position())
        }
    }
}

/// Scans a `#` heading if one starts at the cursor.
///
/// A hash run inside a word (`C#`) or without any text after it on the line
/// is not a heading; the scanner is left untouched in that case.
fn heading(scanner: &mut Scanner<'_>) -> Option<StyledSpan> {
    if scanner.previous_char().is_some_and(|c| !c.is_whitespace()) {
        return None;
    }

    let mut probe = *scanner;
    let start = probe.position();
    let level = probe.consume_run_of(|c| c == '#')?.chars().count();
    probe.consume_run_of(|c| c == ' ' || c == '\t');

    let content = probe.consume_until_any(&LINE_BREAKS);
    if content.is_empty() {
        return None;
    }

    *scanner = probe;
    Some(StyledSpan::new(
        content,
        StyleTag::Heading(level),
        start..scanner.position(),
    ))
}

/// Scans a run free of trigger characters, or a single character when the
/// cursor sits on a trigger that opened nothing.
fn plain_run(scanner: &mut Scanner<'_>, start: usize) -> StyledSpan {
    if scanner.consume_until_any(&TRIGGERS).is_empty() {
        scanner.consume_one_char();
    }

    StyledSpan::plain(scanner.since(start), start..scanner.position())
}
