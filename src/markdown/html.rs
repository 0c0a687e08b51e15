//! HTML presentation of styled spans.

use anyhow::{Context, Result};
use maud::{Markup, PreEscaped, html};
use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use super::style::{DEFAULT_BASE_SIZE, TextStyle};
use super::{MarkdownRenderer, StyleTag, StyledSpan};

/// Renders Markdown subset text to HTML markup.
///
/// Spans become inline elements carrying their computed font size. Code
/// blocks with a recognized language tag are highlighted by syntect using
/// `hljs-` prefixed CSS classes; unknown languages fall back to escaped
/// text. The wrapping element preserves whitespace, so line breaks in plain
/// runs survive without extra markup.
pub struct HtmlRenderer {
    markdown: MarkdownRenderer,
    syntax_set: SyntaxSet,
    base_size: f32,
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlRenderer {
    /// Creates renderer at the default base font size.
    pub fn new() -> Self {
        Self::with_base_size(DEFAULT_BASE_SIZE)
    }

    /// Creates renderer with a custom base font size in pixels.
    pub fn with_base_size(base_size: f32) -> Self {
        Self {
            markdown: MarkdownRenderer::new(),
            syntax_set: SyntaxSet::load_defaults_newlines(),
            base_size,
        }
    }

    pub fn base_size(&self) -> f32 {
        self.base_size
    }

    /// Renders `text` inside a `div.md` container.
    ///
    /// # Errors
    ///
    /// Returns error if syntax highlighting of a code block fails
    pub fn render(&self, text: &str) -> Result<Markup> {
        let spans = self.markdown.render(text);
        let mut parts = Vec::with_capacity(spans.len());
        for span in &spans {
            parts.push(self.render_span(span)?);
        }

        Ok(html! {
            div class="md" style=(format!("font-size: {}px;", self.base_size)) {
                @for part in &parts {
                    (part)
                }
            }
        })
    }

    /// Renders a single span.
    ///
    /// # Errors
    ///
    /// Returns error if syntax highlighting fails
    pub fn render_span(&self, span: &StyledSpan) -> Result<Markup> {
        let css = TextStyle::for_tag(span.style, self.base_size).css();

        let markup = match span.style {
            StyleTag::Plain => html! { (span.text) },
            StyleTag::Bold => html! { strong style=(css) { (span.text) } },
            StyleTag::InlineCode => html! {
                code class="md-inline-code" style=(css) { (span.text) }
            },
            StyleTag::CodeBlock => {
                let language = span
                    .language
                    .as_deref()
                    .and_then(|info| info.split_whitespace().next())
                    .unwrap_or("text");
                let highlighted = self
                    .highlight_code(&span.text, language)
                    .with_context(|| format!("Failed to highlight {} code block", language))?;
                html! {
                    pre class="md-code-block" style=(css) {
                        code class=(format!("language-{}", language)) {
                            (PreEscaped(highlighted))
                        }
                    }
                }
            }
            StyleTag::Heading(level) => html! {
                span class=(format!("md-heading md-heading-{}", level.min(6))) style=(css) {
                    (span.text)
                }
            },
        };

        Ok(markup)
    }

    /// Highlights code with syntect CSS classes.
    ///
    /// Returns escaped plain text when no syntax matches `language`.
    fn highlight_code(&self, code: &str, language: &str) -> Result<String> {
        if code.is_empty() {
            return Ok(String::new());
        }

        let syntax = self
            .syntax_set
            .find_syntax_by_token(language)
            .or_else(|| self.syntax_set.find_syntax_by_extension(language));

        let Some(syntax) = syntax else {
            return Ok(html! { (code) }.into_string());
        };

        let mut generator = ClassedHTMLGenerator::new_with_class_style(
            syntax,
            &self.syntax_set,
            ClassStyle::SpacedPrefixed { prefix: "hljs-" },
        );

        for line in LinesWithEndings::from(code) {
            generator
                .parse_html_for_line_which_includes_newline(line)
                .context("Failed to parse line for syntax highlighting")?;
        }

        Ok(generator.finalize())
    }
}
