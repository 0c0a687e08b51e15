//! Standalone document page generation

use anyhow::Result;
use maud::{Markup, html};

use crate::components::layout::page_wrapper;
use crate::markdown::HtmlRenderer;

/// Generates a self-contained page for arbitrary Markdown subset text
///
/// The page links `document.css` next to itself, so callers writing the
/// page must also write the stylesheet into an `assets` sibling directory.
///
/// # Arguments
///
/// * `title`: Page title
/// * `text`: Markdown subset source
/// * `renderer`: Markdown to HTML renderer
///
/// # Returns
///
/// Complete HTML markup
///
/// # Errors
///
/// Returns error if a code block fails to highlight
pub fn generate(title: &str, text: &str, renderer: &HtmlRenderer) -> Result<Markup> {
    let body = renderer.render(text)?;

    Ok(page_wrapper(
        title,
        &["assets/document.css"],
        html! {
            main class="document-card" {
                h1 class="document-title" { (title) }
                (body)
            }
        },
    ))
}
