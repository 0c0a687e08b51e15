//! Library index page generation

use chrono::{DateTime, Utc};
use maud::{Markup, html};

use crate::article::Article;
use crate::components::article_list::{ArticleRow, article_table};
use crate::components::layout::page_wrapper;
use crate::markdown::MarkdownRenderer;

/// Generates the library landing page
///
/// Lists every saved article in save order. Row links point to
/// `articles/<n>.html`, matching the files written by the site export.
/// Abstract previews have Markdown delimiters stripped so the table shows
/// readable text.
///
/// # Arguments
///
/// * `articles`: Saved articles in display order
/// * `generated_at`: Timestamp shown in the page header
///
/// # Returns
///
/// Complete HTML markup for index page
pub fn generate(articles: &[Article], generated_at: DateTime<Utc>) -> Markup {
    let markdown = MarkdownRenderer::new();
    let rows: Vec<ArticleRow> = articles
        .iter()
        .enumerate()
        .map(|(index, article)| ArticleRow {
            article,
            href: article_href(index + 1),
            preview: article
                .abstract_text
                .as_deref()
                .map(|text| markdown.plain_text(text)),
        })
        .collect();

    page_wrapper(
        "Library",
        &["assets/index.css"],
        html! {
            header class="library-header" {
                h1 class="library-title" {
                    i class="ph ph-books" {}
                    " Library"
                }
                span class="library-meta" {
                    (articles.len())
                    @if articles.len() == 1 { " article" } @else { " articles" }
                    " · generated " (generated_at.format("%Y-%m-%d %H:%M UTC"))
                }
            }
            main class="library-card" {
                (article_table(&rows))
            }
        },
    )
}

/// Link to the detail page of the article at 1-based `position`
pub fn article_href(position: usize) -> String {
    format!("articles/{}.html", position)
}
