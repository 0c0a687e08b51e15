//! Article detail page generation

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use maud::{Markup, html};

use crate::article::Article;
use crate::components::layout::page_wrapper;
use crate::components::metadata::{article_dates, article_header, article_links};
use crate::components::nav::breadcrumb;
use crate::markdown::HtmlRenderer;

/// Data container for article page generation
pub struct ArticlePageData<'a> {
    pub article: &'a Article,
    /// Summary text produced by the summarizer, rendered as Markdown
    pub summary: Option<&'a str>,
    /// Directory depth below the site root, for relative asset links
    pub depth: usize,
    pub now: DateTime<Utc>,
}

/// Generates the detail page of a single article
///
/// Shows title, authors, categories, dates and links, followed by the
/// abstract and an optional summary. Abstract, comment and summary are all
/// rendered through the Markdown subset renderer.
///
/// # Arguments
///
/// * `data`: Article page data container
/// * `renderer`: Markdown to HTML renderer carrying the base font size
///
/// # Returns
///
/// Complete HTML markup for the article page
///
/// # Errors
///
/// Returns error if a code block in the rendered text fails to highlight
pub fn generate(data: ArticlePageData<'_>, renderer: &HtmlRenderer) -> Result<Markup> {
    let article = data.article;
    let prefix = "../".repeat(data.depth);
    let stylesheet = format!("{}assets/article.css", prefix);
    let index_href = format!("{}index.html", prefix);

    let abstract_html = article
        .abstract_text
        .as_deref()
        .map(|text| renderer.render(text))
        .transpose()
        .with_context(|| format!("Failed to render abstract of {}", article.id))?;
    let summary_html = data
        .summary
        .map(|text| renderer.render(text))
        .transpose()
        .context("Failed to render summary")?;
    let comment_html = article
        .comment
        .as_deref()
        .map(|text| renderer.render(text))
        .transpose()
        .context("Failed to render comment")?;

    Ok(page_wrapper(
        &article.title,
        &[stylesheet.as_str()],
        html! {
            (breadcrumb(&index_href, article.short_id()))
            main class="article-card" {
                (article_header(article))
                (article_dates(article, data.now))
                (article_links(article))

                @if let Some(summary) = summary_html {
                    section class="article-section article-summary-section" {
                        h2 { i class="ph ph-sparkle" {} " Summary" }
                        (summary)
                    }
                }

                section class="article-section" {
                    h2 { "Abstract" }
                    @if let Some(abstract_markup) = abstract_html {
                        (abstract_markup)
                    } @else {
                        p class="empty-state" { "No abstract available" }
                    }
                }

                @if let Some(comment) = comment_html {
                    section class="article-section" {
                        h2 { "Comment" }
                        (comment)
                    }
                }

                @if let Some(journal_ref) = &article.journal_ref {
                    p class="article-journal" {
                        i class="ph ph-book-open" {}
                        " " (journal_ref)
                    }
                }
            }
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Article {
        let mut article = Article::new("http://arxiv.org/abs/2401.00001v1", "Graph Nets");
        article.abstract_text = Some("# Intro\nWe **propose** `gnn`.".to_string());
        article.journal_ref = Some("NeurIPS 2024".to_string());
        article
    }

    #[test]
    fn test_generate_renders_abstract_markdown() {
        // Arrange
        let renderer = HtmlRenderer::new();
        let article = sample();

        // Act
        let html = generate(
            ArticlePageData { article: &article, summary: None, depth: 1, now: Utc::now() },
            &renderer,
        )
        .expect("Should render")
        .into_string();

        // Assert
        assert!(html.contains("href=\"../assets/article.css\""));
        assert!(html.contains("href=\"../index.html\""));
        assert!(html.contains("md-heading md-heading-1"));
        assert!(html.contains("propose</strong>"));
        assert!(html.contains("NeurIPS 2024"));
        assert!(!html.contains("Summary"));
    }

    #[test]
    fn test_generate_with_summary_at_root() {
        let renderer = HtmlRenderer::new();
        let article = Article::new("x", "No abstract");

        let html = generate(
            ArticlePageData {
                article: &article,
                summary: Some("**Key** finding"),
                depth: 0,
                now: Utc::now(),
            },
            &renderer,
        )
        .expect("Should render")
        .into_string();

        assert!(html.contains("href=\"assets/article.css\""));
        assert!(html.contains("Summary"));
        assert!(html.contains("No abstract available"));
    }
}
