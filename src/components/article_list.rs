//! Article list table component

use maud::{Markup, html};

use super::icons::category_icon;
use crate::article::Article;
use crate::util::truncate_chars;

/// Characters of abstract shown under each row
const PREVIEW_CHARS: usize = 220;

/// Authors listed before collapsing into "et al."
const AUTHOR_LIMIT: usize = 3;

/// One row of the article table
pub struct ArticleRow<'a> {
    pub article: &'a Article,
    /// Link target relative to the page containing the table
    pub href: String,
    /// Abstract with markup removed
    pub preview: Option<String>,
}

/// Renders the article table
///
/// Each row shows position, category icon, title link, author line, a
/// truncated abstract preview, the arXiv id and the publication date.
/// Positions are 1-based so they match the references accepted on the
/// command line.
///
/// # Arguments
///
/// * `rows`: Rows in display order
///
/// # Returns
///
/// Table markup, or an empty state message when there are no rows
pub fn article_table(rows: &[ArticleRow]) -> Markup {
    if rows.is_empty() {
        return html! {
            div class="empty-state" {
                i class="ph ph-books" {}
                p { "No saved articles yet. Run " code { "arxshelf search" } " and " code { "arxshelf save" } "." }
            }
        };
    }

    html! {
        div class="article-table" {
            @for (index, row) in rows.iter().enumerate() {
                (article_row(index + 1, row))
            }
        }
    }
}

fn article_row(position: usize, row: &ArticleRow) -> Markup {
    let article = row.article;

    html! {
        div class="article-row" {
            span class="article-position" { (position) }
            (category_icon(article.category()))
            div class="article-summary" {
                a href=(row.href) class="article-row-title" { (article.title) }
                @if !article.authors.is_empty() {
                    span class="article-row-authors" { (article.author_line(AUTHOR_LIMIT)) }
                }
                @if let Some(preview) = &row.preview {
                    p class="article-row-preview" { (truncate_chars(preview, PREVIEW_CHARS)) }
                }
            }
            div class="article-row-meta" {
                span class="article-row-id" { (article.short_id()) }
                @if let Some(published) = article.published {
                    span class="article-row-date" { (published.format("%Y-%m-%d")) }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_table_message() {
        let html = article_table(&[]).into_string();

        assert!(html.contains("empty-state"));
        assert!(html.contains("No saved articles yet"));
    }

    #[test]
    fn test_rows_numbered_from_one() {
        // Arrange
        let first = Article::new("http://arxiv.org/abs/1", "First");
        let second = Article::new("http://arxiv.org/abs/2", "Second");
        let rows = vec![
            ArticleRow { article: &first, href: "articles/1.html".to_string(), preview: None },
            ArticleRow {
                article: &second,
                href: "articles/2.html".to_string(),
                preview: Some("x".repeat(500)),
            },
        ];

        // Act
        let html = article_table(&rows).into_string();

        // Assert
        assert!(html.contains("<span class=\"article-position\">1</span>"));
        assert!(html.contains("<span class=\"article-position\">2</span>"));
        assert!(html.contains("href=\"articles/2.html\""));
        assert!(html.contains('…'));
        assert!(!html.contains(&"x".repeat(500)));
    }
}
