//! Article metadata components

use chrono::{DateTime, Utc};
use maud::{Markup, html};

use super::icons::category_badge;
use crate::article::Article;
use crate::util::format_relative;

/// Renders the article header with title, authors and category badges
///
/// # Arguments
///
/// * `article`: Article to describe
///
/// # Returns
///
/// Header markup
pub fn article_header(article: &Article) -> Markup {
    html! {
        header class="article-header" {
            h1 class="article-title" { (article.title) }
            @if !article.authors.is_empty() {
                p class="article-authors" {
                    i class="ph ph-users" {}
                    " " (article.authors.join(", "))
                }
            }
            @if !article.categories.is_empty() {
                div class="article-categories" {
                    @for term in &article.categories {
                        (category_badge(term))
                    }
                }
            }
        }
    }
}

/// Renders publication dates and arXiv identifier
///
/// Dates show as relative time with the exact timestamp in a tooltip.
/// Missing dates are omitted.
///
/// # Arguments
///
/// * `article`: Article to describe
/// * `now`: Reference point for relative dates
///
/// # Returns
///
/// Date list markup
pub fn article_dates(article: &Article, now: DateTime<Utc>) -> Markup {
    html! {
        dl class="article-dates" {
            dt { "arXiv" }
            dd { code { (article.short_id()) } }
            @if let Some(published) = article.published {
                dt { "Published" }
                dd title=(published.to_rfc3339()) { (format_relative(published, now)) }
            }
            @if let Some(updated) = article.updated.filter(|u| Some(*u) != article.published) {
                dt { "Updated" }
                dd title=(updated.to_rfc3339()) { (format_relative(updated, now)) }
            }
        }
    }
}

/// Renders outbound links to abstract page, PDF and DOI
///
/// Links that are absent on the article are skipped.
pub fn article_links(article: &Article) -> Markup {
    html! {
        nav class="article-links" {
            @if let Some(url) = &article.html_url {
                a href=(url) class="article-link" {
                    i class="ph ph-globe" {}
                    " Abstract page"
                }
            }
            @if let Some(url) = &article.pdf_url {
                a href=(url) class="article-link" {
                    i class="ph ph-file-pdf" {}
                    " PDF"
                }
            }
            @if let Some(url) = &article.doi_url {
                a href=(url) class="article-link" {
                    i class="ph ph-link" {}
                    " DOI"
                }
            }
        }
    }
}
