//! Static HTML output for the library, single articles and documents.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use crate::article::Article;
use crate::assets::write_css_assets;
use crate::markdown::HtmlRenderer;
use crate::pages;
use crate::pages::article::ArticlePageData;
use crate::util::sanitize_filename;

/// Writes the whole library as a browsable site.
///
/// Produces `index.html`, one `articles/<n>.html` per article numbered from
/// one in library order, and the bundled stylesheets under `assets/`.
///
/// # Arguments
///
/// * `articles`: Saved articles in library order
/// * `output`: Site root directory, created if missing
/// * `renderer`: Markdown to HTML renderer
/// * `now`: Reference time for relative dates
///
/// # Returns
///
/// Path of the written `index.html`
///
/// # Errors
///
/// Returns error if any page fails to render or any file cannot be written
pub fn export_library(
    articles: &[Article],
    output: &Path,
    renderer: &HtmlRenderer,
    now: DateTime<Utc>,
) -> Result<PathBuf> {
    fs::create_dir_all(output).context("Failed to create output directory")?;
    write_css_assets(&output.join("assets"))?;

    let index_path = output.join("index.html");
    let html = pages::index::generate(articles, now);
    fs::write(&index_path, html.into_string())
        .with_context(|| format!("Failed to write {}", index_path.display()))?;

    let articles_dir = output.join("articles");
    fs::create_dir_all(&articles_dir).context("Failed to create articles directory")?;

    for (index, article) in articles.iter().enumerate() {
        let html = pages::article::generate(
            ArticlePageData { article, summary: None, depth: 1, now },
            renderer,
        )?;
        let path = articles_dir.join(format!("{}.html", index + 1));
        fs::write(&path, html.into_string())
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    tracing::info!(count = articles.len(), output = %output.display(), "exported library");
    Ok(index_path)
}

/// Writes a standalone detail page for one article into `dir`.
///
/// The page is named after the short arXiv id and links its stylesheet
/// from `dir/assets`.
///
/// # Errors
///
/// Returns error if rendering fails or files cannot be written
pub fn write_article_page(
    article: &Article,
    summary: Option<&str>,
    dir: &Path,
    renderer: &HtmlRenderer,
) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    write_css_assets(&dir.join("assets"))?;

    let html = pages::article::generate(
        ArticlePageData { article, summary, depth: 0, now: Utc::now() },
        renderer,
    )?;
    let path = dir.join(format!("{}.html", sanitize_filename(article.short_id())));
    fs::write(&path, html.into_string())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

/// Renders Markdown subset `text` to a standalone page at `path`.
///
/// The stylesheet is written to an `assets` directory next to the page.
///
/// # Errors
///
/// Returns error if rendering fails or files cannot be written
pub fn write_document(
    title: &str,
    text: &str,
    path: &Path,
    renderer: &HtmlRenderer,
) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    write_css_assets(&dir.join("assets"))?;

    let html = pages::document::generate(title, text, renderer)?;
    fs::write(path, html.into_string())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_export_library_layout() {
        // Arrange
        let dir = TempDir::new().expect("Should create temp dir");
        let articles = vec![
            Article::new("http://arxiv.org/abs/1", "One"),
            Article::new("http://arxiv.org/abs/2", "Two"),
        ];

        // Act
        let index = export_library(&articles, dir.path(), &HtmlRenderer::new(), Utc::now())
            .expect("Should export");

        // Assert
        assert_eq!(index, dir.path().join("index.html"));
        assert!(dir.path().join("articles/1.html").exists());
        assert!(dir.path().join("articles/2.html").exists());
        assert!(!dir.path().join("articles/3.html").exists());
        assert!(dir.path().join("assets/index.css").exists());
        assert!(dir.path().join("assets/article.css").exists());
    }

    #[test]
    fn test_write_article_page_named_by_id() {
        let dir = TempDir::new().expect("Should create temp dir");
        let article = Article::new("http://arxiv.org/abs/2401.00001v1", "Paper");

        let path = write_article_page(&article, Some("**done**"), dir.path(), &HtmlRenderer::new())
            .expect("Should write");

        assert_eq!(path, dir.path().join("2401.00001v1.html"));
        let html = fs::read_to_string(path).expect("Should read");
        assert!(html.contains("done</strong>"));
    }

    #[test]
    fn test_write_document() {
        let dir = TempDir::new().expect("Should create temp dir");
        let path = dir.path().join("out/notes.html");

        write_document("Notes", "# Hi", &path, &HtmlRenderer::new()).expect("Should write");

        assert!(path.exists());
        assert!(dir.path().join("out/assets/document.css").exists());
    }
}
