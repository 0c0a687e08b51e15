//! PDF download and hand-off to the system viewer.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;

use crate::article::Article;
use crate::http;
use crate::util::{sanitize_filename, unique_path};

/// Downloads article PDFs.
pub struct PdfService {
    http: Client,
}

impl PdfService {
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built
    pub fn new() -> Result<Self> {
        Ok(Self {
            http: http::client(Duration::from_secs(120))?,
        })
    }

    /// Fetches the PDF bytes of `article`.
    ///
    /// # Errors
    ///
    /// Returns error if the article has no PDF link or the download fails
    pub fn download(&self, article: &Article) -> Result<Vec<u8>> {
        let url = pdf_url(article)?;
        tracing::debug!(%url, "downloading PDF");

        let response = self
            .http
            .get(url)
            .send()
            .with_context(|| format!("Download failed: {}", url))?;
        let bytes = http::check_response(response)
            .with_context(|| format!("Download failed: {}", url))?
            .bytes()
            .with_context(|| format!("Download failed while reading {}", url))?;

        Ok(bytes.to_vec())
    }

    /// Downloads into `dir` under a unique name derived from the title.
    ///
    /// Existing files are never overwritten; a counter is appended instead.
    ///
    /// # Errors
    ///
    /// Returns error if the download fails or the file cannot be written
    pub fn save_to_dir(&self, article: &Article, dir: &Path) -> Result<PathBuf> {
        let bytes = self.download(article)?;
        write_unique(dir, &article.title, &bytes)
    }

    /// Downloads into the temporary directory and opens the system viewer.
    ///
    /// # Errors
    ///
    /// Returns error if the download, the write or launching the viewer fails
    pub fn download_and_open(&self, article: &Article) -> Result<PathBuf> {
        let bytes = self.download(article)?;
        let path = temp_pdf_path(&article.title);
        fs::write(&path, &bytes)
            .with_context(|| format!("Save failed: {}", path.display()))?;

        open::that(&path).with_context(|| format!("Failed to open {}", path.display()))?;
        Ok(path)
    }
}

/// Default downloads directory, or the current directory when the platform
/// has none.
pub fn default_downloads_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Writes `bytes` to a fresh `<title>.pdf` in `dir`.
///
/// # Errors
///
/// Returns error if the directory cannot be created or the file written
pub fn write_unique(dir: &Path, title: &str, bytes: &[u8]) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("Save failed: {}", dir.display()))?;

    let path = unique_path(dir, &sanitize_filename(title), "pdf");
    fs::write(&path, bytes).with_context(|| format!("Save failed: {}", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "saved PDF");
    Ok(path)
}

/// Path for a viewer copy; overwritten on each open of the same title.
fn temp_pdf_path(title: &str) -> PathBuf {
    std::env::temp_dir().join(format!("{}.pdf", sanitize_filename(title)))
}

fn pdf_url(article: &Article) -> Result<&str> {
    article
        .pdf_url
        .as_deref()
        .with_context(|| format!("No PDF link for \"{}\"", article.title))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_unique_never_overwrites() {
        // Arrange
        let dir = TempDir::new().expect("Should create temp dir");

        // Act
        let first = write_unique(dir.path(), "A: Study", b"one").expect("Should write");
        let second = write_unique(dir.path(), "A: Study", b"two").expect("Should write");

        // Assert
        assert_eq!(first, dir.path().join("A Study.pdf"));
        assert_eq!(second, dir.path().join("A Study (1).pdf"));
        assert_eq!(fs::read(&first).expect("Should read"), b"one");
        assert_eq!(fs::read(&second).expect("Should read"), b"two");
    }

    #[test]
    fn test_write_unique_creates_dir() {
        let dir = TempDir::new().expect("Should create temp dir");
        let nested = dir.path().join("papers/2024");

        let path = write_unique(&nested, "Title", b"%PDF").expect("Should write");

        assert!(path.starts_with(&nested));
        assert!(path.exists());
    }

    #[test]
    fn test_download_without_link_fails() {
        let service = PdfService::new().expect("Should build service");
        let article = Article::new("x", "No PDF here");

        let err = service.download(&article).expect_err("Should fail without link");

        assert!(err.to_string().contains("No PDF link"));
    }

    #[test]
    fn test_temp_pdf_path_sanitized() {
        let path = temp_pdf_path("a/b: c");

        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("ab c.pdf"));
    }
}
