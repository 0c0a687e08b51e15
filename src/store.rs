//! Saved article library and last search results.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use crate::article::Article;

/// Library file name inside the data directory.
pub const LIBRARY_FILE: &str = "library.json";

/// Search results file name inside the data directory.
pub const LAST_SEARCH_FILE: &str = "last_search.json";

/// Persistent collection of saved articles, unique by id.
///
/// Articles keep the order they were saved in. Every mutation rewrites the
/// backing JSON file through a temporary sibling and a rename, so a crash
/// mid-write leaves the previous library intact.
#[derive(Debug)]
pub struct ArticleStore {
    path: PathBuf,
    articles: Vec<Article>,
}

impl ArticleStore {
    /// Opens the library at `path`, starting empty if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let articles = read_json_list(&path)?;
        tracing::debug!(path = %path.display(), count = articles.len(), "opened library");
        Ok(Self { path, articles })
    }

    /// Opens `library.json` inside `data_dir`.
    ///
    /// # Errors
    ///
    /// Returns error if the library file cannot be read or parsed
    pub fn open_in(data_dir: &Path) -> Result<Self> {
        Self::open(data_dir.join(LIBRARY_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Saves `article` unless one with the same id is already stored.
    ///
    /// Returns whether the article was inserted.
    ///
    /// # Errors
    ///
    /// Returns error if the library cannot be written
    pub fn insert(&mut self, article: Article) -> Result<bool> {
        if self.contains(&article.id) {
            tracing::debug!(id = %article.id, "article already saved");
            return Ok(false);
        }

        self.articles.push(article);
        if let Err(e) = self.persist() {
            self.articles.pop();
            return Err(e);
        }
        Ok(true)
    }

    /// Deletes the article with `id`, returning it if it was stored.
    ///
    /// # Errors
    ///
    /// Returns error if the library cannot be written
    pub fn remove(&mut self, id: &str) -> Result<Option<Article>> {
        let Some(index) = self.articles.iter().position(|a| a.id == id) else {
            return Ok(None);
        };

        let removed = self.articles.remove(index);
        if let Err(e) = self.persist() {
            self.articles.insert(index, removed);
            return Err(e);
        }
        Ok(Some(removed))
    }

    pub fn get(&self, id: &str) -> Option<&Article> {
        self.articles.iter().find(|a| a.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// All saved articles in save order.
    pub fn all(&self) -> &[Article] {
        &self.articles
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Resolves a user reference: 1-based position, full id or short id.
    pub fn resolve(&self, reference: &str) -> Option<&Article> {
        resolve_reference(&self.articles, reference)
    }

    fn persist(&self) -> Result<()> {
        write_json_list(&self.path, &self.articles)?;
        tracing::debug!(path = %self.path.display(), count = self.articles.len(), "wrote library");
        Ok(())
    }
}

/// Articles returned by the most recent search.
///
/// Replaced wholesale by each new search, so references such as `3` always
/// point into the latest listing.
#[derive(Debug, Default)]
pub struct SearchResults {
    articles: Vec<Article>,
}

impl SearchResults {
    /// Loads results stored in `data_dir`, empty when none exist yet.
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(data_dir: &Path) -> Result<Self> {
        Ok(Self {
            articles: read_json_list(&data_dir.join(LAST_SEARCH_FILE))?,
        })
    }

    /// Replaces the stored results with `articles`.
    ///
    /// # Errors
    ///
    /// Returns error if the results file cannot be written
    pub fn replace(data_dir: &Path, articles: Vec<Article>) -> Result<Self> {
        write_json_list(&data_dir.join(LAST_SEARCH_FILE), &articles)?;
        Ok(Self { articles })
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn resolve(&self, reference: &str) -> Option<&Article> {
        resolve_reference(&self.articles, reference)
    }
}

fn resolve_reference<'a>(articles: &'a [Article], reference: &str) -> Option<&'a Article> {
    let reference = reference.trim();

    if let Ok(position) = reference.parse::<usize>()
        && position >= 1
        && let Some(article) = articles.get(position - 1)
    {
        return Some(article);
    }

    articles
        .iter()
        .find(|a| a.id == reference)
        .or_else(|| articles.iter().find(|a| a.short_id() == reference))
}

fn read_json_list(path: &Path) -> Result<Vec<Article>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str(&content).with_context(|| format!("Corrupt article file: {}", path.display()))
}

fn write_json_list(path: &Path, articles: &[Article]) -> Result<()> {
    let Some(dir) = path.parent() else {
        bail!("Invalid article file path: {}", path.display());
    };
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    let json = serde_json::to_string_pretty(articles).context("Failed to serialize articles")?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).with_context(|| format!("Failed to write {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("Failed to replace {}", path.display()))?;
    Ok(())
}
