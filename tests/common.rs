//! Shared test utilities for integration tests.
//!
//! Provides sample arXiv feeds and articles, and helpers for seeding a
//! temporary data directory.

#![allow(dead_code)]

use anyhow::Result;
use arxshelf::{Article, ArticleStore, SearchResults, parse_feed};
use tempfile::TempDir;

/// Two-entry arXiv API response.
pub const SAMPLE_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom" xmlns:opensearch="http://a9.com/-/spec/opensearch/1.1/" xmlns:arxiv="http://arxiv.org/schemas/atom">
  <title type="html">ArXiv Query: search_query=ti:graph</title>
  <opensearch:totalResults>2</opensearch:totalResults>
  <entry>
    <id>http://arxiv.org/abs/2401.00001v1</id>
    <updated>2024-01-02T10:00:00Z</updated>
    <published>2024-01-01T10:00:00Z</published>
    <title>Graph Networks for
      Everything</title>
    <summary>We study **message passing** with `torch` kernels.</summary>
    <author><name>Ada Lovelace</name></author>
    <author><name>Alan Turing</name></author>
    <link href="http://arxiv.org/abs/2401.00001v1" rel="alternate" type="text/html"/>
    <link title="pdf" href="http://arxiv.org/pdf/2401.00001v1" rel="related" type="application/pdf"/>
    <arxiv:primary_category term="cs.LG" scheme="http://arxiv.org/schemas/atom"/>
    <category term="cs.LG" scheme="http://arxiv.org/schemas/atom"/>
  </entry>
  <entry>
    <id>http://arxiv.org/abs/2401.00002v3</id>
    <published>2024-01-03T10:00:00Z</published>
    <title>Bayesian Things</title>
    <summary>Tooling notes for C# and F# users.</summary>
    <author><name>Thomas Bayes</name></author>
    <category term="stat.ME" scheme="http://arxiv.org/schemas/atom"/>
  </entry>
</feed>"#;

/// Articles of [`SAMPLE_FEED`].
pub fn sample_articles() -> Vec<Article> {
    parse_feed(SAMPLE_FEED)
        .expect("Sample feed should parse")
        .articles
}

/// Creates a data directory whose last search holds [`sample_articles`].
///
/// # Errors
///
/// Returns error if the directory or results file cannot be written
pub fn data_dir_with_search() -> Result<TempDir> {
    let dir = TempDir::new()?;
    SearchResults::replace(dir.path(), sample_articles())?;
    Ok(dir)
}

/// Creates a data directory whose library holds [`sample_articles`].
///
/// # Errors
///
/// Returns error if the directory or library cannot be written
pub fn data_dir_with_library() -> Result<TempDir> {
    let dir = TempDir::new()?;
    let mut store = ArticleStore::open_in(dir.path())?;
    for article in sample_articles() {
        store.insert(article)?;
    }
    Ok(dir)
}
