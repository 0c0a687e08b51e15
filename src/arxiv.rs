//! arXiv query API client.

use std::fmt;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use reqwest::blocking::Client;

use crate::feed::{Feed, parse_feed};
use crate::http;

/// Query endpoint of the arXiv API.
pub const API_URL: &str = "http://export.arxiv.org/api/query";

/// Result count used when none is configured.
pub const DEFAULT_MAX_RESULTS: usize = 100;

/// Upper bound the API accepts for one page of results.
pub const MAX_RESULTS_LIMIT: usize = 2000;

/// Metadata field a search is restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SearchField {
    #[default]
    Title,
    Abstract,
    Author,
    All,
}

impl SearchField {
    /// Field prefix in arXiv query syntax.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Title => "ti",
            Self::Abstract => "abs",
            Self::Author => "au",
            Self::All => "all",
        }
    }
}

/// Result ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SortOrder {
    #[default]
    Relevance,
    LastUpdated,
    Submitted,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Self::Relevance => "relevance",
            Self::LastUpdated => "lastUpdatedDate",
            Self::Submitted => "submittedDate",
        };
        f.write_str(value)
    }
}

/// A single search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub terms: String,
    pub field: SearchField,
    pub sort: SortOrder,
    pub max_results: usize,
}

impl SearchQuery {
    /// Title search sorted by relevance with the default result count.
    pub fn new(terms: impl Into<String>) -> Self {
        Self {
            terms: terms.into(),
            field: SearchField::default(),
            sort: SortOrder::default(),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    pub fn field(mut self, field: SearchField) -> Self {
        self.field = field;
        self
    }

    pub fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    pub fn max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Builds the request URL against `base`.
    ///
    /// Terms are percent-encoded with spaces sent as `+`, which arXiv treats
    /// as an implicit AND between words.
    ///
    /// # Errors
    ///
    /// Returns error if the terms are empty or whitespace only, or the
    /// result count is outside `1..=2000`
    pub fn url(&self, base: &str) -> Result<String> {
        let terms = self.terms.split_whitespace().collect::<Vec<_>>();
        if terms.is_empty() {
            bail!("Search query is empty");
        }
        if !(1..=MAX_RESULTS_LIMIT).contains(&self.max_results) {
            bail!(
                "Max results must be between 1 and {}, got {}",
                MAX_RESULTS_LIMIT,
                self.max_results
            );
        }

        let encoded = terms
            .iter()
            .map(|term| urlencoding::encode(term).into_owned())
            .collect::<Vec<_>>()
            .join("+");

        Ok(format!(
            "{}?search_query={}:{}&sortBy={}&max_results={}",
            base,
            self.field.prefix(),
            encoded,
            self.sort,
            self.max_results
        ))
    }
}

/// Blocking client for the arXiv search API.
pub struct ArxivClient {
    http: Client,
    base_url: String,
}

impl ArxivClient {
    /// Creates client against the public API endpoint.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built
    pub fn new() -> Result<Self> {
        Self::with_base_url(API_URL)
    }

    /// Creates client against a custom endpoint, such as a mirror.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            http: http::client(Duration::from_secs(30))?,
            base_url: base_url.into(),
        })
    }

    /// Runs `query` and parses the returned feed.
    ///
    /// # Errors
    ///
    /// Returns error if the query is empty, the request fails, the API
    /// answers with a non-success status, or the feed cannot be parsed
    pub fn search(&self, query: &SearchQuery) -> Result<Feed> {
        let url = query.url(&self.base_url)?;
        tracing::debug!(%url, "querying arXiv");

        let response = self
            .http
            .get(&url)
            .send()
            .with_context(|| format!("Failed to reach arXiv at {}", self.base_url))?;
        let body = http::check_response(response)
            .context("arXiv search request failed")?
            .text()
            .context("Failed to read arXiv response body")?;

        parse_feed(&body).context("Failed to parse arXiv feed")
    }
}
