//! Article records and subject categories.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Paper metadata parsed from an arXiv feed entry.
///
/// Two articles are the same paper when their ids match; the saved library
/// deduplicates on `id` alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    #[serde(default, rename = "abstract")]
    pub abstract_text: Option<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub published: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub primary_category: Option<String>,
    #[serde(default)]
    pub pdf_url: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub doi_url: Option<String>,
    #[serde(default)]
    pub journal_ref: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl Article {
    /// Creates an article with only id and title set.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            abstract_text: None,
            authors: Vec::new(),
            published: None,
            updated: None,
            categories: Vec::new(),
            primary_category: None,
            pdf_url: None,
            html_url: None,
            doi_url: None,
            journal_ref: None,
            comment: None,
        }
    }

    /// Short arXiv identifier, such as `2403.01234v2`.
    ///
    /// Falls back to the full id when it is not an arXiv abstract URL.
    pub fn short_id(&self) -> &str {
        self.id
            .rsplit_once("/abs/")
            .map_or(self.id.as_str(), |(_, short)| short)
    }

    /// Subject area of the primary category.
    pub fn category(&self) -> ArticleCategory {
        self.primary_category
            .as_deref()
            .or_else(|| self.categories.first().map(String::as_str))
            .map_or(ArticleCategory::Other, ArticleCategory::from_term)
    }

    /// Authors joined for display, abbreviated past `limit` names.
    pub fn author_line(&self, limit: usize) -> String {
        if self.authors.len() <= limit {
            return self.authors.join(", ");
        }

        format!(
            "{} et al. (+{})",
            self.authors[..limit].join(", "),
            self.authors.len() - limit
        )
    }
}

/// Broad subject area derived from an arXiv category term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArticleCategory {
    ComputerScience,
    Economics,
    ElectricalEngineering,
    Mathematics,
    Statistics,
    Other,
}

impl ArticleCategory {
    /// Classifies a term like `cs.LG` by the prefix before the first dot.
    pub fn from_term(term: &str) -> Self {
        let prefix = term.split('.').next().unwrap_or_default().to_lowercase();
        match prefix.as_str() {
            "cs" => Self::ComputerScience,
            "econ" => Self::Economics,
            "eess" => Self::ElectricalEngineering,
            "math" => Self::Mathematics,
            "stat" => Self::Statistics,
            _ => Self::Other,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::ComputerScience => "Computer Science",
            Self::Economics => "Economics",
            Self::ElectricalEngineering => "Electrical Engineering",
            Self::Mathematics => "Mathematics",
            Self::Statistics => "Statistics",
            Self::Other => "Other",
        }
    }

    /// Phosphor icon class.
    pub fn icon_class(&self) -> &'static str {
        match self {
            Self::ComputerScience => "ph ph-desktop",
            Self::Economics => "ph ph-chart-line-up",
            Self::ElectricalEngineering => "ph-fill ph-lightning",
            Self::Mathematics => "ph ph-function",
            Self::Statistics => "ph-fill ph-chart-bar",
            Self::Other => "ph-fill ph-file-text",
        }
    }

    /// CSS modifier class controlling badge color.
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::ComputerScience => "cat-cs",
            Self::Economics => "cat-econ",
            Self::ElectricalEngineering => "cat-eess",
            Self::Mathematics => "cat-math",
            Self::Statistics => "cat-stat",
            Self::Other => "cat-other",
        }
    }
}
