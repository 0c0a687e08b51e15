//! arXiv search, a saved-paper library and a small Markdown renderer.

pub mod article;
pub mod arxiv;
mod assets;
pub mod components;
mod config;
pub mod export;
mod feed;
pub mod http;
mod markdown;
pub mod pages;
pub mod pdf;
mod store;
pub mod summarize;
mod util;

pub use article::{Article, ArticleCategory};
pub use arxiv::{ArxivClient, SearchField, SearchQuery, SortOrder};
pub use assets::write_css_assets;
pub use config::{Command, Config, SearchArgs, Settings, SettingsArgs};
pub use export::{export_library, write_article_page, write_document};
pub use feed::{Feed, parse_feed};
pub use http::HttpError;
pub use markdown::{
    DEFAULT_BASE_SIZE, HtmlRenderer, MarkdownRenderer, Scanner, StyleTag, StyledSpan, TextStyle,
    heading_size,
};
pub use pdf::PdfService;
pub use store::{ArticleStore, SearchResults};
pub use summarize::{Summarizer, extract_pdf_text};
pub use util::{format_file_size, format_relative, sanitize_filename, truncate_chars};
