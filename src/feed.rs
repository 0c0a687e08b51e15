//! arXiv Atom feed parsing.

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use uuid::Uuid;

use crate::article::Article;

/// Parsed search response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Feed {
    /// Total matches reported by the API, across all pages.
    pub total_results: Option<u64>,
    pub articles: Vec<Article>,
}

#[derive(Debug, Default)]
struct Link {
    href: String,
    rel: Option<String>,
    title: Option<String>,
}

/// Raw fields collected while inside an `<entry>` element.
#[derive(Debug, Default)]
struct EntryFields {
    id: Option<String>,
    title: Option<String>,
    summary: Option<String>,
    authors: Vec<String>,
    published: Option<String>,
    updated: Option<String>,
    categories: Vec<String>,
    primary_category: Option<String>,
    links: Vec<Link>,
    journal_ref: Option<String>,
    comment: Option<String>,
    doi: Option<String>,
}

impl EntryFields {
    /// Records attribute-only data of `link`, `category` and
    /// `primary_category` elements.
    fn absorb_attributes(&mut self, element: &BytesStart<'_>) -> Result<()> {
        match element.local_name().as_ref() {
            b"link" => {
                let Some(href) = attribute(element, "href")? else {
                    return Ok(());
                };
                self.links.push(Link {
                    href,
                    rel: attribute(element, "rel")?,
                    title: attribute(element, "title")?,
                });
            }
            b"category" => {
                if let Some(term) = attribute(element, "term")? {
                    self.categories.push(term);
                }
            }
            b"primary_category" => {
                self.primary_category = attribute(element, "term")?;
            }
            _ => {}
        }
        Ok(())
    }

    /// Stores text content of a closed element whose parent is `parent`.
    fn absorb_text(&mut self, name: &[u8], parent: Option<&[u8]>, text: String) {
        match (name, parent) {
            (b"name", Some(b"author")) => self.authors.push(text),
            (_, Some(b"entry")) => {
                let slot = match name {
                    b"id" => &mut self.id,
                    b"title" => &mut self.title,
                    b"summary" => &mut self.summary,
                    b"published" => &mut self.published,
                    b"updated" => &mut self.updated,
                    b"journal_ref" => &mut self.journal_ref,
                    b"comment" => &mut self.comment,
                    b"doi" => &mut self.doi,
                    _ => return,
                };
                *slot = Some(text);
            }
            _ => {}
        }
    }

    fn into_article(self) -> Result<Article> {
        let id = non_empty(self.id);

        if let Some(id) = &id
            && id.contains("/api/errors")
        {
            bail!(
                "arXiv API error: {}",
                non_empty(self.summary).unwrap_or_else(|| "unknown error".to_string())
            );
        }

        let pdf_url = find_link(&self.links, |l| l.title.as_deref() == Some("pdf"));
        let html_url = find_link(&self.links, |l| l.rel.as_deref() == Some("alternate"));
        let doi_url = find_link(&self.links, |l| l.title.as_deref() == Some("doi"))
            .or_else(|| non_empty(self.doi).map(|doi| format!("https://doi.org/{}", doi)));

        let primary_category = self
            .primary_category
            .or_else(|| self.categories.first().cloned());

        Ok(Article {
            id: id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            title: non_empty(self.title.map(|t| collapse_whitespace(&t)))
                .unwrap_or_else(|| "Untitled".to_string()),
            abstract_text: non_empty(self.summary.map(|s| s.trim().to_string())),
            authors: self.authors,
            published: self.published.as_deref().and_then(parse_timestamp),
            updated: self.updated.as_deref().and_then(parse_timestamp),
            categories: self.categories,
            primary_category,
            pdf_url,
            html_url,
            doi_url,
            journal_ref: non_empty(self.journal_ref.map(|j| collapse_whitespace(&j))),
            comment: non_empty(self.comment.map(|c| collapse_whitespace(&c))),
        })
    }
}

/// Parses an arXiv API Atom response.
///
/// Entries become [`Article`]s in feed order. Entries without an id get a
/// random UUID so they can still be saved. Unparseable timestamps are
/// dropped with a warning rather than failing the whole feed.
///
/// # Errors
///
/// Returns error if the XML is malformed or the feed is an arXiv error
/// response (an entry whose id points at `/api/errors`)
pub fn parse_feed(xml: &str) -> Result<Feed> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut feed = Feed::default();
    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut entry: Option<EntryFields> = None;
    let mut text = String::new();

    loop {
        let event = reader.read_event().with_context(|| {
            format!(
                "Malformed Atom feed at byte {}",
                reader.buffer_position()
            )
        })?;

        match event {
            Event::Start(element) => {
                let name = element.local_name().as_ref().to_vec();
                if name == b"entry" {
                    entry = Some(EntryFields::default());
                } else if let Some(fields) = entry.as_mut() {
                    fields.absorb_attributes(&element)?;
                }
                stack.push(name);
                text.clear();
            }
            Event::Empty(element) => {
                if let Some(fields) = entry.as_mut() {
                    fields.absorb_attributes(&element)?;
                }
            }
            Event::Text(content) => {
                let content = content.unescape().context("Invalid text in Atom feed")?;
                text.push_str(&content);
            }
            Event::CData(content) => {
                text.push_str(&String::from_utf8_lossy(&content));
            }
            Event::End(_) => {
                let name = stack.pop().unwrap_or_default();
                let parent = stack.last().map(Vec::as_slice);

                if name == b"entry" {
                    if let Some(fields) = entry.take() {
                        feed.articles.push(fields.into_article()?);
                    }
                } else if let Some(fields) = entry.as_mut() {
                    fields.absorb_text(&name, parent, std::mem::take(&mut text));
                } else if name == b"totalResults" {
                    feed.total_results = text.trim().parse().ok();
                }
                text.clear();
            }
            Event::Eof => break,
            _ => {}
        }
    }

    tracing::debug!(
        entries = feed.articles.len(),
        total = ?feed.total_results,
        "parsed arXiv feed"
    );

    Ok(feed)
}

fn find_link(links: &[Link], pred: impl Fn(&Link) -> bool) -> Option<String> {
    links.iter().find(|link| pred(link)).map(|link| link.href.clone())
}

fn attribute(element: &BytesStart<'_>, name: &str) -> Result<Option<String>> {
    let Some(attr) = element
        .try_get_attribute(name)
        .with_context(|| format!("Invalid attribute {} in Atom feed", name))?
    else {
        return Ok(None);
    };

    let value = attr
        .unescape_value()
        .with_context(|| format!("Invalid value for attribute {}", name))?;
    Ok(Some(value.into_owned()))
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(value.trim()) {
        Ok(time) => Some(time.with_timezone(&Utc)),
        Err(e) => {
            tracing::warn!(value, %e, "ignoring unparseable feed timestamp");
            None
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Joins whitespace runs, including the line wrapping arXiv puts in titles,
/// into single spaces.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENTRY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom" xmlns:opensearch="http://a9.com/-/spec/opensearch/1.1/" xmlns:arxiv="http://arxiv.org/schemas/atom">
  <title type="html">ArXiv Query: search_query=ti:attention</title>
  <id>http://arxiv.org/api/abc</id>
  <opensearch:totalResults>4213</opensearch:totalResults>
  <entry>
    <id>http://arxiv.org/abs/1706.03762v7</id>
    <updated>2023-08-02T00:41:18Z</updated>
    <published>2017-06-12T17:57:34Z</published>
    <title>Attention Is All
      You Need</title>
    <summary>  The dominant sequence transduction models &amp; more.
    </summary>
    <author><name>Ashish Vaswani</name></author>
    <author><name>Noam Shazeer</name><arxiv:affiliation>Google</arxiv:affiliation></author>
    <arxiv:comment>15 pages, 5 figures</arxiv:comment>
    <arxiv:journal_ref>NeurIPS 2017</arxiv:journal_ref>
    <link href="http://arxiv.org/abs/1706.03762v7" rel="alternate" type="text/html"/>
    <link title="pdf" href="http://arxiv.org/pdf/1706.03762v7" rel="related" type="application/pdf"/>
    <arxiv:primary_category term="cs.CL" scheme="http://arxiv.org/schemas/atom"/>
    <category term="cs.CL" scheme="http://arxiv.org/schemas/atom"/>
    <category term="cs.LG" scheme="http://arxiv.org/schemas/atom"/>
  </entry>
</feed>"#;

    #[test]
    fn test_parse_entry_fields() {
        // Arrange & Act
        let feed = parse_feed(ENTRY).expect("Should parse feed");

        // Assert
        assert_eq!(feed.total_results, Some(4213));
        assert_eq!(feed.articles.len(), 1);

        let article = &feed.articles[0];
        assert_eq!(article.id, "http://arxiv.org/abs/1706.03762v7");
        assert_eq!(article.title, "Attention Is All You Need");
        assert_eq!(
            article.abstract_text.as_deref(),
            Some("The dominant sequence transduction models & more.")
        );
        assert_eq!(article.authors, vec!["Ashish Vaswani", "Noam Shazeer"]);
        assert_eq!(article.categories, vec!["cs.CL", "cs.LG"]);
        assert_eq!(article.primary_category.as_deref(), Some("cs.CL"));
        assert_eq!(
            article.pdf_url.as_deref(),
            Some("http://arxiv.org/pdf/1706.03762v7")
        );
        assert_eq!(
            article.html_url.as_deref(),
            Some("http://arxiv.org/abs/1706.03762v7")
        );
        assert_eq!(article.doi_url, None);
        assert_eq!(article.journal_ref.as_deref(), Some("NeurIPS 2017"));
        assert_eq!(article.comment.as_deref(), Some("15 pages, 5 figures"));
        assert_eq!(
            article.published.map(|p| p.to_rfc3339()),
            Some("2017-06-12T17:57:34+00:00".to_string())
        );
    }

    #[test]
    fn test_feed_title_not_taken_as_entry_title() {
        let feed = parse_feed(ENTRY).expect("Should parse feed");

        assert!(!feed.articles[0].title.contains("ArXiv Query"));
    }

    #[test]
    fn test_parse_entry_defaults() {
        // Arrange
        let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom"><entry><category term="math.AG"/></entry></feed>"#;

        // Act
        let feed = parse_feed(xml).expect("Should parse feed");

        // Assert
        let article = &feed.articles[0];
        assert_eq!(article.title, "Untitled");
        assert!(Uuid::parse_str(&article.id).is_ok(), "id: {}", article.id);
        assert_eq!(article.abstract_text, None);
        assert_eq!(article.primary_category.as_deref(), Some("math.AG"));
        assert_eq!(feed.total_results, None);
    }

    #[test]
    fn test_parse_doi_element() {
        let xml = r#"<feed><entry><id>x</id><arxiv:doi xmlns:arxiv="http://arxiv.org/schemas/atom">10.1000/xyz</arxiv:doi></entry></feed>"#;

        let feed = parse_feed(xml).expect("Should parse feed");

        assert_eq!(
            feed.articles[0].doi_url.as_deref(),
            Some("https://doi.org/10.1000/xyz")
        );
    }

    #[test]
    fn test_parse_bad_timestamp_is_dropped() {
        let xml = r#"<feed><entry><id>x</id><published>yesterday</published></entry></feed>"#;

        let feed = parse_feed(xml).expect("Should parse feed");

        assert_eq!(feed.articles[0].published, None);
    }

    #[test]
    fn test_parse_api_error_entry() {
        // Arrange
        let xml = r#"<feed><entry>
            <id>http://arxiv.org/api/errors#incorrect_id_format_for_1234</id>
            <title>Error</title>
            <summary>incorrect id format for 1234</summary>
        </entry></feed>"#;

        // Act
        let result = parse_feed(xml);

        // Assert
        let err = result.expect_err("Error feed should fail");
        assert!(format!("{:#}", err).contains("incorrect id format"));
    }

    #[test]
    fn test_parse_empty_feed() {
        let feed = parse_feed("<feed></feed>").expect("Should parse feed");

        assert!(feed.articles.is_empty());
    }

    #[test]
    fn test_parse_malformed_xml() {
        let result = parse_feed("<feed><entry><id>x</entry></feed>");

        assert!(result.is_err());
    }
}
