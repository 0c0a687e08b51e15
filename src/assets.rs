//! CSS asset bundling

use anyhow::{Context, Result};
use std::{fs, path::Path};

const BASE: &str = include_str!("../assets/base.css");
const LAYOUT: &str = include_str!("../assets/components/layout.css");
const NAV: &str = include_str!("../assets/components/nav.css");
const ARTICLE_LIST: &str = include_str!("../assets/components/article-list.css");

const INDEX_PAGE: &str = include_str!("../assets/page-index.css");
const ARTICLE_PAGE: &str = include_str!("../assets/page-article.css");
const DOCUMENT_PAGE: &str = include_str!("../assets/page-document.css");
const MARKDOWN: &str = include_str!("../assets/markdown.css");

/// Writes all bundled CSS assets to output directory
///
/// # Errors
///
/// Returns error if the directory cannot be created or a file written
pub fn write_css_assets(assets_dir: &Path) -> Result<()> {
    fs::create_dir_all(assets_dir)
        .with_context(|| format!("Failed to create assets directory: {}", assets_dir.display()))?;

    write_bundled(
        assets_dir,
        "index.css",
        &[BASE, LAYOUT, ARTICLE_LIST, INDEX_PAGE],
    )?;
    write_bundled(
        assets_dir,
        "article.css",
        &[BASE, LAYOUT, NAV, ARTICLE_PAGE, MARKDOWN],
    )?;
    write_bundled(
        assets_dir,
        "document.css",
        &[BASE, LAYOUT, DOCUMENT_PAGE, MARKDOWN],
    )?;
    Ok(())
}

fn write_bundled(dir: &Path, name: &str, parts: &[&str]) -> Result<()> {
    let css = parts.join("\n");
    fs::write(dir.join(name), css)
        .with_context(|| format!("Failed to write CSS asset: {}", name))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_css_assets() {
        let dir = TempDir::new().expect("Should create temp dir");
        let assets = dir.path().join("assets");

        write_css_assets(&assets).expect("Should write assets");

        for name in ["index.css", "article.css", "document.css"] {
            assert!(assets.join(name).exists(), "{} missing", name);
        }
        let article_css = fs::read_to_string(assets.join("article.css")).expect("Should read");
        assert!(article_css.contains(".md-inline-code"));
        assert!(article_css.contains("--font-mono"));
    }
}
