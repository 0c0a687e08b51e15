//! Navigation breadcrumb component

use maud::{Markup, html};

/// Renders breadcrumb navigation
///
/// Shows the library as root link followed by the current page label.
/// Used on article and document pages to get back to the index.
///
/// # Arguments
///
/// * `index_path`: Relative path back to index.html
/// * `current`: Label of the page being viewed
///
/// # Returns
///
/// Breadcrumb navigation markup
pub fn breadcrumb(index_path: &str, current: &str) -> Markup {
    html! {
        header {
            div class="breadcrumb" {
                a href=(index_path) class="breadcrumb-link" {
                    i class="ph ph-books" {}
                    " Library"
                }
                span class="breadcrumb-separator" { "/" }
                span class="breadcrumb-current" { (current) }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breadcrumb_links_back() {
        let html = breadcrumb("../index.html", "2403.01234v1").into_string();

        assert!(html.contains("href=\"../index.html\""));
        assert!(html.contains("<span class=\"breadcrumb-current\">2403.01234v1</span>"));
    }
}
