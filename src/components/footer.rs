//! Page footer component

use maud::{Markup, html};

/// Renders the footer shown on every page
pub fn footer() -> Markup {
    html! {
        footer class="site-footer" {
            "Generated by "
            a href="https://github.com/lemorage/arxshelf" { "arxshelf" }
            " · Paper metadata courtesy of "
            a href="https://arxiv.org" { "arXiv" }
        }
    }
}
