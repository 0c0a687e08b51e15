//! Category icon rendering

use maud::{Markup, html};

use crate::article::ArticleCategory;

/// Renders the icon box for an article category
///
/// Generates Phosphor icon HTML wrapped in a box whose CSS modifier class
/// sets the category color.
///
/// # Arguments
///
/// * `category`: Subject area of the article
///
/// # Returns
///
/// Icon markup with category color modifier
pub fn category_icon(category: ArticleCategory) -> Markup {
    html! {
        div class=(format!("icon-box {}", category.css_class())) title=(category.label()) {
            i class=(category.icon_class()) {}
        }
    }
}

/// Renders a small badge for a raw category term such as `cs.LG`
pub fn category_badge(term: &str) -> Markup {
    let category = ArticleCategory::from_term(term);

    html! {
        span class=(format!("category-badge {}", category.css_class())) { (term) }
    }
}
