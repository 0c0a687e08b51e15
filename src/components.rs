//! Reusable HTML components for page generation
//!
//! Maud component functions shared by the library index, article and
//! document pages. Components handle one UI element each so page modules
//! only compose them.

pub mod article_list;
pub mod footer;
pub mod icons;
pub mod layout;
pub mod metadata;
pub mod nav;
