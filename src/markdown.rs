//! Markdown subset rendering for abstracts and summaries.
//!
//! The tokenizer in [`renderer`] only knows styles; [`style`] and [`html`]
//! turn those styles into something displayable.

pub mod html;
mod renderer;
mod scanner;
pub mod style;

pub use html::HtmlRenderer;
pub use renderer::{MarkdownRenderer, StyleTag, StyledSpan};
pub use scanner::Scanner;
pub use style::{DEFAULT_BASE_SIZE, TextStyle, heading_size};
