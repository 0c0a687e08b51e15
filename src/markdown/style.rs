//! Font attributes for span styles.
//!
//! Keeps the mapping from [`StyleTag`] to concrete type settings out of the
//! tokenizer so every presentation layer shares one table.

use super::StyleTag;

/// Base font size in points used when no setting overrides it.
pub const DEFAULT_BASE_SIZE: f32 = 13.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFamily {
    Body,
    Monospace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

/// Resolved type settings for one span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub family: FontFamily,
    pub weight: FontWeight,
    pub size: f32,
    /// Whether the text sits on a shaded background.
    pub shaded: bool,
}

impl TextStyle {
    /// Resolves the settings for `tag` relative to `base` size.
    pub fn for_tag(tag: StyleTag, base: f32) -> Self {
        let body = Self {
            family: FontFamily::Body,
            weight: FontWeight::Regular,
            size: base,
            shaded: false,
        };

        match tag {
            StyleTag::Plain => body,
            StyleTag::Bold => Self {
                weight: FontWeight::Bold,
                ..body
            },
            StyleTag::InlineCode => Self {
                family: FontFamily::Monospace,
                size: base - 1.0,
                shaded: true,
                ..body
            },
            StyleTag::CodeBlock => Self {
                family: FontFamily::Monospace,
                ..body
            },
            StyleTag::Heading(level) => Self {
                weight: FontWeight::Bold,
                size: heading_size(base, level),
                ..body
            },
        }
    }

    /// Inline CSS declarations for these settings.
    pub fn css(&self) -> String {
        let family = match self.family {
            FontFamily::Body => "inherit",
            FontFamily::Monospace => "var(--font-mono)",
        };
        let weight = match self.weight {
            FontWeight::Regular => 400,
            FontWeight::Bold => 700,
        };

        format!(
            "font-family: {}; font-weight: {}; font-size: {}px;",
            family, weight, self.size
        )
    }
}

/// Font size of a heading at `level`.
///
/// Level 1 is twice the base size and each further level shrinks by 0.3 of
/// the base. Deep levels never go below the base size.
pub fn heading_size(base: f32, level: usize) -> f32 {
    let steps = level.saturating_sub(1) as f32;
    (base * (2.0 - 0.3 * steps)).max(base)
}
