//! Theme: color assignments for token classes and chrome.

use super::screen::Rgb;
use crate::highlight::TokenClass;

/// Colors used by the renderer.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Unclassified text.
    pub plain: Rgb,
    /// Mapping keys.
    pub key: Rgb,
    /// Comments.
    pub comment: Rgb,
    /// Quoted strings.
    pub string: Rgb,
    /// Structural punctuation.
    pub punct: Rgb,
    /// Line-number gutter.
    pub gutter: Rgb,
    /// Informational status text and titles.
    pub info: Rgb,
    /// Error status text.
    pub error: Rgb,
    /// Mode hints and prompts.
    pub hint: Rgb,
}

impl Theme {
    /// Color for a highlight token class.
    pub const fn for_class(&self, class: TokenClass) -> Rgb {
        match class {
            TokenClass::Plain => self.plain,
            TokenClass::Key => self.key,
            TokenClass::Comment => self.comment,
            TokenClass::Str => self.string,
            TokenClass::Punct => self.punct,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            plain: Rgb::WHITE,
            key: Rgb::new(97, 175, 239),
            comment: Rgb::new(120, 190, 120),
            string: Rgb::new(86, 182, 194),
            punct: Rgb::new(229, 192, 123),
            gutter: Rgb::new(128, 128, 128),
            info: Rgb::new(97, 175, 239),
            error: Rgb::new(224, 108, 117),
            hint: Rgb::new(229, 192, 123),
        }
    }
}
