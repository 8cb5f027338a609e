//! Render pipeline: cell grid, ANSI output, theme, and the frame renderer.

mod output;
mod renderer;
mod screen;
mod theme;

pub use output::OutputBuffer;
pub use renderer::Renderer;
pub use screen::{Cell, CellAttrs, Rgb, Screen};
pub use theme::Theme;
