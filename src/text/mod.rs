//! Text model: the line buffer, cursor, and viewport.

mod buffer;
mod cursor;
mod viewport;

pub use buffer::TextBuffer;
pub use cursor::{Cursor, Direction};
pub use viewport::Viewport;
