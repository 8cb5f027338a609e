//! # Forge
//!
//! A modal terminal editor that turns YAML specs into runnable code.
//!
//! The editor core is a single-threaded, synchronous loop: read one key,
//! feed it through the modal input state machine, reconcile the cursor and
//! viewport, render a full frame, repeat. Commands (`;compile`, `;run`, ...)
//! talk to external collaborators — a code generator, a subprocess runner,
//! and a credential store — through the traits in [`backend`].
//!
//! ## Core pieces
//!
//! - [`text`]: the line buffer, cursor, and scroll-to-follow viewport
//! - [`input`]: the Insert/Command state machine
//! - [`highlight`]: stateless per-line token classification
//! - [`command`]: typed command parsing and dispatch
//! - [`render`]: cell grid, theme, and single-flush ANSI output
//!
//! ## Example
//!
//! ```rust
//! use forge::session::Session;
//! use forge::input::Key;
//!
//! let mut session = Session::new(80, 23);
//! session.handle_key(Key::char('a'));
//! assert_eq!(session.buffer.line(0), "a");
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

pub mod backend;
pub mod command;
pub mod config;
pub mod error;
pub mod highlight;
pub mod input;
pub mod logging;
pub mod render;
pub mod session;
pub mod terminal;
pub mod text;

// Re-exports for convenience
pub use command::{Command, Dispatcher, Outcome};
pub use config::EditorConfig;
pub use error::{Error, Result};
pub use highlight::{HighlightSpan, Highlighter, TokenClass};
pub use input::{InputStateMachine, Key, KeyCode, Mode};
pub use render::{Renderer, Screen};
pub use session::{Notice, Session, StatusLine};
pub use text::{Cursor, Direction, TextBuffer, Viewport};
