//! # Quill
//!
//! A small terminal text editor with incremental search and syntax coloring.
//!
//! Quill keeps a whole file in memory as rows of characters, draws it through
//! a raw-mode terminal and re-highlights only what an edit can affect.
//!
//! ## Core Concepts
//!
//! - **Rows with two forms**: raw characters as typed, plus a tab-expanded
//!   render form carrying one highlight tag per cell
//! - **Cascading highlighter**: block-comment state flows from row to row and
//!   re-tagging stops at the first row whose state did not change
//! - **Minimal scrolling**: offsets move only as far as needed to keep the
//!   cursor visible
//! - **Polled input**: a reader thread feeds bytes; the key decoder turns
//!   escape sequences into keys and treats a lone ESC as Escape
//!
//! ## Example
//!
//! ```rust
//! use quill::{Editor, EditorConfig, ScriptedTerminal};
//!
//! // Type "hi", then quit: Ctrl-Q needs confirming once the buffer is dirty.
//! let terminal = ScriptedTerminal::new(80, 24).with_input("hi\x11\x11\x11\x11");
//! let mut editor = Editor::new(terminal, EditorConfig::default())?;
//! editor.run()?;
//! assert_eq!(editor.buffer().to_text(), "hi\n");
//! # Ok::<(), quill::EditorError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod buffer;
pub mod editor;
pub mod file;
pub mod input;
pub mod layout;
pub mod render;
pub mod syntax;
pub mod terminal;

// Re-exports for convenience
pub use buffer::{LineBuffer, Position, Row, DEFAULT_TAB_STOP};
pub use editor::{Editor, EditorConfig, EditorError, Flow, SearchEngine};
pub use input::{ByteReader, ByteSource, Key, KeyDecoder};
pub use layout::Viewport;
pub use render::{Frame, FrameLine, FrameRenderer, Palette, Rgb};
pub use syntax::{Highlight, HighlightFlags, Highlighter, SyntaxProfile, SyntaxTable};
pub use terminal::{CrosstermTerminal, ScriptedTerminal, Terminal};
