//! Terminal module: the editor's only window onto the outside world.
//!
//! This module contains:
//! - [`Terminal`]: polled input, size query and single-write frame output
//! - [`CrosstermTerminal`]: raw mode on the real terminal
//! - [`ScriptedTerminal`]: in-memory input and captured frames
//! - [`OutputBuffer`]: ANSI byte builder used by the renderer

mod backend;
mod output;
mod scripted;

pub use backend::CrosstermTerminal;
pub use output::OutputBuffer;
pub use scripted::ScriptedTerminal;

use crate::input::ByteSource;
use std::io;

/// A raw-mode terminal.
pub trait Terminal: ByteSource {
    /// Current size as `(columns, rows)`.
    fn screen_size(&mut self) -> io::Result<(u16, u16)>;

    /// Write one complete frame.
    fn write_frame(&mut self, bytes: &[u8]) -> io::Result<()>;
}
