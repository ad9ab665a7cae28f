//! Editor errors.

use std::io;
use thiserror::Error;

/// Failures that end an editing session.
///
/// Recoverable problems such as a failed save are reported on the message
/// bar instead and never surface here.
#[derive(Debug, Error)]
pub enum EditorError {
    /// The terminal or input device failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input stream ended.
    #[error("input closed")]
    InputClosed,

    /// The terminal cannot fit a text row plus the two bars.
    #[error("terminal too small: {columns}x{rows}")]
    TerminalTooSmall {
        /// Columns reported by the terminal.
        columns: u16,
        /// Rows reported by the terminal.
        rows: u16,
    },
}

impl EditorError {
    /// Map an input read failure, treating end of input as [`EditorError::InputClosed`].
    pub fn from_input(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            Self::InputClosed
        } else {
            Self::Io(err)
        }
    }
}

/// Editor result.
pub type Result<T> = std::result::Result<T, EditorError>;
