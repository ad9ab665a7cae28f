//! Buffer module: the document model.
//!
//! This module contains:
//! - [`Row`]: one line with raw chars, tab-expanded render form and tags
//! - [`LineBuffer`]: ordered rows with renumbering, dirty tracking and
//!   highlight propagation
//! - [`Position`]: a cursor location in raw coordinates

mod line_buffer;
mod row;

pub use line_buffer::{LineBuffer, DEFAULT_TAB_STOP};
pub use row::Row;

/// A location in the buffer: row index and raw column.
///
/// `row` may equal the row count, meaning the virtual line past the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    /// Row index.
    pub row: usize,
    /// Raw column within the row.
    pub col: usize,
}

impl Position {
    /// Create a new position.
    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}
