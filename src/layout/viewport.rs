//! Viewport: the visible window into the buffer.

use crate::buffer::{LineBuffer, Position};

/// Scroll state plus the size of the text area.
///
/// Offsets only ever move by the minimum needed to bring the cursor back
/// into view. Nothing here re-centers.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Viewport {
    /// Text rows on screen.
    rows: usize,
    /// Text columns on screen.
    cols: usize,
    /// First visible buffer row.
    row_offset: usize,
    /// First visible render column.
    col_offset: usize,
    /// Render column of the cursor, as of the last scroll.
    render_col: usize,
}

impl Viewport {
    /// Create a viewport for a text area of `rows` x `cols`.
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            row_offset: 0,
            col_offset: 0,
            render_col: 0,
        }
    }

    /// Text rows on screen.
    #[inline]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Text columns on screen.
    #[inline]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// First visible buffer row.
    #[inline]
    pub const fn row_offset(&self) -> usize {
        self.row_offset
    }

    /// First visible render column.
    #[inline]
    pub const fn col_offset(&self) -> usize {
        self.col_offset
    }

    /// Render column of the cursor as of the last [`Viewport::scroll`].
    #[inline]
    pub const fn render_col(&self) -> usize {
        self.render_col
    }

    /// Change the text area size. Offsets are fixed up on the next scroll.
    pub const fn resize(&mut self, rows: usize, cols: usize) {
        self.rows = rows;
        self.cols = cols;
    }

    /// Overwrite both offsets, e.g. to restore a saved view.
    pub const fn set_offsets(&mut self, row_offset: usize, col_offset: usize) {
        self.row_offset = row_offset;
        self.col_offset = col_offset;
    }

    /// Push the row offset past `row` so the next scroll puts `row` on the
    /// top line of the screen.
    pub fn reveal_at_top(&mut self, row: usize) {
        self.row_offset = row.saturating_add(self.rows.max(1));
    }

    /// Cursor position relative to the top-left of the text area.
    pub const fn cursor_on_screen(&self, cursor: Position) -> (usize, usize) {
        (
            self.render_col.saturating_sub(self.col_offset),
            cursor.row.saturating_sub(self.row_offset),
        )
    }

    /// Recompute the cursor's render column and move offsets minimally to
    /// keep it inside the text area.
    pub fn scroll(&mut self, buffer: &LineBuffer, cursor: Position) {
        self.render_col = buffer
            .row(cursor.row)
            .map_or(0, |row| row.render_column(cursor.col, buffer.tab_stop()));

        let rows = self.rows.max(1);
        let cols = self.cols.max(1);

        if cursor.row < self.row_offset {
            self.row_offset = cursor.row;
        }
        if cursor.row >= self.row_offset + rows {
            self.row_offset = cursor.row + 1 - rows;
        }
        if self.render_col < self.col_offset {
            self.col_offset = self.render_col;
        }
        if self.render_col >= self.col_offset + cols {
            self.col_offset = self.render_col + 1 - cols;
        }
    }
}

impl std::fmt::Debug for Viewport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Viewport({}x{} @ row {}, col {})",
            self.cols, self.rows, self.row_offset, self.col_offset
        )
    }
}
