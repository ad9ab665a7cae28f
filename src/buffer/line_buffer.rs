//! `LineBuffer`: the ordered rows of the document.
//!
//! Every mutation keeps two invariants before returning:
//! - row indices are exactly `0..len`
//! - every touched row is re-rendered and re-highlighted, including the
//!   cascade through following rows whose block-comment state depends on it

use super::row::Row;
use super::Position;
use crate::syntax::{Highlight, SyntaxProfile};
use std::ops::Range;

/// Default tab stop width.
pub const DEFAULT_TAB_STOP: usize = 8;

/// The edited document.
#[derive(Debug, Clone)]
pub struct LineBuffer {
    rows: Vec<Row>,
    /// Edits since the last load or save.
    dirty: u64,
    tab_stop: usize,
    syntax: Option<SyntaxProfile>,
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_TAB_STOP)
    }
}

impl LineBuffer {
    /// Create an empty buffer.
    pub fn new(tab_stop: usize) -> Self {
        Self {
            rows: Vec::new(),
            dirty: 0,
            tab_stop: tab_stop.max(1),
            syntax: None,
        }
    }

    /// Create a buffer from lines, clean.
    pub fn from_lines<I, S>(tab_stop: usize, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut buffer = Self::new(tab_stop);
        buffer.load_lines(lines);
        buffer
    }

    /// Number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if there are no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows in order.
    #[inline]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Get a row by index.
    #[inline]
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Tab stop width used for render forms.
    #[inline]
    pub const fn tab_stop(&self) -> usize {
        self.tab_stop
    }

    /// Active syntax profile.
    pub const fn syntax(&self) -> Option<&SyntaxProfile> {
        self.syntax.as_ref()
    }

    /// Edits since the last load or save.
    #[inline]
    pub const fn dirty(&self) -> u64 {
        self.dirty
    }

    /// Check for unsaved edits.
    #[inline]
    pub const fn is_dirty(&self) -> bool {
        self.dirty > 0
    }

    /// Forget unsaved edits (after a successful save).
    pub const fn mark_clean(&mut self) {
        self.dirty = 0;
    }

    /// Switch syntax profile and re-highlight every row.
    pub fn set_syntax(&mut self, syntax: Option<SyntaxProfile>) {
        self.syntax = syntax;
        self.highlight_all();
    }

    /// Replace the contents with `lines`. The buffer is clean afterwards.
    pub fn load_lines<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.rows = lines
            .into_iter()
            .enumerate()
            .map(|(index, line)| {
                let mut row = Row::new(index, line.as_ref().chars());
                row.update(self.tab_stop);
                row
            })
            .collect();
        self.highlight_all();
        self.dirty = 0;
    }

    /// Insert a row before `pos`. `pos > len` is a no-op.
    pub fn insert_row(&mut self, pos: usize, chars: impl IntoIterator<Item = char>) {
        if pos > self.rows.len() {
            return;
        }
        self.rows.insert(pos, Row::new(pos, chars));
        self.renumber_from(pos + 1);
        self.update_row(pos);
        self.dirty += 1;
    }

    /// Append a row at the end.
    pub fn append_row(&mut self, chars: impl IntoIterator<Item = char>) {
        self.insert_row(self.rows.len(), chars);
    }

    /// Remove the row at `pos`. Out of range is a silent no-op.
    pub fn remove_row(&mut self, pos: usize) {
        if pos >= self.rows.len() {
            return;
        }
        self.rows.remove(pos);
        self.renumber_from(pos);
        if pos < self.rows.len() {
            self.cascade_from(pos);
        }
        self.dirty += 1;
    }

    /// Cut row `row` at raw column `col`, moving the tail into a new row below.
    pub fn split_row(&mut self, row: usize, col: usize) {
        let Some(current) = self.rows.get_mut(row) else {
            return;
        };
        let tail = current.split_off(col);
        self.update_row(row);
        self.insert_row(row + 1, tail);
    }

    /// Append row `row` to the one above it and remove it.
    ///
    /// Returns the previous row's original length, which is where the
    /// cursor belongs afterwards. `row == 0` or out of range does nothing.
    pub fn merge_row_into_previous(&mut self, row: usize) -> Option<usize> {
        if row == 0 || row >= self.rows.len() {
            return None;
        }
        let moved = std::mem::take(&mut self.rows[row]);
        let prev = &mut self.rows[row - 1];
        let join_at = prev.len();
        prev.append(moved.chars());
        self.rows.remove(row);
        self.renumber_from(row);
        self.update_row(row - 1);
        self.dirty += 1;
        Some(join_at)
    }

    /// Insert a character at `pos`. A row is appended if `pos.row == len`.
    pub fn insert_char(&mut self, pos: Position, ch: char) {
        if pos.row == self.rows.len() {
            self.append_row(std::iter::empty());
        }
        let Some(row) = self.rows.get_mut(pos.row) else {
            return;
        };
        row.insert_char(pos.col, ch);
        self.update_row(pos.row);
        self.dirty += 1;
    }

    /// Remove the character at `pos`. Out of range is a no-op.
    pub fn remove_char(&mut self, pos: Position) -> Option<char> {
        let removed = self.rows.get_mut(pos.row)?.remove_char(pos.col)?;
        self.update_row(pos.row);
        self.dirty += 1;
        Some(removed)
    }

    /// Rebuild one row from scratch, dropping any transient tags.
    pub fn rehighlight(&mut self, row: usize) {
        if row < self.rows.len() {
            self.update_row(row);
        }
    }

    /// Paint a render range of one row with `tag`.
    pub fn highlight_range(&mut self, row: usize, start: usize, len: usize, tag: Highlight) {
        if let Some(row) = self.rows.get_mut(row) {
            row.set_highlight(start, len, tag);
        }
    }

    /// Document text, every row terminated by `\n`.
    pub fn to_text(&self) -> String {
        let mut text = String::with_capacity(self.rows.iter().map(|r| r.len() + 1).sum());
        for row in &self.rows {
            text.extend(row.chars());
            text.push('\n');
        }
        text
    }

    /// Re-render row `index` and re-highlight it plus any dependent rows.
    ///
    /// Returns the range of rows whose tags were recomputed.
    pub fn update_row(&mut self, index: usize) -> Range<usize> {
        match self.rows.get_mut(index) {
            Some(row) => row.update(self.tab_stop),
            None => return index..index,
        }
        self.cascade_from(index)
    }

    /// Highlight `index`, then every following row scanned with a stale
    /// predecessor flag.
    ///
    /// A row is stale when the flag it was last seeded with differs from
    /// what the row above now ends with. This also covers rows that gained
    /// a new predecessor through an insert, split or merge.
    fn cascade_from(&mut self, index: usize) -> Range<usize> {
        let syntax = self.syntax.as_ref();
        let mut current = index;
        while current < self.rows.len() {
            let prev_open = current > 0 && self.rows[current - 1].open_comment();
            self.rows[current].rehighlight(syntax, prev_open);
            let open = self.rows[current].open_comment();
            current += 1;
            match self.rows.get(current) {
                Some(next) if next.scanned_open() != open => {}
                _ => break,
            }
        }
        index..current
    }

    /// Highlight every row in order, without stopping early.
    fn highlight_all(&mut self) {
        let syntax = self.syntax.as_ref();
        let mut prev_open = false;
        for row in &mut self.rows {
            row.rehighlight(syntax, prev_open);
            prev_open = row.open_comment();
        }
    }

    fn renumber_from(&mut self, start: usize) {
        for (index, row) in self.rows.iter_mut().enumerate().skip(start) {
            row.set_index(index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::HighlightFlags;

    fn c_syntax() -> SyntaxProfile {
        SyntaxProfile::new("c")
            .with_single_line_comment("//")
            .with_multi_line_comment("/*", "*/")
            .with_keywords1(["return"])
            .with_flags(HighlightFlags::NUMBERS | HighlightFlags::STRINGS)
    }

    fn buffer(lines: &[&str]) -> LineBuffer {
        let mut buffer = LineBuffer::from_lines(8, lines);
        buffer.set_syntax(Some(c_syntax()));
        buffer
    }

    fn assert_indices(buffer: &LineBuffer) {
        for (i, row) in buffer.rows().iter().enumerate() {
            assert_eq!(row.index(), i);
            assert_eq!(row.render().len(), row.highlight().len());
        }
    }

    fn texts(buffer: &LineBuffer) -> Vec<String> {
        buffer.rows().iter().map(Row::text).collect()
    }

    #[test]
    fn test_load_is_clean() {
        let buffer = buffer(&["a", "b"]);
        assert_eq!(buffer.len(), 2);
        assert!(!buffer.is_dirty());
        assert_indices(&buffer);
    }

    #[test]
    fn test_insert_and_remove_renumber() {
        let mut buffer = buffer(&["a", "c"]);
        buffer.insert_row(1, "b".chars());
        assert_eq!(texts(&buffer), ["a", "b", "c"]);
        assert_indices(&buffer);
        buffer.remove_row(0);
        assert_eq!(texts(&buffer), ["b", "c"]);
        assert_indices(&buffer);
        assert_eq!(buffer.dirty(), 2);
    }

    #[test]
    fn test_out_of_range_row_ops_are_noops() {
        let mut buffer = buffer(&["a"]);
        buffer.remove_row(1);
        buffer.remove_row(7);
        buffer.insert_row(5, "x".chars());
        assert_eq!(texts(&buffer), ["a"]);
        assert_eq!(buffer.dirty(), 0);
        assert_eq!(buffer.remove_char(Position::new(3, 0)), None);
        assert_eq!(buffer.remove_char(Position::new(0, 1)), None);
        assert_eq!(buffer.dirty(), 0);
    }

    #[test]
    fn test_split_row() {
        let mut buffer = buffer(&["hello world", "next"]);
        buffer.split_row(0, 5);
        assert_eq!(texts(&buffer), ["hello", " world", "next"]);
        assert_indices(&buffer);
        assert!(buffer.is_dirty());
    }

    #[test]
    fn test_merge_row_into_previous() {
        let mut buffer = buffer(&["foo", "bar", "baz"]);
        assert_eq!(buffer.merge_row_into_previous(1), Some(3));
        assert_eq!(texts(&buffer), ["foobar", "baz"]);
        assert_indices(&buffer);
        assert_eq!(buffer.merge_row_into_previous(0), None);
        assert_eq!(buffer.merge_row_into_previous(2), None);
    }

    #[test]
    fn test_insert_char_appends_row_at_end() {
        let mut buffer = LineBuffer::new(8);
        buffer.insert_char(Position::new(0, 0), 'x');
        assert_eq!(texts(&buffer), ["x"]);
        buffer.insert_char(Position::new(0, 0), '\t');
        assert_eq!(buffer.row(0).map(|r| r.render().len()), Some(9));
    }

    #[test]
    fn test_to_text_terminates_every_row() {
        let buffer = buffer(&["a", "", "b"]);
        assert_eq!(buffer.to_text(), "a\n\nb\n");
        assert_eq!(LineBuffer::new(8).to_text(), "");
    }

    #[test]
    fn test_multiline_comment_spans_rows() {
        let buffer = buffer(&["/* start", "still open", "end */ return"]);
        let rows = buffer.rows();
        assert!(rows[0].open_comment());
        assert!(rows[1].open_comment());
        assert!(!rows[2].open_comment());
        assert!(rows[0].highlight().iter().all(|&h| h == Highlight::MultiLineComment));
        assert!(rows[1].highlight().iter().all(|&h| h == Highlight::MultiLineComment));
        assert!(rows[2].highlight()[..6].iter().all(|&h| h == Highlight::MultiLineComment));
        assert_eq!(rows[2].highlight()[6], Highlight::Normal);
        assert!(rows[2].highlight()[7..].iter().all(|&h| h == Highlight::Keyword1));
    }

    #[test]
    fn test_closing_comment_cascades_and_stops() {
        let mut buffer = buffer(&["/* start", "still open", "end */ code", "after"]);
        buffer.rows[0].append(&['*', '/']);
        let touched = buffer.update_row(0);

        // Row 2 is rescanned to learn its state is unchanged; row 3 is never visited.
        assert_eq!(touched, 0..3);
        let rows = buffer.rows();
        assert!(!rows[0].open_comment());
        assert!(!rows[1].open_comment());
        assert!(rows[1].highlight().iter().all(|&h| h == Highlight::Normal));
        assert!(!rows[2].open_comment());
    }

    #[test]
    fn test_unchanged_state_does_not_cascade() {
        let mut buffer = buffer(&["/* start", "still open", "end */ code"]);
        buffer.rows[0].append(&['x']);
        assert_eq!(buffer.update_row(0), 0..1);
    }

    #[test]
    fn test_opening_comment_cascades_until_closed() {
        let mut buffer = buffer(&["/", "still open", "end */ code", "after"]);
        buffer.rows[0].append(&['*']);
        assert_eq!(buffer.update_row(0), 0..3);
        assert!(buffer.rows()[..2].iter().all(Row::open_comment));
        assert!(!buffer.rows()[2].open_comment());
        assert!(buffer.rows()[3].highlight().iter().all(|&h| h == Highlight::Normal));
    }

    #[test]
    fn test_inserted_row_inherits_open_comment() {
        let mut buffer = buffer(&["/*", "x"]);
        buffer.insert_row(1, std::iter::empty());
        assert!(buffer.rows().iter().all(Row::open_comment));
        assert_indices(&buffer);
    }

    #[test]
    fn test_removing_opener_uncomments_following_rows() {
        let mut buffer = buffer(&["/*", "x", "y"]);
        assert!(buffer.rows()[2].open_comment());
        buffer.remove_row(0);
        assert!(buffer.rows().iter().all(|r| !r.open_comment()));
        assert!(buffer.rows()[0].highlight().iter().all(|&h| h == Highlight::Normal));
    }

    /// Open-comment flags after a full rescan of the same text.
    fn fresh_flags(buffer: &LineBuffer) -> Vec<bool> {
        let lines = texts(buffer);
        let fresh = self::buffer(&lines.iter().map(String::as_str).collect::<Vec<_>>());
        fresh.rows().iter().map(Row::open_comment).collect()
    }

    fn flags(buffer: &LineBuffer) -> Vec<bool> {
        buffer.rows().iter().map(Row::open_comment).collect()
    }

    #[test]
    fn test_split_inside_closed_comment_rescans_rows_below() {
        let mut buffer = buffer(&["/* a */", "x"]);
        buffer.split_row(0, 3);
        assert_eq!(texts(&buffer), ["/* ", "a */", "x"]);
        assert_eq!(flags(&buffer), [true, false, false]);
        assert_eq!(flags(&buffer), fresh_flags(&buffer));
        assert_eq!(buffer.rows()[2].highlight(), &[Highlight::Normal]);
    }

    #[test]
    fn test_inserted_closer_ends_comment_for_rows_below() {
        let mut buffer = buffer(&["/*", "y"]);
        buffer.insert_row(1, "*/".chars());
        assert_eq!(flags(&buffer), [true, false, false]);
        assert_eq!(flags(&buffer), fresh_flags(&buffer));
        assert_eq!(buffer.rows()[2].highlight(), &[Highlight::Normal]);
    }

    #[test]
    fn test_merge_into_line_comment_rescans_rows_below() {
        let mut buffer = buffer(&["//", "/* a", "z"]);
        assert!(buffer.rows()[2].open_comment());
        assert_eq!(buffer.merge_row_into_previous(1), Some(2));
        assert_eq!(texts(&buffer), ["///* a", "z"]);
        assert_eq!(flags(&buffer), [false, false]);
        assert_eq!(flags(&buffer), fresh_flags(&buffer));
        assert_eq!(buffer.rows()[1].highlight(), &[Highlight::Normal]);
    }

    #[test]
    fn test_rehighlight_clears_transient_tags() {
        let mut buffer = buffer(&["needle"]);
        buffer.highlight_range(0, 0, 6, Highlight::Match);
        assert_eq!(buffer.row(0).map(|r| r.highlight()[0]), Some(Highlight::Match));
        buffer.rehighlight(0);
        assert_eq!(buffer.row(0).map(|r| r.highlight()[0]), Some(Highlight::Normal));
    }

    #[test]
    fn test_set_syntax_rehighlights_everything() {
        let mut buffer = LineBuffer::from_lines(8, ["/*", "x"]);
        assert!(!buffer.rows()[1].open_comment());
        buffer.set_syntax(Some(c_syntax()));
        assert!(buffer.rows()[1].open_comment());
        buffer.set_syntax(None);
        assert!(!buffer.rows()[1].open_comment());
    }
}
