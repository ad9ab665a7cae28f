//! Frame: everything one screen refresh shows, with no terminal details.

use crate::buffer::Row;
use crate::syntax::Highlight;

/// A stretch of render text sharing one highlight tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    /// The characters, possibly including control characters.
    pub text: String,
    /// Their common tag.
    pub highlight: Highlight,
}

/// One text-area line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameLine {
    /// Visible slice of a buffer row.
    Text(Vec<Run>),
    /// Past the end of the buffer, drawn as `~`.
    Filler,
}

impl FrameLine {
    /// The part of `row` from render column `col_offset`, at most `width`
    /// columns, grouped into runs.
    pub fn from_row(row: &Row, col_offset: usize, width: usize) -> Self {
        let start = col_offset.min(row.render().len());
        let end = start.saturating_add(width).min(row.render().len());
        let mut runs: Vec<Run> = Vec::new();
        for (&ch, &tag) in row.render()[start..end].iter().zip(&row.highlight()[start..end]) {
            match runs.last_mut() {
                Some(run) if run.highlight == tag => run.text.push(ch),
                _ => runs.push(Run {
                    text: ch.to_string(),
                    highlight: tag,
                }),
            }
        }
        Self::Text(runs)
    }

    /// Plain text of the line, as it would read on screen.
    pub fn text(&self) -> String {
        match self {
            Self::Text(runs) => runs.iter().map(|run| run.text.as_str()).collect(),
            Self::Filler => "~".to_string(),
        }
    }
}

/// A complete screen: text lines plus the two bars.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frame {
    /// Screen width in columns.
    pub columns: usize,
    /// One entry per text-area row.
    pub lines: Vec<FrameLine>,
    /// Left half of the status bar.
    pub status_left: String,
    /// Right half of the status bar, kept flush right when it fits.
    pub status_right: String,
    /// Message bar text; empty when nothing is shown.
    pub message: String,
    /// Cursor position on screen as `(x, y)`.
    pub cursor: (usize, usize),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::LineBuffer;
    use crate::syntax::SyntaxTable;

    #[test]
    fn test_runs_group_by_tag() {
        let mut buffer = LineBuffer::from_lines(8, ["int x = 42;"]);
        buffer.set_syntax(SyntaxTable::builtin().resolve("a.c").cloned());
        let line = FrameLine::from_row(&buffer.rows()[0], 0, 80);
        let FrameLine::Text(runs) = line else {
            panic!("expected text");
        };
        let tags: Vec<_> = runs.iter().map(|run| (run.text.as_str(), run.highlight)).collect();
        assert_eq!(
            tags,
            vec![
                ("int", Highlight::Keyword2),
                (" x = ", Highlight::Normal),
                ("42", Highlight::Number),
                (";", Highlight::Normal),
            ]
        );
    }

    #[test]
    fn test_slice_is_clipped() {
        let buffer = LineBuffer::from_lines(8, ["abcdefgh"]);
        let row = &buffer.rows()[0];
        assert_eq!(FrameLine::from_row(row, 2, 3).text(), "cde");
        assert_eq!(FrameLine::from_row(row, 6, 10).text(), "gh");
        assert_eq!(FrameLine::from_row(row, 20, 10).text(), "");
        assert_eq!(FrameLine::Filler.text(), "~");
    }
}
