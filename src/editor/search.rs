//! Incremental search across the buffer.

use crate::buffer::{LineBuffer, Position};
use crate::input::Key;
use crate::syntax::Highlight;

/// Which way the next match is looked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Towards the end of the buffer.
    #[default]
    Forward,
    /// Towards the start of the buffer.
    Backward,
}

/// Cyclic, case-insensitive search driven one key at a time.
///
/// The row holding the current match carries transient
/// [`Highlight::Match`] tags; they are cleared on the next update.
#[derive(Debug, Clone, Default)]
pub struct SearchEngine {
    last_match: Option<usize>,
    direction: Direction,
    highlighted: Option<usize>,
}

impl SearchEngine {
    /// Create an engine with no previous match.
    pub const fn new() -> Self {
        Self {
            last_match: None,
            direction: Direction::Forward,
            highlighted: None,
        }
    }

    /// Row of the most recent match.
    pub const fn last_match(&self) -> Option<usize> {
        self.last_match
    }

    /// Current search direction.
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Forget the previous match and search forward again.
    pub const fn reset(&mut self) {
        self.last_match = None;
        self.direction = Direction::Forward;
    }

    /// React to `key` typed while `query` is being edited.
    ///
    /// Returns the cursor position of a new match, or `None` when the
    /// search ended or found nothing.
    pub fn update(&mut self, buffer: &mut LineBuffer, query: &str, key: Key) -> Option<Position> {
        if let Some(row) = self.highlighted.take() {
            buffer.rehighlight(row);
        }

        match key {
            Key::Enter | Key::Escape => {
                self.reset();
                return None;
            }
            Key::ArrowRight | Key::ArrowDown => self.direction = Direction::Forward,
            Key::ArrowLeft | Key::ArrowUp => self.direction = Direction::Backward,
            _ => self.reset(),
        }
        if self.last_match.is_none() {
            self.direction = Direction::Forward;
        }

        let len = buffer.len();
        if query.is_empty() || len == 0 {
            return None;
        }

        let mut current = self.last_match.map(|row| row.min(len - 1));
        for _ in 0..len {
            let next = match (current, self.direction) {
                (None, _) => 0,
                (Some(row), Direction::Forward) => (row + 1) % len,
                (Some(0), Direction::Backward) => len - 1,
                (Some(row), Direction::Backward) => row - 1,
            };
            current = Some(next);

            let Some(row) = buffer.row(next) else {
                continue;
            };
            let Some(render_col) = row.find(query) else {
                continue;
            };
            let col = row.raw_column(render_col, buffer.tab_stop());

            self.last_match = Some(next);
            self.highlighted = Some(next);
            buffer.highlight_range(next, render_col, query.chars().count(), Highlight::Match);
            tracing::debug!(target: "search", row = next, col, direction = ?self.direction, "match");
            return Some(Position::new(next, col));
        }

        tracing::debug!(target: "search", query, "no_match");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer() -> LineBuffer {
        LineBuffer::from_lines(8, ["foo", "bar", "foo"])
    }

    #[test]
    fn test_forward_wraps_around() {
        let mut buffer = buffer();
        let mut search = SearchEngine::new();
        assert_eq!(search.update(&mut buffer, "foo", Key::Char('o')), Some(Position::new(0, 0)));
        assert_eq!(search.update(&mut buffer, "foo", Key::ArrowDown), Some(Position::new(2, 0)));
        assert_eq!(search.update(&mut buffer, "foo", Key::ArrowRight), Some(Position::new(0, 0)));
    }

    #[test]
    fn test_backward_wraps_around() {
        let mut buffer = buffer();
        let mut search = SearchEngine::new();
        assert_eq!(search.update(&mut buffer, "foo", Key::Char('o')), Some(Position::new(0, 0)));
        assert_eq!(search.update(&mut buffer, "foo", Key::ArrowUp), Some(Position::new(2, 0)));
        assert_eq!(search.update(&mut buffer, "foo", Key::ArrowLeft), Some(Position::new(0, 0)));
        assert_eq!(search.direction(), Direction::Backward);
    }

    #[test]
    fn test_backward_without_previous_match_goes_forward() {
        let mut buffer = buffer();
        let mut search = SearchEngine::new();
        assert_eq!(search.update(&mut buffer, "bar", Key::ArrowUp), Some(Position::new(1, 0)));
    }

    #[test]
    fn test_match_tags_are_transient() {
        let mut buffer = buffer();
        let mut search = SearchEngine::new();
        search.update(&mut buffer, "oo", Key::Char('o'));
        assert_eq!(
            buffer.rows()[0].highlight(),
            &[Highlight::Normal, Highlight::Match, Highlight::Match]
        );
        search.update(&mut buffer, "oo", Key::ArrowDown);
        assert!(buffer.rows()[0].highlight().iter().all(|&h| h == Highlight::Normal));
        assert_eq!(buffer.rows()[2].highlight()[1], Highlight::Match);
        assert_eq!(search.update(&mut buffer, "oo", Key::Enter), None);
        assert!(buffer.rows()[2].highlight().iter().all(|&h| h == Highlight::Normal));
        assert_eq!(search.last_match(), None);
    }

    #[test]
    fn test_no_match_and_empty_query() {
        let mut buffer = buffer();
        let mut search = SearchEngine::new();
        assert_eq!(search.update(&mut buffer, "zzz", Key::Char('z')), None);
        assert_eq!(search.update(&mut buffer, "", Key::Backspace), None);
    }

    #[test]
    fn test_match_span_covers_folded_query() {
        let mut buffer = LineBuffer::from_lines(8, ["an İzmir trip"]);
        let mut search = SearchEngine::new();
        assert_eq!(search.update(&mut buffer, "İZMİR", Key::Char('R')), Some(Position::new(0, 3)));
        let tags = buffer.rows()[0].highlight();
        assert!(tags[3..8].iter().all(|&h| h == Highlight::Match));
        assert_eq!(tags[8], Highlight::Normal);
    }

    #[test]
    fn test_match_maps_render_column_to_raw() {
        let mut buffer = LineBuffer::from_lines(8, ["\tNeedle"]);
        let mut search = SearchEngine::new();
        assert_eq!(search.update(&mut buffer, "needle", Key::Char('e')), Some(Position::new(0, 1)));
        assert_eq!(buffer.rows()[0].highlight()[8], Highlight::Match);
    }
}
