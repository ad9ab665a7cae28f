//! Row: one line of text with its render form and highlight tags.
//!
//! # Forms
//!
//! ```text
//! chars:     ['a', '\t', 'b']
//! render:    ['a', ' ', ' ', ' ', ' ', ' ', ' ', ' ', 'b']   (tab stop 8)
//! highlight: [Normal; 9]
//! ```
//!
//! `render` and `highlight` are derived. They are rebuilt by
//! [`Row::update`] and must not be read between a mutation of `chars` and
//! the next update. [`LineBuffer`](super::LineBuffer) keeps that promise
//! for every edit it performs.

use crate::syntax::{Highlight, Highlighter, SyntaxProfile};

/// A single line of the edited buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    /// Raw characters as typed or loaded.
    chars: Vec<char>,
    /// Tab-expanded characters for display.
    render: Vec<char>,
    /// One tag per render character.
    highlight: Vec<Highlight>,
    /// Position within the buffer.
    index: usize,
    /// Whether the scan of this row ended inside a block comment.
    open_comment: bool,
    /// The previous row's flag this row was last scanned with.
    scanned_open: bool,
}

impl Row {
    /// Create a row at `index`. The render form is empty until [`Row::update`].
    pub fn new(index: usize, chars: impl IntoIterator<Item = char>) -> Self {
        Self {
            chars: chars.into_iter().collect(),
            index,
            ..Self::default()
        }
    }

    /// Raw characters.
    #[inline]
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Number of raw characters.
    #[inline]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Check if the row has no raw characters.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Tab-expanded characters.
    #[inline]
    pub fn render(&self) -> &[char] {
        &self.render
    }

    /// Highlight tags, parallel to [`Row::render`].
    #[inline]
    pub fn highlight(&self) -> &[Highlight] {
        &self.highlight
    }

    /// Position within the buffer.
    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Whether this row ends inside an unterminated block comment.
    #[inline]
    pub const fn open_comment(&self) -> bool {
        self.open_comment
    }

    /// Open-comment flag of the previous row at the last scan.
    ///
    /// A row whose predecessor now ends differently is stale.
    #[inline]
    pub const fn scanned_open(&self) -> bool {
        self.scanned_open
    }

    /// Raw text as a `String`.
    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    pub(crate) const fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    /// Insert `ch` before raw column `at`, appending if `at` is past the end.
    pub fn insert_char(&mut self, at: usize, ch: char) {
        let at = at.min(self.chars.len());
        self.chars.insert(at, ch);
    }

    /// Remove the raw character at `at`. Out of range is a no-op.
    pub fn remove_char(&mut self, at: usize) -> Option<char> {
        (at < self.chars.len()).then(|| self.chars.remove(at))
    }

    /// Append raw characters.
    pub fn append(&mut self, chars: &[char]) {
        self.chars.extend_from_slice(chars);
    }

    /// Drop everything from raw column `at` on, returning it.
    pub fn split_off(&mut self, at: usize) -> Vec<char> {
        let at = at.min(self.chars.len());
        self.chars.split_off(at)
    }

    /// Rebuild the render form and reset every tag to `Normal`.
    pub fn update(&mut self, tab_stop: usize) {
        let tab_stop = tab_stop.max(1);
        self.render.clear();
        for &c in &self.chars {
            if c == '\t' {
                self.render.push(' ');
                while self.render.len() % tab_stop != 0 {
                    self.render.push(' ');
                }
            } else {
                self.render.push(c);
            }
        }
        self.highlight.clear();
        self.highlight.resize(self.render.len(), Highlight::Normal);
    }

    /// Re-tag the render form, seeded with the previous row's open-comment flag.
    ///
    /// Returns `true` if this row's own open-comment flag changed, in which
    /// case the next row has to be re-tagged as well.
    pub fn rehighlight(&mut self, syntax: Option<&SyntaxProfile>, prev_open_comment: bool) -> bool {
        self.highlight.fill(Highlight::Normal);
        let open = syntax.is_some_and(|syntax| {
            Highlighter::new(syntax).scan(&self.render, &mut self.highlight, prev_open_comment)
        });
        let changed = open != self.open_comment;
        self.open_comment = open;
        self.scanned_open = prev_open_comment;
        changed
    }

    /// Paint `len` render cells from `start` with `tag`, clamped to the row.
    pub fn set_highlight(&mut self, start: usize, len: usize, tag: Highlight) {
        let end = start.saturating_add(len).min(self.highlight.len());
        if start < end {
            self.highlight[start..end].fill(tag);
        }
    }

    /// Render column of raw column `col`.
    pub fn render_column(&self, col: usize, tab_stop: usize) -> usize {
        let tab_stop = tab_stop.max(1);
        self.chars.iter().take(col).fold(0, |rx, &c| {
            if c == '\t' {
                rx + tab_stop - rx % tab_stop
            } else {
                rx + 1
            }
        })
    }

    /// Raw column whose render position first reaches `render_col`.
    ///
    /// Positions inside a tab's expansion map to the tab itself. Targets
    /// past the end map to the row length.
    pub fn raw_column(&self, render_col: usize, tab_stop: usize) -> usize {
        let tab_stop = tab_stop.max(1);
        let mut rx = 0;
        for (cx, &c) in self.chars.iter().enumerate() {
            if c == '\t' {
                rx += tab_stop - rx % tab_stop;
            } else {
                rx += 1;
            }
            if rx > render_col {
                return cx;
            }
        }
        self.chars.len()
    }

    /// Case-insensitive substring search in the render form.
    ///
    /// Returns the render column of the first match. The match spans
    /// `query.chars().count()` render cells.
    pub fn find(&self, query: &str) -> Option<usize> {
        let needle: Vec<char> = query.chars().map(fold_case).collect();
        if needle.is_empty() || needle.len() > self.render.len() {
            return None;
        }
        let haystack: Vec<char> = self.render.iter().map(|&c| fold_case(c)).collect();
        haystack.windows(needle.len()).position(|window| window == needle.as_slice())
    }
}

/// Lowercase a single char, keeping one-to-one alignment with the render form.
fn fold_case(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}
