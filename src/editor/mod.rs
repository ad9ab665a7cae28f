//! Editor: the event loop and every command it dispatches.
//!
//! The editor owns the buffer, viewport, search state, key decoder and the
//! terminal. Each turn of [`Editor::run`] paints a frame, waits for one key
//! and applies it; highlighting (including the block-comment cascade) is
//! finished inside the buffer before the next key is read.
//!
//! # Example
//!
//! ```no_run
//! use quill::{CrosstermTerminal, Editor, EditorConfig};
//!
//! let config = EditorConfig::default();
//! let terminal = CrosstermTerminal::new(config.poll_timeout)?;
//! let mut editor = Editor::new(terminal, config)?;
//! editor.open("notes.txt")?;
//! editor.run()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod config;
mod error;
mod search;

pub use config::EditorConfig;
pub use error::{EditorError, Result};
pub use search::{Direction, SearchEngine};

use crate::buffer::{LineBuffer, Position};
use crate::file;
use crate::input::{Key, KeyDecoder};
use crate::layout::Viewport;
use crate::render::{Frame, FrameLine, FrameRenderer};
use crate::syntax::SyntaxTable;
use crate::terminal::{OutputBuffer, Terminal};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Shown when the session starts.
const HELP_MESSAGE: &str = "HELP: Ctrl-S = save | Ctrl-Q = quit | Ctrl-F = find";

/// Rows taken by the status and message bars.
const BAR_ROWS: u16 = 2;

/// What the loop does after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep editing.
    Continue,
    /// Leave the loop.
    Quit,
}

/// Hook run on every key typed into a prompt.
type PromptCallback<T> = fn(&mut Editor<T>, &str, Key);

#[derive(Debug, Clone)]
struct StatusMessage {
    text: String,
    set_at: Instant,
}

/// A single-buffer editing session on a terminal.
pub struct Editor<T: Terminal> {
    config: EditorConfig,
    terminal: T,
    decoder: KeyDecoder,
    renderer: FrameRenderer,
    buffer: LineBuffer,
    syntax_table: SyntaxTable,
    viewport: Viewport,
    cursor: Position,
    search: SearchEngine,
    file_name: Option<PathBuf>,
    status: Option<StatusMessage>,
    /// Confirming Ctrl-Q presses still required.
    quit_remaining: u8,
}

impl<T: Terminal> Editor<T> {
    /// Create an editor with an empty buffer on `terminal`.
    ///
    /// # Errors
    ///
    /// Fails if the terminal size cannot be read or leaves no text row.
    pub fn new(mut terminal: T, config: EditorConfig) -> Result<Self> {
        let (columns, rows) = terminal.screen_size()?;
        let viewport = text_area(columns, rows)?;
        Ok(Self {
            buffer: LineBuffer::new(config.tab_stop),
            renderer: FrameRenderer::new(config.palette),
            quit_remaining: config.quit_times,
            config,
            terminal,
            decoder: KeyDecoder::new(),
            syntax_table: SyntaxTable::builtin(),
            viewport,
            cursor: Position::default(),
            search: SearchEngine::new(),
            file_name: None,
            status: None,
        })
    }

    /// Replace the syntax table used to pick a profile from the file name.
    #[must_use]
    pub fn with_syntax_table(mut self, table: SyntaxTable) -> Self {
        self.syntax_table = table;
        self.select_syntax();
        self
    }

    /// The document.
    pub const fn buffer(&self) -> &LineBuffer {
        &self.buffer
    }

    /// Cursor position in raw coordinates.
    pub const fn cursor(&self) -> Position {
        self.cursor
    }

    /// Scroll state.
    pub const fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// File the buffer is saved to, if named.
    pub fn file_name(&self) -> Option<&Path> {
        self.file_name.as_deref()
    }

    /// Current status message, regardless of age.
    pub fn status_message(&self) -> Option<&str> {
        self.status.as_ref().map(|status| status.text.as_str())
    }

    /// The terminal.
    pub const fn terminal(&self) -> &T {
        &self.terminal
    }

    /// Show `text` on the message bar.
    pub fn set_status_message(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            set_at: Instant::now(),
        });
    }

    /// Load `path` into the buffer and name the session after it.
    ///
    /// A file that does not exist yet gives an empty buffer with that name.
    ///
    /// # Errors
    ///
    /// Fails if the file exists but cannot be read.
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let lines = file::load(path)?.unwrap_or_default();
        self.file_name = Some(path.to_path_buf());
        self.buffer.set_syntax(None);
        self.buffer.load_lines(lines);
        self.select_syntax();
        self.cursor = Position::default();
        self.viewport.set_offsets(0, 0);
        tracing::info!(
            target: "editor",
            file = %path.display(),
            rows = self.buffer.len(),
            syntax = self.buffer.syntax().map(|s| s.name()),
            "opened"
        );
        Ok(())
    }

    /// Run until the user quits.
    ///
    /// # Errors
    ///
    /// Fails if the terminal or input device fails, including when input
    /// ends ([`EditorError::InputClosed`]).
    pub fn run(&mut self) -> Result<()> {
        self.set_status_message(HELP_MESSAGE);
        loop {
            self.refresh_screen()?;
            let key = self.read_key()?;
            if self.process_key(key)? == Flow::Quit {
                break;
            }
        }
        let mut out = OutputBuffer::with_capacity(16);
        out.clear_screen();
        out.cursor_home();
        self.terminal.write_frame(out.as_bytes())?;
        tracing::info!(target: "editor", "quit");
        Ok(())
    }

    /// Apply one key.
    ///
    /// # Errors
    ///
    /// Fails only when a prompt opened by the key hits a terminal failure.
    pub fn process_key(&mut self, key: Key) -> Result<Flow> {
        match key {
            Key::Enter => self.insert_newline(),
            Key::Backspace | Key::Delete | Key::Ctrl('h') => {
                if key == Key::Delete {
                    self.move_cursor(Key::ArrowRight);
                }
                self.delete_char();
            }
            Key::Ctrl('s') => self.save()?,
            Key::Ctrl('f') => self.find()?,
            Key::Ctrl('q') => {
                if self.buffer.is_dirty() && self.quit_remaining > 0 {
                    self.set_status_message(format!(
                        "WARNING!!! File has unsaved changes. Press Ctrl-Q {} more times to quit.",
                        self.quit_remaining
                    ));
                    self.quit_remaining -= 1;
                    return Ok(Flow::Continue);
                }
                return Ok(Flow::Quit);
            }
            Key::PageUp | Key::PageDown => self.page(key),
            Key::Home => self.cursor.col = 0,
            Key::End => {
                if let Some(row) = self.buffer.row(self.cursor.row) {
                    self.cursor.col = row.len();
                }
            }
            Key::ArrowUp | Key::ArrowDown | Key::ArrowLeft | Key::ArrowRight => self.move_cursor(key),
            Key::Char(c) if key.is_insertable() => self.insert_char(c),
            Key::Ctrl(_) | Key::Char(_) | Key::Escape => {}
        }
        self.quit_remaining = self.config.quit_times;
        Ok(Flow::Continue)
    }

    /// Wait for the next key, polling through timeouts.
    fn read_key(&mut self) -> Result<Key> {
        loop {
            match self.decoder.next_key(&mut self.terminal) {
                Ok(Some(key)) => return Ok(key),
                Ok(None) => {}
                Err(e) => return Err(EditorError::from_input(e)),
            }
        }
    }

    /// Scroll and paint the current state.
    fn refresh_screen(&mut self) -> Result<()> {
        let (columns, rows) = self.terminal.screen_size()?;
        let area = text_area(columns, rows)?;
        self.viewport.resize(area.rows(), area.cols());
        self.viewport.scroll(&self.buffer, self.cursor);
        let frame = self.build_frame();
        let bytes = self.renderer.render(&frame);
        self.terminal.write_frame(bytes)?;
        Ok(())
    }

    fn build_frame(&self) -> Frame {
        let view = &self.viewport;
        let lines = (0..view.rows())
            .map(|y| {
                self.buffer.row(view.row_offset() + y).map_or(FrameLine::Filler, |row| {
                    FrameLine::from_row(row, view.col_offset(), view.cols())
                })
            })
            .collect();

        let name = self
            .file_name
            .as_ref()
            .map_or_else(|| "[No Name]".to_string(), |p| p.display().to_string());
        let status_left = format!(
            "{:.20} - {} lines{}",
            name,
            self.buffer.len(),
            if self.buffer.is_dirty() { " (modified)" } else { "" }
        );
        let status_right = format!(
            "{} | {}/{}",
            self.buffer.syntax().map_or("no ft", |s| s.name()),
            self.cursor.row + 1,
            self.buffer.len()
        );
        let message = self
            .status
            .as_ref()
            .filter(|status| status.set_at.elapsed() < self.config.message_timeout)
            .map(|status| status.text.clone())
            .unwrap_or_default();

        Frame {
            columns: view.cols(),
            lines,
            status_left,
            status_right,
            message,
            cursor: view.cursor_on_screen(self.cursor),
        }
    }

    /// Edit a one-line answer on the message bar.
    ///
    /// The message shows `label`, the answer so far, then `hint`. Returns
    /// `None` if the user pressed Escape.
    fn prompt(&mut self, label: &str, hint: &str, callback: Option<PromptCallback<T>>) -> Result<Option<String>> {
        let mut answer = String::new();
        loop {
            self.set_status_message(format!("{label}{answer}{hint}"));
            self.refresh_screen()?;
            let key = self.read_key()?;
            match key {
                Key::Escape => {
                    self.set_status_message("");
                    if let Some(callback) = callback {
                        callback(self, &answer, key);
                    }
                    return Ok(None);
                }
                Key::Enter if !answer.is_empty() => {
                    self.set_status_message("");
                    if let Some(callback) = callback {
                        callback(self, &answer, key);
                    }
                    return Ok(Some(answer));
                }
                Key::Backspace | Key::Delete | Key::Ctrl('h') => {
                    answer.pop();
                }
                Key::Char(c) if !c.is_control() => answer.push(c),
                _ => {}
            }
            if let Some(callback) = callback {
                callback(self, &answer, key);
            }
        }
    }

    fn select_syntax(&mut self) {
        let syntax = self
            .file_name
            .as_ref()
            .and_then(|path| self.syntax_table.resolve(path))
            .cloned();
        self.buffer.set_syntax(syntax);
    }

    fn save(&mut self) -> Result<()> {
        if self.file_name.is_none() {
            let Some(name) = self.prompt("Save as: ", " (ESC to abort)", None)? else {
                self.set_status_message("Save aborted");
                return Ok(());
            };
            self.file_name = Some(PathBuf::from(name));
            self.select_syntax();
        }
        let Some(path) = self.file_name.clone() else {
            return Ok(());
        };

        match file::save(&path, &self.buffer.to_text()) {
            Ok(bytes) => {
                self.buffer.mark_clean();
                self.set_status_message(format!("{bytes} bytes written to disk"));
            }
            Err(e) => {
                tracing::error!(target: "io", file = %path.display(), error = %e, "save_failed");
                self.set_status_message(format!("Can't save! I/O error: {e}"));
            }
        }
        Ok(())
    }

    fn find(&mut self) -> Result<()> {
        let saved_cursor = self.cursor;
        let saved_offsets = (self.viewport.row_offset(), self.viewport.col_offset());

        let query = self.prompt("Search: ", " (Use ESC/Arrows/Enter)", Some(Self::find_step))?;
        if query.is_none() {
            self.cursor = saved_cursor;
            self.viewport.set_offsets(saved_offsets.0, saved_offsets.1);
        }
        Ok(())
    }

    fn find_step(&mut self, query: &str, key: Key) {
        if let Some(found) = self.search.update(&mut self.buffer, query, key) {
            self.cursor = found;
            self.viewport.reveal_at_top(found.row);
        }
    }

    fn insert_char(&mut self, c: char) {
        self.buffer.insert_char(self.cursor, c);
        self.cursor.col += 1;
    }

    fn insert_newline(&mut self) {
        if self.cursor.col == 0 {
            self.buffer.insert_row(self.cursor.row, std::iter::empty());
        } else {
            self.buffer.split_row(self.cursor.row, self.cursor.col);
        }
        self.cursor.row += 1;
        self.cursor.col = 0;
    }

    fn delete_char(&mut self) {
        let Position { row, col } = self.cursor;
        if row >= self.buffer.len() || (row == 0 && col == 0) {
            return;
        }
        if col > 0 {
            self.buffer.remove_char(Position::new(row, col - 1));
            self.cursor.col -= 1;
        } else if let Some(join_at) = self.buffer.merge_row_into_previous(row) {
            self.cursor = Position::new(row - 1, join_at);
        }
    }

    fn move_cursor(&mut self, key: Key) {
        let len = self.buffer.len();
        let row_len = |buffer: &LineBuffer, row: usize| buffer.row(row).map_or(0, |r| r.len());
        match key {
            Key::ArrowUp => self.cursor.row = self.cursor.row.saturating_sub(1),
            Key::ArrowDown => {
                if self.cursor.row + 1 < len {
                    self.cursor.row += 1;
                }
            }
            Key::ArrowLeft => {
                if self.cursor.col > 0 {
                    self.cursor.col -= 1;
                } else if self.cursor.row > 0 {
                    self.cursor.row -= 1;
                    self.cursor.col = row_len(&self.buffer, self.cursor.row);
                }
            }
            Key::ArrowRight => {
                if self.cursor.row < len {
                    if self.cursor.col < row_len(&self.buffer, self.cursor.row) {
                        self.cursor.col += 1;
                    } else if self.cursor.row + 1 < len {
                        self.cursor.row += 1;
                        self.cursor.col = 0;
                    }
                }
            }
            _ => {}
        }
        self.cursor.col = self.cursor.col.min(row_len(&self.buffer, self.cursor.row));
    }

    fn page(&mut self, key: Key) {
        let rows = self.viewport.rows();
        let step = if key == Key::PageUp {
            self.cursor.row = self.viewport.row_offset();
            Key::ArrowUp
        } else {
            self.cursor.row = (self.viewport.row_offset() + rows).saturating_sub(1).min(self.buffer.len());
            Key::ArrowDown
        };
        for _ in 0..rows {
            self.move_cursor(step);
        }
    }
}

impl<T: Terminal + std::fmt::Debug> std::fmt::Debug for Editor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("terminal", &self.terminal)
            .field("file_name", &self.file_name)
            .field("rows", &self.buffer.len())
            .field("cursor", &self.cursor)
            .field("viewport", &self.viewport)
            .finish_non_exhaustive()
    }
}

/// Text area left on a `columns` x `rows` screen once the bars are placed.
fn text_area(columns: u16, rows: u16) -> Result<Viewport> {
    if columns == 0 || rows <= BAR_ROWS {
        return Err(EditorError::TerminalTooSmall { columns, rows });
    }
    Ok(Viewport::new(usize::from(rows - BAR_ROWS), usize::from(columns)))
}
