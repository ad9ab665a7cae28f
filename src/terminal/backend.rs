//! The real terminal, driven through crossterm.

use super::Terminal;
use crate::input::{ByteReader, ByteSource};
use crossterm::{
    cursor, execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Write};
use std::time::Duration;

/// Standard input/output in raw mode on the alternate screen.
///
/// Raw mode is entered by [`CrosstermTerminal::new`] and left again when the
/// value is dropped, so the shell gets its terminal back on every exit path
/// that unwinds.
#[derive(Debug)]
pub struct CrosstermTerminal {
    /// Bytes from standard input.
    input: ByteReader,
    /// Whether the alternate screen was entered.
    alternate_screen: bool,
}

impl CrosstermTerminal {
    /// Enter raw mode and the alternate screen, and start reading stdin.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal setup fails.
    pub fn new(poll_timeout: Duration) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = terminal::disable_raw_mode();
            return Err(e);
        }
        let input = match ByteReader::stdin(poll_timeout) {
            Ok(input) => input,
            Err(e) => {
                Self::restore(true);
                return Err(e);
            }
        };
        tracing::debug!(target: "terminal", "raw_mode_entered");
        Ok(Self {
            input,
            alternate_screen: true,
        })
    }

    /// Put the terminal back the way the shell expects it.
    ///
    /// Safe to call more than once; the panic hook calls it too.
    pub fn restore(alternate_screen: bool) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, cursor::Show);
        if alternate_screen {
            let _ = execute!(stdout, LeaveAlternateScreen);
        }
        let _ = terminal::disable_raw_mode();
    }
}

impl ByteSource for CrosstermTerminal {
    fn try_read_unit(&mut self) -> io::Result<Option<u8>> {
        self.input.try_read_unit()
    }
}

impl Terminal for CrosstermTerminal {
    fn screen_size(&mut self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    fn write_frame(&mut self, bytes: &[u8]) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(bytes)?;
        stdout.flush()
    }
}

impl Drop for CrosstermTerminal {
    fn drop(&mut self) {
        self.input.shutdown();
        Self::restore(self.alternate_screen);
        tracing::debug!(target: "terminal", "raw_mode_left");
    }
}
