//! An in-memory terminal for headless runs and tests.

use super::Terminal;
use crate::input::ByteSource;
use std::collections::VecDeque;
use std::io;

/// One scripted input step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Byte(u8),
    Timeout,
}

/// Terminal whose input is a fixed script and whose output is recorded.
///
/// Once the script is exhausted every read fails with
/// [`io::ErrorKind::UnexpectedEof`], which the editor reports as closed input.
#[derive(Debug, Clone)]
pub struct ScriptedTerminal {
    script: VecDeque<Step>,
    columns: u16,
    rows: u16,
    frames: Vec<Vec<u8>>,
}

impl ScriptedTerminal {
    /// Create a terminal of `columns` x `rows` with an empty script.
    pub fn new(columns: u16, rows: u16) -> Self {
        Self {
            script: VecDeque::new(),
            columns,
            rows,
            frames: Vec::new(),
        }
    }

    /// Queue raw input bytes.
    #[must_use]
    pub fn with_input(mut self, bytes: impl AsRef<[u8]>) -> Self {
        self.push_input(bytes);
        self
    }

    /// Queue raw input bytes.
    pub fn push_input(&mut self, bytes: impl AsRef<[u8]>) {
        self.script.extend(bytes.as_ref().iter().map(|&b| Step::Byte(b)));
    }

    /// Queue one read that times out, e.g. to end a lone ESC.
    pub fn push_timeout(&mut self) {
        self.script.push_back(Step::Timeout);
    }

    /// Change the reported size.
    pub const fn resize(&mut self, columns: u16, rows: u16) {
        self.columns = columns;
        self.rows = rows;
    }

    /// Every frame written so far.
    pub fn frames(&self) -> &[Vec<u8>] {
        &self.frames
    }

    /// The most recent frame.
    pub fn last_frame(&self) -> Option<&[u8]> {
        self.frames.last().map(Vec::as_slice)
    }

    /// All frames concatenated, as a terminal would have received them.
    pub fn output(&self) -> Vec<u8> {
        self.frames.concat()
    }
}

impl ByteSource for ScriptedTerminal {
    fn try_read_unit(&mut self) -> io::Result<Option<u8>> {
        match self.script.pop_front() {
            Some(Step::Byte(byte)) => Ok(Some(byte)),
            Some(Step::Timeout) => Ok(None),
            None => Err(io::ErrorKind::UnexpectedEof.into()),
        }
    }
}

impl Terminal for ScriptedTerminal {
    fn screen_size(&mut self) -> io::Result<(u16, u16)> {
        Ok((self.columns, self.rows))
    }

    fn write_frame(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.frames.push(bytes.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_order_and_exhaustion() {
        let mut term = ScriptedTerminal::new(80, 24).with_input("ab");
        term.push_timeout();
        assert_eq!(term.try_read_unit().unwrap(), Some(b'a'));
        assert_eq!(term.try_read_unit().unwrap(), Some(b'b'));
        assert_eq!(term.try_read_unit().unwrap(), None);
        let err = term.try_read_unit().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_frames_are_recorded() {
        let mut term = ScriptedTerminal::new(10, 5);
        assert_eq!(term.screen_size().unwrap(), (10, 5));
        term.write_frame(b"one").unwrap();
        term.write_frame(b"two").unwrap();
        assert_eq!(term.frames().len(), 2);
        assert_eq!(term.last_frame(), Some(&b"two"[..]));
        assert_eq!(term.output(), b"onetwo");
    }
}
