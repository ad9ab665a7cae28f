//! Logical keys produced by the decoder.

/// A decoded keystroke.
///
/// Control bytes arrive as [`Key::Ctrl`] with the lowercase letter they are
/// produced by, except for the few that have a dedicated variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A printable character, including `'\t'`.
    Char(char),
    /// Ctrl plus a letter, e.g. `Ctrl('q')` for byte 0x11.
    Ctrl(char),
    /// Enter/Return.
    Enter,
    /// Backspace (byte 127).
    Backspace,
    /// Escape, or an escape sequence that was not recognised.
    Escape,
    /// Up arrow.
    ArrowUp,
    /// Down arrow.
    ArrowDown,
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// Home.
    Home,
    /// End.
    End,
    /// Delete.
    Delete,
    /// Page Up.
    PageUp,
    /// Page Down.
    PageDown,
}

impl Key {
    /// Map a control byte (1..=31) to its key.
    ///
    /// `\r` is Enter, `\t` stays a character, everything else becomes
    /// [`Key::Ctrl`] with the matching letter.
    pub const fn from_control(byte: u8) -> Self {
        match byte {
            b'\r' => Self::Enter,
            b'\t' => Self::Char('\t'),
            0x1b => Self::Escape,
            _ => Self::Ctrl((byte | 0x60) as char),
        }
    }

    /// Whether this is Ctrl plus `letter`.
    #[inline]
    pub const fn is_ctrl(self, letter: char) -> bool {
        matches!(self, Self::Ctrl(c) if c == letter)
    }

    /// Whether this key inserts text when typed into the buffer.
    pub fn is_insertable(self) -> bool {
        matches!(self, Self::Char(c) if c == '\t' || !c.is_control())
    }
}
