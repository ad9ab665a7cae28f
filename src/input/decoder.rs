//! Key decoder: raw terminal bytes to logical keys.
//!
//! # Sequences
//!
//! ```text
//! ESC                    → Escape (nothing follows within the poll timeout)
//! ESC [ A|B|C|D|H|F      → arrows, Home, End
//! ESC O A|B|C|D|H|F      → same, SS3 form
//! ESC [ 1|7 ~            → Home
//! ESC [ 4|8 ~            → End
//! ESC [ 3 ~              → Delete
//! ESC [ 5 ~  /  ESC [ 6 ~ → PageUp / PageDown
//! ```
//!
//! Anything else that starts with ESC collapses to [`Key::Escape`]. An
//! unrecognised CSI sequence is consumed up to its final byte first.

use super::Key;
use std::io;

/// Source of raw input bytes with a bounded wait.
pub trait ByteSource {
    /// Read one byte, waiting at most the source's poll timeout.
    ///
    /// `Ok(None)` means nothing arrived in time.
    fn try_read_unit(&mut self) -> io::Result<Option<u8>>;
}

/// Decoder state between bytes of one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum State {
    /// Waiting for the first byte of a key.
    #[default]
    Ready,
    /// Saw ESC.
    EscapeSeen,
    /// Saw `ESC [`.
    Csi,
    /// Saw `ESC [` and a digit.
    CsiDigit(u8),
    /// Saw `ESC O`.
    Ss3,
}

/// Turns a byte stream into [`Key`]s.
///
/// One call to [`KeyDecoder::next_key`] consumes exactly the bytes of one
/// key. A byte that ends a malformed UTF-8 sequence without belonging to it
/// is kept and decoded on the next call.
#[derive(Debug, Default)]
pub struct KeyDecoder {
    state: State,
    pending: Option<u8>,
}

impl KeyDecoder {
    /// Create a decoder in the ready state.
    pub const fn new() -> Self {
        Self {
            state: State::Ready,
            pending: None,
        }
    }

    /// Decode the next key.
    ///
    /// Returns `Ok(None)` when no byte arrived within the source's timeout
    /// (or a NUL was read); the caller is expected to poll again.
    pub fn next_key<S: ByteSource + ?Sized>(&mut self, source: &mut S) -> io::Result<Option<Key>> {
        self.state = State::Ready;
        let first = match self.pending.take() {
            Some(byte) => byte,
            None => match source.try_read_unit()? {
                Some(byte) => byte,
                None => return Ok(None),
            },
        };

        let key = match first {
            0 => None,
            0x1b => {
                self.state = State::EscapeSeen;
                let key = self.escape_sequence(source);
                self.state = State::Ready;
                Some(key?)
            }
            127 => Some(Key::Backspace),
            1..=31 => Some(Key::from_control(first)),
            0x80..=0xff => Some(self.utf8(first, source)?),
            _ => Some(Key::Char(char::from(first))),
        };
        if let Some(key) = key {
            tracing::trace!(target: "terminal", ?key, "key_decoded");
        }
        Ok(key)
    }

    /// Run the escape states until a key falls out.
    fn escape_sequence<S: ByteSource + ?Sized>(&mut self, source: &mut S) -> io::Result<Key> {
        loop {
            let Some(byte) = source.try_read_unit()? else {
                return Ok(Key::Escape);
            };
            self.state = match (self.state, byte) {
                (State::EscapeSeen, b'[') => State::Csi,
                (State::EscapeSeen, b'O') => State::Ss3,
                (State::Csi, b'0'..=b'9') => State::CsiDigit(byte),
                (State::Csi, letter) if is_csi_final(letter) => return Ok(final_letter(letter)),
                (State::Ss3, letter) => return Ok(final_letter(letter)),
                (State::CsiDigit(digit), b'~') => return Ok(tilde_key(digit)),
                (State::Csi | State::CsiDigit(_), byte) if !is_csi_final(byte) => {
                    self.skip_csi(source)?;
                    return Ok(Key::Escape);
                }
                _ => return Ok(Key::Escape),
            };
        }
    }

    /// Consume the rest of an unrecognised CSI sequence through its final byte.
    ///
    /// A new ESC is left for the next call.
    fn skip_csi<S: ByteSource + ?Sized>(&mut self, source: &mut S) -> io::Result<()> {
        while let Some(byte) = source.try_read_unit()? {
            if byte == 0x1b {
                self.pending = Some(byte);
                break;
            }
            if is_csi_final(byte) {
                break;
            }
        }
        Ok(())
    }

    /// Assemble a multi-byte UTF-8 character starting with `lead`.
    fn utf8<S: ByteSource + ?Sized>(&mut self, lead: u8, source: &mut S) -> io::Result<Key> {
        let width = match lead {
            0xc2..=0xdf => 2,
            0xe0..=0xef => 3,
            0xf0..=0xf4 => 4,
            _ => return Ok(Key::Char(char::REPLACEMENT_CHARACTER)),
        };
        let mut bytes = [lead, 0, 0, 0];
        for slot in bytes.iter_mut().take(width).skip(1) {
            match source.try_read_unit()? {
                Some(byte) if byte & 0xc0 == 0x80 => *slot = byte,
                Some(byte) => {
                    self.pending = Some(byte);
                    return Ok(Key::Char(char::REPLACEMENT_CHARACTER));
                }
                None => return Ok(Key::Char(char::REPLACEMENT_CHARACTER)),
            }
        }
        let ch = std::str::from_utf8(&bytes[..width])
            .ok()
            .and_then(|s| s.chars().next())
            .unwrap_or(char::REPLACEMENT_CHARACTER);
        Ok(Key::Char(ch))
    }
}

/// CSI sequences end with a byte in `@`..=`~`.
const fn is_csi_final(byte: u8) -> bool {
    matches!(byte, 0x40..=0x7e)
}

/// Final byte of a CSI or SS3 sequence.
const fn final_letter(byte: u8) -> Key {
    match byte {
        b'A' => Key::ArrowUp,
        b'B' => Key::ArrowDown,
        b'C' => Key::ArrowRight,
        b'D' => Key::ArrowLeft,
        b'H' => Key::Home,
        b'F' => Key::End,
        _ => Key::Escape,
    }
}

/// Digit of an `ESC [ n ~` sequence.
const fn tilde_key(digit: u8) -> Key {
    match digit {
        b'1' | b'7' => Key::Home,
        b'3' => Key::Delete,
        b'4' | b'8' => Key::End,
        b'5' => Key::PageUp,
        b'6' => Key::PageDown,
        _ => Key::Escape,
    }
}
