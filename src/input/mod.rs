//! Input module: from raw bytes to logical keys.
//!
//! This module contains:
//! - [`ByteSource`]: the polled byte stream every terminal provides
//! - [`KeyDecoder`]: the escape-sequence and UTF-8 state machine
//! - [`ByteReader`]: a reader thread feeding bytes over a channel
//! - [`Key`]: the decoded keystroke

mod decoder;
mod key;
mod reader;

pub use decoder::{ByteSource, KeyDecoder};
pub use key::Key;
pub use reader::ByteReader;
