//! Reader thread: blocking reads off the input device, polled with a timeout.
//!
//! The thread owns the reader and forwards every chunk it reads over a
//! bounded channel. [`ByteReader::try_read_unit`] waits on that channel for at
//! most the poll timeout, which is what gives the decoder its "lone ESC"
//! detection.

use super::ByteSource;
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError};
use std::collections::VecDeque;
use std::io::{self, Read};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Chunks that may be queued before the reader thread blocks.
const CHANNEL_CAPACITY: usize = 64;

/// Messages from the reader thread.
#[derive(Debug)]
enum ReadEvent {
    /// Bytes read from the device.
    Bytes(Vec<u8>),
    /// The device reported end of input.
    Closed,
    /// A read failed.
    Error(io::Error),
}

/// Byte source backed by a reader thread.
pub struct ByteReader {
    /// Chunks from the reader thread.
    receiver: Receiver<ReadEvent>,
    /// Bytes received but not yet handed out.
    queued: VecDeque<u8>,
    /// How long one poll waits.
    poll_timeout: Duration,
    /// Set once the device is closed.
    closed: bool,
    /// Handle to the reader thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
}

impl ByteReader {
    /// Spawn a reader thread over standard input.
    pub fn stdin(poll_timeout: Duration) -> io::Result<Self> {
        Self::spawn(io::stdin(), poll_timeout)
    }

    /// Spawn a reader thread over any reader.
    pub fn spawn<R>(reader: R, poll_timeout: Duration) -> io::Result<Self>
    where
        R: Read + Send + 'static,
    {
        let (sender, receiver) = bounded(CHANNEL_CAPACITY);
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = Arc::clone(&shutdown);

        let handle = thread::Builder::new()
            .name("quill-input".to_string())
            .spawn(move || Self::run_loop(reader, &sender, &shutdown_clone))?;

        Ok(Self {
            receiver,
            queued: VecDeque::new(),
            poll_timeout,
            closed: false,
            handle: Some(handle),
            shutdown,
        })
    }

    /// Signal the reader thread to stop after its current read.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Main read loop.
    fn run_loop<R: Read>(
        mut reader: R,
        sender: &crossbeam_channel::Sender<ReadEvent>,
        shutdown: &AtomicBool,
    ) {
        let mut chunk = [0u8; 256];
        loop {
            if shutdown.load(Ordering::Relaxed) {
                break;
            }
            let event = match reader.read(&mut chunk) {
                Ok(0) => ReadEvent::Closed,
                Ok(n) => ReadEvent::Bytes(chunk[..n].to_vec()),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => ReadEvent::Error(e),
            };
            let last = !matches!(event, ReadEvent::Bytes(_));
            if sender.send(event).is_err() || last {
                // Receiver dropped or device gone
                break;
            }
        }
        tracing::debug!(target: "terminal", "reader_thread_exit");
    }
}

impl ByteSource for ByteReader {
    fn try_read_unit(&mut self) -> io::Result<Option<u8>> {
        if let Some(byte) = self.queued.pop_front() {
            return Ok(Some(byte));
        }
        if self.closed {
            return Err(io::ErrorKind::UnexpectedEof.into());
        }
        match self.receiver.recv_timeout(self.poll_timeout) {
            Ok(ReadEvent::Bytes(bytes)) => {
                self.queued.extend(bytes);
                Ok(self.queued.pop_front())
            }
            Ok(ReadEvent::Error(e)) => {
                self.closed = true;
                Err(e)
            }
            Ok(ReadEvent::Closed) | Err(RecvTimeoutError::Disconnected) => {
                self.closed = true;
                Err(io::ErrorKind::UnexpectedEof.into())
            }
            Err(RecvTimeoutError::Timeout) => Ok(None),
        }
    }
}

impl Drop for ByteReader {
    fn drop(&mut self) {
        self.shutdown();
        // A thread parked in a blocking read cannot be woken; only join one
        // that has already finished.
        if let Some(handle) = self.handle.take() {
            if handle.is_finished() {
                let _ = handle.join();
            }
        }
    }
}

impl std::fmt::Debug for ByteReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ByteReader")
            .field("queued", &self.queued.len())
            .field("poll_timeout", &self.poll_timeout)
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Key, KeyDecoder};

    fn next_byte(reader: &mut ByteReader) -> io::Result<Option<u8>> {
        // The thread may not have delivered yet; a few polls are plenty.
        for _ in 0..50 {
            match reader.try_read_unit() {
                Ok(None) => continue,
                other => return other,
            }
        }
        Ok(None)
    }

    #[test]
    fn test_bytes_arrive_in_order() {
        let mut reader = ByteReader::spawn(io::Cursor::new(b"abc".to_vec()), Duration::from_millis(20)).unwrap();
        assert_eq!(next_byte(&mut reader).unwrap(), Some(b'a'));
        assert_eq!(next_byte(&mut reader).unwrap(), Some(b'b'));
        assert_eq!(next_byte(&mut reader).unwrap(), Some(b'c'));
    }

    #[test]
    fn test_end_of_input_is_an_error() {
        let mut reader = ByteReader::spawn(io::empty(), Duration::from_millis(20)).unwrap();
        let err = next_byte(&mut reader).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
        assert!(reader.try_read_unit().is_err(), "stays closed");
    }

    #[test]
    fn test_decoder_over_reader_thread() {
        let mut reader =
            ByteReader::spawn(io::Cursor::new(b"\x1b[B".to_vec()), Duration::from_millis(20)).unwrap();
        let mut decoder = KeyDecoder::new();
        let mut key = None;
        for _ in 0..50 {
            key = decoder.next_key(&mut reader).unwrap();
            if key.is_some() {
                break;
            }
        }
        assert_eq!(key, Some(Key::ArrowDown));
    }
}
