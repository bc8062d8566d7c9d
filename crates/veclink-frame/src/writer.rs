//! Streaming message writer.

use std::io::{ErrorKind, Write};

use veclink_types::Value;

use crate::error::{FrameError, Result};
use crate::message::encode_message;

/// Writes framed values to any `Write` stream.
///
/// Each `send` emits one complete `header ‖ body` unit and flushes, so a
/// message never interleaves with another on the same writer. Sharing one
/// stream between senders requires exclusive access to the writer.
pub struct MessageWriter<T> {
    inner: T,
    compress: bool,
}

impl<T: Write> MessageWriter<T> {
    /// Create a writer that never compresses.
    pub fn new(inner: T) -> Self {
        Self::with_compression(inner, false)
    }

    /// Create a writer with a compression hint for large payloads.
    pub fn with_compression(inner: T, compress: bool) -> Self {
        Self { inner, compress }
    }

    /// Frame and send one value (blocking).
    pub fn send(&mut self, value: &Value) -> Result<()> {
        let wire = encode_message(value, self.compress)?;

        let mut offset = 0usize;
        while offset < wire.len() {
            match self.inner.write(&wire[offset..]) {
                Ok(0) => {
                    return Err(FrameError::Io(std::io::Error::new(
                        ErrorKind::WriteZero,
                        "stream refused further bytes",
                    )))
                }
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(FrameError::Io(err)),
            }
        }

        self.flush()
    }

    /// Flush the underlying stream.
    pub fn flush(&mut self) -> Result<()> {
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(FrameError::Io(err)),
            }
        }
    }

    /// Whether large payloads are compressed.
    pub fn compress(&self) -> bool {
        self.compress
    }

    /// Change the compression hint for subsequent messages.
    pub fn set_compress(&mut self, compress: bool) {
        self.compress = compress;
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the writer and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }
}
