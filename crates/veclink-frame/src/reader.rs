//! Streaming message reader.

use std::io::{ErrorKind, Read};

use veclink_types::Value;

use crate::error::{FrameError, Result};
use crate::header::{Header, HEADER_SIZE};
use crate::message::decompress_lz4;

/// Reads complete framed values from any `Read` stream.
///
/// Callers get a whole decoded value, [`FrameError::EndOfStream`] on a clean
/// close at a message boundary, or an error; never a partial value.
pub struct MessageReader<T> {
    inner: T,
}

impl<T: Read> MessageReader<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Read the next complete value (blocking).
    ///
    /// A close before the first header byte returns `EndOfStream`; a close
    /// anywhere after that is `ShortRead`.
    pub fn read_message(&mut self) -> Result<Value> {
        let mut header_bytes = [0u8; HEADER_SIZE];
        self.fill(&mut header_bytes, true)?;
        let header = Header::decode(&mut &header_bytes[..])?;

        if header.features.is_unsupported() {
            return Err(FrameError::PeerUnsupported);
        }

        let body = if header.len > 0 {
            let mut body = vec![0u8; header.len as usize];
            self.fill(&mut body, false)?;
            body
        } else {
            // Legacy allowance: a zero length means the body runs to EOF.
            let mut body = Vec::new();
            self.inner.read_to_end(&mut body)?;
            body
        };

        let payload = if header.is_compressed() {
            decompress_lz4(&body)?
        } else {
            body
        };

        Ok(veclink_codec::decode(&payload)?)
    }

    /// Fill `buf` completely, retrying on `Interrupted`. With `at_boundary`
    /// set, EOF before the first byte maps to `EndOfStream`.
    fn fill(&mut self, buf: &mut [u8], at_boundary: bool) -> Result<()> {
        let mut offset = 0usize;
        while offset < buf.len() {
            match self.inner.read(&mut buf[offset..]) {
                Ok(0) => {
                    if at_boundary && offset == 0 {
                        return Err(FrameError::EndOfStream);
                    }
                    return Err(FrameError::ShortRead {
                        needed: buf.len(),
                        available: offset,
                    });
                }
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(FrameError::Io(err)),
            }
        }
        Ok(())
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }
}
