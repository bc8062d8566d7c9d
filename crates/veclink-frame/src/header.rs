//! Feature flags and the fixed 16-byte message header.
//!
//! Wire layout (little-endian):
//!
//! ```text
//! ┌───────────────┬───────────────┬───────────────┐
//! │ features (4B) │ reserved (4B) │ len (8B)      │
//! └───────────────┴───────────────┴───────────────┘
//! ```
//!
//! `len` is the byte length of the body that follows, after compression if
//! the COMPRESSED bit is set.

use bytes::{Buf, BufMut};

use crate::error::{FrameError, Result};

/// Header size on the wire.
pub const HEADER_SIZE: usize = 16;

/// Body is LZ4-frame compressed.
pub const FEATURE_COMPRESSED: u32 = 1;
/// Peer buffers outbound messages. Advisory; the codec is indifferent to it.
pub const FEATURE_BUFFERED: u32 = 1 << 1;
/// Peer could not support the requested features.
pub const FEATURE_UNSUPPORTED: u32 = 1 << 31;

/// A `u32` feature bitmap. Unknown bits are preserved on retransmit and
/// ignored on receive, except UNSUPPORTED.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Features(u32);

impl Features {
    pub fn new() -> Self {
        Features(0)
    }

    pub fn from_bits(bits: u32) -> Self {
        Features(bits)
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn with_compressed(self) -> Self {
        Features(self.0 | FEATURE_COMPRESSED)
    }

    pub fn with_buffered(self) -> Self {
        Features(self.0 | FEATURE_BUFFERED)
    }

    pub fn with_unsupported(self) -> Self {
        Features(self.0 | FEATURE_UNSUPPORTED)
    }

    pub fn is_compressed(self) -> bool {
        self.0 & FEATURE_COMPRESSED != 0
    }

    pub fn is_buffered(self) -> bool {
        self.0 & FEATURE_BUFFERED != 0
    }

    pub fn is_unsupported(self) -> bool {
        self.0 & FEATURE_UNSUPPORTED != 0
    }
}

/// The fixed message header.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Header {
    pub features: Features,
    pub reserved: u32,
    pub len: u64,
}

impl Header {
    pub fn new() -> Self {
        Header::default()
    }

    pub fn with_compressed(mut self) -> Self {
        self.features = self.features.with_compressed();
        self
    }

    pub fn is_compressed(&self) -> bool {
        self.features.is_compressed()
    }

    /// Serialize into `dst`.
    pub fn encode(&self, dst: &mut impl BufMut) {
        dst.put_u32_le(self.features.bits());
        dst.put_u32_le(self.reserved);
        dst.put_u64_le(self.len);
    }

    /// Deserialize from the front of `buf`.
    pub fn decode(buf: &mut impl Buf) -> Result<Header> {
        if buf.remaining() < HEADER_SIZE {
            return Err(FrameError::ShortRead {
                needed: HEADER_SIZE,
                available: buf.remaining(),
            });
        }
        Ok(Header {
            features: Features::from_bits(buf.get_u32_le()),
            reserved: buf.get_u32_le(),
            len: buf.get_u64_le(),
        })
    }
}
