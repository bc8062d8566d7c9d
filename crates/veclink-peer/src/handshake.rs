//! The 8-byte version + features handshake.
//!
//! Exchanged exactly once per connection, before any message. The active
//! (initiating) side sends first; the passive (responding) side reads first.
//! Either side fails with [`PeerError::PeerUnsupported`] when the other sets
//! the UNSUPPORTED bit. The peer's version is recorded for diagnostics and
//! never rejected here.

use std::io::{ErrorKind, Read, Write};

use tracing::debug;
use veclink_frame::Features;

use crate::error::{PeerError, Result};

/// Protocol version 0.1.0, encoded as `major << 20 | minor << 10 | patch`.
pub const IPC_VERSION: u32 = (0 << 20) | (1 << 10) | 0;

/// Handshake size on the wire.
pub const HANDSHAKE_SIZE: usize = 8;

/// The version + features word pair each side sends.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Handshake {
    pub version: u32,
    pub features: Features,
}

impl Handshake {
    /// A handshake advertising the current protocol version and no features.
    pub fn new() -> Self {
        Handshake {
            version: IPC_VERSION,
            features: Features::new(),
        }
    }

    /// A handshake advertising the current protocol version and `features`.
    pub fn with_features(features: Features) -> Self {
        Handshake {
            version: IPC_VERSION,
            features,
        }
    }

    pub fn is_unsupported(&self) -> bool {
        self.features.is_unsupported()
    }

    pub fn is_buffered(&self) -> bool {
        self.features.is_buffered()
    }

    /// The `(major, minor, patch)` triple packed into the version word.
    pub fn version_parts(&self) -> (u32, u32, u32) {
        (
            self.version >> 20,
            (self.version >> 10) & 0x3FF,
            self.version & 0x3FF,
        )
    }

    fn to_wire(self) -> [u8; HANDSHAKE_SIZE] {
        let mut wire = [0u8; HANDSHAKE_SIZE];
        wire[..4].copy_from_slice(&self.version.to_le_bytes());
        wire[4..].copy_from_slice(&self.features.bits().to_le_bytes());
        wire
    }

    fn from_wire(wire: [u8; HANDSHAKE_SIZE]) -> Self {
        Handshake {
            version: u32::from_le_bytes(wire[..4].try_into().unwrap()),
            features: Features::from_bits(u32::from_le_bytes(wire[4..].try_into().unwrap())),
        }
    }
}

impl Default for Handshake {
    fn default() -> Self {
        Handshake::new()
    }
}

/// Active-side handshake: send ours, read the peer's.
///
/// Returns the peer's handshake as the negotiated view.
pub fn exchange<S: Read + Write>(stream: &mut S, features: Features) -> Result<Handshake> {
    let local = Handshake::with_features(features);
    stream.write_all(&local.to_wire())?;
    stream.flush()?;

    let peer = read_handshake(stream)?;
    if peer.is_unsupported() {
        return Err(PeerError::PeerUnsupported);
    }

    let (major, minor, patch) = peer.version_parts();
    debug!(major, minor, patch, features = peer.features.bits(), "handshake complete (active)");
    Ok(peer)
}

/// Passive-side handshake: read the peer's, send ours.
///
/// Returns the received handshake.
pub fn respond<S: Read + Write>(stream: &mut S, features: Features) -> Result<Handshake> {
    let peer = read_handshake(stream)?;

    let local = Handshake::with_features(features);
    stream.write_all(&local.to_wire())?;
    stream.flush()?;

    if peer.is_unsupported() {
        return Err(PeerError::PeerUnsupported);
    }

    let (major, minor, patch) = peer.version_parts();
    debug!(major, minor, patch, features = peer.features.bits(), "handshake complete (passive)");
    Ok(peer)
}

fn read_handshake<S: Read>(stream: &mut S) -> Result<Handshake> {
    let mut wire = [0u8; HANDSHAKE_SIZE];
    stream.read_exact(&mut wire).map_err(|err| {
        if err.kind() == ErrorKind::UnexpectedEof {
            PeerError::Disconnected("connection closed during handshake".to_string())
        } else {
            PeerError::Io(err)
        }
    })?;
    Ok(Handshake::from_wire(wire))
}
