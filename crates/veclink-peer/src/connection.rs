//! A handshaken connection exchanging framed values over one stream.

use std::io::{Read, Write};

use tracing::debug;
use veclink_frame::{Features, MessageReader, MessageWriter};
use veclink_types::Value;

use crate::error::Result;
use crate::handshake::{self, Handshake};

/// One byte stream after a completed handshake.
///
/// `send` frames one value atomically (header and body in a single writer
/// call sequence behind `&mut self`); `recv` returns a whole value, an
/// end-of-stream error on a clean peer close, or a fault. Both sides
/// compress outbound payloads above the size threshold when each side
/// advertised COMPRESSED in the handshake.
pub struct Connection<S> {
    stream: S,
    local: Handshake,
    peer: Handshake,
    compress: bool,
}

impl<S: Read + Write> Connection<S> {
    /// Handshake as the active (initiating) side and wrap the stream.
    pub fn connect(mut stream: S, features: Features) -> Result<Self> {
        let peer = handshake::exchange(&mut stream, features)?;
        Ok(Self::negotiated(stream, Handshake::with_features(features), peer))
    }

    /// Handshake as the passive (responding) side and wrap the stream.
    pub fn accept(mut stream: S, features: Features) -> Result<Self> {
        let peer = handshake::respond(&mut stream, features)?;
        Ok(Self::negotiated(stream, Handshake::with_features(features), peer))
    }

    fn negotiated(stream: S, local: Handshake, peer: Handshake) -> Self {
        let compress = local.features.is_compressed() && peer.features.is_compressed();
        debug!(compress, peer_version = peer.version, "connection ready");
        Connection {
            stream,
            local,
            peer,
            compress,
        }
    }

    /// Frame and send one value.
    pub fn send(&mut self, value: &Value) -> Result<()> {
        MessageWriter::with_compression(&mut self.stream, self.compress).send(value)?;
        Ok(())
    }

    /// Receive the next value. `FrameError::EndOfStream` (wrapped in
    /// [`crate::PeerError::Frame`]) signals a clean close.
    pub fn recv(&mut self) -> Result<Value> {
        Ok(MessageReader::new(&mut self.stream).read_message()?)
    }

    /// The handshake this side sent.
    pub fn local(&self) -> &Handshake {
        &self.local
    }

    /// The handshake the peer sent. Version is diagnostic only.
    pub fn peer(&self) -> &Handshake {
        &self.peer
    }

    /// Whether outbound payloads above the threshold are compressed.
    pub fn compress(&self) -> bool {
        self.compress
    }

    /// Override the negotiated compression hint.
    pub fn set_compress(&mut self, compress: bool) {
        self.compress = compress;
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &S {
        &self.stream
    }

    /// Consume the connection and return the stream.
    pub fn into_inner(self) -> S {
        self.stream
    }
}

#[cfg(test)]
mod tests {
    use std::os::unix::net::UnixStream;
    use std::thread;

    use super::*;

    fn pair(
        active_features: Features,
        passive_features: Features,
    ) -> (Connection<UnixStream>, Connection<UnixStream>) {
        let (left, right) = UnixStream::pair().unwrap();
        let passive = thread::spawn(move || Connection::accept(right, passive_features).unwrap());
        let active = Connection::connect(left, active_features).unwrap();
        (active, passive.join().unwrap())
    }

    #[test]
    fn values_flow_both_ways() {
        let (mut active, mut passive) = pair(Features::new(), Features::new());

        active.send(&Value::symbol("ping")).unwrap();
        assert_eq!(passive.recv().unwrap(), Value::symbol("ping"));

        passive.send(&Value::long(99)).unwrap();
        assert_eq!(active.recv().unwrap(), Value::long(99));
    }

    #[test]
    fn compression_negotiated_when_both_advertise() {
        let compressed = Features::new().with_compressed();
        let (active, passive) = pair(compressed, compressed);
        assert!(active.compress());
        assert!(passive.compress());

        let (active, passive) = pair(compressed, Features::new());
        assert!(!active.compress());
        assert!(!passive.compress());
    }

    #[test]
    fn large_value_roundtrips_compressed() {
        let compressed = Features::new().with_compressed();
        let (mut active, mut passive) = pair(compressed, compressed);

        let v = Value::long_vec((0..20_000).collect());
        active.send(&v).unwrap();
        assert_eq!(passive.recv().unwrap(), v);
    }

    #[test]
    fn clean_close_surfaces_end_of_stream() {
        let (active, mut passive) = pair(Features::new(), Features::new());
        drop(active);

        let err = passive.recv().unwrap_err();
        assert!(err.is_end_of_stream());
    }

    #[test]
    fn peer_handshake_recorded() {
        let (active, passive) = pair(Features::new(), Features::new().with_buffered());
        assert!(active.peer().is_buffered());
        assert!(!passive.peer().is_buffered());
        assert_eq!(active.peer().version_parts(), (0, 1, 0));
    }
}
