/// Errors that can occur in peer operations.
#[derive(Debug, thiserror::Error)]
pub enum PeerError {
    /// Frame-level error.
    #[error("frame error: {0}")]
    Frame(#[from] veclink_frame::FrameError),

    /// The peer set the UNSUPPORTED feature bit during the handshake.
    #[error("peer signalled unsupported features")]
    PeerUnsupported,

    /// The peer disconnected during the handshake.
    #[error("peer disconnected: {0}")]
    Disconnected(String),

    /// An I/O error occurred on the stream.
    #[error("peer I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PeerError {
    /// True when the underlying cause is a clean peer close at a message
    /// boundary.
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, PeerError::Frame(veclink_frame::FrameError::EndOfStream))
    }
}

pub type Result<T> = std::result::Result<T, PeerError>;
