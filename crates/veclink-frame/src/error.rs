/// Errors that can occur while framing or deframing messages.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The stream closed cleanly at a message boundary. This is the normal
    /// session-loop termination signal, not a fault.
    #[error("end of stream")]
    EndOfStream,

    /// The stream or buffer ended mid-header or mid-payload.
    #[error("short read: needed {needed} bytes, {available} available")]
    ShortRead { needed: usize, available: usize },

    /// The peer set the UNSUPPORTED feature bit.
    #[error("peer signalled unsupported features")]
    PeerUnsupported,

    /// LZ4 compression of an outgoing payload failed.
    #[error("compression failed: {0}")]
    CompressionFailed(String),

    /// LZ4 decompression of an incoming payload failed.
    #[error("decompression failed: {0}")]
    DecompressionFailed(String),

    /// Payload-level codec error.
    #[error("codec error: {0}")]
    Codec(#[from] veclink_codec::CodecError),

    /// An I/O error occurred on the underlying stream.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FrameError>;
