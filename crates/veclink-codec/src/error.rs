/// Errors that can occur while encoding or decoding a value tree.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The buffer ended before the required bytes were available.
    #[error("short read: needed {needed} bytes, {available} available")]
    ShortRead { needed: usize, available: usize },

    /// The tag is not in the wire-decodable subset of the lattice.
    #[error("unknown type tag 0x{0:08x}")]
    UnknownTag(u32),

    /// A symbol exceeds the 255-byte wire limit.
    #[error("symbol too long ({0} bytes, max 255)")]
    SymbolTooLong(usize),

    /// A collection exceeds the capacity of its wire length field.
    #[error("{what} length {len} exceeds wire capacity")]
    Overflow { what: &'static str, len: usize },

    /// A symbol or lambda text is not valid UTF-8.
    #[error("invalid utf-8 in {0}")]
    InvalidUtf8(&'static str),
}

pub type Result<T> = std::result::Result<T, CodecError>;
