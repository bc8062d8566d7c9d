//! Message framing for the veclink wire protocol.
//!
//! Every message is a fixed 16-byte header (feature bitmap, reserved word,
//! body length) followed by the codec payload, LZ4-frame compressed when the
//! sender asked for it and the payload is large enough to be worth it.
//!
//! [`encode_message`]/[`decode_message`] work over byte buffers;
//! [`MessageReader`]/[`MessageWriter`] run the same format over blocking
//! `std::io` streams. No partial values ever surface to callers.

pub mod error;
pub mod header;
pub mod message;
pub mod reader;
pub mod writer;

pub use error::{FrameError, Result};
pub use header::{
    Features, Header, FEATURE_BUFFERED, FEATURE_COMPRESSED, FEATURE_UNSUPPORTED, HEADER_SIZE,
};
pub use message::{decode_message, encode_message, UNCOMPRESSED_SIZE_LIMIT};
pub use reader::MessageReader;
pub use writer::MessageWriter;
