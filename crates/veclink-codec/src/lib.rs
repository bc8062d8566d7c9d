//! Binary codec between veclink value trees and bytes.
//!
//! The codec is synchronous and stateless: encoding writes into a growable
//! [`bytes::BytesMut`], decoding reads from a cursor over an immutable
//! buffer. Any number of encoders and decoders may run in parallel on
//! disjoint buffers.
//!
//! Framing (headers, compression) lives one layer up in `veclink-frame`;
//! this crate only knows tagged payloads.

pub mod de;
pub mod error;
pub mod ser;

pub use de::{decode, decode_value};
pub use error::{CodecError, Result};
pub use ser::{encode, encode_value, MAX_SYMBOL_LEN};
