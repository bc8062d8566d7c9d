//! TCP transport for veclink.
//!
//! The codec and framing layers are transport-agnostic: they consume any
//! bidirectional byte stream. This crate provides the one transport the
//! system ships with. Accept-loop policy (thread per connection, pools)
//! stays with callers.

pub mod error;
pub mod tcp;

pub use error::{Result, TransportError};
pub use tcp::TcpTransport;
