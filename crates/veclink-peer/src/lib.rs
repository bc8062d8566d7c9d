//! Peer connection management for veclink.
//!
//! A connection starts with the 8-byte version + features handshake
//! ([`handshake`]) and then carries framed values in both directions
//! ([`Connection`]). The handshake must complete before any message
//! read or write; both are blocking calls on the underlying stream.

pub mod connection;
pub mod error;
pub mod handshake;

pub use connection::Connection;
pub use error::{PeerError, Result};
pub use handshake::{exchange, respond, Handshake, HANDSHAKE_SIZE, IPC_VERSION};
