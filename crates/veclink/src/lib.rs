//! Typed binary interchange codec and IPC framing for vector data platforms.
//!
//! Peers exchange an 8-byte versioned handshake, then length-prefixed,
//! optionally LZ4-compressed messages whose payloads are self-describing
//! trees of typed values.
//!
//! # Crate Structure
//!
//! - [`types`] — The 32-bit tag lattice and the in-memory value tree
//! - [`codec`] — Recursive binary encoder/decoder for value trees
//! - [`frame`] — Message header, compression and stream framing
//! - [`peer`] — Handshake and handshaken connections
//! - [`transport`] — TCP streams for the layers above

/// Re-export lattice and value model types.
pub mod types {
    pub use veclink_types::*;
}

/// Re-export codec types.
pub mod codec {
    pub use veclink_codec::*;
}

/// Re-export framing types.
pub mod frame {
    pub use veclink_frame::*;
}

/// Re-export peer types.
pub mod peer {
    pub use veclink_peer::*;
}

/// Re-export transport types.
pub mod transport {
    pub use veclink_transport::*;
}

pub mod json;
