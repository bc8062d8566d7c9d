//! Type lattice and value model for the veclink interchange format.
//!
//! The lattice ([`tag`]) defines the 32-bit tag space every wire value is
//! labeled with. The value model ([`Value`]) is the owned tree the codec
//! crate serializes. Null and infinity sentinels live in [`null`].
//!
//! This crate carries no I/O and no serialization logic; it is the shared
//! vocabulary of the layers above.

pub mod null;
pub mod tag;
pub mod value;

pub use value::{DictKind, IntKind, Lambda, LambdaKind, ListKind, LongKind, SymbolKind, Value};
