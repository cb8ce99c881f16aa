//! BER tag constants for SNMP value types.
//!
//! Encoding and decoding belong to the transport; this crate only labels
//! registered values with the tag they will be sent as.

pub mod tag;

pub use tag::*;
