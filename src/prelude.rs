//! Prelude module for convenient imports.
//!
//! # Usage
//!
//! ```rust
//! use snmp_agent_registry::prelude::*;
//! ```
//!
//! This imports:
//! - Core types: [`Agent`], [`Registry`], [`Value`], [`ValueType`], [`Oid`]
//! - Lookup results: [`GetResult`], [`EntryKind`]
//! - Error handling: [`Error`], [`Result`]
//! - The [`oid!`] macro for compile-time OID construction

pub use crate::agent::Agent;
pub use crate::error::{Error, Result};
pub use crate::oid::Oid;
pub use crate::registry::{EntryKind, GetResult, Registry};
pub use crate::value::{Value, ValueType};

#[doc(no_inline)]
pub use crate::oid;
