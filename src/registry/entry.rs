//! Registry entries.

use std::fmt;
use std::sync::Arc;

use crate::error::BoxError;
use crate::value::{Value, ValueType};

/// Operation computing a dynamic entry's value on every query.
///
/// Producers are invoked while the registry's read lock is held, possibly
/// from several threads at once. They may read the registry (for example to
/// derive a value from another OID), but must not register or unregister
/// entries, which would wait on their own read lock forever. A producer that
/// blocks holds off every writer, so keep them cheap.
pub type Producer = Arc<dyn Fn() -> Result<Value, BoxError> + Send + Sync>;

/// Where an entry's value comes from.
#[derive(Clone)]
pub(crate) enum Source {
    /// Stored once at registration.
    Constant(Value),
    /// Computed fresh by the producer on each query.
    Computed(Producer),
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Constant(v) => f.debug_tuple("Constant").field(v).finish(),
            Source::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Entry {
    pub(crate) value_type: ValueType,
    pub(crate) source: Source,
}

impl Entry {
    pub(crate) fn kind(&self) -> EntryKind {
        match self.source {
            Source::Constant(_) => EntryKind::Static,
            Source::Computed(_) => EntryKind::Dynamic,
        }
    }
}

/// Which variant holds a registered OID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum EntryKind {
    /// Value stored at registration.
    Static,
    /// Value computed by a producer per query.
    Dynamic,
}

impl EntryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntryKind::Static => "static",
            EntryKind::Dynamic => "dynamic",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
