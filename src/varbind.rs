//! Variable binding (VarBind) type.
//!
//! A VarBind pairs an OID with a value. Transports answer each requested
//! OID with one.

use crate::value::Value;

/// Variable binding - an OID-value pair.
///
/// The OID is kept as the string the request named, since registry keys are
/// never canonicalized.
#[derive(Debug, Clone, PartialEq)]
pub struct VarBind {
    /// The object identifier, dotted.
    pub oid: String,
    /// The value.
    pub value: Value,
}

impl VarBind {
    /// Create a new VarBind.
    pub fn new(oid: impl Into<String>, value: Value) -> Self {
        Self {
            oid: oid.into(),
            value,
        }
    }

    /// Create a VarBind with a NULL value.
    pub fn null(oid: impl Into<String>) -> Self {
        Self::new(oid, Value::Null)
    }
}

impl std::fmt::Display for VarBind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.oid, self.value)
    }
}
