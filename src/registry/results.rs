//! Result types for registry lookups.

use crate::error::{ErrorStatus, Result};
use crate::value::Value;

/// Outcome of resolving an OID that did not fail.
///
/// Producer failures are reported separately as
/// [`Error::Evaluation`](crate::Error::Evaluation); an unknown OID is not an
/// error, just an absence:
///
/// - `Value`: a static entry's stored value or a producer's fresh result
/// - `NoSuchObject`: nothing is registered at this OID
///
/// The transport decides the wire-level answer: SNMPv2c/v3 send the
/// `noSuchObject` exception, SNMPv1 a `noSuchName` error.
///
/// # Example
///
/// ```rust
/// use snmp_agent_registry::{GetResult, Registry, Value, ValueType};
///
/// let registry = Registry::new(12345).unwrap();
/// registry.register_static("1.1.0", ValueType::OctetString, "demo");
///
/// let hit = registry.get("1.3.6.1.4.1.12345.1.1.0").unwrap();
/// assert_eq!(hit, GetResult::Value(Value::from("demo")));
///
/// let miss = registry.get("1.3.6.1.4.1.12345.9.9.0").unwrap();
/// assert_eq!(miss, GetResult::NoSuchObject);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum GetResult {
    /// The OID is registered and resolved to this value.
    Value(Value),
    /// No entry exists at this OID.
    NoSuchObject,
}

impl GetResult {
    /// Create a `GetResult` from an `Option<Value>`.
    ///
    /// `None` is treated as `NoSuchObject`.
    pub fn from_option(value: Option<Value>) -> Self {
        match value {
            Some(v) => GetResult::Value(v),
            None => GetResult::NoSuchObject,
        }
    }

    /// Returns `true` if this is a value result.
    pub fn is_value(&self) -> bool {
        matches!(self, GetResult::Value(_))
    }

    /// Converts to an `Option<Value>`.
    pub fn into_option(self) -> Option<Value> {
        match self {
            GetResult::Value(v) => Some(v),
            GetResult::NoSuchObject => None,
        }
    }
}

impl From<Value> for GetResult {
    fn from(value: Value) -> Self {
        GetResult::Value(value)
    }
}

impl From<Option<Value>> for GetResult {
    fn from(value: Option<Value>) -> Self {
        GetResult::from_option(value)
    }
}

/// Error status a transport should report for a lookup outcome.
///
/// A value maps to `noError`, an unknown OID to `noSuchName` (the SNMPv1
/// reading; v2c transports send the exception value instead) and any error
/// to `genErr`.
pub fn status_for(result: &Result<GetResult>) -> ErrorStatus {
    match result {
        Ok(GetResult::Value(_)) => ErrorStatus::NoError,
        Ok(GetResult::NoSuchObject) => ErrorStatus::NoSuchName,
        Err(_) => ErrorStatus::GenErr,
    }
}
