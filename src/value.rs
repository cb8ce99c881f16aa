//! SNMP values and their type tags.

use std::fmt;
use std::net::Ipv4Addr;

use bytes::Bytes;

use crate::ber::tag::{application, universal};
use crate::oid::Oid;

/// SNMP value type attached to an entry at registration time.
///
/// The registry stores the tag alongside the entry and hands it to the
/// transport in each binding; it never checks that a value matches its tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum ValueType {
    Integer,
    OctetString,
    Null,
    ObjectIdentifier,
    IpAddress,
    Counter32,
    Gauge32,
    TimeTicks,
    Opaque,
    Counter64,
}

impl ValueType {
    /// BER tag this type is encoded with.
    pub const fn tag(self) -> u8 {
        match self {
            ValueType::Integer => universal::INTEGER,
            ValueType::OctetString => universal::OCTET_STRING,
            ValueType::Null => universal::NULL,
            ValueType::ObjectIdentifier => universal::OBJECT_IDENTIFIER,
            ValueType::IpAddress => application::IP_ADDRESS,
            ValueType::Counter32 => application::COUNTER32,
            ValueType::Gauge32 => application::GAUGE32,
            ValueType::TimeTicks => application::TIMETICKS,
            ValueType::Opaque => application::OPAQUE,
            ValueType::Counter64 => application::COUNTER64,
        }
    }

    /// SMI name of the type, as printed by net-snmp.
    pub const fn name(self) -> &'static str {
        match self {
            ValueType::Integer => "INTEGER",
            ValueType::OctetString => "STRING",
            ValueType::Null => "NULL",
            ValueType::ObjectIdentifier => "OID",
            ValueType::IpAddress => "IpAddress",
            ValueType::Counter32 => "Counter32",
            ValueType::Gauge32 => "Gauge32",
            ValueType::TimeTicks => "Timeticks",
            ValueType::Opaque => "Opaque",
            ValueType::Counter64 => "Counter64",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An SNMP value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Value {
    /// INTEGER (signed 32-bit).
    Integer(i32),
    /// OCTET STRING.
    OctetString(Bytes),
    /// NULL.
    Null,
    /// OBJECT IDENTIFIER.
    ObjectIdentifier(Oid),
    /// IpAddress (IPv4, network byte order).
    IpAddress([u8; 4]),
    /// Counter32.
    Counter32(u32),
    /// Gauge32 / Unsigned32.
    Gauge32(u32),
    /// TimeTicks (hundredths of a second).
    TimeTicks(u32),
    /// Opaque (arbitrary BER-wrapped data).
    Opaque(Bytes),
    /// Counter64.
    Counter64(u64),
    /// noSuchObject exception (SNMPv2c/v3 responses only).
    NoSuchObject,
}

impl Value {
    /// The type tag naturally matching this value.
    ///
    /// Returns `None` for exception values, which have no registrable type.
    pub fn value_type(&self) -> Option<ValueType> {
        match self {
            Value::Integer(_) => Some(ValueType::Integer),
            Value::OctetString(_) => Some(ValueType::OctetString),
            Value::Null => Some(ValueType::Null),
            Value::ObjectIdentifier(_) => Some(ValueType::ObjectIdentifier),
            Value::IpAddress(_) => Some(ValueType::IpAddress),
            Value::Counter32(_) => Some(ValueType::Counter32),
            Value::Gauge32(_) => Some(ValueType::Gauge32),
            Value::TimeTicks(_) => Some(ValueType::TimeTicks),
            Value::Opaque(_) => Some(ValueType::Opaque),
            Value::Counter64(_) => Some(ValueType::Counter64),
            Value::NoSuchObject => None,
        }
    }

    /// Check whether this is an exception value.
    pub fn is_exception(&self) -> bool {
        matches!(self, Value::NoSuchObject)
    }

    /// Numeric view of integer-like values.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Integer(v) => u64::try_from(*v).ok(),
            Value::Counter32(v) | Value::Gauge32(v) | Value::TimeTicks(v) => Some(u64::from(*v)),
            Value::Counter64(v) => Some(*v),
            _ => None,
        }
    }

    /// String view of OCTET STRING values holding UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::OctetString(bytes) => std::str::from_utf8(bytes).ok(),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "{}", v),
            Value::OctetString(bytes) | Value::Opaque(bytes) => match std::str::from_utf8(bytes) {
                Ok(s) => write!(f, "{:?}", s),
                Err(_) => {
                    for (i, b) in bytes.iter().enumerate() {
                        if i > 0 {
                            f.write_str(" ")?;
                        }
                        write!(f, "{:02X}", b)?;
                    }
                    Ok(())
                }
            },
            Value::Null => f.write_str("NULL"),
            Value::ObjectIdentifier(oid) => write!(f, "{}", oid),
            Value::IpAddress(octets) => write!(f, "{}", Ipv4Addr::from(*octets)),
            Value::Counter32(v) | Value::Gauge32(v) | Value::TimeTicks(v) => write!(f, "{}", v),
            Value::Counter64(v) => write!(f, "{}", v),
            Value::NoSuchObject => f.write_str("noSuchObject"),
        }
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::OctetString(Bytes::copy_from_slice(s.as_bytes()))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::OctetString(Bytes::from(s))
    }
}

impl From<Bytes> for Value {
    fn from(b: Bytes) -> Self {
        Value::OctetString(b)
    }
}

impl From<Oid> for Value {
    fn from(oid: Oid) -> Self {
        Value::ObjectIdentifier(oid)
    }
}

impl From<Ipv4Addr> for Value {
    fn from(addr: Ipv4Addr) -> Self {
        Value::IpAddress(addr.octets())
    }
}
