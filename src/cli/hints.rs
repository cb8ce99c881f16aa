//! Well-known OID name hints.
//!
//! This module provides a small hardcoded table of common OID names for display purposes.
//! This is NOT MIB support - just friendly names for common system OIDs.

use crate::Oid;
use crate::namespace;

/// Well-known OID entries.
static WELL_KNOWN_OIDS: &[(&[u32], &str)] = &[
    // SNMPv2-MIB::system
    (&[1, 3, 6, 1, 2, 1, 1, 1, 0], "sysDescr.0"),
    (&[1, 3, 6, 1, 2, 1, 1, 2, 0], "sysObjectID.0"),
    (&[1, 3, 6, 1, 2, 1, 1, 3, 0], "sysUpTime.0"),
    (&[1, 3, 6, 1, 2, 1, 1, 4, 0], "sysContact.0"),
    (&[1, 3, 6, 1, 2, 1, 1, 5, 0], "sysName.0"),
    (&[1, 3, 6, 1, 2, 1, 1, 6, 0], "sysLocation.0"),
    (&[1, 3, 6, 1, 2, 1, 1, 7, 0], "sysServices.0"),
];

/// Name of the pseudo-root that stands for the agent's enterprise prefix.
pub const ENTERPRISE_ALIAS: &str = "enterprise";

/// Look up a friendly name for a dotted OID.
///
/// Returns `None` if the OID is malformed or not in the well-known table.
pub fn lookup(oid: &str) -> Option<&'static str> {
    let oid = Oid::parse(oid).ok()?;
    let arcs = oid.arcs();
    WELL_KNOWN_OIDS
        .iter()
        .find(|(pattern, _)| *pattern == arcs)
        .map(|(_, name)| *name)
}

/// Resolve user input to an absolute dotted OID.
///
/// Accepts:
/// - Dotted notation: "1.3.6.1.2.1.1.1.0" or ".1.3.6.1.2.1.1.1.0"
/// - Well-known names: "sysDescr.0" (case-insensitive)
/// - Enterprise-relative: "enterprise.1.1.0", joined onto `prefix`
pub fn parse_oid(s: &str, prefix: &str) -> Result<String, String> {
    if s.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return Oid::parse(s)
            .map(|oid| oid.to_dotted())
            .map_err(|e| format!("invalid OID '{}': {}", s, e));
    }

    if let Some(rest) = s.strip_prefix(ENTERPRISE_ALIAS) {
        if rest.is_empty() {
            return Ok(prefix.to_owned());
        }
        if let Some(relative) = rest.strip_prefix('.') {
            let relative = Oid::parse(relative)
                .map_err(|e| format!("invalid relative OID '{}': {}", relative, e))?;
            return Ok(namespace::to_absolute(prefix, &relative.to_dotted()));
        }
    }

    let lower = s.to_ascii_lowercase();
    for (arcs, name) in WELL_KNOWN_OIDS {
        if name.to_ascii_lowercase() == lower {
            return Ok(Oid::from_slice(arcs).to_dotted());
        }
    }

    Err(format!(
        "unknown OID name '{}'; use dotted notation (e.g., 1.3.6.1.2.1.1.1.0) or {}.<fragment>",
        s, ENTERPRISE_ALIAS
    ))
}
