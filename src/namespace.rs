//! Enterprise namespace rules.
//!
//! Relative OIDs are fragments under the vendor's enterprise subtree
//! `1.3.6.1.4.1.<PEN>` (iso.org.dod.internet.private.enterprises). Absolute
//! OIDs are used verbatim. Neither form is validated or canonicalized: a
//! malformed OID is stored as given and simply never matches a query.

use crate::error::{ConfigErrorKind, Error, Result};
use crate::oid::Oid;

/// Arcs of `iso.org.dod.internet.private.enterprises`.
pub const ENTERPRISES: &[u32] = &[1, 3, 6, 1, 4, 1];

/// Numeric enterprise subtree for a Private Enterprise Number.
///
/// Fails with a configuration error for PEN 0.
pub fn enterprise_oid(pen: u32) -> Result<Oid> {
    if pen == 0 {
        return Err(Error::config(ConfigErrorKind::MissingEnterpriseNumber));
    }
    Ok(Oid::from_slice(ENTERPRISES).child(pen))
}

/// Dotted enterprise prefix for a Private Enterprise Number.
///
/// ```rust
/// use snmp_agent_registry::namespace::enterprise_prefix;
///
/// assert_eq!(enterprise_prefix(12345).unwrap(), "1.3.6.1.4.1.12345");
/// assert!(enterprise_prefix(0).is_err());
/// ```
pub fn enterprise_prefix(pen: u32) -> Result<String> {
    enterprise_oid(pen).map(|oid| oid.to_dotted())
}

/// Join a relative fragment onto `prefix`.
///
/// An empty fragment yields the prefix itself.
///
/// ```rust
/// use snmp_agent_registry::namespace::to_absolute;
///
/// assert_eq!(
///     to_absolute("1.3.6.1.4.1.12345", "1.1.0"),
///     "1.3.6.1.4.1.12345.1.1.0"
/// );
/// ```
pub fn to_absolute(prefix: &str, relative: &str) -> String {
    if relative.is_empty() {
        return prefix.to_owned();
    }
    let mut absolute = String::with_capacity(prefix.len() + 1 + relative.len());
    absolute.push_str(prefix);
    absolute.push('.');
    absolute.push_str(relative);
    absolute
}
