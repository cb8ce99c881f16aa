//! Common test fixtures and constants.

use std::sync::Arc;

use snmp_agent_registry::transport::LocalTransport;
use snmp_agent_registry::{Agent, Registry};

/// Private Enterprise Number used throughout the tests.
pub const PEN: u32 = 12345;

/// Enterprise prefix for [`PEN`].
pub const PREFIX: &str = "1.3.6.1.4.1.12345";

/// Community accepted by [`agent_with_transport`].
pub const COMMUNITY: &str = "public";

// =============================================================================
// Standard system MIB OIDs (1.3.6.1.2.1.1.*)
// =============================================================================

pub const SYS_DESCR: &str = "1.3.6.1.2.1.1.1.0";
pub const SYS_NAME: &str = "1.3.6.1.2.1.1.5.0";

// =============================================================================
// Test OIDs
// =============================================================================

/// Absolute form of a fragment under [`PREFIX`].
pub fn enterprise(relative: &str) -> String {
    format!("{}.{}", PREFIX, relative)
}

/// Nonexistent OID for testing NoSuchObject.
pub const NONEXISTENT_OID: &str = "1.3.6.1.99.99.99.0";

// =============================================================================
// Constructors
// =============================================================================

/// Empty registry for [`PEN`].
pub fn registry() -> Arc<Registry> {
    Arc::new(Registry::new(PEN).expect("valid PEN"))
}

/// Stopped agent for [`PEN`] bound to a shared in-process transport.
pub fn agent_with_transport() -> (Agent, Arc<LocalTransport>) {
    let transport = Arc::new(LocalTransport::new());
    let agent = Agent::builder()
        .enterprise(PEN)
        .bind("127.0.0.1:1161")
        .community(COMMUNITY)
        .build(Arc::clone(&transport))
        .expect("valid agent config");
    (agent, transport)
}
