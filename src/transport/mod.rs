//! Transport contract.
//!
//! The wire protocol lives outside this crate. A transport is handed the
//! full binding set when the agent starts and again after every registry
//! mutation; it answers each inbound GET by calling the matching binding.
//!
//! [`LocalTransport`] is an in-process implementation that resolves GETs the
//! way a network transport would, without sockets.

mod local;

pub use local::*;

use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;

use bytes::Bytes;

use crate::error::Result;
use crate::registry::GetResult;
use crate::value::ValueType;

/// Callback resolving one OID against the registry.
pub type GetCallback = Arc<dyn Fn() -> Result<GetResult> + Send + Sync>;

/// One registered OID as seen by a transport.
#[derive(Clone)]
pub struct Binding {
    oid: Arc<str>,
    value_type: ValueType,
    callback: GetCallback,
}

impl Binding {
    /// Create a binding from its parts.
    pub fn new<F>(oid: impl Into<Arc<str>>, value_type: ValueType, callback: F) -> Self
    where
        F: Fn() -> Result<GetResult> + Send + Sync + 'static,
    {
        Self {
            oid: oid.into(),
            value_type,
            callback: Arc::new(callback),
        }
    }

    /// The absolute OID, exactly as registered.
    pub fn oid(&self) -> &str {
        &self.oid
    }

    /// The registered type tag.
    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// Resolve the OID now.
    pub fn get(&self) -> Result<GetResult> {
        (self.callback)()
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("oid", &self.oid)
            .field("value_type", &self.value_type)
            .finish_non_exhaustive()
    }
}

/// Listener settings passed to [`Transport::start`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportSettings {
    /// Address to listen on.
    pub listen: SocketAddr,
    /// Accepted community string (v1/v2c).
    pub community: Bytes,
}

/// Agent-side SNMP transport.
///
/// # Thread Safety
///
/// `sync` is called from the agent's resync task while the transport may be
/// answering requests on its own workers, so implementations must swap the
/// binding set atomically.
pub trait Transport: Send + Sync + 'static {
    /// Begin serving with an initial binding set.
    fn start(&self, settings: &TransportSettings, bindings: Vec<Binding>) -> Result<()>;

    /// Replace the binding set after a registry change.
    fn sync(&self, bindings: Vec<Binding>);

    /// Stop serving. Must be safe to call more than once.
    fn shutdown(&self);
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn start(&self, settings: &TransportSettings, bindings: Vec<Binding>) -> Result<()> {
        (**self).start(settings, bindings)
    }

    fn sync(&self, bindings: Vec<Binding>) {
        (**self).sync(bindings)
    }

    fn shutdown(&self) {
        (**self).shutdown()
    }
}
