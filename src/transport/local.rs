//! In-process transport.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::error::{Error, ErrorStatus, Result};
use crate::registry::{GetResult, status_for};
use crate::value::Value;
use crate::varbind::VarBind;

use super::{Binding, Transport, TransportSettings};

/// Response to a GET, as a transport would encode it.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// Variable bindings in the response
    pub varbinds: Vec<VarBind>,
    /// Error status (0 = no error)
    pub error_status: ErrorStatus,
    /// Error index (1-based index of problematic varbind, 0 if no error)
    pub error_index: i32,
}

impl Response {
    /// Create a successful response with the given varbinds.
    pub fn success(varbinds: Vec<VarBind>) -> Self {
        Self {
            varbinds,
            error_status: ErrorStatus::NoError,
            error_index: 0,
        }
    }

    /// Create an error response.
    pub fn error(error_status: ErrorStatus, error_index: i32, varbinds: Vec<VarBind>) -> Self {
        Self {
            varbinds,
            error_status,
            error_index,
        }
    }
}

/// Binding table answering GETs in-process with SNMPv2c semantics.
///
/// Unknown OIDs get the `noSuchObject` exception value; a failing producer
/// turns the whole response into `genErr` pointing at that varbind. Requests
/// with the wrong community, or made while stopped, are dropped.
///
/// # Example
///
/// ```rust
/// use snmp_agent_registry::agent::Agent;
/// use snmp_agent_registry::transport::LocalTransport;
/// use snmp_agent_registry::{Value, ValueType};
/// use std::sync::Arc;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> snmp_agent_registry::Result<()> {
/// let transport = Arc::new(LocalTransport::new());
/// let agent = Agent::builder()
///     .enterprise(12345)
///     .build(Arc::clone(&transport))?;
///
/// agent.registry().register_static("1.1.0", ValueType::OctetString, "demo");
/// agent.start().await?;
///
/// let response = transport.get(b"public", &["1.3.6.1.4.1.12345.1.1.0"]).unwrap();
/// assert_eq!(response.varbinds[0].value, Value::from("demo"));
///
/// agent.stop()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct LocalTransport {
    bindings: RwLock<HashMap<Arc<str>, Binding>>,
    settings: Mutex<Option<TransportSettings>>,
    running: AtomicBool,
}

impl LocalTransport {
    /// Create a stopped transport with no bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `start` has been called without a later `shutdown`.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Settings from the last `start`.
    pub fn settings(&self) -> Option<TransportSettings> {
        self.settings.lock().clone()
    }

    /// Currently bound OIDs, sorted.
    pub fn bound_oids(&self) -> Vec<String> {
        let mut oids: Vec<String> = self
            .bindings
            .read()
            .keys()
            .map(|oid| oid.to_string())
            .collect();
        oids.sort();
        oids
    }

    /// Answer a GET for `oids`.
    ///
    /// Returns `None` when the request would be dropped on the wire.
    pub fn get(&self, community: &[u8], oids: &[&str]) -> Option<Response> {
        if !self.is_running() {
            debug!("GET while stopped, dropping");
            return None;
        }
        let accepted = self
            .settings
            .lock()
            .as_ref()
            .is_some_and(|s| s.community.as_ref() == community);
        if !accepted {
            debug!("community mismatch, dropping");
            return None;
        }

        let mut varbinds = Vec::with_capacity(oids.len());
        for (index, oid) in oids.iter().enumerate() {
            // Clone out so producers never run under the binding table lock.
            let binding = self.bindings.read().get(*oid).cloned();
            let result = match binding {
                Some(binding) => binding.get(),
                None => Ok(GetResult::NoSuchObject),
            };

            let status = status_for(&result);
            match result {
                Ok(GetResult::Value(value)) => varbinds.push(VarBind::new(*oid, value)),
                Ok(GetResult::NoSuchObject) => {
                    varbinds.push(VarBind::new(*oid, Value::NoSuchObject))
                }
                Err(err) => {
                    warn!(oid = *oid, status = %status, error = %err, "GET failed");
                    let echoed = oids.iter().map(|o| VarBind::null(*o)).collect();
                    return Some(Response::error(status, (index + 1) as i32, echoed));
                }
            }
        }
        Some(Response::success(varbinds))
    }

    fn replace_bindings(&self, bindings: Vec<Binding>) {
        let table: HashMap<Arc<str>, Binding> = bindings
            .into_iter()
            .map(|b| (Arc::from(b.oid()), b))
            .collect();
        let count = table.len();
        *self.bindings.write() = table;
        debug!(count, "bindings replaced");
    }
}

impl Transport for LocalTransport {
    fn start(&self, settings: &TransportSettings, bindings: Vec<Binding>) -> Result<()> {
        if self.running.swap(true, Ordering::AcqRel) {
            return Err(Error::AlreadyRunning);
        }
        *self.settings.lock() = Some(settings.clone());
        self.replace_bindings(bindings);
        info!(listen = %settings.listen, "local transport serving");
        Ok(())
    }

    fn sync(&self, bindings: Vec<Binding>) {
        self.replace_bindings(bindings);
    }

    fn shutdown(&self) {
        if self.running.swap(false, Ordering::AcqRel) {
            info!("local transport stopped");
        }
    }
}
