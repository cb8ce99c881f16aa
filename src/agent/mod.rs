//! SNMP agent: a registry bound to a transport.
//!
//! [`Agent`] owns the [`Registry`] and keeps the transport's binding set in
//! step with it. Entries can be registered before or after [`Agent::start`];
//! once running, every registry mutation triggers a rebuild of the bindings
//! on a background task.
//!
//! The rebuild is asynchronous: an OID registered while the agent runs is
//! served only once the resync task has handed the new binding set to the
//! transport. GETs arriving in between answer `noSuchObject` for it. Callers
//! that need the OID served before continuing can wait for it to appear in
//! the transport's bindings.
//!
//! # Example
//!
//! ```rust,no_run
//! use snmp_agent_registry::agent::Agent;
//! use snmp_agent_registry::transport::LocalTransport;
//! use snmp_agent_registry::{Value, ValueType};
//! use std::time::Instant;
//!
//! # async fn example() -> snmp_agent_registry::Result<()> {
//! let agent = Agent::builder()
//!     .enterprise(12345)
//!     .bind("0.0.0.0:1161")
//!     .build(LocalTransport::new())?;
//!
//! let registry = agent.registry();
//! registry.register_static("1.1.0", ValueType::OctetString, "My SNMP Agent v1.0");
//!
//! let started = Instant::now();
//! registry.register_dynamic("2.1.0", ValueType::Integer, move || {
//!     Ok(Value::Integer(started.elapsed().as_secs() as i32))
//! });
//!
//! agent.start().await?;
//! # Ok(())
//! # }
//! ```

mod builder;
mod config;

pub use builder::AgentBuilder;
pub use config::{AgentConfig, DEFAULT_COMMUNITY, DEFAULT_LISTEN, DEFAULT_LOG_LEVEL};

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::registry::Registry;
use crate::transport::{Transport, TransportSettings};

/// An SNMP agent serving a [`Registry`] through a [`Transport`].
pub struct Agent {
    config: AgentConfig,
    settings: TransportSettings,
    registry: Arc<Registry>,
    transport: Arc<dyn Transport>,
    /// Present while running; cancels the resync task.
    running: Mutex<Option<CancellationToken>>,
}

impl Agent {
    /// Create a builder.
    pub fn builder() -> AgentBuilder {
        AgentBuilder::new()
    }

    /// Create an agent from a configuration.
    ///
    /// Empty config fields take their defaults. Fails with
    /// [`Error::Config`] if the enterprise number is zero or the listen
    /// address or log level cannot be parsed; no agent is produced then.
    pub fn new<T: Transport>(config: AgentConfig, transport: T) -> Result<Self> {
        let config = config.with_defaults();
        let settings = config.validate()?;
        let registry = Arc::new(Registry::new(config.enterprise)?);

        info!(
            pen = config.enterprise,
            prefix = registry.prefix(),
            listen = %settings.listen,
            "SNMP Agent initialized"
        );

        Ok(Self {
            config,
            settings,
            registry,
            transport: Arc::new(transport),
            running: Mutex::new(None),
        })
    }

    /// The registry served by this agent.
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// The enterprise prefix, e.g. `1.3.6.1.4.1.12345`.
    pub fn prefix(&self) -> &str {
        self.registry.prefix()
    }

    /// The effective configuration.
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Whether the agent is serving.
    pub fn is_running(&self) -> bool {
        self.running.lock().is_some()
    }

    /// Hand the current bindings to the transport and start serving.
    ///
    /// Spawns the resync task on the current tokio runtime.
    pub async fn start(&self) -> Result<()> {
        let mut running = self.running.lock();
        if running.is_some() {
            return Err(Error::AlreadyRunning);
        }

        info!(addr = %self.settings.listen, "Starting SNMP Agent");

        // Subscribe before taking the snapshot, so any mutation racing with
        // start is picked up by the resync task.
        let revisions = self.registry.subscribe();
        let bindings = self.registry.bindings();
        debug!(count = bindings.len(), "binding registry to transport");
        self.transport.start(&self.settings, bindings)?;

        let cancel = CancellationToken::new();
        tokio::spawn(resync(
            Arc::clone(&self.registry),
            Arc::clone(&self.transport),
            revisions,
            cancel.clone(),
        ));
        *running = Some(cancel);

        info!("SNMP Agent started successfully");
        Ok(())
    }

    /// Stop the resync task and shut the transport down.
    pub fn stop(&self) -> Result<()> {
        let cancel = self.running.lock().take().ok_or(Error::NotRunning)?;
        info!("Stopping SNMP Agent");
        cancel.cancel();
        self.transport.shutdown();
        Ok(())
    }
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .field("running", &self.is_running())
            .finish_non_exhaustive()
    }
}

impl Drop for Agent {
    fn drop(&mut self) {
        if let Some(cancel) = self.running.get_mut().take() {
            cancel.cancel();
            self.transport.shutdown();
        }
    }
}

/// Rebuild the transport's bindings after each registry revision.
///
/// Runs after the mutating call has returned, so the transport lags the
/// registry by one scheduling round.
///
/// Bursts of mutations coalesce: the watch channel only reports that the
/// revision moved, and the snapshot taken afterwards reflects all of them.
async fn resync(
    registry: Arc<Registry>,
    transport: Arc<dyn Transport>,
    mut revisions: watch::Receiver<u64>,
    cancel: CancellationToken,
) {
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            changed = revisions.changed() => {
                if changed.is_err() {
                    break;
                }
                let revision = *revisions.borrow_and_update();
                let bindings = registry.bindings();
                debug!(revision, count = bindings.len(), "re-synchronizing transport bindings");
                transport.sync(bindings);
            }
        }
    }
    debug!("resync task finished");
}
