//! Builder for [`Agent`].

use crate::error::Result;
use crate::transport::Transport;

use super::{Agent, AgentConfig};

/// Builder for agents.
///
/// Created via [`Agent::builder()`].
///
/// ```rust
/// use snmp_agent_registry::agent::Agent;
/// use snmp_agent_registry::transport::LocalTransport;
///
/// # fn example() -> snmp_agent_registry::Result<()> {
/// let agent = Agent::builder()
///     .enterprise(12345)
///     .bind("0.0.0.0:1161")
///     .community("public")
///     .build(LocalTransport::new())?;
///
/// assert_eq!(agent.prefix(), "1.3.6.1.4.1.12345");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct AgentBuilder {
    config: AgentConfig,
}

impl AgentBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration.
    pub fn config(mut self, config: AgentConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the Private Enterprise Number.
    pub fn enterprise(mut self, pen: u32) -> Self {
        self.config.enterprise = pen;
        self
    }

    /// Set the listen address.
    pub fn bind(mut self, addr: impl Into<String>) -> Self {
        self.config.listen = addr.into();
        self
    }

    /// Set the community string.
    pub fn community(mut self, community: impl Into<String>) -> Self {
        self.config.community = community.into();
        self
    }

    /// Set the log verbosity.
    pub fn log_level(mut self, level: tracing::Level) -> Self {
        self.config.log_level = level.as_str().to_ascii_lowercase();
        self
    }

    /// Validate the configuration and create the agent.
    pub fn build<T: Transport>(self, transport: T) -> Result<Agent> {
        Agent::new(self.config, transport)
    }
}
