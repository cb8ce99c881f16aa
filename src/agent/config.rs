//! Agent configuration.

use std::net::SocketAddr;

use bytes::Bytes;

use crate::error::{ConfigErrorKind, Error, Result};
use crate::transport::TransportSettings;

/// Default listen address (the standard SNMP port on all interfaces).
pub const DEFAULT_LISTEN: &str = "0.0.0.0:161";

/// Default community string.
pub const DEFAULT_COMMUNITY: &str = "public";

/// Default log verbosity.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Agent configuration.
///
/// `enterprise` has no usable default: it must be set to the vendor's
/// Private Enterprise Number before an agent can be built.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AgentConfig {
    /// Private Enterprise Number (required, non-zero).
    pub enterprise: u32,
    /// Listen address, e.g. `0.0.0.0:1161`.
    pub listen: String,
    /// Accepted community string.
    pub community: String,
    /// Log verbosity (`error`, `warn`, `info`, `debug`, `trace`).
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            enterprise: 0,
            listen: DEFAULT_LISTEN.to_string(),
            community: DEFAULT_COMMUNITY.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl AgentConfig {
    /// Config for a Private Enterprise Number with every other field defaulted.
    pub fn new(enterprise: u32) -> Self {
        Self {
            enterprise,
            ..Default::default()
        }
    }

    /// Fill empty fields with their defaults.
    pub fn with_defaults(mut self) -> Self {
        if self.listen.is_empty() {
            self.listen = DEFAULT_LISTEN.to_string();
        }
        if self.community.is_empty() {
            self.community = DEFAULT_COMMUNITY.to_string();
        }
        if self.log_level.is_empty() {
            self.log_level = DEFAULT_LOG_LEVEL.to_string();
        }
        self
    }

    /// Parse the listen address.
    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|_| {
            Error::config(ConfigErrorKind::InvalidListenAddress(
                self.listen.as_str().into(),
            ))
        })
    }

    /// Parse the log level.
    pub fn level(&self) -> Result<tracing::Level> {
        self.log_level.parse().map_err(|_| {
            Error::config(ConfigErrorKind::InvalidLogLevel(
                self.log_level.as_str().into(),
            ))
        })
    }

    /// Validate everything the transport and registry need.
    pub(crate) fn validate(&self) -> Result<TransportSettings> {
        if self.enterprise == 0 {
            return Err(Error::config(ConfigErrorKind::MissingEnterpriseNumber));
        }
        self.level()?;
        Ok(TransportSettings {
            listen: self.listen_addr()?,
            community: Bytes::copy_from_slice(self.community.as_bytes()),
        })
    }
}
