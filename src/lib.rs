//! # snmp-agent-registry
//!
//! Embeddable SNMP agent value registry. A host process exposes internal
//! metrics and static descriptors as OIDs under its enterprise subtree
//! (`1.3.6.1.4.1.<PEN>`) and answers GET requests from SNMP managers.
//!
//! - [`Registry`] maps OIDs to static values or producers evaluated per query
//! - [`namespace`] derives the enterprise prefix and joins relative OIDs
//! - [`agent::Agent`] binds a registry to a [`transport::Transport`] and keeps
//!   the transport's bindings in step with registry changes
//!
//! The wire protocol is supplied by the transport; [`transport::LocalTransport`]
//! answers GETs in-process.
//!
//! # Quick Start
//!
//! ```rust
//! use snmp_agent_registry::{GetResult, Registry, Value, ValueType};
//!
//! let registry = Registry::new(12345)?;
//! registry.register_static("1.1.0", ValueType::OctetString, "demo");
//!
//! assert_eq!(
//!     registry.get("1.3.6.1.4.1.12345.1.1.0")?,
//!     GetResult::Value(Value::from("demo"))
//! );
//!
//! registry.unregister_absolute("1.3.6.1.4.1.12345.1.1.0")?;
//! assert_eq!(registry.get("1.3.6.1.4.1.12345.1.1.0")?, GetResult::NoSuchObject);
//! # Ok::<(), snmp_agent_registry::Error>(())
//! ```
//!
//! # Logging
//!
//! The crate emits [`tracing`] events and installs no subscriber. Registry
//! mutations are logged under the `snmp_agent_registry::audit` target.
//!
//! # Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for [`agent::AgentConfig`],
//!   [`EntryKind`] and [`ValueType`]
//! - `cli`: the `snmp-registry-demo` binary
//! - `rt-multi-thread`: multi-threaded tokio runtime

pub mod agent;
pub mod ber;
pub mod error;
pub mod namespace;
pub mod oid;
pub mod prelude;
pub mod registry;
pub mod transport;
pub mod value;
pub mod varbind;

#[cfg(feature = "cli")]
pub mod cli;

pub use agent::{Agent, AgentBuilder, AgentConfig};
pub use error::{BoxError, ConfigErrorKind, Error, ErrorStatus, OidErrorKind, Result};
pub use oid::Oid;
pub use registry::{EntryKind, GetResult, Producer, Registry};
pub use value::{Value, ValueType};
pub use varbind::VarBind;
