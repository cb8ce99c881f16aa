//! CLI utilities for snmp-agent-registry.
//!
//! This module provides command-line argument parsing, output formatting,
//! and OID name resolution for the `snmp-registry-demo` binary.
//!
//! This module is only available with the `cli` feature.

pub mod args;
pub mod hints;
pub mod output;
