//! Shared test utilities for snmp-agent-registry integration tests.

// Allow dead code and unused imports since not all test files use all utilities
#![allow(dead_code)]
#![allow(unused_imports)]

mod capture;
mod fixtures;

pub use capture::*;
pub use fixtures::*;
