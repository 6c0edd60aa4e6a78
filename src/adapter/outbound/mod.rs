//! Outbound adapters (driven side).

pub mod http;
pub mod probe;
pub mod process;
