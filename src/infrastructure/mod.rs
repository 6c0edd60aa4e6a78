//! Infrastructure layer.
//!
//! Technical concerns that support the application without containing launch
//! logic: settings loading and logging setup.

pub mod config;
