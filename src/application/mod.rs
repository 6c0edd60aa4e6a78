//! Application services: resolve, provision, launch.

pub mod launch;
pub mod provision;
pub mod resolve;

pub use launch::{launch, prepare, verify_application};
pub use provision::{ensure_dependencies, ProvisionReport};
pub use resolve::resolve;
