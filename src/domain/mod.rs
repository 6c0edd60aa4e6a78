//! Launcher domain: project layout, launch configuration and provisioning
//! decisions. Nothing here runs a process.

pub mod health;
pub mod launch;
pub mod layout;
pub mod provision;

pub use health::{HealthCheckEntry, HealthCheckReport, HealthCheckStatus};
pub use launch::{AppReference, LaunchConfig, ServerCommand};
pub use layout::{resolve_import_paths, resolve_model_path, ProjectLayout};
pub use provision::{Advisory, EnvironmentObservation, ProvisionAction, ProvisionPlan, ProvisionPolicy};
