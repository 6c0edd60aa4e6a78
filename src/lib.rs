//! Jobguru - development launcher for the Fake Job Guru scam detection service.
//!
//! A single command resolves the project layout, makes sure an isolated Python
//! environment holds the service's dependencies, and hands the process over to
//! the ASGI server with the model path and module search paths configured.
//!
//! # Architecture
//!
//! The crate is split into hexagonal layers:
//!
//! - **`domain`** - Layout rules, launch configuration and provisioning
//!   decisions. Pure; nothing here runs a process.
//! - **`port`** - The `CommandRunner` seam between planning and execution.
//! - **`application`** - Resolve, provision and launch use cases.
//! - **`adapter`** - The CLI (inbound) plus filesystem inspection, system
//!   processes and HTTP verification (outbound).
//! - **`infrastructure`** - Settings loading and logging.
//!
//! # Example
//!
//! ```no_run
//! use jobguru::application::resolve::{layout_for, resolve};
//! use jobguru::infrastructure::config::Settings;
//!
//! let settings = Settings::default();
//! let layout = layout_for(std::path::Path::new("."), &settings);
//! let config = resolve(&layout, &settings)?;
//! println!("serving {} on {}", config.application, config.bind_address());
//! # Ok::<(), jobguru::error::Error>(())
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;
