//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!        ┌─────────────────────────┐
//!        │      Application        │
//!        │   resolve / provision   │
//!        └────────────┬────────────┘
//!                     │ CommandRunner
//!                     ▼
//!              ┌─────────────┐
//!              │   Process   │
//!              │   Adapter   │
//!              └─────────────┘
//! ```

pub mod outbound;

pub use outbound::runner::{CommandRunner, Invocation};
