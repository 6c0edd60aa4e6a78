//! Error types for the launcher.
//!
//! Fatal launch conditions are variants of [`Error`]. Soft conditions such as a
//! missing model artifact are not errors; see
//! [`Advisory`](crate::domain::provision::Advisory).

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    #[diagnostic(code(jobguru::config::read))]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    #[diagnostic(
        code(jobguru::config::parse),
        help("check jobguru.toml against the documented sections")
    )]
    Parse(#[source] toml::de::Error),

    #[error("invalid value for {field}: {reason}")]
    #[diagnostic(code(jobguru::config::invalid))]
    InvalidValue { field: &'static str, reason: String },
}

#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(
        "application module `{module}` not found on the import search path (searched: {})",
        display_paths(.searched)
    )]
    #[diagnostic(
        code(jobguru::launch::unresolved_module),
        help(
            "check `[app] dir` and `[app] entry` in jobguru.toml; an entry that names a \
             factory such as `create_app` also needs `factory = true`"
        )
    )]
    UnresolvedApplicationModule {
        module: String,
        searched: Vec<PathBuf>,
    },

    #[error("environment provisioning failed during {step}: {reason}")]
    #[diagnostic(
        code(jobguru::provision),
        help("fix the cause and relaunch; installation is not retried automatically")
    )]
    EnvironmentProvisioning { step: String, reason: String },

    #[error("failed to start server {}: {source}", .program.display())]
    #[diagnostic(
        code(jobguru::launch::server_start),
        help("check the interpreter exists; delete the virtual environment to recreate it")
    )]
    ServerStart {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("server verification failed: {0}")]
    #[diagnostic(
        code(jobguru::verify),
        help("is the server running? start it with `jobguru`")
    )]
    Verification(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

fn display_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "(no search paths)".to_string();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
