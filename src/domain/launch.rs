//! Launch configuration handed to the server process.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;

use crate::error::ConfigError;

/// Default bind address.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default bind port.
pub const DEFAULT_PORT: u16 = 8000;

/// Canonical entry point of the scam detector service.
pub const DEFAULT_ENTRY: &str = "fake_job_guru.api:app";

/// Variable the server reads the model location from.
pub const MODEL_PATH_VAR: &str = "SCAM_MODEL_PATH";

/// Module search path variable of the Python interpreter.
pub const IMPORT_PATH_VAR: &str = "PYTHONPATH";

/// A `module:attribute` reference to the application object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppReference {
    module: String,
    attribute: String,
}

impl AppReference {
    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// Module path split into its dotted components.
    pub fn module_segments(&self) -> impl Iterator<Item = &str> {
        self.module.split('.')
    }
}

impl FromStr for AppReference {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ConfigError::InvalidValue {
            field: "app.entry",
            reason: format!("`{s}`: {reason}"),
        };

        let (module, attribute) = s
            .split_once(':')
            .ok_or_else(|| invalid("expected `module:attribute`"))?;
        let valid_ident =
            |part: &str| !part.is_empty() && part.chars().all(|c| c.is_alphanumeric() || c == '_');

        if module.is_empty() || !module.split('.').all(valid_ident) {
            return Err(invalid("module must be a dotted path of identifiers"));
        }
        if !valid_ident(attribute) {
            return Err(invalid("attribute must be an identifier"));
        }

        Ok(Self {
            module: module.to_string(),
            attribute: attribute.to_string(),
        })
    }
}

impl fmt::Display for AppReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.module, self.attribute)
    }
}

impl Default for AppReference {
    fn default() -> Self {
        Self {
            module: "fake_job_guru.api".to_string(),
            attribute: "app".to_string(),
        }
    }
}

/// Everything the server needs to start.
///
/// Built fresh on every launch and never mutated after handoff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchConfig {
    /// Absolute path to the model artifact, when one exists.
    pub model_path: Option<PathBuf>,
    /// Module search directories in priority order.
    pub import_search_paths: Vec<PathBuf>,
    pub host: String,
    pub port: u16,
    /// Restart the server when sources change.
    pub auto_reload: bool,
    pub application: AppReference,
    /// The attribute is a factory returning the application object.
    pub factory: bool,
    /// Directories watched when `auto_reload` is on.
    pub reload_dirs: Vec<PathBuf>,
}

impl LaunchConfig {
    /// `host:port` as the server will bind it.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Environment additions for the server process.
    ///
    /// `SCAM_MODEL_PATH` is only present when a model resolved. The search
    /// paths are prepended to `inherited_import_path`, never replacing it.
    #[allow(clippy::result_large_err)]
    pub fn server_env(
        &self,
        inherited_import_path: Option<&OsStr>,
    ) -> Result<Vec<(OsString, OsString)>, ConfigError> {
        let mut env = Vec::with_capacity(2);
        if let Some(model) = &self.model_path {
            env.push((OsString::from(MODEL_PATH_VAR), model.clone().into_os_string()));
        }
        env.push((
            OsString::from(IMPORT_PATH_VAR),
            prepend_search_paths(&self.import_search_paths, inherited_import_path)?,
        ));
        Ok(env)
    }

    /// The uvicorn command line that serves the application.
    #[allow(clippy::result_large_err)]
    pub fn server_command(
        &self,
        interpreter: &Path,
        working_dir: &Path,
        inherited_import_path: Option<&OsStr>,
    ) -> Result<ServerCommand, ConfigError> {
        let mut args: Vec<OsString> = vec![
            "-m".into(),
            "uvicorn".into(),
            self.application.to_string().into(),
            "--host".into(),
            self.host.clone().into(),
            "--port".into(),
            self.port.to_string().into(),
        ];
        if self.factory {
            args.push("--factory".into());
        }
        if self.auto_reload {
            args.push("--reload".into());
            for dir in &self.reload_dirs {
                args.push("--reload-dir".into());
                args.push(dir.clone().into_os_string());
            }
        }

        Ok(ServerCommand {
            program: interpreter.to_path_buf(),
            args,
            env: self.server_env(inherited_import_path)?,
            working_dir: working_dir.to_path_buf(),
        })
    }
}

/// A fully described server process.
///
/// The environment is carried explicitly instead of being written into the
/// launcher's own process environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerCommand {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    /// Variables set on top of the inherited environment.
    pub env: Vec<(OsString, OsString)>,
    pub working_dir: PathBuf,
}

impl ServerCommand {
    /// Value this command sets for `key`, if any.
    pub fn env_value(&self, key: &str) -> Option<&OsStr> {
        self.env
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_os_str())
    }
}

impl fmt::Display for ServerCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Join `paths` ahead of an existing search path using the platform separator.
#[allow(clippy::result_large_err)]
pub fn prepend_search_paths(
    paths: &[PathBuf],
    existing: Option<&OsStr>,
) -> Result<OsString, ConfigError> {
    let mut all: Vec<PathBuf> = paths.to_vec();
    if let Some(existing) = existing.filter(|value| !value.is_empty()) {
        all.extend(std::env::split_paths(existing));
    }
    std::env::join_paths(all).map_err(|e| ConfigError::InvalidValue {
        field: "PYTHONPATH",
        reason: e.to_string(),
    })
}
