//! Launcher settings loading and validation.
//!
//! Settings come from four layers, later layers winning:
//!
//! 1. built-in defaults,
//! 2. `<root>/jobguru.toml` (optional),
//! 3. `JOBGURU_HOST`, `JOBGURU_PORT`, `JOBGURU_RELOAD` environment variables,
//! 4. command-line flags (applied by the CLI handlers).
//!
//! ```toml
//! [app]
//! dir = "fake_job_guruuu"
//! entry = "fake_job_guru.api:app"
//!
//! [server]
//! host = "127.0.0.1"
//! port = 8000
//! reload = true
//!
//! [runtime]
//! python = "python3"
//! venv_dir = ".venv"
//! marker = "uvicorn"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;
use crate::domain::launch::{AppReference, DEFAULT_ENTRY, DEFAULT_HOST, DEFAULT_PORT};
use crate::domain::layout::{DEFAULT_APP_DIR, DEFAULT_VENV_DIR};
use crate::error::{ConfigError, Result};

pub const ENV_HOST: &str = "JOBGURU_HOST";
pub const ENV_PORT: &str = "JOBGURU_PORT";
pub const ENV_RELOAD: &str = "JOBGURU_RELOAD";

/// Application package and entry point.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AppSettings {
    /// Package directory under the project root, added to the import path.
    pub dir: String,
    /// `module:attribute` of the ASGI application.
    pub entry: String,
    /// `entry` names a factory function instead of an application object.
    pub factory: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            dir: DEFAULT_APP_DIR.to_string(),
            entry: DEFAULT_ENTRY.to_string(),
            factory: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Watch sources and restart on change.
    pub reload: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            reload: true,
        }
    }
}

/// Python runtime provisioning.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RuntimeSettings {
    /// System interpreter used to create the virtual environment.
    pub python: String,
    /// Virtual environment directory under the project root.
    pub venv_dir: String,
    /// Package whose presence means the environment is provisioned.
    pub marker: String,
    /// Skip installation when the marker is present.
    pub skip_if_satisfied: bool,
    /// Run provisioning at all before launching.
    pub install: bool,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            python: default_python().to_string(),
            venv_dir: DEFAULT_VENV_DIR.to_string(),
            marker: "uvicorn".to_string(),
            skip_if_satisfied: true,
            install: true,
        }
    }
}

const fn default_python() -> &'static str {
    if cfg!(windows) {
        "python"
    } else {
        "python3"
    }
}

/// Complete launcher settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub app: AppSettings,
    pub server: ServerSettings,
    pub runtime: RuntimeSettings,
    pub logging: LoggingConfig,
}

impl Settings {
    /// Parse settings from TOML content and validate them.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let settings: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file that must exist.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_toml(&content)
    }

    /// Load settings from a TOML file, falling back to defaults when it does
    /// not exist.
    #[allow(clippy::result_large_err)]
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply `JOBGURU_*` overrides from the process environment.
    #[allow(clippy::result_large_err)]
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Apply `JOBGURU_*` overrides from an arbitrary lookup.
    #[allow(clippy::result_large_err)]
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(ENV_HOST) {
            self.server.host = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.server.port = port.trim().parse().map_err(|_| ConfigError::InvalidValue {
                field: "JOBGURU_PORT",
                reason: format!("`{port}` is not a port number"),
            })?;
        }
        if let Some(reload) = lookup(ENV_RELOAD) {
            self.server.reload = parse_flag(&reload).ok_or_else(|| ConfigError::InvalidValue {
                field: "JOBGURU_RELOAD",
                reason: format!("`{reload}` is not a boolean"),
            })?;
        }
        self.validate()
    }

    /// Parsed application entry point.
    #[allow(clippy::result_large_err)]
    pub fn app_reference(&self) -> Result<AppReference> {
        Ok(self.app.entry.parse()?)
    }

    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        if self.server.host.trim().is_empty() {
            return Err(invalid("server.host", "must not be empty"));
        }
        if self.server.port == 0 {
            return Err(invalid("server.port", "must be between 1 and 65535"));
        }
        if !is_relative_name(&self.app.dir) {
            return Err(invalid("app.dir", "must be a directory name under the project root"));
        }
        if !is_relative_name(&self.runtime.venv_dir) {
            return Err(invalid(
                "runtime.venv_dir",
                "must be a directory name under the project root",
            ));
        }
        if self.runtime.marker.trim().is_empty() {
            return Err(invalid("runtime.marker", "must not be empty"));
        }
        if self.runtime.python.trim().is_empty() {
            return Err(invalid("runtime.python", "must not be empty"));
        }
        self.app_reference()?;
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> crate::error::Error {
    ConfigError::InvalidValue {
        field,
        reason: reason.to_string(),
    }
    .into()
}

fn is_relative_name(name: &str) -> bool {
    !name.trim().is_empty() && Path::new(name).is_relative() && !name.contains("..")
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_development_launcher() {
        let settings = Settings::default();
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.server.port, 8000);
        assert!(settings.server.reload);
        assert_eq!(settings.app.entry, "fake_job_guru.api:app");
        assert_eq!(settings.runtime.marker, "uvicorn");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn empty_file_yields_defaults() {
        let settings = Settings::parse_toml("").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let settings = Settings::parse_toml("[server]\nport = 9000\n").unwrap();
        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.app.dir, "fake_job_guruuu");
    }

    #[test]
    fn rejects_bad_entry() {
        let err = Settings::parse_toml("[app]\nentry = \"asgi\"\n").unwrap_err();
        assert!(err.to_string().contains("app.entry"));
    }

    #[test]
    fn rejects_port_zero() {
        let err = Settings::parse_toml("[server]\nport = 0\n").unwrap_err();
        assert!(err.to_string().contains("server.port"));
    }

    #[test]
    fn rejects_app_dir_escaping_root() {
        assert!(Settings::parse_toml("[app]\ndir = \"../elsewhere\"\n").is_err());
        assert!(Settings::parse_toml("[app]\ndir = \"/abs\"\n").is_err());
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = Settings::parse_toml("[server\nport = 1").unwrap_err();
        assert!(err.to_string().contains("failed to parse config"));
    }

    #[test]
    fn env_overrides_file_values() {
        let mut settings = Settings::parse_toml("[server]\nport = 9000\nhost = \"0.0.0.0\"\n").unwrap();
        settings
            .apply_env_from(lookup(&[("JOBGURU_PORT", "9100"), ("JOBGURU_RELOAD", "false")]))
            .unwrap();
        assert_eq!(settings.server.port, 9100);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert!(!settings.server.reload);
    }

    #[test]
    fn env_port_must_be_numeric() {
        let mut settings = Settings::default();
        let err = settings
            .apply_env_from(lookup(&[("JOBGURU_PORT", "eighty")]))
            .unwrap_err();
        assert!(err.to_string().contains("JOBGURU_PORT"));
    }

    #[test]
    fn env_reload_accepts_common_spellings() {
        for (raw, expected) in [("1", true), ("YES", true), ("off", false), ("0", false)] {
            let mut settings = Settings::default();
            settings
                .apply_env_from(lookup(&[("JOBGURU_RELOAD", raw)]))
                .unwrap();
            assert_eq!(settings.server.reload, expected, "value {raw}");
        }
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_or_default(dir.path().join("jobguru.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load(dir.path().join("missing.toml")).unwrap_err();
        assert!(err.to_string().contains("missing.toml"));
    }
}
