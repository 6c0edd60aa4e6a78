//! Module resolution and server handoff.

use std::convert::Infallible;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::adapter::outbound::process;
use crate::domain::launch::{LaunchConfig, ServerCommand};
use crate::domain::layout::ProjectLayout;
use crate::error::{Error, Result};
use crate::infrastructure::config::RuntimeSettings;

/// Find the source of the application module on the search paths.
///
/// `pkg.mod` matches `pkg/mod.py` or `pkg/mod/__init__.py`; the first search
/// path that contains it wins.
pub fn locate_module(config: &LaunchConfig) -> Option<PathBuf> {
    let relative: PathBuf = config.application.module_segments().collect();
    config.import_search_paths.iter().find_map(|base| {
        let candidate = base.join(&relative);
        let as_file = candidate.with_extension("py");
        if as_file.is_file() {
            return Some(as_file);
        }
        let as_package = candidate.join("__init__.py");
        as_package.is_file().then_some(as_package)
    })
}

/// Check the application package directory and entry module exist.
#[allow(clippy::result_large_err)]
pub fn verify_application(layout: &ProjectLayout, config: &LaunchConfig) -> Result<PathBuf> {
    let unresolved = || Error::UnresolvedApplicationModule {
        module: config.application.module().to_string(),
        searched: config.import_search_paths.clone(),
    };

    if !layout.app_dir().is_dir() {
        debug!(app_dir = %layout.app_dir().display(), "Application package directory missing");
        return Err(unresolved());
    }

    let source = locate_module(config).ok_or_else(unresolved)?;
    debug!(module = %config.application.module(), source = %source.display(), "Located application module");
    Ok(source)
}

/// Interpreter for the server: the virtual environment's when present.
pub fn interpreter(layout: &ProjectLayout, runtime: &RuntimeSettings) -> PathBuf {
    let venv_python = layout.venv_python();
    if venv_python.exists() {
        venv_python
    } else {
        PathBuf::from(&runtime.python)
    }
}

/// Verify the application and build the server command.
///
/// Nothing binds a port before this succeeds.
#[allow(clippy::result_large_err)]
pub fn prepare(
    layout: &ProjectLayout,
    config: &LaunchConfig,
    interpreter: &Path,
    inherited_import_path: Option<&OsStr>,
) -> Result<ServerCommand> {
    verify_application(layout, config)?;
    Ok(config.server_command(interpreter, layout.root(), inherited_import_path)?)
}

/// Verify, build and hand off to the server. Only returns on failure.
#[allow(clippy::result_large_err)]
pub fn launch(
    layout: &ProjectLayout,
    config: &LaunchConfig,
    runtime: &RuntimeSettings,
) -> Result<Infallible> {
    let inherited = std::env::var_os(crate::domain::launch::IMPORT_PATH_VAR);
    let server = prepare(layout, config, &interpreter(layout, runtime), inherited.as_deref())?;

    info!(
        bind = %config.bind_address(),
        app = %config.application,
        reload = config.auto_reload,
        model = ?config.model_path,
        "Starting server"
    );
    process::hand_off(&server)
}
