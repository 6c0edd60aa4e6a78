//! Loads the project a command operates on.
//!
//! Settings are layered as documented in
//! [`settings`](crate::infrastructure::config::settings), with command-line
//! overrides applied last.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::adapter::inbound::cli::command::RunArgs;
use crate::application::resolve::layout_for;
use crate::domain::layout::ProjectLayout;
use crate::error::Result;
use crate::infrastructure::config::Settings;

/// Environment file loaded from the project root.
const DOTENV_FILE: &str = ".env";

/// Settings and layout for one invocation.
#[derive(Debug, Clone)]
pub struct Project {
    pub settings: Settings,
    pub layout: ProjectLayout,
    /// Settings file that was read, if any.
    pub settings_file: Option<PathBuf>,
}

/// Load settings for `root` and apply `overrides`.
///
/// An explicit `config` path must exist; the default `<root>/jobguru.toml`
/// is optional.
#[allow(clippy::result_large_err)]
pub fn load(root: &Path, config: Option<&Path>, overrides: &RunArgs) -> Result<Project> {
    let root_layout = ProjectLayout::new(root);

    let dotenv = root_layout.root().join(DOTENV_FILE);
    if dotenv.is_file() {
        // Existing variables win over the file.
        let _ = dotenvy::from_path(&dotenv);
    }

    let (mut settings, settings_file) = match config {
        Some(path) => (Settings::load(path)?, Some(path.to_path_buf())),
        None => {
            let path = root_layout.settings_file();
            let found = path.is_file().then(|| path.clone());
            (Settings::load_or_default(&path)?, found)
        }
    };
    settings.apply_env()?;
    apply_overrides(&mut settings, overrides)?;

    let layout = layout_for(root_layout.root(), &settings);
    debug!(
        root = %layout.root().display(),
        settings = ?settings_file,
        "Loaded project"
    );
    Ok(Project {
        settings,
        layout,
        settings_file,
    })
}

/// Apply command-line launch overrides on top of file and environment
/// settings.
#[allow(clippy::result_large_err)]
pub fn apply_overrides(settings: &mut Settings, overrides: &RunArgs) -> Result<()> {
    if let Some(host) = &overrides.host {
        settings.server.host = host.clone();
    }
    if let Some(port) = overrides.port {
        settings.server.port = port;
    }
    if overrides.no_reload {
        settings.server.reload = false;
    }
    if overrides.no_install {
        settings.runtime.install = false;
    }
    if overrides.reinstall {
        settings.runtime.skip_if_satisfied = false;
    }
    settings.validate()
}
