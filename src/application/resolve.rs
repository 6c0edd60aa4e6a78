//! Launch configuration resolution.

use tracing::{debug, warn};

use crate::domain::launch::LaunchConfig;
use crate::domain::layout::{resolve_import_paths, resolve_model_path, ProjectLayout};
use crate::domain::provision::Advisory;
use crate::error::Result;
use crate::infrastructure::config::Settings;

/// Project layout described by `settings` under `root`.
pub fn layout_for(root: &std::path::Path, settings: &Settings) -> ProjectLayout {
    ProjectLayout::with_dirs(root, &settings.app.dir, &settings.runtime.venv_dir)
}

/// Derive the launch configuration from the filesystem and settings.
///
/// Reads only; running it twice on an unchanged filesystem gives equal
/// results.
#[allow(clippy::result_large_err)]
pub fn resolve(layout: &ProjectLayout, settings: &Settings) -> Result<LaunchConfig> {
    let model_path = resolve_model_path(layout);
    let config = LaunchConfig {
        model_path,
        import_search_paths: resolve_import_paths(layout),
        host: settings.server.host.clone(),
        port: settings.server.port,
        auto_reload: settings.server.reload,
        application: settings.app_reference()?,
        factory: settings.app.factory,
        reload_dirs: vec![layout.app_dir()],
    };

    debug!(
        root = %layout.root().display(),
        model = ?config.model_path,
        bind = %config.bind_address(),
        reload = config.auto_reload,
        "Resolved launch configuration"
    );
    Ok(config)
}

/// Soft conditions visible from the resolved configuration alone.
pub fn advisories(layout: &ProjectLayout, config: &LaunchConfig) -> Vec<Advisory> {
    if config.model_path.is_some() {
        return Vec::new();
    }
    let expected = layout.model_candidate();
    warn!(
        expected = %expected.display(),
        "Model artifact not found; the server will handle the missing model at load time"
    );
    vec![Advisory::MissingModel { expected }]
}
