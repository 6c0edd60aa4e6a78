//! Handler for the `config` command group.

use serde_json::json;

use crate::adapter::inbound::cli::command::{Cli, RunArgs};
use crate::adapter::inbound::cli::{output, project};
use crate::application::launch::interpreter;
use crate::application::resolve;
use crate::domain::launch::{IMPORT_PATH_VAR, MODEL_PATH_VAR};
use crate::error::Result;

/// Execute `config show`.
#[allow(clippy::result_large_err)]
pub fn execute_show(cli: &Cli, args: &RunArgs) -> Result<()> {
    let project = project::load(&cli.root, cli.config.as_deref(), args)?;
    project.settings.logging.init(cli.verbose);

    let config = resolve::resolve(&project.layout, &project.settings)?;
    let python = interpreter(&project.layout, &project.settings.runtime);
    let inherited = std::env::var_os(IMPORT_PATH_VAR);
    let server = config.server_command(&python, project.layout.root(), inherited.as_deref())?;

    let env_value = |key: &str| {
        server
            .env_value(key)
            .map(|value| value.to_string_lossy().into_owned())
    };

    if output::is_json() {
        output::json_output(json!({
            "command": "config.show",
            "root": project.layout.root(),
            "settings_file": project.settings_file,
            "settings": project.settings,
            "launch": config,
            "server": {
                "command": server.to_string(),
                "working_dir": server.working_dir,
                "env": {
                    MODEL_PATH_VAR: env_value(MODEL_PATH_VAR),
                    IMPORT_PATH_VAR: env_value(IMPORT_PATH_VAR),
                },
            },
        }));
        return Ok(());
    }

    output::section("Project");
    output::field("Root", project.layout.root().display());
    output::field(
        "Settings",
        project
            .settings_file
            .as_ref()
            .map_or_else(|| "(defaults)".to_string(), |p| p.display().to_string()),
    );
    output::field("App dir", project.layout.app_dir().display());
    output::field("Venv", project.layout.venv_dir().display());

    output::section("Server");
    output::field("App", &config.application);
    output::field("Factory", config.factory);
    output::field("Bind", config.bind_address());
    output::field("Reload", config.auto_reload);
    output::field(
        "Model",
        config
            .model_path
            .as_ref()
            .map_or_else(|| "not found".to_string(), |p| p.display().to_string()),
    );

    output::section("Import Path");
    for path in &config.import_search_paths {
        output::note(&path.display().to_string());
    }

    output::section("Command");
    output::note(&server.to_string());
    Ok(())
}
