//! Handler for the default launch (`jobguru` or `jobguru run`).

use crate::adapter::inbound::cli::command::{Cli, RunArgs};
use crate::adapter::inbound::cli::{output, project};
use crate::adapter::outbound::process::SystemRunner;
use crate::application::{self, resolve};
use crate::domain::launch::LaunchConfig;
use crate::error::Result;

/// Shown when the application module cannot be found.
pub(crate) const UNRESOLVED_HINT: &str =
    "set `[app] dir` and `[app] entry` in jobguru.toml; use `factory = true` for entries like `create_app`";

/// Resolve, provision and hand off to the server.
///
/// Only returns on failure; a successful launch replaces this process.
#[allow(clippy::result_large_err)]
pub fn execute(cli: &Cli, args: &RunArgs) -> Result<()> {
    let project = project::load(&cli.root, cli.config.as_deref(), args)?;
    project.settings.logging.init(cli.verbose);

    let config = resolve::resolve(&project.layout, &project.settings)?;
    print_startup(&config, &project);
    for advisory in resolve::advisories(&project.layout, &config) {
        output::warning(&advisory.to_string());
    }

    if let Err(e) = application::verify_application(&project.layout, &config) {
        output::hint(UNRESOLVED_HINT);
        return Err(e);
    }

    if project.settings.runtime.install {
        provision(&project)?;
    } else {
        output::note("Skipping dependency provisioning");
    }

    match application::launch(&project.layout, &config, &project.settings.runtime)? {}
}

fn provision(project: &project::Project) -> Result<()> {
    let pb = output::spinner("Checking Python environment...");
    let mut runner = SystemRunner;
    match application::ensure_dependencies(&project.layout, &project.settings.runtime, &mut runner)
    {
        Ok(report) => {
            let message = if report.installed() {
                "Dependencies installed"
            } else {
                "Environment ready"
            };
            output::spinner_success(&pb, message);
            for advisory in &report.plan.advisories {
                output::warning(&advisory.to_string());
            }
            Ok(())
        }
        Err(e) => {
            output::spinner_fail(&pb, "Provisioning failed");
            Err(e)
        }
    }
}

fn print_startup(config: &LaunchConfig, project: &project::Project) {
    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Root", project.layout.root().display());
    output::field("App", &config.application);
    output::field("Listening", format!("http://{}", config.bind_address()));
    output::field("Reload", if config.auto_reload { "on" } else { "off" });
    output::field(
        "Model",
        config
            .model_path
            .as_ref()
            .map_or_else(|| "not found".to_string(), |p| p.display().to_string()),
    );
}
