//! Handler for `check layout`.

use crate::adapter::inbound::cli::command::Cli;
use crate::adapter::inbound::cli::run::UNRESOLVED_HINT;
use crate::adapter::inbound::cli::{output, project};
use crate::adapter::outbound::probe;
use crate::application::{resolve, verify_application};
use crate::domain::health::{HealthCheckEntry, HealthCheckReport};
use crate::domain::launch::LaunchConfig;
use crate::domain::layout::{first_manifest, ProjectLayout};
use crate::error::Result;
use crate::infrastructure::config::RuntimeSettings;

/// Check the project is launchable without provisioning or starting anything.
#[allow(clippy::result_large_err)]
pub fn execute(cli: &Cli) -> Result<()> {
    let project = project::load(&cli.root, cli.config.as_deref(), &cli.run)?;
    project.settings.logging.init(cli.verbose);

    let config = resolve::resolve(&project.layout, &project.settings)?;
    let verified = verify_application(&project.layout, &config).map(|_| ());
    let report = layout_report(&project.layout, &config, &project.settings.runtime);

    super::print_report("check.layout", "Project Layout", &report);

    if !report.is_healthy() {
        output::error("Layout check failed");
        if verified.is_err() {
            output::hint(UNRESOLVED_HINT);
        }
        verified?;
    }
    if !output::is_json() {
        output::success("Project is ready to launch");
    }
    Ok(())
}

/// Critical checks cover what the launch needs; the rest are advisory.
pub fn layout_report(
    layout: &ProjectLayout,
    config: &LaunchConfig,
    runtime: &RuntimeSettings,
) -> HealthCheckReport {
    let mut checks = Vec::new();

    let app_dir = layout.app_dir();
    checks.push(if app_dir.is_dir() {
        HealthCheckEntry::healthy("app dir", Some(app_dir.display().to_string()))
    } else {
        HealthCheckEntry::unhealthy("app dir", format!("{} is missing", app_dir.display()))
    });

    checks.push(match verify_application(layout, config) {
        Ok(source) => HealthCheckEntry::healthy(
            "application",
            Some(format!("{} in {}", config.application, source.display())),
        ),
        Err(_) => HealthCheckEntry::unhealthy(
            "application",
            format!("module `{}` not found", config.application.module()),
        ),
    });

    checks.push(optional(match &config.model_path {
        Some(path) => HealthCheckEntry::healthy("model", Some(path.display().to_string())),
        None => HealthCheckEntry::unhealthy(
            "model",
            format!("{} not found", layout.model_candidate().display()),
        ),
    }));

    checks.push(optional(match first_manifest(layout) {
        Some(path) => HealthCheckEntry::healthy("requirements", Some(path.display().to_string())),
        None => HealthCheckEntry::unhealthy("requirements", "no requirements.txt found"),
    }));

    let observed = probe::observe(layout, &runtime.marker);
    checks.push(optional(if !observed.venv_exists {
        HealthCheckEntry::unhealthy(
            "environment",
            format!("{} not created yet", observed.venv_dir.display()),
        )
    } else if !observed.marker_installed {
        HealthCheckEntry::unhealthy(
            "environment",
            format!("`{}` not installed", runtime.marker),
        )
    } else {
        HealthCheckEntry::healthy("environment", Some(observed.venv_dir.display().to_string()))
    }));

    HealthCheckReport { checks }
}

fn optional(mut entry: HealthCheckEntry) -> HealthCheckEntry {
    entry.critical = false;
    entry
}
