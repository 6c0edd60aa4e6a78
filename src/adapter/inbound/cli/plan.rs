//! Handler for the `plan` command.

use serde_json::json;

use crate::adapter::inbound::cli::command::{Cli, PlanArgs, RunArgs};
use crate::adapter::inbound::cli::{output, project};
use crate::application::{provision, resolve};
use crate::domain::provision::ProvisionPlan;
use crate::error::Result;

/// Show what provisioning would do, without running anything.
#[allow(clippy::result_large_err)]
pub fn execute(cli: &Cli, args: &PlanArgs) -> Result<()> {
    let overrides = RunArgs {
        reinstall: args.reinstall,
        ..RunArgs::default()
    };
    let project = project::load(&cli.root, cli.config.as_deref(), &overrides)?;
    project.settings.logging.init(cli.verbose);

    let config = resolve::resolve(&project.layout, &project.settings)?;
    let mut plan = provision::plan_for(&project.layout, &project.settings.runtime);
    plan.advisories
        .extend(resolve::advisories(&project.layout, &config));

    if output::is_json() {
        output::json_output(json!({
            "command": "plan",
            "install_enabled": project.settings.runtime.install,
            "actions": plan.actions,
            "advisories": plan.advisories,
        }));
        return Ok(());
    }

    print_plan(&plan, project.settings.runtime.install);
    Ok(())
}

fn print_plan(plan: &ProvisionPlan, install_enabled: bool) {
    output::section("Provisioning Plan");
    if !install_enabled {
        output::note("Provisioning is disabled ([runtime] install = false)");
    }
    if plan.actions.is_empty() {
        output::success("Environment already provisioned");
    } else {
        for (i, action) in plan.actions.iter().enumerate() {
            output::note(&format!("{}. {action}", i + 1));
        }
    }
    for advisory in &plan.advisories {
        output::warning(&advisory.to_string());
    }
}
