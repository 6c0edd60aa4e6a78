//! Dependency provisioning: observe, plan, execute.

use tracing::{info, warn};

use crate::adapter::outbound::probe;
use crate::domain::layout::ProjectLayout;
use crate::domain::provision::{self, ProvisionAction, ProvisionPlan, ProvisionPolicy};
use crate::error::Result;
use crate::infrastructure::config::RuntimeSettings;
use crate::port::outbound::runner::{CommandRunner, Invocation};

/// What provisioning did.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProvisionReport {
    pub plan: ProvisionPlan,
    /// Actions that ran, in order.
    pub executed: Vec<ProvisionAction>,
}

impl ProvisionReport {
    pub fn installed(&self) -> bool {
        self.executed
            .iter()
            .any(|a| matches!(a, ProvisionAction::InstallRequirements { .. }))
    }
}

/// Plan provisioning for the current state of the project without running
/// anything.
pub fn plan_for(layout: &ProjectLayout, runtime: &RuntimeSettings) -> ProvisionPlan {
    let observed = probe::observe(layout, &runtime.marker);
    provision::plan(
        &observed,
        &runtime.marker,
        ProvisionPolicy {
            skip_if_satisfied: runtime.skip_if_satisfied,
        },
    )
}

/// The command that carries out `action`.
pub fn invocation_for(
    action: &ProvisionAction,
    layout: &ProjectLayout,
    runtime: &RuntimeSettings,
) -> Invocation {
    match action {
        ProvisionAction::CreateEnvironment { dir } => {
            Invocation::new("create virtual environment", &runtime.python)
                .arg("-m")
                .arg("venv")
                .arg(dir)
        }
        ProvisionAction::InstallRequirements { manifest } => {
            Invocation::new("install requirements", layout.venv_python())
                .arg("-m")
                .arg("pip")
                .arg("install")
                .arg("-r")
                .arg(manifest)
        }
    }
}

/// Make sure the virtual environment exists and holds the dependencies.
///
/// A fast no-op when the marker package is already installed. Missing
/// manifests are reported as advisories and never fail the launch. A failing
/// command stops provisioning with
/// [`Error::EnvironmentProvisioning`](crate::error::Error::EnvironmentProvisioning).
#[allow(clippy::result_large_err)]
pub fn ensure_dependencies<R: CommandRunner>(
    layout: &ProjectLayout,
    runtime: &RuntimeSettings,
    runner: &mut R,
) -> Result<ProvisionReport> {
    let plan = plan_for(layout, runtime);

    for advisory in &plan.advisories {
        warn!(%advisory, "Continuing without installing dependencies");
    }
    if plan.is_noop() {
        info!(marker = %runtime.marker, "Environment already provisioned");
    }

    let mut report = ProvisionReport {
        plan,
        executed: Vec::new(),
    };
    for action in report.plan.actions.clone() {
        let invocation = invocation_for(&action, layout, runtime);
        info!(%action, command = %invocation, "Provisioning");
        runner.run(&invocation)?;
        report.executed.push(action);
    }

    Ok(report)
}
