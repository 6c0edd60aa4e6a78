//! Diagnostic command handlers.

pub mod layout;
pub mod server;

use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::domain::health::{HealthCheckReport, HealthCheckStatus};

/// Print a check report as text or as a single JSON object.
pub(crate) fn print_report(command: &str, title: &str, report: &HealthCheckReport) {
    if output::is_json() {
        let checks = report
            .checks
            .iter()
            .map(|check| {
                let (status, reason) = status_parts(&check.status);
                json!({
                    "name": check.name,
                    "critical": check.critical,
                    "status": status,
                    "details": reason.or(check.detail.as_deref()),
                })
            })
            .collect::<Vec<_>>();

        output::json_output(json!({
            "command": command,
            "status": if report.is_healthy() { "healthy" } else { "unhealthy" },
            "checks": checks,
        }));
        return;
    }

    output::section(title);
    for check in &report.checks {
        let (status, reason) = status_parts(&check.status);
        let suffix = if check.critical { "" } else { " (optional)" };
        let details = reason.or(check.detail.as_deref());
        output::field(
            &format!("{}{}", check.name, suffix),
            match details {
                Some(details) => format!("{status}: {details}"),
                None => status.to_string(),
            },
        );
    }
}

fn status_parts(status: &HealthCheckStatus) -> (&'static str, Option<&str>) {
    match status {
        HealthCheckStatus::Healthy => ("ok", None),
        HealthCheckStatus::Unhealthy(reason) => ("failed", Some(reason.as_str())),
    }
}
