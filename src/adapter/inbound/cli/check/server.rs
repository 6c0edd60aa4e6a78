//! Handler for `check server`.

use std::time::Duration;

use crate::adapter::inbound::cli::command::{Cli, ServerCheckArgs};
use crate::adapter::inbound::cli::{output, project};
use crate::adapter::outbound::http::ServerProbe;
use crate::domain::health::HealthCheckStatus;
use crate::error::{Error, Result};
use crate::infrastructure::config::ServerSettings;

/// Verify a running server's health, UI and analysis endpoints.
#[allow(clippy::result_large_err)]
pub fn execute(cli: &Cli, args: &ServerCheckArgs) -> Result<()> {
    let project = project::load(&cli.root, cli.config.as_deref(), &cli.run)?;
    project.settings.logging.init(cli.verbose);

    let url = args
        .url
        .clone()
        .unwrap_or_else(|| default_url(&project.settings.server));
    let probe = ServerProbe::new(url, Duration::from_secs(args.timeout))?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let report = runtime.block_on(probe.verify());

    super::print_report("check.server", "Server Check", &report);

    if let Some(reason) = report.checks.iter().find_map(|check| match &check.status {
        HealthCheckStatus::Unhealthy(reason) => Some(format!("{}: {reason}", check.name)),
        HealthCheckStatus::Healthy => None,
    }) {
        output::error(&format!("Server at {} failed verification", probe.base_url()));
        return Err(Error::Verification(reason));
    }

    if !output::is_json() {
        output::success(&format!("Server at {} is healthy", probe.base_url()));
    }
    Ok(())
}

/// Address the launcher would bind, reachable from this machine.
fn default_url(server: &ServerSettings) -> String {
    let host = match server.host.as_str() {
        "0.0.0.0" => "127.0.0.1".to_string(),
        "::" | "[::]" => "[::1]".to_string(),
        host if host.contains(':') && !host.starts_with('[') => format!("[{host}]"),
        host => host.to_string(),
    };
    format!("http://{host}:{}", server.port)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_url_uses_configured_bind() {
        let server = ServerSettings {
            port: 9000,
            ..ServerSettings::default()
        };
        assert_eq!(default_url(&server), "http://127.0.0.1:9000");
    }

    #[test]
    fn ipv6_host_is_bracketed() {
        let server = ServerSettings {
            host: "::1".to_string(),
            ..ServerSettings::default()
        };
        let url = default_url(&server);
        assert_eq!(url, "http://[::1]:8000");
        assert!(reqwest::Url::parse(&url).is_ok());

        let bracketed = ServerSettings {
            host: "[fe80::1]".to_string(),
            ..ServerSettings::default()
        };
        assert_eq!(default_url(&bracketed), "http://[fe80::1]:8000");
    }

    #[test]
    fn wildcard_bind_uses_loopback() {
        let server = ServerSettings {
            host: "0.0.0.0".to_string(),
            ..ServerSettings::default()
        };
        assert_eq!(default_url(&server), "http://127.0.0.1:8000");
    }
}
