//! Results of probing a running server.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "lowercase")]
pub enum HealthCheckStatus {
    Healthy,
    Unhealthy(String),
}

/// Individual health check entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthCheckEntry {
    pub name: String,
    pub critical: bool,
    pub status: HealthCheckStatus,
    /// Extra information reported by a passing check.
    pub detail: Option<String>,
}

impl HealthCheckEntry {
    pub fn healthy(name: impl Into<String>, detail: Option<String>) -> Self {
        Self {
            name: name.into(),
            critical: true,
            status: HealthCheckStatus::Healthy,
            detail,
        }
    }

    pub fn unhealthy(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            critical: true,
            status: HealthCheckStatus::Unhealthy(reason.into()),
            detail: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HealthCheckReport {
    pub checks: Vec<HealthCheckEntry>,
}

impl HealthCheckReport {
    /// True when all critical checks are healthy.
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.checks
            .iter()
            .filter(|check| check.critical)
            .all(|check| matches!(&check.status, HealthCheckStatus::Healthy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_is_healthy() {
        assert!(HealthCheckReport::default().is_healthy());
    }

    #[test]
    fn one_critical_failure_fails_report() {
        let report = HealthCheckReport {
            checks: vec![
                HealthCheckEntry::healthy("health", None),
                HealthCheckEntry::unhealthy("ui", "status 404"),
            ],
        };
        assert!(!report.is_healthy());
    }

    #[test]
    fn non_critical_failure_is_tolerated() {
        let mut entry = HealthCheckEntry::unhealthy("ui", "status 404");
        entry.critical = false;
        let report = HealthCheckReport {
            checks: vec![HealthCheckEntry::healthy("health", None), entry],
        };
        assert!(report.is_healthy());
    }
}
