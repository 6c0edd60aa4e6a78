//! HTTP checks against a running Fake Job Guru server.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use tracing::debug;

use crate::domain::health::{HealthCheckEntry, HealthCheckReport, HealthCheckStatus};
use crate::error::Result;

/// Text the UI page must contain.
const UI_MARKER: &str = "Fake Job Guru";

/// Posting used to exercise the analysis endpoint.
fn sample_posting() -> Value {
    json!({
        "title": "Data Entry Clerk",
        "description": "Earn $500/day working from home. No experience required. Apply via Gmail.",
        "requirements": "Basic typing skills",
        "company_profile": "Small startup",
        "followers": 120,
        "employees": 3,
        "engagement": 1
    })
}

/// Checks `/health`, `/` and `/analyze_job` in order.
#[derive(Debug, Clone)]
pub struct ServerProbe {
    client: Client,
    base_url: String,
}

impl ServerProbe {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Run every check. Later checks are skipped once one fails.
    pub async fn verify(&self) -> HealthCheckReport {
        let mut report = HealthCheckReport::default();

        let health = self.check_health().await;
        let passed = health.status == HealthCheckStatus::Healthy;
        report.checks.push(health);
        if !passed {
            return report;
        }

        let ui = self.check_ui().await;
        let passed = ui.status == HealthCheckStatus::Healthy;
        report.checks.push(ui);
        if !passed {
            return report;
        }

        report.checks.push(self.check_analysis().await);
        report
    }

    async fn check_health(&self) -> HealthCheckEntry {
        const NAME: &str = "health";
        let url = format!("{}/health", self.base_url);
        debug!(%url, "Probing health endpoint");

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => return HealthCheckEntry::unhealthy(NAME, format!("cannot connect: {e}")),
        };
        if response.status() != StatusCode::OK {
            return HealthCheckEntry::unhealthy(NAME, format!("status {}", response.status()));
        }
        let body: Value = match response.json().await {
            Ok(body) => body,
            Err(e) => return HealthCheckEntry::unhealthy(NAME, format!("invalid JSON: {e}")),
        };
        if body.get("status").and_then(Value::as_str) != Some("ok") {
            return HealthCheckEntry::unhealthy(NAME, "status field is not \"ok\"");
        }

        let detail = body
            .get("app_version")
            .and_then(Value::as_str)
            .map(|v| format!("app version {v}"));
        HealthCheckEntry::healthy(NAME, detail)
    }

    async fn check_ui(&self) -> HealthCheckEntry {
        const NAME: &str = "ui";
        let url = format!("{}/", self.base_url);
        debug!(%url, "Probing UI page");

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => return HealthCheckEntry::unhealthy(NAME, e.to_string()),
        };
        if response.status() != StatusCode::OK {
            return HealthCheckEntry::unhealthy(NAME, format!("status {}", response.status()));
        }
        match response.text().await {
            Ok(text) if text.contains(UI_MARKER) => HealthCheckEntry::healthy(NAME, None),
            Ok(_) => HealthCheckEntry::unhealthy(NAME, format!("page does not mention {UI_MARKER}")),
            Err(e) => HealthCheckEntry::unhealthy(NAME, e.to_string()),
        }
    }

    async fn check_analysis(&self) -> HealthCheckEntry {
        const NAME: &str = "analyze_job";
        let url = format!("{}/analyze_job", self.base_url);
        debug!(%url, "Probing analysis endpoint");

        let response = match self.client.post(&url).json(&sample_posting()).send().await {
            Ok(response) => response,
            Err(e) => return HealthCheckEntry::unhealthy(NAME, e.to_string()),
        };
        if response.status() != StatusCode::OK {
            return HealthCheckEntry::unhealthy(NAME, format!("status {}", response.status()));
        }
        let body: Value = match response.json().await {
            Ok(body) => body,
            Err(e) => return HealthCheckEntry::unhealthy(NAME, format!("invalid JSON: {e}")),
        };

        match summarize_analysis(&body) {
            Ok(summary) => HealthCheckEntry::healthy(NAME, Some(summary)),
            Err(reason) => HealthCheckEntry::unhealthy(NAME, reason),
        }
    }
}

/// One-line summary of an analysis response, or what is missing from it.
fn summarize_analysis(body: &Value) -> std::result::Result<String, String> {
    let prediction = body
        .get("prediction")
        .and_then(Value::as_str)
        .ok_or("response has no prediction")?;
    let risk = body
        .get("risk_score")
        .and_then(Value::as_f64)
        .ok_or("response has no risk_score")?;
    let keywords = body
        .pointer("/signals/keywords_triggered")
        .and_then(Value::as_array)
        .ok_or("response has no signals.keywords_triggered")?;

    let keywords = keywords
        .iter()
        .filter_map(Value::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    Ok(format!(
        "prediction {prediction}, risk score {risk}, keywords [{keywords}]"
    ))
}
