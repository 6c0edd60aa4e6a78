//! Provisioning decisions for the isolated Python environment.
//!
//! [`plan`] is a pure function from what was observed on disk to the actions
//! that should run. Execution lives in the application layer.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// What the filesystem inspection found.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EnvironmentObservation {
    /// Virtual environment directory.
    pub venv_dir: PathBuf,
    /// The virtual environment exists and has an interpreter.
    pub venv_exists: bool,
    /// The marker package is installed in the virtual environment.
    pub marker_installed: bool,
    /// First existing dependency manifest, if any.
    pub manifest: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProvisionPolicy {
    /// Skip installation when the marker package is already present.
    pub skip_if_satisfied: bool,
}

impl Default for ProvisionPolicy {
    fn default() -> Self {
        Self {
            skip_if_satisfied: true,
        }
    }
}

/// A single provisioning step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ProvisionAction {
    CreateEnvironment { dir: PathBuf },
    InstallRequirements { manifest: PathBuf },
}

impl fmt::Display for ProvisionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateEnvironment { dir } => {
                write!(f, "create virtual environment at {}", dir.display())
            }
            Self::InstallRequirements { manifest } => {
                write!(f, "install requirements from {}", manifest.display())
            }
        }
    }
}

/// A soft condition: reported, never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "advisory", rename_all = "snake_case")]
pub enum Advisory {
    /// The model artifact is absent; the server handles it at load time.
    MissingModel { expected: PathBuf },
    /// The marker package is absent and there is no manifest to install from.
    MissingDependencies { marker: String },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingModel { expected } => {
                write!(f, "model artifact not found at {}", expected.display())
            }
            Self::MissingDependencies { marker } => write!(
                f,
                "`{marker}` is not installed and no requirements.txt was found"
            ),
        }
    }
}

/// Ordered actions plus the soft conditions found while planning.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ProvisionPlan {
    pub actions: Vec<ProvisionAction>,
    pub advisories: Vec<Advisory>,
}

impl ProvisionPlan {
    /// True when nothing needs to run.
    pub fn is_noop(&self) -> bool {
        self.actions.is_empty()
    }

    /// True when the plan installs packages.
    pub fn installs(&self) -> bool {
        self.actions
            .iter()
            .any(|a| matches!(a, ProvisionAction::InstallRequirements { .. }))
    }
}

/// Decide what to run for the observed environment.
pub fn plan(observed: &EnvironmentObservation, marker: &str, policy: ProvisionPolicy) -> ProvisionPlan {
    let mut out = ProvisionPlan::default();

    if !observed.venv_exists {
        out.actions.push(ProvisionAction::CreateEnvironment {
            dir: observed.venv_dir.clone(),
        });
    }

    // A fresh environment never has the marker.
    let satisfied = observed.venv_exists && observed.marker_installed;
    if satisfied && policy.skip_if_satisfied {
        return out;
    }

    match &observed.manifest {
        Some(manifest) => out.actions.push(ProvisionAction::InstallRequirements {
            manifest: manifest.clone(),
        }),
        None if !satisfied => out.advisories.push(Advisory::MissingDependencies {
            marker: marker.to_string(),
        }),
        None => {}
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observed(venv: bool, marker: bool, manifest: Option<&str>) -> EnvironmentObservation {
        EnvironmentObservation {
            venv_dir: PathBuf::from("/proj/.venv"),
            venv_exists: venv,
            marker_installed: marker,
            manifest: manifest.map(PathBuf::from),
        }
    }

    #[test]
    fn fresh_project_creates_and_installs() {
        let plan = plan(
            &observed(false, false, Some("/proj/requirements.txt")),
            "uvicorn",
            ProvisionPolicy::default(),
        );
        assert_eq!(
            plan.actions,
            vec![
                ProvisionAction::CreateEnvironment {
                    dir: PathBuf::from("/proj/.venv")
                },
                ProvisionAction::InstallRequirements {
                    manifest: PathBuf::from("/proj/requirements.txt")
                },
            ]
        );
        assert!(plan.advisories.is_empty());
    }

    #[test]
    fn satisfied_environment_is_a_noop() {
        let plan = plan(
            &observed(true, true, Some("/proj/requirements.txt")),
            "uvicorn",
            ProvisionPolicy::default(),
        );
        assert!(plan.is_noop());
        assert!(plan.advisories.is_empty());
    }

    #[test]
    fn missing_marker_installs_into_existing_environment() {
        let plan = plan(
            &observed(true, false, Some("/proj/app/requirements.txt")),
            "uvicorn",
            ProvisionPolicy::default(),
        );
        assert_eq!(
            plan.actions,
            vec![ProvisionAction::InstallRequirements {
                manifest: PathBuf::from("/proj/app/requirements.txt")
            }]
        );
    }

    #[test]
    fn no_manifest_is_a_soft_condition() {
        let plan = plan(&observed(true, false, None), "uvicorn", ProvisionPolicy::default());
        assert!(plan.is_noop());
        assert_eq!(
            plan.advisories,
            vec![Advisory::MissingDependencies {
                marker: "uvicorn".to_string()
            }]
        );
    }

    #[test]
    fn no_manifest_still_creates_environment() {
        let plan = plan(&observed(false, false, None), "uvicorn", ProvisionPolicy::default());
        assert_eq!(plan.actions.len(), 1);
        assert!(!plan.installs());
        assert_eq!(plan.advisories.len(), 1);
    }

    #[test]
    fn reinstall_policy_ignores_marker() {
        let policy = ProvisionPolicy {
            skip_if_satisfied: false,
        };
        let plan = plan(&observed(true, true, Some("/proj/requirements.txt")), "uvicorn", policy);
        assert!(plan.installs());
    }

    #[test]
    fn reinstall_without_manifest_on_satisfied_env_has_no_advisory() {
        let policy = ProvisionPolicy {
            skip_if_satisfied: false,
        };
        let plan = plan(&observed(true, true, None), "uvicorn", policy);
        assert!(plan.is_noop());
        assert!(plan.advisories.is_empty());
    }

    #[test]
    fn stale_marker_without_environment_is_ignored() {
        let plan = plan(
            &observed(false, true, Some("/proj/requirements.txt")),
            "uvicorn",
            ProvisionPolicy::default(),
        );
        assert!(plan.installs());
    }

    #[test]
    fn actions_render_for_operators() {
        let action = ProvisionAction::InstallRequirements {
            manifest: PathBuf::from("/proj/requirements.txt"),
        };
        assert_eq!(
            action.to_string(),
            "install requirements from /proj/requirements.txt"
        );
    }
}
