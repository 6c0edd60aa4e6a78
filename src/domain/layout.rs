//! Fixed filesystem layout of a Fake Job Guru project.
//!
//! ```text
//! <root>/
//!   models/scam_detector.pkl      optional model artifact
//!   requirements.txt              optional manifest (checked first)
//!   <app-dir>/requirements.txt    optional manifest (checked second)
//!   <app-dir>/                    application package directory
//!   .venv/                        managed virtual environment
//! ```

use std::path::{Path, PathBuf};

/// Directory holding the model artifact, relative to the project root.
pub const MODELS_DIR: &str = "models";

/// File name of the serialized scam detector.
pub const MODEL_FILE: &str = "scam_detector.pkl";

/// Dependency manifest file name.
pub const REQUIREMENTS_FILE: &str = "requirements.txt";

/// Default application package directory.
pub const DEFAULT_APP_DIR: &str = "fake_job_guruuu";

/// Default virtual environment directory.
pub const DEFAULT_VENV_DIR: &str = ".venv";

/// Resolved project layout.
///
/// The root is always absolute. It is never canonicalized, so every derived
/// path is exactly `<root>/...` as the caller spelled it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
    app_dir: String,
    venv_dir: String,
}

impl ProjectLayout {
    /// Build a layout with the default app and venv directories.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self::with_dirs(root, DEFAULT_APP_DIR, DEFAULT_VENV_DIR)
    }

    /// Build a layout with explicit app and venv directory names.
    pub fn with_dirs(
        root: impl AsRef<Path>,
        app_dir: impl Into<String>,
        venv_dir: impl Into<String>,
    ) -> Self {
        Self {
            root: absolutize(root.as_ref()),
            app_dir: app_dir.into(),
            venv_dir: venv_dir.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn app_dir_name(&self) -> &str {
        &self.app_dir
    }

    /// `<root>/<app-dir>`.
    pub fn app_dir(&self) -> PathBuf {
        self.root.join(&self.app_dir)
    }

    /// `<root>/models/scam_detector.pkl`, whether or not it exists.
    pub fn model_candidate(&self) -> PathBuf {
        self.root.join(MODELS_DIR).join(MODEL_FILE)
    }

    /// Manifest locations in the order they are tried.
    pub fn requirement_candidates(&self) -> [PathBuf; 2] {
        [
            self.root.join(REQUIREMENTS_FILE),
            self.app_dir().join(REQUIREMENTS_FILE),
        ]
    }

    /// `<root>/<venv-dir>`.
    pub fn venv_dir(&self) -> PathBuf {
        self.root.join(&self.venv_dir)
    }

    /// Interpreter inside the virtual environment.
    pub fn venv_python(&self) -> PathBuf {
        let venv = self.venv_dir();
        if cfg!(windows) {
            venv.join("Scripts").join("python.exe")
        } else {
            venv.join("bin").join("python")
        }
    }

    /// Project configuration file.
    pub fn settings_file(&self) -> PathBuf {
        self.root.join("jobguru.toml")
    }
}

/// Returns the model artifact path when it exists as a regular file.
///
/// A missing model is a valid result; the server decides how to handle it.
pub fn resolve_model_path(layout: &ProjectLayout) -> Option<PathBuf> {
    let candidate = layout.model_candidate();
    candidate.is_file().then_some(candidate)
}

/// Returns the module search paths: the root first, then the app directory.
///
/// Root-level modules shadow nested ones on a name collision.
pub fn resolve_import_paths(layout: &ProjectLayout) -> Vec<PathBuf> {
    vec![layout.root().to_path_buf(), layout.app_dir()]
}

/// Returns the first manifest candidate that exists.
pub fn first_manifest(layout: &ProjectLayout) -> Option<PathBuf> {
    layout
        .requirement_candidates()
        .into_iter()
        .find(|path| path.is_file())
}

fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    let base = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/"));
    if path == Path::new(".") {
        base
    } else {
        base.join(path)
    }
}
