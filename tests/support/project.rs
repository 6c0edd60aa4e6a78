//! Temporary project trees.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

pub struct TestProject {
    dir: TempDir,
}

impl TestProject {
    /// An empty project root.
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// A project with the application module in the default app directory.
    pub fn with_app() -> Self {
        let project = Self::empty();
        project.write("fake_job_guruuu/fake_job_guru/__init__.py", "");
        project.write("fake_job_guruuu/fake_job_guru/api.py", "app = object()\n");
        project
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    pub fn write(&self, relative: &str, content: &str) -> &Self {
        let path = self.path(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
        self
    }

    pub fn with_model(self) -> Self {
        self.write("models/scam_detector.pkl", "model");
        self
    }

    pub fn with_requirements(self) -> Self {
        self.write("requirements.txt", "fastapi\nuvicorn\n");
        self
    }

    /// Write an executable shell script.
    #[cfg(unix)]
    pub fn script(&self, relative: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        self.write(relative, &format!("#!/bin/sh\n{body}"));
        let path = self.path(relative);
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }
}
