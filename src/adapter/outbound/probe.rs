//! Filesystem inspection of the project's virtual environment.
//!
//! The marker check looks at `site-packages` directly instead of starting an
//! interpreter, so it stays fast on every launch.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::layout::{first_manifest, ProjectLayout};
use crate::domain::provision::EnvironmentObservation;

/// Observe the virtual environment, marker package and manifests.
pub fn observe(layout: &ProjectLayout, marker: &str) -> EnvironmentObservation {
    let venv_dir = layout.venv_dir();
    let venv_exists = layout.venv_python().exists();
    let marker_installed = venv_exists && marker_installed(&venv_dir, marker);
    let manifest = first_manifest(layout);

    debug!(
        venv = %venv_dir.display(),
        venv_exists,
        marker,
        marker_installed,
        manifest = ?manifest,
        "Observed environment"
    );

    EnvironmentObservation {
        venv_dir,
        venv_exists,
        marker_installed,
        manifest,
    }
}

/// `site-packages` directories of a virtual environment.
///
/// Unix layouts use `lib/<implementation>X.Y/site-packages`, Windows uses
/// `Lib/site-packages`.
pub fn site_packages(venv_dir: &Path) -> Vec<PathBuf> {
    let mut dirs = Vec::new();

    for lib in ["lib", "lib64"] {
        let Ok(entries) = fs::read_dir(venv_dir.join(lib)) else {
            continue;
        };
        // `python3.X` for CPython, `pypy3.X` for PyPy.
        let mut found: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path().join("site-packages"))
            .filter(|path| path.is_dir())
            .collect();
        found.sort();
        dirs.extend(found);
    }

    let windows = venv_dir.join("Lib").join("site-packages");
    if windows.is_dir() && !dirs.contains(&windows) {
        dirs.push(windows);
    }

    dirs
}

/// True when `marker` is importable from the environment's `site-packages`.
///
/// Accepts a package directory, a single-module file, or a `.dist-info`
/// record. Distribution names are normalized (`-`/`.` to `_`, lowercase).
pub fn marker_installed(venv_dir: &Path, marker: &str) -> bool {
    let wanted = normalize(marker);
    site_packages(venv_dir)
        .iter()
        .any(|dir| contains_marker(dir, &wanted))
}

fn contains_marker(dir: &Path, wanted: &str) -> bool {
    let Ok(entries) = fs::read_dir(dir) else {
        return false;
    };

    entries.filter_map(|entry| entry.ok()).any(|entry| {
        let name = entry.file_name().to_string_lossy().to_string();
        let path = entry.path();
        if path.is_dir() {
            if normalize(&name) == wanted {
                return true;
            }
            if let Some(dist) = name.strip_suffix(".dist-info") {
                let project = dist.split('-').next().unwrap_or(dist);
                return normalize(project) == wanted;
            }
            return false;
        }
        name.strip_suffix(".py")
            .is_some_and(|module| normalize(module) == wanted)
    })
}

fn normalize(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            '-' | '.' => '_',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn venv_with_python() -> (TempDir, ProjectLayout) {
        let dir = tempfile::tempdir().unwrap();
        let layout = ProjectLayout::with_dirs(dir.path(), "app", ".venv");
        let python = layout.venv_python();
        fs::create_dir_all(python.parent().unwrap()).unwrap();
        fs::write(&python, b"").unwrap();
        (dir, layout)
    }

    fn site(layout: &ProjectLayout) -> PathBuf {
        let site = layout
            .venv_dir()
            .join("lib")
            .join("python3.11")
            .join("site-packages");
        fs::create_dir_all(&site).unwrap();
        site
    }

    #[test]
    fn missing_venv_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let layout = ProjectLayout::with_dirs(dir.path(), "app", ".venv");
        let observed = observe(&layout, "uvicorn");
        assert!(!observed.venv_exists);
        assert!(!observed.marker_installed);
        assert_eq!(observed.venv_dir, dir.path().join(".venv"));
    }

    #[test]
    fn package_directory_counts_as_installed() {
        let (_dir, layout) = venv_with_python();
        fs::create_dir_all(site(&layout).join("uvicorn")).unwrap();
        assert!(observe(&layout, "uvicorn").marker_installed);
    }

    #[test]
    fn dist_info_counts_as_installed() {
        let (_dir, layout) = venv_with_python();
        fs::create_dir_all(site(&layout).join("Typing_Extensions-4.12.2.dist-info")).unwrap();
        assert!(marker_installed(&layout.venv_dir(), "typing-extensions"));
    }

    #[test]
    fn single_module_file_counts_as_installed() {
        let (_dir, layout) = venv_with_python();
        fs::write(site(&layout).join("six.py"), b"").unwrap();
        assert!(marker_installed(&layout.venv_dir(), "six"));
    }

    #[test]
    fn other_packages_do_not_match() {
        let (_dir, layout) = venv_with_python();
        fs::create_dir_all(site(&layout).join("uvicorn_worker")).unwrap();
        fs::create_dir_all(site(&layout).join("fastapi")).unwrap();
        assert!(!marker_installed(&layout.venv_dir(), "uvicorn"));
    }

    #[test]
    fn pypy_layout_is_searched() {
        let (_dir, layout) = venv_with_python();
        let site = layout
            .venv_dir()
            .join("lib")
            .join("pypy3.10")
            .join("site-packages");
        fs::create_dir_all(site.join("uvicorn")).unwrap();
        assert!(marker_installed(&layout.venv_dir(), "uvicorn"));
        assert!(observe(&layout, "uvicorn").marker_installed);
    }

    #[test]
    fn windows_layout_is_searched() {
        let dir = tempfile::tempdir().unwrap();
        let site = dir.path().join("Lib").join("site-packages");
        fs::create_dir_all(site.join("uvicorn")).unwrap();
        assert!(marker_installed(dir.path(), "uvicorn"));
    }

    #[test]
    fn manifest_is_observed() {
        let (dir, layout) = venv_with_python();
        fs::write(dir.path().join("requirements.txt"), "uvicorn\n").unwrap();
        assert_eq!(
            observe(&layout, "uvicorn").manifest,
            Some(dir.path().join("requirements.txt"))
        );
    }
}
