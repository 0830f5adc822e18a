//! Portage tree test utilities

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Temporary repository laid out as `<category>/<package>/<file>`
pub struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn with_ebuilds(self, package: &str, files: &[&str]) -> Self {
        let pkg_dir = self.dir.path().join(package);
        fs::create_dir_all(&pkg_dir).unwrap();
        for file in files {
            fs::write(pkg_dir.join(file), "EAPI=8\n").unwrap();
        }
        self
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn package_dir(&self, package: &str) -> PathBuf {
        self.dir.path().join(package)
    }
}
