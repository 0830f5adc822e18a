//! Directory enumeration for package directories

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[cfg(test)]
use mockall::automock;
use tracing::debug;

use crate::portage::misc::is_ebuild;

/// Source of ebuild paths for a package directory
#[cfg_attr(test, automock)]
pub trait EbuildSource {
    /// List the ebuilds found in `dir`.
    ///
    /// A path that is not a directory yields an empty list.
    fn ebuilds(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;
}

/// Lists `*.ebuild` files straight from the filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsEbuildSource;

impl EbuildSource for FsEbuildSource {
    fn ebuilds(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        if !dir.is_dir() {
            debug!("{:?} is not a directory, no ebuilds", dir);
            return Ok(Vec::new());
        }

        let mut ebuilds = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if is_ebuild(&path) && path.is_file() {
                ebuilds.push(path);
            }
        }
        ebuilds.sort();

        debug!("Found {} ebuilds in {:?}", ebuilds.len(), dir);
        Ok(ebuilds)
    }
}
