//! Package lookup inside portage repositories

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::portage::misc::is_pkg_dir;
use crate::version::{VersionError, VersionSet};

/// Error type for package lookup
#[derive(Debug, Error)]
pub enum FindError {
    #[error("{0} doesn't seem to exist")]
    NonExistentPackage(String),

    #[error("{name} is ambiguous, possible matches: {}", candidates.join(", "))]
    AmbiguousPackage {
        name: String,
        candidates: Vec<String>,
    },

    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Version(#[from] VersionError),
}

/// Categories known to a repository.
///
/// Read from `profiles/categories` when present, otherwise every
/// subdirectory that looks like a category (`foo-bar` or `virtual`).
pub fn categories(portdir: &Path) -> Result<Vec<String>, FindError> {
    let listing = portdir.join("profiles").join("categories");
    if listing.is_file() {
        let content = fs::read_to_string(&listing).map_err(|source| FindError::Io {
            path: listing.clone(),
            source,
        })?;
        return Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect());
    }

    let entries = fs::read_dir(portdir).map_err(|source| FindError::Io {
        path: portdir.to_path_buf(),
        source,
    })?;

    let mut categories: Vec<String> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .filter(|name| name.contains('-') || name == "virtual")
        .collect();
    categories.sort();
    Ok(categories)
}

/// Resolve `pkg` to `category/package` within `portdir`.
///
/// A `category/package` argument is accepted as-is when it names a package
/// directory; a bare name is looked up in every category.
pub fn find_package_in(portdir: &Path, pkg: &str) -> Result<String, FindError> {
    if pkg.contains('/') {
        return if is_pkg_dir(&portdir.join(pkg)) {
            Ok(pkg.to_string())
        } else {
            Err(FindError::NonExistentPackage(pkg.to_string()))
        };
    }

    let mut candidates: Vec<String> = categories(portdir)?
        .into_iter()
        .filter(|category| is_pkg_dir(&portdir.join(category).join(pkg)))
        .map(|category| format!("{}/{}", category, pkg))
        .collect();
    candidates.sort();
    debug!("Candidates for {} in {:?}: {:?}", pkg, portdir, candidates);

    match candidates.len() {
        0 => Err(FindError::NonExistentPackage(pkg.to_string())),
        1 => Ok(candidates.remove(0)),
        _ => Err(FindError::AmbiguousPackage {
            name: pkg.to_string(),
            candidates,
        }),
    }
}

/// Merge the versions of `pkg` from every repository in `repos`.
///
/// The category is resolved in the first repository that has the package.
/// Versions are merged so that later repositories (overlays) win when two
/// ebuilds carry equal versions. Returns `category/package` and its versions.
pub fn package_versions(
    repos: &[PathBuf],
    pkg: &str,
) -> Result<(String, VersionSet), FindError> {
    let mut package = None;
    for repo in repos {
        match find_package_in(repo, pkg) {
            Ok(found) => {
                package = Some(found);
                break;
            }
            Err(FindError::NonExistentPackage(_)) => continue,
            Err(FindError::Io { path, source }) if !repo.is_dir() => {
                debug!("Skipping unreadable repository {:?}: {}", path, source);
                continue;
            }
            Err(e) => return Err(e),
        }
    }
    let package = package.ok_or_else(|| FindError::NonExistentPackage(pkg.to_string()))?;

    let versions = VersionSet::from_dirs(repos.iter().rev().map(|repo| repo.join(&package)))?;
    if versions.is_empty() {
        return Err(FindError::NonExistentPackage(pkg.to_string()));
    }

    Ok((package, versions))
}

/// Path of the newest ebuild of `pkg` across `repos`
pub fn ebuild_which(repos: &[PathBuf], pkg: &str) -> Result<PathBuf, FindError> {
    let (_, versions) = package_versions(repos, pkg)?;
    Ok(versions.back()?.ebuild().to_path_buf())
}
