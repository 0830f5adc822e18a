//! Ordered collection of the versions of one package

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::version::error::VersionError;
use crate::version::scanner::{EbuildSource, FsEbuildSource};
use crate::version::string::{VersionString, parse_pvr};

/// Versions of a package, kept sorted oldest first.
///
/// Versions that compare equal (`1.2` and `1.2.0`) are stored once; the
/// first one inserted wins.
#[derive(Debug, Clone, Default)]
pub struct VersionSet {
    entries: Vec<VersionString>,
}

impl VersionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from every ebuild in a package directory
    pub fn from_dir(path: impl AsRef<Path>) -> Result<Self, VersionError> {
        let mut set = Self::new();
        set.assign(path)?;
        Ok(set)
    }

    /// Build a set by merging several directories of the same package,
    /// e.g. the main tree followed by its overlays
    pub fn from_dirs<I, P>(dirs: I) -> Result<Self, VersionError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut set = Self::new();
        for dir in dirs {
            set.append(dir)?;
        }
        Ok(set)
    }

    /// Parse `path` and insert it.
    ///
    /// Returns `Ok(false)` without touching the set when an equal version is
    /// already present.
    pub fn insert(&mut self, path: impl AsRef<Path>) -> Result<bool, VersionError> {
        let version = VersionString::parse(path)?;
        Ok(self.insert_version(version))
    }

    /// Insert an already parsed version
    pub fn insert_version(&mut self, version: VersionString) -> bool {
        match self.entries.binary_search(&version) {
            Ok(_) => false,
            Err(pos) => {
                self.entries.insert(pos, version);
                true
            }
        }
    }

    /// Replace the contents with the ebuilds found in `path`.
    ///
    /// Returns how many versions were inserted.
    pub fn assign(&mut self, path: impl AsRef<Path>) -> Result<usize, VersionError> {
        self.assign_from(&FsEbuildSource, path.as_ref())
    }

    /// Add the ebuilds found in `path` without clearing first.
    ///
    /// Returns how many versions were inserted.
    pub fn append(&mut self, path: impl AsRef<Path>) -> Result<usize, VersionError> {
        self.append_from(&FsEbuildSource, path.as_ref())
    }

    /// [`VersionSet::assign`] over an arbitrary ebuild source.
    ///
    /// The directory is scanned before the set is cleared, so a failed scan
    /// leaves the set untouched.
    pub fn assign_from<S: EbuildSource + ?Sized>(
        &mut self,
        source: &S,
        path: &Path,
    ) -> Result<usize, VersionError> {
        let ebuilds = scan(source, path)?;
        self.entries.clear();
        Ok(self.insert_scanned(ebuilds))
    }

    /// [`VersionSet::append`] over an arbitrary ebuild source
    pub fn append_from<S: EbuildSource + ?Sized>(
        &mut self,
        source: &S,
        path: &Path,
    ) -> Result<usize, VersionError> {
        let ebuilds = scan(source, path)?;
        Ok(self.insert_scanned(ebuilds))
    }

    fn insert_scanned(&mut self, ebuilds: Vec<PathBuf>) -> usize {
        let mut inserted = 0;
        for ebuild in ebuilds {
            match self.insert(&ebuild) {
                Ok(true) => inserted += 1,
                Ok(false) => warn!("Skipping {:?}: duplicate version", ebuild),
                Err(e) => warn!("Skipping {:?}: {}", ebuild, e),
            }
        }
        debug!("Inserted {} versions, set now holds {}", inserted, self.len());
        inserted
    }

    /// Oldest version
    pub fn front(&self) -> Result<&VersionString, VersionError> {
        self.entries.first().ok_or(VersionError::EmptySet)
    }

    /// Newest version
    pub fn back(&self) -> Result<&VersionString, VersionError> {
        self.entries.last().ok_or(VersionError::EmptySet)
    }

    /// Find the entry equal to the version `text` (a bare `PVR` such as `1.0-r1`).
    ///
    /// Lookup goes through the ordering, so `1.2` also finds a stored `1.2.0`.
    pub fn find_by_text(&self, text: &str) -> Result<Option<&VersionString>, VersionError> {
        let (core, suffix) = parse_pvr(text)?;
        Ok(self
            .entries
            .binary_search_by(|entry| entry.cmp_parts(&core, &suffix))
            .ok()
            .map(|pos| &self.entries[pos]))
    }

    /// Find the entry equal to the version of the ebuild at `path`
    pub fn find_by_path(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<Option<&VersionString>, VersionError> {
        let version = VersionString::parse(path)?;
        Ok(self
            .entries
            .binary_search(&version)
            .ok()
            .map(|pos| &self.entries[pos]))
    }

    pub fn contains_text(&self, text: &str) -> Result<bool, VersionError> {
        Ok(self.find_by_text(text)?.is_some())
    }

    /// Iterate oldest to newest
    pub fn iter(&self) -> std::slice::Iter<'_, VersionString> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

fn scan<S: EbuildSource + ?Sized>(
    source: &S,
    path: &Path,
) -> Result<Vec<PathBuf>, VersionError> {
    source.ebuilds(path).map_err(|source| VersionError::Io {
        path: path.to_path_buf(),
        source,
    })
}

impl<'a> IntoIterator for &'a VersionSet {
    type Item = &'a VersionString;
    type IntoIter = std::slice::Iter<'a, VersionString>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
