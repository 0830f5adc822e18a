//! Whole ebuild version parsed from a `<PN>-<PVR>.ebuild` filename

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::portage::misc::EBUILD_EXTENSION;
use crate::version::error::VersionError;
use crate::version::plain::VersionCore;
use crate::version::suffix::VersionSuffix;

/// Component names exposed through [`VersionString::component`]
pub const COMPONENT_NAMES: [&str; 6] = ["PN", "PV", "P", "PR", "PVR", "PF"];

/// A parsed ebuild version together with the file it came from.
///
/// Ordering and equality only look at the parsed version, so `foo-1.2` and
/// `foo-1.2.0` compare equal. Compare [`VersionString::raw`] for textual identity.
#[derive(Debug, Clone)]
pub struct VersionString {
    raw: String,
    source_path: PathBuf,
    core: VersionCore,
    suffix: VersionSuffix,
    components: BTreeMap<&'static str, String>,
}

impl VersionString {
    /// Parse the ebuild at `path`, e.g. `/usr/portage/dev-lang/foo/foo-1.2_rc1-r2.ebuild`.
    pub fn parse(path: impl AsRef<Path>) -> Result<Self, VersionError> {
        let path = path.as_ref();
        let display = path.to_string_lossy();

        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| VersionError::malformed(&display, "no usable file name"))?;

        let stem = file_name
            .strip_suffix(EBUILD_EXTENSION)
            .and_then(|stem| stem.strip_suffix('.'))
            .ok_or_else(|| {
                VersionError::malformed(file_name, format!("missing .{} extension", EBUILD_EXTENSION))
            })?;

        let (body, revision) = split_revision(stem);
        let (pn, pv) = body
            .rsplit_once('-')
            .ok_or_else(|| VersionError::malformed(stem, "missing '-' between name and version"))?;
        if pn.is_empty() {
            return Err(VersionError::malformed(stem, "empty package name"));
        }

        let pvr = format!("{}{}", pv, revision.unwrap_or(""));
        let (core, suffix) = parse_pvr(&pvr)?;

        let pr = revision
            .map(|rev| rev.trim_start_matches('-').to_string())
            .unwrap_or_else(|| "r0".to_string());

        let components = BTreeMap::from([
            ("PN", pn.to_string()),
            ("PV", pv.to_string()),
            ("P", format!("{}-{}", pn, pv)),
            ("PR", pr),
            ("PF", format!("{}-{}", pn, pvr)),
            ("PVR", pvr.clone()),
        ]);

        Ok(Self {
            raw: pvr,
            source_path: path.to_path_buf(),
            core,
            suffix,
            components,
        })
    }

    /// Version text as it appeared in the filename (`PVR`)
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Path of the backing ebuild
    pub fn ebuild(&self) -> &Path {
        &self.source_path
    }

    pub fn core(&self) -> &VersionCore {
        &self.core
    }

    pub fn suffix(&self) -> &VersionSuffix {
        &self.suffix
    }

    /// Look up a named component (`PN`, `PV`, `P`, `PR`, `PVR` or `PF`)
    pub fn component(&self, name: &str) -> Option<&str> {
        self.components.get(name).map(String::as_str)
    }

    pub fn components(&self) -> &BTreeMap<&'static str, String> {
        &self.components
    }

    /// Compare against an already parsed version without building a full value
    pub(crate) fn cmp_parts(&self, core: &VersionCore, suffix: &VersionSuffix) -> Ordering {
        self.core
            .cmp(core)
            .then_with(|| self.suffix.cmp(suffix))
    }
}

/// Split a trailing `-rN` off a filename stem
fn split_revision(stem: &str) -> (&str, Option<&str>) {
    match stem.rfind("-r") {
        Some(pos)
            if stem.len() > pos + 2 && stem[pos + 2..].bytes().all(|b| b.is_ascii_digit()) =>
        {
            (&stem[..pos], Some(&stem[pos..]))
        }
        _ => (stem, None),
    }
}

/// Parse a bare `PVR` such as `1.2.30_pre4-r1` into its two halves.
///
/// The plain version ends at the first `_` or `-r`; everything from there on
/// is the suffix run and revision.
pub fn parse_pvr(pvr: &str) -> Result<(VersionCore, VersionSuffix), VersionError> {
    let split = [pvr.find('_'), pvr.find("-r")]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(pvr.len());

    let (plain, rest) = pvr.split_at(split);
    let core = VersionCore::parse(plain).map_err(|e| rebase_error(e, pvr))?;
    let suffix = VersionSuffix::parse(rest).map_err(|e| rebase_error(e, pvr))?;
    Ok((core, suffix))
}

/// Report sub-parse failures against the whole version text
fn rebase_error(error: VersionError, pvr: &str) -> VersionError {
    match error {
        VersionError::MalformedVersion { reason, .. } => VersionError::malformed(pvr, reason),
        other => other,
    }
}

impl fmt::Display for VersionString {
    /// Portage hides an explicit `-r0`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.raw.strip_suffix("-r0").unwrap_or(&self.raw))
    }
}

impl Ord for VersionString {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_parts(&other.core, &other.suffix)
    }
}

impl PartialOrd for VersionString {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for VersionString {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for VersionString {}
