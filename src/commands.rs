//! Output for the `versions`, `which`, `newest` and `oldest` commands

use std::io::Write;
use std::path::PathBuf;

use tracing::error;

use crate::portage::find::{ebuild_which, package_versions};

/// Which end of the version order to report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extreme {
    Oldest,
    Newest,
}

/// Print `category/package` followed by every version, oldest first
pub fn versions<W: Write>(out: &mut W, repos: &[PathBuf], pkg: &str) -> anyhow::Result<()> {
    let (package, versions) = package_versions(repos, pkg)?;
    writeln!(out, "{}", package)?;
    for version in &versions {
        writeln!(out, "{}", version)?;
    }
    Ok(())
}

/// Print the path of the newest ebuild
pub fn which<W: Write>(out: &mut W, repos: &[PathBuf], pkg: &str) -> anyhow::Result<()> {
    let ebuild = ebuild_which(repos, pkg)?;
    writeln!(out, "{}", ebuild.display())?;
    Ok(())
}

/// Print only the oldest or newest version
pub fn extreme<W: Write>(
    out: &mut W,
    repos: &[PathBuf],
    pkg: &str,
    which: Extreme,
) -> anyhow::Result<()> {
    let (_, versions) = package_versions(repos, pkg)?;
    let version = match which {
        Extreme::Oldest => versions.front()?,
        Extreme::Newest => versions.back()?,
    };
    writeln!(out, "{}", version)?;
    Ok(())
}

/// Run `f` for every package, reporting failures instead of stopping.
///
/// Returns the number of packages that failed.
pub fn for_each_package<F>(packages: &[String], mut f: F) -> usize
where
    F: FnMut(&str) -> anyhow::Result<()>,
{
    let mut failures = 0;
    for pkg in packages {
        if let Err(e) = f(pkg) {
            error!("{}: {:#}", pkg, e);
            failures += 1;
        }
    }
    failures
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io;
    use std::path::Path;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;
    use tracing_subscriber::fmt::MakeWriter;

    /// Log sink shared between the subscriber and the test
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = CapturedLogs;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn repo_with(files: &[&str]) -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        for file in files {
            let path = temp_dir.path().join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "").unwrap();
        }
        temp_dir
    }

    fn output<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> anyhow::Result<()>,
    {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn versions_lists_oldest_first_without_r0() {
        let repo = repo_with(&[
            "dev-lang/foo/foo-1.1.ebuild",
            "dev-lang/foo/foo-1.0-r0.ebuild",
            "dev-lang/foo/foo-1.0-r1.ebuild",
            "dev-lang/foo/metadata.xml",
        ]);
        let repos = vec![repo.path().to_path_buf()];

        let text = output(|out| versions(out, &repos, "foo"));

        assert_eq!(text, "dev-lang/foo\n1.0\n1.0-r1\n1.1\n");
    }

    #[test]
    fn which_prints_newest_ebuild_path() {
        let repo = repo_with(&[
            "dev-lang/foo/foo-1.1_rc1.ebuild",
            "dev-lang/foo/foo-1.0.ebuild",
        ]);
        let repos = vec![repo.path().to_path_buf()];

        let text = output(|out| which(out, &repos, "dev-lang/foo"));

        let expected = repo.path().join("dev-lang/foo/foo-1.1_rc1.ebuild");
        assert_eq!(Path::new(text.trim_end()), expected);
    }

    #[test]
    fn extreme_prints_requested_end() {
        let repo = repo_with(&[
            "dev-lang/foo/foo-1.0_p1.ebuild",
            "dev-lang/foo/foo-1.0.ebuild",
            "dev-lang/foo/foo-1.0_beta3.ebuild",
        ]);
        let repos = vec![repo.path().to_path_buf()];

        assert_eq!(
            output(|out| extreme(out, &repos, "foo", Extreme::Oldest)),
            "1.0_beta3\n"
        );
        assert_eq!(
            output(|out| extreme(out, &repos, "foo", Extreme::Newest)),
            "1.0_p1\n"
        );
    }

    #[test]
    fn for_each_package_counts_failures_and_continues() {
        let repo = repo_with(&["dev-lang/foo/foo-1.0.ebuild"]);
        let repos = vec![repo.path().to_path_buf()];
        let packages = vec!["missing".to_string(), "foo".to_string()];
        let mut out = Vec::new();

        let failures = for_each_package(&packages, |pkg| versions(&mut out, &repos, pkg));

        assert_eq!(failures, 1);
        assert_eq!(String::from_utf8(out).unwrap(), "dev-lang/foo\n1.0\n");
    }

    #[test]
    fn for_each_package_reports_each_failure_once_through_tracing() {
        let repo = repo_with(&["dev-lang/foo/foo-1.0.ebuild"]);
        let repos = vec![repo.path().to_path_buf()];
        let packages = vec!["missing".to_string()];
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .finish();

        let failures = tracing::subscriber::with_default(subscriber, || {
            for_each_package(&packages, |pkg| versions(&mut io::sink(), &repos, pkg))
        });

        assert_eq!(failures, 1);
        let logs = logs.contents();
        assert_eq!(logs.matches("missing doesn't seem to exist").count(), 1);
        assert!(logs.contains("ERROR"));
    }
}
