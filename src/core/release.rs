use serde::Serialize;

use crate::error::{Error, Result};
use crate::paths;
use crate::release_id;
use crate::remote::RemoteDirectory;

/// Number of releases `cleanup` retains when no count is given.
pub const DEFAULT_KEEP: usize = 5;

/// Queries and mutations over the releases of a project deployed on a
/// remote server.
///
/// Relies on releases being named with the timestamp-based prefix
/// produced by [`release_id::generate`], which makes them naturally
/// sortable. No state is cached between calls; every query re-derives
/// truth from the remote filesystem, so staleness windows exist only
/// across, never within, a single call. Concurrent deploy runs against
/// the same base path must be serialized by the caller.
pub struct ReleaseManager<D> {
    current: String,
    releases: String,
    dir: D,
}

/// Outcome of a cleanup pass. Failed removals never abort the pass;
/// they are collected here so the caller can decide whether partial
/// cleanup is acceptable.
#[derive(Debug, Serialize)]
pub struct CleanupReport {
    pub removed: Vec<String>,
    pub failed: Vec<CleanupFailure>,
}

#[derive(Debug, Serialize)]
pub struct CleanupFailure {
    pub release: String,
    pub error: String,
}

impl<D: RemoteDirectory> ReleaseManager<D> {
    /// Build a manager for the project rooted at `base`.
    ///
    /// Only the shape of `base` is validated here (non-empty, absolute);
    /// whether the directories exist remotely is not checked until an
    /// operation runs.
    pub fn new(base: &str, dir: D) -> Result<Self> {
        let base = paths::validate_base(base)?;

        Ok(Self {
            current: paths::current_path(base),
            releases: paths::releases_path(base),
            dir,
        })
    }

    /// All releases, newest first.
    ///
    /// Entries that do not have the release identifier shape are
    /// ignored. An absent or empty releases directory yields an empty
    /// list; "no releases yet" is a normal state, not an error.
    pub fn list_releases(&self) -> Result<Vec<String>> {
        if !self.dir.exists(&self.releases)? {
            return Ok(Vec::new());
        }

        let mut releases: Vec<String> = self
            .dir
            .list_entries(&self.releases)?
            .into_iter()
            .filter(|entry| release_id::is_valid(entry))
            .collect();

        // Descending lexicographic == descending chronological, since
        // identifiers carry a fixed-width zero-padded timestamp prefix.
        releases.sort_by(|a, b| b.cmp(a));
        Ok(releases)
    }

    /// Release ID the 'current' symlink points at, `None` when no
    /// release has ever been activated.
    ///
    /// The returned ID may name a release that no longer exists under
    /// the releases directory (a dangling pointer); cross-reference
    /// with [`Self::list_releases`] to detect that case. Reporting the
    /// dangling target is deliberate since it is diagnostically useful.
    pub fn current_release(&self) -> Result<Option<String>> {
        let target = self.dir.read_link(&self.current)?;

        Ok(target.map(|target| basename(&target).to_string()))
    }

    /// Release immediately before the current one in chronological
    /// order, i.e. the rollback target.
    ///
    /// Returns `None` whenever rollback is not possible: fewer than two
    /// releases, no current release, or a current release that is not
    /// among the listed ones.
    pub fn previous_release(&self) -> Result<Option<String>> {
        let releases = self.list_releases()?;
        if releases.is_empty() {
            return Ok(None);
        }

        let Some(current) = self.current_release()? else {
            return Ok(None);
        };

        let Some(current_idx) = releases.iter().position(|r| *r == current) else {
            return Ok(None);
        };

        Ok(releases.get(current_idx + 1).cloned())
    }

    /// Atomically point the 'current' symlink at the given release.
    ///
    /// The release directory is not required to exist yet; installation
    /// and activation are separate concerns and the caller is trusted
    /// to have finished installing. A failed switch leaves the previous
    /// pointer intact.
    pub fn set_current_release(&self, release_id: &str) -> Result<()> {
        if !release_id::is_valid(release_id) {
            return Err(Error::InvalidReleaseId(release_id.to_string()));
        }

        let target = format!("{}/{}", self.releases, release_id);
        self.dir.replace_link(&self.current, &target)
    }

    /// Remove all but the `keep` most recent releases.
    ///
    /// The current release is never removed, even when it has fallen
    /// outside the retention window (e.g. after a rollback). Removal
    /// is best-effort: one stuck directory does not block pruning of
    /// the rest, and re-running after a partial failure retries only
    /// entries still present.
    pub fn cleanup(&self, keep: usize) -> Result<CleanupReport> {
        if keep < 1 {
            return Err(Error::InvalidArgument(
                "Cleanup must keep at least one release".to_string(),
            ));
        }

        let releases = self.list_releases()?;
        let current = self.current_release()?;

        let mut report = CleanupReport {
            removed: Vec::new(),
            failed: Vec::new(),
        };

        for release in releases.iter().skip(keep) {
            if Some(release) == current.as_ref() {
                continue;
            }

            let path = format!("{}/{}", self.releases, release);
            match self.dir.remove_entry(&path) {
                Ok(()) => {
                    log_status!("cleanup", "Removed release {}", release);
                    report.removed.push(release.clone());
                }
                Err(err) => {
                    log_status!("cleanup", "Failed to remove {}: {}", release, err);
                    report.failed.push(CleanupFailure {
                        release: release.clone(),
                        error: err.to_string(),
                    });
                }
            }
        }

        Ok(report)
    }
}

fn basename(path: &str) -> &str {
    path.trim_end_matches('/')
        .rsplit_once('/')
        .map(|(_, name)| name)
        .unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::basename;

    #[test]
    fn basename_strips_leading_directories() {
        assert_eq!(basename("/srv/test/releases/20140921215951"), "20140921215951");
        assert_eq!(basename("20140921215951"), "20140921215951");
        assert_eq!(basename("/srv/test/releases/20140921215951/"), "20140921215951");
    }
}
