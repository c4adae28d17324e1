use std::cell::RefCell;
use std::collections::BTreeSet;

use slipway::release::DEFAULT_KEEP;
use slipway::{Error, ReleaseManager, RemoteDirectory, Result};

/// In-memory stand-in for the remote filesystem: one releases
/// directory, one current link, optional per-entry removal failures.
struct InMemoryDirectory {
    releases_path: String,
    current_path: String,
    dir_exists: bool,
    entries: RefCell<BTreeSet<String>>,
    link_target: RefCell<Option<String>>,
    fail_removals: RefCell<BTreeSet<String>>,
}

impl InMemoryDirectory {
    fn new(base: &str, entries: &[&str]) -> Self {
        Self {
            releases_path: format!("{}/releases", base),
            current_path: format!("{}/current", base),
            dir_exists: true,
            entries: RefCell::new(entries.iter().map(|e| e.to_string()).collect()),
            link_target: RefCell::new(None),
            fail_removals: RefCell::new(BTreeSet::new()),
        }
    }

    fn without_releases_dir(base: &str) -> Self {
        let mut dir = Self::new(base, &[]);
        dir.dir_exists = false;
        dir
    }

    fn point_current_at(&self, release: &str) {
        *self.link_target.borrow_mut() = Some(format!("{}/{}", self.releases_path, release));
    }

    fn fail_removal_of(&self, release: &str) {
        self.fail_removals.borrow_mut().insert(release.to_string());
    }

    fn clear_removal_failures(&self) {
        self.fail_removals.borrow_mut().clear();
    }

    fn entry_names(&self) -> Vec<String> {
        self.entries.borrow().iter().cloned().collect()
    }

    fn basename(path: &str) -> String {
        path.rsplit_once('/')
            .map(|(_, name)| name.to_string())
            .unwrap_or_else(|| path.to_string())
    }
}

impl RemoteDirectory for &InMemoryDirectory {
    fn list_entries(&self, path: &str) -> Result<Vec<String>> {
        assert_eq!(path, self.releases_path);
        Ok(self.entry_names())
    }

    fn read_link(&self, path: &str) -> Result<Option<String>> {
        assert_eq!(path, self.current_path);
        Ok(self.link_target.borrow().clone())
    }

    fn replace_link(&self, link: &str, target: &str) -> Result<()> {
        assert_eq!(link, self.current_path);
        *self.link_target.borrow_mut() = Some(target.to_string());
        Ok(())
    }

    fn remove_entry(&self, path: &str) -> Result<()> {
        let name = InMemoryDirectory::basename(path);
        if self.fail_removals.borrow().contains(&name) {
            return Err(Error::Remote(format!(
                "rm -rf {}: Permission denied",
                path
            )));
        }
        self.entries.borrow_mut().remove(&name);
        Ok(())
    }

    fn exists(&self, path: &str) -> Result<bool> {
        assert_eq!(path, self.releases_path);
        Ok(self.dir_exists)
    }
}

fn manager<'a>(dir: &'a InMemoryDirectory) -> ReleaseManager<&'a InMemoryDirectory> {
    ReleaseManager::new("/srv/test", dir).unwrap()
}

#[test]
fn new_rejects_empty_base() {
    let dir = InMemoryDirectory::new("/srv/test", &[]);
    assert!(matches!(
        ReleaseManager::new("", &dir),
        Err(Error::InvalidBase(_))
    ));
    assert!(matches!(
        ReleaseManager::new("   ", &dir),
        Err(Error::InvalidBase(_))
    ));
}

#[test]
fn new_rejects_relative_base() {
    let dir = InMemoryDirectory::new("/srv/test", &[]);
    assert!(matches!(
        ReleaseManager::new("srv/test", &dir),
        Err(Error::InvalidBase(_))
    ));
}

#[test]
fn list_releases_empty_directory_is_not_an_error() {
    let dir = InMemoryDirectory::new("/srv/test", &[]);
    assert!(manager(&dir).list_releases().unwrap().is_empty());
}

#[test]
fn list_releases_absent_directory_is_not_an_error() {
    let dir = InMemoryDirectory::without_releases_dir("/srv/test");
    assert!(manager(&dir).list_releases().unwrap().is_empty());
}

#[test]
fn list_releases_sorts_newest_first() {
    let dir = InMemoryDirectory::new(
        "/srv/test",
        &["20140921215951", "20140921220657", "20140921220642"],
    );

    assert_eq!(
        manager(&dir).list_releases().unwrap(),
        vec!["20140921220657", "20140921220642", "20140921215951"]
    );
}

#[test]
fn list_releases_ignores_foreign_entries() {
    let dir = InMemoryDirectory::new(
        "/srv/test",
        &["README", "20140921215951", "lost+found", "20140921220642-1.4.1"],
    );

    assert_eq!(
        manager(&dir).list_releases().unwrap(),
        vec!["20140921220642-1.4.1", "20140921215951"]
    );
}

#[test]
fn current_release_none_when_no_pointer() {
    let dir = InMemoryDirectory::new("/srv/test", &["20140921215951"]);
    assert_eq!(manager(&dir).current_release().unwrap(), None);
}

#[test]
fn current_release_returns_pointer_basename() {
    let dir = InMemoryDirectory::new("/srv/test", &["20140921215951"]);
    dir.point_current_at("20140921215951");

    assert_eq!(
        manager(&dir).current_release().unwrap(),
        Some("20140921215951".to_string())
    );
}

#[test]
fn current_release_reports_dangling_pointer_target() {
    let dir = InMemoryDirectory::new("/srv/test", &["20140921215951"]);
    dir.point_current_at("20140101000000");

    // The target is returned verbatim even though it is not listed;
    // cross-referencing is the caller's job.
    assert_eq!(
        manager(&dir).current_release().unwrap(),
        Some("20140101000000".to_string())
    );
}

#[test]
fn previous_release_walks_back_from_current() {
    let dir = InMemoryDirectory::new(
        "/srv/test",
        &["20140101000000", "20140201000000", "20140301000000"],
    );
    dir.point_current_at("20140201000000");

    assert_eq!(
        manager(&dir).previous_release().unwrap(),
        Some("20140101000000".to_string())
    );
}

#[test]
fn previous_release_none_without_releases() {
    let dir = InMemoryDirectory::new("/srv/test", &[]);
    dir.point_current_at("20140201000000");

    assert_eq!(manager(&dir).previous_release().unwrap(), None);
}

#[test]
fn previous_release_none_without_current() {
    let dir = InMemoryDirectory::new(
        "/srv/test",
        &["20140101000000", "20140201000000"],
    );

    assert_eq!(manager(&dir).previous_release().unwrap(), None);
}

#[test]
fn previous_release_none_when_current_not_listed() {
    let dir = InMemoryDirectory::new(
        "/srv/test",
        &["20140101000000", "20140201000000"],
    );
    dir.point_current_at("20140501000000");

    assert_eq!(manager(&dir).previous_release().unwrap(), None);
}

#[test]
fn previous_release_none_when_current_is_oldest() {
    let dir = InMemoryDirectory::new(
        "/srv/test",
        &["20140101000000", "20140201000000"],
    );
    dir.point_current_at("20140101000000");

    assert_eq!(manager(&dir).previous_release().unwrap(), None);
}

#[test]
fn previous_release_none_with_single_release() {
    let dir = InMemoryDirectory::new("/srv/test", &["20140921225906"]);
    dir.point_current_at("20140921225906");

    assert_eq!(manager(&dir).previous_release().unwrap(), None);
}

#[test]
fn set_current_release_round_trips() {
    let dir = InMemoryDirectory::new("/srv/test", &["20140921220642"]);
    let manager = manager(&dir);

    manager.set_current_release("20140921220642").unwrap();
    assert_eq!(
        manager.current_release().unwrap(),
        Some("20140921220642".to_string())
    );
}

#[test]
fn set_current_release_is_idempotent() {
    let dir = InMemoryDirectory::new("/srv/test", &["20140921220642"]);
    let manager = manager(&dir);

    manager.set_current_release("20140921220642").unwrap();
    manager.set_current_release("20140921220642").unwrap();
    assert_eq!(
        manager.current_release().unwrap(),
        Some("20140921220642".to_string())
    );
}

#[test]
fn set_current_release_rejects_malformed_ids_before_any_remote_call() {
    let dir = InMemoryDirectory::new("/srv/test", &["20140921220642"]);
    let manager = manager(&dir);

    assert!(matches!(
        manager.set_current_release("not-a-release"),
        Err(Error::InvalidReleaseId(_))
    ));
    assert_eq!(manager.current_release().unwrap(), None);
}

#[test]
fn cleanup_removes_beyond_retention_window() {
    let dir = InMemoryDirectory::new(
        "/srv/test",
        &[
            "20140101000000",
            "20140201000000",
            "20140301000000",
            "20140401000000",
            "20140501000000",
        ],
    );
    dir.point_current_at("20140501000000");

    let report = manager(&dir).cleanup(2).unwrap();

    assert_eq!(
        report.removed,
        vec!["20140301000000", "20140201000000", "20140101000000"]
    );
    assert!(report.failed.is_empty());
    assert_eq!(
        dir.entry_names(),
        vec!["20140401000000", "20140501000000"]
    );
}

#[test]
fn cleanup_never_removes_the_current_release() {
    // Current is the oldest release (e.g. after a rollback): it is
    // preserved even though it falls outside the top-2 window.
    let dir = InMemoryDirectory::new(
        "/srv/test",
        &[
            "20140101000000",
            "20140201000000",
            "20140301000000",
            "20140401000000",
            "20140501000000",
        ],
    );
    dir.point_current_at("20140101000000");

    let report = manager(&dir).cleanup(2).unwrap();

    assert_eq!(report.removed, vec!["20140301000000", "20140201000000"]);
    assert_eq!(
        dir.entry_names(),
        vec!["20140101000000", "20140401000000", "20140501000000"]
    );
}

#[test]
fn cleanup_rejects_zero_keep_and_deletes_nothing() {
    let dir = InMemoryDirectory::new(
        "/srv/test",
        &["20140101000000", "20140201000000"],
    );

    assert!(matches!(
        manager(&dir).cleanup(0),
        Err(Error::InvalidArgument(_))
    ));
    assert_eq!(dir.entry_names().len(), 2);
}

#[test]
fn cleanup_continues_past_failed_removals() {
    let dir = InMemoryDirectory::new(
        "/srv/test",
        &["20140101000000", "20140201000000", "20140301000000"],
    );
    dir.point_current_at("20140301000000");
    dir.fail_removal_of("20140201000000");

    let report = manager(&dir).cleanup(1).unwrap();

    assert_eq!(report.removed, vec!["20140101000000"]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].release, "20140201000000");
    assert!(report.failed[0].error.contains("Permission denied"));
}

#[test]
fn cleanup_rerun_retries_only_entries_still_present() {
    let dir = InMemoryDirectory::new(
        "/srv/test",
        &["20140101000000", "20140201000000", "20140301000000"],
    );
    dir.point_current_at("20140301000000");
    dir.fail_removal_of("20140201000000");

    let first = manager(&dir).cleanup(1).unwrap();
    assert_eq!(first.failed.len(), 1);

    dir.clear_removal_failures();
    let second = manager(&dir).cleanup(1).unwrap();

    assert_eq!(second.removed, vec!["20140201000000"]);
    assert!(second.failed.is_empty());
    assert_eq!(dir.entry_names(), vec!["20140301000000"]);
}

#[test]
fn cleanup_default_keep_is_five() {
    let dir = InMemoryDirectory::new(
        "/srv/test",
        &[
            "20140101000000",
            "20140201000000",
            "20140301000000",
            "20140401000000",
            "20140501000000",
            "20140601000000",
        ],
    );

    let report = manager(&dir).cleanup(DEFAULT_KEEP).unwrap();

    assert_eq!(report.removed, vec!["20140101000000"]);
    assert_eq!(dir.entry_names().len(), 5);
}
