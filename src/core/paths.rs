use crate::error::{Error, Result};

/// Fixed names of the two children every project base directory carries.
pub const CURRENT_LINK_NAME: &str = "current";
pub const RELEASES_DIR_NAME: &str = "releases";

/// Validate the shape of a project base directory path.
///
/// Only the path text is checked; whether the directory exists on the
/// remote host is not. The base must be a non-empty absolute path.
pub fn validate_base(base: &str) -> Result<&str> {
    let base = base.trim();

    if base.is_empty() {
        return Err(Error::InvalidBase(
            "You must specify a project base directory".to_string(),
        ));
    }

    if !base.starts_with('/') {
        return Err(Error::InvalidBase(format!(
            "Project base directory must be an absolute path: {}",
            base
        )));
    }

    Ok(base)
}

/// Path of the 'current' symlink for the given project base.
pub fn current_path(base: &str) -> String {
    join(base, CURRENT_LINK_NAME)
}

/// Path of the directory that contains all releases for the given base.
pub fn releases_path(base: &str) -> String {
    join(base, RELEASES_DIR_NAME)
}

/// Path of a single release directory under the given base.
pub fn release_path(base: &str, release_id: &str) -> String {
    join(&releases_path(base), release_id)
}

/// Parent directory of a remote path; "/" for top-level entries.
pub fn dirname(path: &str) -> String {
    let without_trailing = path.trim_end_matches('/');

    match without_trailing.rsplit_once('/') {
        Some(("", _)) | None => "/".to_string(),
        Some((parent, _)) => parent.to_string(),
    }
}

fn join(dir: &str, child: &str) -> String {
    if dir.ends_with('/') {
        format!("{}{}", dir, child)
    } else {
        format!("{}/{}", dir, child)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_base_rejects_empty() {
        assert!(validate_base("").is_err());
        assert!(validate_base("   ").is_err());
    }

    #[test]
    fn validate_base_rejects_relative() {
        assert!(validate_base("srv/test").is_err());
        assert!(validate_base("./srv/test").is_err());
    }

    #[test]
    fn validate_base_trims() {
        assert_eq!(validate_base(" /srv/test ").unwrap(), "/srv/test");
    }

    #[test]
    fn current_and_releases_paths() {
        assert_eq!(current_path("/var/www/test"), "/var/www/test/current");
        assert_eq!(releases_path("/var/www/test"), "/var/www/test/releases");
        assert_eq!(releases_path("/var/www/test/"), "/var/www/test/releases");
    }

    #[test]
    fn release_path_nests_under_releases() {
        assert_eq!(
            release_path("/srv/test", "20140921215951"),
            "/srv/test/releases/20140921215951"
        );
    }

    #[test]
    fn dirname_gets_parent_dir() {
        assert_eq!(dirname("/srv/test/current"), "/srv/test");
        assert_eq!(dirname("/current"), "/");
        assert_eq!(dirname("/srv/test/"), "/srv");
    }
}
