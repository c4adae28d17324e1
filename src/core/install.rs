use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::paths;
use crate::remote::RemoteRunner;
use crate::utils::shell;

/// Installation of locally built artifacts into a release directory.
///
/// Creates `<base>/releases/<id>` if needed and streams each artifact
/// file into it over the remote runner. Activation of the installed
/// release is a separate step (see `ReleaseManager::set_current_release`).
pub struct ArtifactInstall<R> {
    base: String,
    artifacts: Vec<PathBuf>,
    runner: R,
}

#[derive(Debug, Serialize)]
pub struct InstallReport {
    pub release: String,
    pub path: String,
    pub uploaded: Vec<String>,
}

impl<R: RemoteRunner> ArtifactInstall<R> {
    pub fn new(base: &str, artifacts: Vec<PathBuf>, runner: R) -> Result<Self> {
        let base = paths::validate_base(base)?;

        if artifacts.is_empty() {
            return Err(Error::InvalidArgument(
                "You must specify at least one artifact to install".to_string(),
            ));
        }

        Ok(Self {
            base: base.to_string(),
            artifacts,
            runner,
        })
    }

    /// Upload all artifacts into the release directory for `release_id`,
    /// creating the directory first.
    pub fn install(&self, release_id: &str) -> Result<InstallReport> {
        if !crate::release_id::is_valid(release_id) {
            return Err(Error::InvalidReleaseId(release_id.to_string()));
        }

        let release_path = paths::release_path(&self.base, release_id);

        let mkdir_output = self
            .runner
            .run(&format!("mkdir -p {}", shell::quote_path(&release_path)));
        if !mkdir_output.success {
            return Err(Error::remote_command(
                &format!("Failed to create {}", release_path),
                &mkdir_output,
            ));
        }

        let mut uploaded = Vec::new();
        for artifact in &self.artifacts {
            let file_name = artifact_file_name(artifact)?;
            let remote_path = format!("{}/{}", release_path, file_name);

            log_status!("install", "Uploading {} -> {}", artifact.display(), remote_path);
            let output = self
                .runner
                .upload(&artifact.to_string_lossy(), &remote_path);
            if !output.success {
                return Err(Error::remote_command(
                    &format!("Failed to upload {}", artifact.display()),
                    &output,
                ));
            }
            uploaded.push(file_name);
        }

        Ok(InstallReport {
            release: release_id.to_string(),
            path: release_path,
            uploaded,
        })
    }
}

fn artifact_file_name(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.to_string())
        .ok_or_else(|| {
            Error::InvalidArgument(format!(
                "Artifact path must include a file name: {}",
                path.display()
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_file_name_extracts_terminal_component() {
        assert_eq!(
            artifact_file_name(Path::new("dist/app-1.4.1.tar.gz")).unwrap(),
            "app-1.4.1.tar.gz"
        );
    }

    #[test]
    fn artifact_file_name_rejects_bare_directories() {
        assert!(artifact_file_name(Path::new("/")).is_err());
        assert!(artifact_file_name(Path::new("dist/..")).is_err());
    }
}
