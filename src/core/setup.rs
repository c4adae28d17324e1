use crate::error::{Error, Result};
use crate::paths;
use crate::remote::RemoteRunner;
use crate::utils::shell;

pub const FILE_PERMS_DEFAULT: &str = "u+rw,g+rw,o+r";
pub const DIR_PERMS_DEFAULT: &str = "u+rwx,g+rws,o+rx";

/// Initial creation of project directories and normalization of their
/// ownership and permissions on the remote server.
pub struct ProjectSetup<R> {
    base: String,
    releases: String,
    runner: R,
}

impl<R: RemoteRunner> ProjectSetup<R> {
    pub fn new(base: &str, runner: R) -> Result<Self> {
        let base = paths::validate_base(base)?;

        Ok(Self {
            base: base.to_string(),
            releases: paths::releases_path(base),
            runner,
        })
    }

    /// Create the minimal directories required for deploying multiple
    /// releases of a project.
    pub fn setup_directories(&self) -> Result<()> {
        let output = self
            .runner
            .run(&format!("mkdir -p {}", shell::quote_path(&self.releases)));
        if !output.success {
            return Err(Error::remote_command(
                &format!("Failed to create {}", self.releases),
                &output,
            ));
        }
        Ok(())
    }

    /// Set ownership and permissions of the code deploy.
    ///
    /// The owner, when given, is applied recursively to the whole base.
    /// Directory permissions apply to the base and releases directories
    /// only; file permissions are applied recursively.
    pub fn set_permissions(
        &self,
        owner: Option<&str>,
        file_perms: &str,
        dir_perms: &str,
    ) -> Result<()> {
        if let Some(owner) = owner {
            self.run_checked(&format!(
                "chown -R {} {}",
                shell::quote_arg(owner),
                shell::quote_path(&self.base)
            ))?;
        }

        for path in [&self.base, &self.releases] {
            self.run_checked(&format!(
                "chmod {} {}",
                shell::quote_arg(dir_perms),
                shell::quote_path(path)
            ))?;
        }

        self.run_checked(&format!(
            "chmod -R {} {}",
            shell::quote_arg(file_perms),
            shell::quote_path(&self.base)
        ))
    }

    fn run_checked(&self, command: &str) -> Result<()> {
        let output = self.runner.run(command);
        if !output.success {
            return Err(Error::remote_command(
                &format!("Command failed: {}", command),
                &output,
            ));
        }
        Ok(())
    }
}
