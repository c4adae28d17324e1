use uuid::Uuid;

use crate::error::{Error, Result};
use crate::paths;
use crate::ssh::{CommandOutput, SshClient};
use crate::utils::shell;

/// Single-command remote execution primitive.
///
/// `SshClient` is the production implementation; tests substitute a
/// scripted runner to assert on the exact commands issued.
pub trait RemoteRunner {
    fn run(&self, command: &str) -> CommandOutput;

    fn upload(&self, local_path: &str, remote_path: &str) -> CommandOutput;
}

impl RemoteRunner for SshClient {
    fn run(&self, command: &str) -> CommandOutput {
        self.execute(command)
    }

    fn upload(&self, local_path: &str, remote_path: &str) -> CommandOutput {
        self.upload_file(local_path, remote_path)
    }
}

/// Capability surface the release manager needs from the remote
/// filesystem. Narrow by design so tests can inject an in-memory fake
/// instead of binding to a concrete execution mechanism.
pub trait RemoteDirectory {
    /// Entry names directly under `path`. Order is not significant;
    /// callers re-sort.
    fn list_entries(&self, path: &str) -> Result<Vec<String>>;

    /// Target of the symlink at `path`, `None` when no link exists.
    fn read_link(&self, path: &str) -> Result<Option<String>>;

    /// Atomically create or replace the symlink at `link` to point at
    /// `target`. At no observable instant may the link reference
    /// neither the old nor the new target.
    fn replace_link(&self, link: &str, target: &str) -> Result<()>;

    /// Remove the entry at `path`, recursively for directories.
    fn remove_entry(&self, path: &str) -> Result<()>;

    fn exists(&self, path: &str) -> Result<bool>;
}

/// `RemoteDirectory` implemented with plain POSIX commands over a
/// remote runner.
pub struct SshDirectory<R> {
    runner: R,
}

impl<R: RemoteRunner> SshDirectory<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

impl<R: RemoteRunner> RemoteDirectory for SshDirectory<R> {
    fn list_entries(&self, path: &str) -> Result<Vec<String>> {
        let output = self.runner.run(&format!("ls -1 {}", shell::quote_path(path)));
        if !output.success {
            return Err(Error::remote_command(
                &format!("Failed to list {}", path),
                &output,
            ));
        }
        Ok(split_lines(&output.stdout))
    }

    fn read_link(&self, path: &str) -> Result<Option<String>> {
        let output = self
            .runner
            .run(&format!("readlink {}", shell::quote_path(path)));

        if output.success {
            let target = output.stdout.trim();
            if target.is_empty() {
                return Ok(None);
            }
            return Ok(Some(target.to_string()));
        }

        // readlink exits 1 for a missing or non-symlink path; anything
        // else (connection loss is 255) is a real remote failure.
        if output.exit_code == 1 {
            return Ok(None);
        }

        Err(Error::remote_command(
            &format!("Failed to read link {}", path),
            &output,
        ))
    }

    fn replace_link(&self, link: &str, target: &str) -> Result<()> {
        // First create a link with a random name pointing at the
        // target, then rename it over the existing link so the switch
        // is atomic. A delete-then-create would expose a window with
        // no link at all.
        let tmp_path = format!("{}/{}", paths::dirname(link), Uuid::new_v4());

        let ln_output = self.runner.run(&format!(
            "ln -s {} {}",
            shell::quote_path(target),
            shell::quote_path(&tmp_path)
        ));
        if !ln_output.success {
            return Err(Error::remote_command(
                &format!("Failed to create link to {}", target),
                &ln_output,
            ));
        }

        let mv_output = self.runner.run(&format!(
            "mv -T {} {}",
            shell::quote_path(&tmp_path),
            shell::quote_path(link)
        ));
        if !mv_output.success {
            return Err(Error::remote_command(
                &format!("Failed to move link into place at {}", link),
                &mv_output,
            ));
        }

        Ok(())
    }

    fn remove_entry(&self, path: &str) -> Result<()> {
        let output = self
            .runner
            .run(&format!("rm -rf {}", shell::quote_path(path)));
        if !output.success {
            return Err(Error::remote_command(
                &format!("Failed to remove {}", path),
                &output,
            ));
        }
        Ok(())
    }

    fn exists(&self, path: &str) -> Result<bool> {
        let output = self
            .runner
            .run(&format!("test -e {}", shell::quote_path(path)));

        if output.success {
            return Ok(true);
        }
        if output.exit_code == 1 {
            return Ok(false);
        }

        Err(Error::remote_command(
            &format!("Failed to check {}", path),
            &output,
        ))
    }
}

/// Split captured command output into trimmed, non-empty lines.
/// TTY devices on POSIX systems sometimes emit \r\n, so both newline
/// styles are handled.
fn split_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(|line| line.to_string())
        .collect()
}
