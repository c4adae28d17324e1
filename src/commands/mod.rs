use clap::Args;
use std::path::PathBuf;

use slipway::{Error, ReleaseManager, Result, ServerConfig, SshClient, SshDirectory};

pub type CmdResult<T> = Result<(T, i32)>;

pub mod activate;
pub mod cleanup;
pub mod current;
pub mod install;
pub mod releases;
pub mod rollback;
pub mod setup;

/// Shared flags naming the target server and project base directory.
///
/// The server may be described inline (`--host`/`--user`) or loaded
/// from a JSON config file (`--server`).
#[derive(Args)]
pub struct TargetArgs {
    /// Project base directory on the server (absolute path)
    #[arg(long)]
    pub base: String,

    /// Path to a JSON server config file
    #[arg(long, value_name = "FILE", conflicts_with_all = ["host", "user"])]
    pub server: Option<PathBuf>,

    /// Server hostname
    #[arg(long, requires = "user")]
    pub host: Option<String>,

    /// SSH user
    #[arg(long, requires = "host")]
    pub user: Option<String>,

    /// SSH port
    #[arg(long, default_value_t = 22)]
    pub port: u16,

    /// SSH identity file
    #[arg(long, value_name = "FILE")]
    pub identity: Option<String>,
}

impl TargetArgs {
    fn server_config(&self) -> Result<ServerConfig> {
        if let Some(path) = &self.server {
            return ServerConfig::load(path);
        }

        match (&self.host, &self.user) {
            (Some(host), Some(user)) => {
                let config = ServerConfig {
                    host: host.clone(),
                    user: user.clone(),
                    port: self.port,
                    identity_file: self.identity.clone(),
                };
                config.validate()?;
                Ok(config)
            }
            _ => Err(Error::InvalidArgument(
                "Specify a server with --server FILE or --host and --user".to_string(),
            )),
        }
    }

    pub fn client(&self) -> Result<SshClient> {
        SshClient::from_config(&self.server_config()?)
    }

    pub fn manager(&self) -> Result<ReleaseManager<SshDirectory<SshClient>>> {
        ReleaseManager::new(&self.base, SshDirectory::new(self.client()?))
    }
}
