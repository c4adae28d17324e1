// Public modules
pub mod error;
pub mod install;
pub mod paths;
pub mod release;
pub mod release_id;
pub mod remote;
pub mod server;
pub mod setup;
pub mod ssh;

// Re-export common types for convenience
pub use error::{Error, Result};
pub use release::{CleanupFailure, CleanupReport, ReleaseManager, DEFAULT_KEEP};
pub use remote::{RemoteDirectory, RemoteRunner, SshDirectory};
pub use server::ServerConfig;
pub use ssh::{CommandOutput, SshClient};
