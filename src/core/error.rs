use thiserror::Error;

use crate::ssh::CommandOutput;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid base path: {0}")]
    InvalidBase(String),

    #[error("Invalid release ID: {0}")]
    InvalidReleaseId(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Remote operation failed: {0}")]
    Remote(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidBase(_) => "INVALID_BASE",
            Error::InvalidReleaseId(_) => "INVALID_RELEASE_ID",
            Error::InvalidArgument(_) => "INVALID_ARGUMENT",
            Error::Remote(_) => "REMOTE_OPERATION_FAILED",
            Error::Io(_) => "IO_ERROR",
            Error::Json(_) => "JSON_ERROR",
        }
    }

    /// Build a `Remote` error from a failed command, folding in whichever
    /// output stream actually carries the failure detail.
    pub fn remote_command(description: &str, output: &CommandOutput) -> Self {
        let detail = if output.stderr.trim().is_empty() {
            output.stdout.trim()
        } else {
            output.stderr.trim()
        };

        if detail.is_empty() {
            Error::Remote(format!("{} (exit {})", description, output.exit_code))
        } else {
            Error::Remote(format!(
                "{} (exit {}): {}",
                description, output.exit_code, detail
            ))
        }
    }
}
