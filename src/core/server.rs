use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Connection details for the server that holds the deployed project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    pub host: String,
    pub user: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub identity_file: Option<String>,
}

fn default_port() -> u16 {
    22
}

impl ServerConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: ServerConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(Error::InvalidArgument("Server host cannot be empty".into()));
        }
        if self.user.trim().is_empty() {
            return Err(Error::InvalidArgument("Server user cannot be empty".into()));
        }
        Ok(())
    }
}
