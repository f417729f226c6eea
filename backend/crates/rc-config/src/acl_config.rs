use crate::{ConfigError, ConfigErrorResult, DEFAULT_ACL_PORT, DEFAULT_HOST};

use serde::Deserialize;

/// The owning web application's authorization endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AclConfig {
    pub host: String,
    pub port: u16,
}

impl Default for AclConfig {
    fn default() -> Self {
        Self {
            host: String::from(DEFAULT_HOST),
            port: DEFAULT_ACL_PORT,
        }
    }
}

impl AclConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.host.is_empty() {
            return Err(ConfigError::config("acl.host cannot be empty"));
        }

        Ok(())
    }

    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}
