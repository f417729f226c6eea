use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_ACTIVITY_CHANNEL, DEFAULT_PUBSUB_DB,
    DEFAULT_REDIS_HOST, DEFAULT_REDIS_PORT,
};

use serde::Deserialize;

/// Shared pub/sub bus carrying externally published activity events.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PubSubConfig {
    pub host: String,
    pub port: u16,
    pub db: u32,
    /// Channel the coordinator subscribes to
    pub channel: String,
}

impl Default for PubSubConfig {
    fn default() -> Self {
        Self {
            host: String::from(DEFAULT_REDIS_HOST),
            port: DEFAULT_REDIS_PORT,
            db: DEFAULT_PUBSUB_DB,
            channel: String::from(DEFAULT_ACTIVITY_CHANNEL),
        }
    }
}

impl PubSubConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.channel.is_empty() {
            return Err(ConfigError::pubsub("pubsub.channel cannot be empty"));
        }

        Ok(())
    }

    pub fn url(&self) -> String {
        format!("redis://{}:{}/{}", self.host, self.port, self.db)
    }
}
