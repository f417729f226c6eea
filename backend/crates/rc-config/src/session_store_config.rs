use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_REDIS_HOST, DEFAULT_REDIS_PORT, DEFAULT_SESSION_DB,
    DEFAULT_SESSION_KEY,
};

use serde::Deserialize;

/// Shared store partition holding web-application sessions. The
/// real-time tier only ever reads it.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionStoreConfig {
    pub host: String,
    pub port: u16,
    pub db: u32,
    /// Optional key namespace, joined to the token with `:`
    pub namespace: Option<String>,
    /// Cookie name carrying the session token
    pub session_key: String,
    /// Admission polarity: `true` admits when the session key exists in
    /// the store, `false` inverts the lookup and admits only on a
    /// negative result.
    pub admit_on_presence: bool,
}

impl Default for SessionStoreConfig {
    fn default() -> Self {
        Self {
            host: String::from(DEFAULT_REDIS_HOST),
            port: DEFAULT_REDIS_PORT,
            db: DEFAULT_SESSION_DB,
            namespace: None,
            session_key: String::from(DEFAULT_SESSION_KEY),
            admit_on_presence: true,
        }
    }
}

impl SessionStoreConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.session_key.is_empty() {
            return Err(ConfigError::session_store(
                "session_store.session_key cannot be empty",
            ));
        }

        if let Some(ns) = &self.namespace
            && ns.is_empty()
        {
            return Err(ConfigError::session_store(
                "session_store.namespace cannot be empty (omit it instead)",
            ));
        }

        Ok(())
    }

    pub fn url(&self) -> String {
        format!("redis://{}:{}/{}", self.host, self.port, self.db)
    }
}
