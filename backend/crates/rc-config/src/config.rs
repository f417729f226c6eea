use crate::{
    AclConfig, ConfigError, ConfigErrorResult, LoggingConfig, PubSubConfig, ServerConfig,
    SessionStoreConfig, WebSocketConfig,
};

use std::path::PathBuf;

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub session_store: SessionStoreConfig,
    pub pubsub: PubSubConfig,
    pub acl: AclConfig,
    pub websocket: WebSocketConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config with full production error handling.
    ///
    /// Loading order:
    /// 1. Check for RC_CONFIG_DIR env var, else use ./.roomcast/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply RC_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join("config.toml");

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Load and parse TOML file with detailed error context.
    fn load_toml(path: &PathBuf) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.clone(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: RC_CONFIG_DIR env var > ./.roomcast/ (relative to cwd)
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        if let Ok(dir) = std::env::var("RC_CONFIG_DIR") {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(".roomcast"))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.session_store.validate()?;
        self.pubsub.validate()?;
        self.acl.validate()?;
        self.websocket.validate()?;

        Ok(())
    }

    /// Get bind address as string.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration summary (NEVER logs session tokens or keys).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  server: {}:{} (max {} connections, {} workers)",
            self.server.host,
            self.server.port,
            self.server.max_connections,
            self.server.worker_count()
        );
        info!(
            "  session_store: {}:{}/db{} (namespace: {}, admit_on_presence: {})",
            self.session_store.host,
            self.session_store.port,
            self.session_store.db,
            self.session_store.namespace.as_deref().unwrap_or("-"),
            self.session_store.admit_on_presence
        );
        info!(
            "  pubsub: {}:{}/db{} (channel: {})",
            self.pubsub.host, self.pubsub.port, self.pubsub.db, self.pubsub.channel
        );
        info!("  acl: {}:{}", self.acl.host, self.acl.port);
        info!("  websocket: buffer={}", self.websocket.send_buffer_size);
        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("RC_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("RC_SERVER_PORT", &mut self.server.port);
        Self::apply_env_parse(
            "RC_SERVER_MAX_CONNECTIONS",
            &mut self.server.max_connections,
        );
        Self::apply_env_parse("RC_SERVER_WORKERS", &mut self.server.workers);

        // Session store
        Self::apply_env_string("RC_SESSION_HOST", &mut self.session_store.host);
        Self::apply_env_parse("RC_SESSION_PORT", &mut self.session_store.port);
        Self::apply_env_parse("RC_SESSION_DB", &mut self.session_store.db);
        Self::apply_env_option_string("RC_SESSION_NAMESPACE", &mut self.session_store.namespace);
        Self::apply_env_string("RC_SESSION_KEY", &mut self.session_store.session_key);
        Self::apply_env_bool(
            "RC_SESSION_ADMIT_ON_PRESENCE",
            &mut self.session_store.admit_on_presence,
        );

        // Pub/sub
        Self::apply_env_string("RC_PUBSUB_HOST", &mut self.pubsub.host);
        Self::apply_env_parse("RC_PUBSUB_PORT", &mut self.pubsub.port);
        Self::apply_env_parse("RC_PUBSUB_DB", &mut self.pubsub.db);
        Self::apply_env_string("RC_PUBSUB_CHANNEL", &mut self.pubsub.channel);

        // ACL
        Self::apply_env_string("RC_ACL_HOST", &mut self.acl.host);
        Self::apply_env_parse("RC_ACL_PORT", &mut self.acl.port);

        // WebSocket
        Self::apply_env_parse(
            "RC_WS_SEND_BUFFER_SIZE",
            &mut self.websocket.send_buffer_size,
        );

        // Logging
        Self::apply_env_parse("RC_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("RC_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("RC_LOG_FILE", &mut self.logging.file);
        Self::apply_env_string("RC_LOG_DIR", &mut self.logging.dir);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
