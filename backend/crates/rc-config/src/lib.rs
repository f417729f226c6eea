mod acl_config;
mod config;
mod error;
mod log_level;
mod logging_config;
mod pubsub_config;
mod server_config;
mod session_store_config;
mod websocket_config;

pub use acl_config::AclConfig;
pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use pubsub_config::PubSubConfig;
pub use server_config::ServerConfig;
pub use session_store_config::SessionStoreConfig;
pub use websocket_config::WebSocketConfig;

#[cfg(test)]
mod tests;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3333;
const DEFAULT_MAX_CONNECTIONS: usize = 10_000;
const DEFAULT_REDIS_HOST: &str = "127.0.0.1";
const DEFAULT_REDIS_PORT: u16 = 6379;
const DEFAULT_SESSION_DB: u32 = 6;
const DEFAULT_SESSION_KEY: &str = "_session_id";
const DEFAULT_PUBSUB_DB: u32 = 0;
const DEFAULT_ACTIVITY_CHANNEL: &str = "activity";
const DEFAULT_ACL_PORT: u16 = 3000;
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";

const MIN_PORT: u16 = 1024;
const MIN_MAX_CONNECTIONS: usize = 1;
const MAX_MAX_CONNECTIONS: usize = 100_000;
const MAX_WORKERS: usize = 256;
