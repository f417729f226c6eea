use crate::{AuthError, Result as AuthErrorResult};

use std::panic::Location;

use async_trait::async_trait;
use error_location::ErrorLocation;
use log::{debug, info};
use redis::AsyncCommands;
use redis::aio::ConnectionManager;

/// Read-only view of the web application's session partition. Sessions
/// are written exclusively by the web application; the real-time tier
/// only checks for their existence.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// A missing key is a normal negative result; `Err` is reserved for
    /// store connectivity failures.
    async fn exists(&self, key: &str) -> AuthErrorResult<bool>;
}

/// Apply the configured namespace prefix to a session token.
pub fn namespaced_key(namespace: Option<&str>, token: &str) -> String {
    match namespace {
        Some(ns) => format!("{ns}:{token}"),
        None => token.to_string(),
    }
}

/// Session store over a single long-lived Redis handle, shared by all
/// lookups in a worker.
#[derive(Clone)]
pub struct RedisSessionStore {
    conn: ConnectionManager,
}

impl RedisSessionStore {
    pub async fn connect(url: &str) -> AuthErrorResult<Self> {
        info!("Connecting to session store at {url}");

        let client = redis::Client::open(url).map_err(|e| AuthError::Store {
            source: e,
            location: ErrorLocation::from(Location::caller()),
        })?;

        let conn = ConnectionManager::new(client)
            .await
            .map_err(|e| AuthError::Store {
                source: e,
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!("Session store connection established");

        Ok(Self { conn })
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn exists(&self, key: &str) -> AuthErrorResult<bool> {
        // ConnectionManager clones share the underlying multiplexed
        // connection; commands need a mutable handle.
        let mut conn = self.conn.clone();

        let value: Option<String> = conn.get(key).await.map_err(|e| AuthError::Store {
            source: e,
            location: ErrorLocation::from(Location::caller()),
        })?;

        debug!("Session lookup: {} -> {}", key, value.is_some());

        Ok(value.is_some())
    }
}

impl std::fmt::Debug for RedisSessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisSessionStore")
            .field("connection", &"ConnectionManager")
            .finish()
    }
}
