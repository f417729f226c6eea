use crate::{AuthError, Result as AuthErrorResult, SessionStore, cookies, namespaced_key};

use std::panic::Location;
use std::sync::Arc;

use error_location::ErrorLocation;
use log::debug;
use rc_config::SessionStoreConfig;

/// Static inputs of the admission check, derived from configuration.
#[derive(Debug, Clone)]
pub struct HandshakePolicy {
    /// Host clients must present; the listening port is appended for
    /// cross-origin requests.
    pub host: String,
    pub port: u16,
    /// Cookie name carrying the session token
    pub session_key: String,
    /// Optional store key namespace
    pub namespace: Option<String>,
    /// Admission polarity; `false` inverts the store lookup and admits
    /// only tokens with no session entry.
    pub admit_on_presence: bool,
}

impl HandshakePolicy {
    pub fn new(host: impl Into<String>, port: u16, session: &SessionStoreConfig) -> Self {
        Self {
            host: host.into(),
            port,
            session_key: session.session_key.clone(),
            namespace: session.namespace.clone(),
            admit_on_presence: session.admit_on_presence,
        }
    }
}

/// Decide whether a request crossed an origin boundary: an `Origin`
/// header naming any host other than the configured one.
pub fn is_cross_origin(origin_header: Option<&str>, configured_host: &str) -> bool {
    let Some(origin) = origin_header else {
        return false;
    };

    let without_scheme = origin.split_once("://").map_or(origin, |(_, rest)| rest);
    let host = without_scheme
        .split([':', '/'])
        .next()
        .unwrap_or(without_scheme);

    host != configured_host
}

/// Admits or rejects a connection attempt before the real-time channel
/// is established. One-shot: suspends only on the store round-trip.
pub struct HandshakeAuthorizer {
    store: Arc<dyn SessionStore>,
    policy: HandshakePolicy,
}

impl HandshakeAuthorizer {
    pub fn new(store: Arc<dyn SessionStore>, policy: HandshakePolicy) -> Self {
        Self { store, policy }
    }

    pub fn policy(&self) -> &HandshakePolicy {
        &self.policy
    }

    /// Run the admission checks in order: host, cookie, session key,
    /// store lookup against the admission polarity.
    pub async fn authorize(
        &self,
        host_header: Option<&str>,
        cross_origin: bool,
        cookie_header: Option<&str>,
    ) -> AuthErrorResult<()> {
        let expected = if cross_origin {
            format!("{}:{}", self.policy.host, self.policy.port)
        } else {
            self.policy.host.clone()
        };

        let actual = host_header.unwrap_or_default();
        if actual != expected {
            return Err(AuthError::HostMismatch {
                expected,
                actual: actual.to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let token = cookies::session_token(cookie_header, &self.policy.session_key)?;
        let key = namespaced_key(self.policy.namespace.as_deref(), &token);

        let found = self.store.exists(&key).await?;

        if found != self.policy.admit_on_presence {
            debug!(
                "Admission rejected: lookup {} with admit_on_presence={}",
                if found { "hit" } else { "miss" },
                self.policy.admit_on_presence
            );
            return Err(AuthError::SessionRejected {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }
}
