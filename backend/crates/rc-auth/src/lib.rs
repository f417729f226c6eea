pub mod acl_gateway;
pub mod cookies;
pub mod error;
pub mod handshake;
pub mod session_store;

pub use acl_gateway::{AclDecision, AclGateway};
pub use cookies::session_token;
pub use error::{AuthError, Result};
pub use handshake::{HandshakeAuthorizer, HandshakePolicy, is_cross_origin};
pub use session_store::{RedisSessionStore, SessionStore, namespaced_key};
