use crate::Result as ProtoResult;

use serde::{Deserialize, Serialize};

/// Events a client may send after the connection is admitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientEvent {
    /// Request to join a project room. Requires an ACL confirmation
    /// before any membership is recorded.
    Enter(EnterRequest),
    /// Leave every room the connection has joined.
    Leave,
}

impl ClientEvent {
    pub fn parse(text: &str) -> ProtoResult<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Payload of an `enter` event. Both fields are required for the join
/// to proceed; absence short-circuits with a denial before any I/O.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnterRequest {
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub user: Option<UserRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: i64,
    pub name: String,
}

/// Events the server emits to a connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    /// Greeting sent immediately after the connection is established.
    Connected,
    /// Join confirmed after a successful ACL check.
    Entered,
    /// Membership released after an explicit leave.
    Left,
    /// Activity payload fanned out to a project room.
    Activity(serde_json::Value),
    /// Boundary failure converted to a client-visible event; the
    /// connection stays open.
    Error { message: String },
}

impl ServerEvent {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn to_json(&self) -> String {
        // Serialization of these shapes cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Wire name of the event, for logs and metrics labels.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Connected => "connected",
            Self::Entered => "entered",
            Self::Left => "left",
            Self::Activity(_) => "activity",
            Self::Error { .. } => "error",
        }
    }
}
