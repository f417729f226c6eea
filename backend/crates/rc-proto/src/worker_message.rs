use serde::{Deserialize, Serialize};

/// Message forwarded from the coordinator to one worker over its
/// dedicated channel. `message` is transit-encoded (see [`crate::transit`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerMessage {
    pub channel: String,
    pub message: String,
}

impl WorkerMessage {
    pub fn new(channel: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            message: message.into(),
        }
    }

    /// A message with an empty channel or body is ignored by the
    /// dispatcher rather than treated as an error.
    pub fn is_valid(&self) -> bool {
        !self.channel.is_empty() && !self.message.is_empty()
    }
}
