//! Activity messages are published on the shared bus by external actors
//! as UTF-8 JSON. The only field the real-time tier interprets is
//! `project.access_token`, which names the target room; everything else
//! is opaque and forwarded verbatim.

use serde_json::Value;

/// Extract the room identifier from a parsed activity message.
///
/// Returns `None` when the message has no `project` object or no
/// string `access_token` inside it; such messages must never trigger
/// an emission.
pub fn access_token(message: &Value) -> Option<&str> {
    message.get("project")?.get("access_token")?.as_str()
}
