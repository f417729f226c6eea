//! Binary-safe transform for payloads crossing the coordinator/worker
//! channel, which only carries text-safe strings.

use crate::Result as ProtoResult;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

pub fn encode(payload: &[u8]) -> String {
    STANDARD.encode(payload)
}

pub fn decode(text: &str) -> ProtoResult<Vec<u8>> {
    Ok(STANDARD.decode(text)?)
}
