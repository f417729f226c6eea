pub mod activity;
pub mod error;
pub mod events;
pub mod transit;
pub mod worker_message;

pub use activity::access_token;
pub use error::{ProtoError, Result};
pub use events::{ClientEvent, EnterRequest, ServerEvent, UserRef};
pub use worker_message::WorkerMessage;

#[cfg(test)]
mod tests;
