pub mod error;
pub mod router;
pub mod subscriber;
pub mod worker_pool;

pub use error::{Result, RouterError};
pub use router::ActivityRouter;
pub use subscriber::run_subscriber;
pub use worker_pool::{WorkerHandle, WorkerId, WorkerPool};

#[cfg(test)]
mod tests;
