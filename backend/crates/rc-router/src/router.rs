use crate::WorkerPool;

use rc_proto::{WorkerMessage, transit};

use log::{debug, warn};
use rand::Rng;

/// Routes each activity frame from the pub/sub bus to ONE worker,
/// picked uniformly at random. Only the members local to that worker's
/// shard receive the fan-out.
#[derive(Clone)]
pub struct ActivityRouter {
    pool: WorkerPool,
}

impl ActivityRouter {
    pub fn new(pool: WorkerPool) -> Self {
        Self { pool }
    }

    /// Forward one frame. Fire and forget: a missing pool or a full
    /// worker inbox drops the frame with a log entry, never an error.
    pub async fn route(&self, channel: &str, payload: &[u8]) {
        let workers = self.pool.live().await;
        if workers.is_empty() {
            warn!("No live workers, dropping activity frame on {channel}");
            return;
        }

        let index = rand::rng().random_range(0..workers.len());
        let worker = &workers[index];

        let frame = WorkerMessage::new(channel, transit::encode(payload));
        match worker.sender.try_send(frame) {
            Ok(()) => debug!("Routed activity frame on {channel} to worker {}", worker.id),
            Err(e) => warn!(
                "Dropped activity frame for worker {}: {e}",
                worker.id
            ),
        }
    }
}
