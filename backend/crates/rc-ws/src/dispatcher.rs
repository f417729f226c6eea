use crate::{ConnectionRegistry, Metrics, ShutdownGuard};

use rc_proto::{ServerEvent, WorkerMessage, activity, transit};

use log::{debug, info, warn};
use tokio::sync::mpsc;

/// One worker's inbox drain: turns routed activity frames into room
/// fan-out on this worker's registry shard.
///
/// Every malformed frame is dropped with a log entry; a bad producer
/// must never take a worker down.
pub struct WorkerDispatcher {
    worker_id: usize,
    registry: ConnectionRegistry,
    activity_channel: String,
    metrics: Metrics,
}

impl WorkerDispatcher {
    pub fn new(
        worker_id: usize,
        registry: ConnectionRegistry,
        activity_channel: String,
        metrics: Metrics,
    ) -> Self {
        Self {
            worker_id,
            registry,
            activity_channel,
            metrics,
        }
    }

    /// Drain the worker inbox until shutdown or the router side closes.
    pub async fn run(&self, mut rx: mpsc::Receiver<WorkerMessage>, mut shutdown: ShutdownGuard) {
        info!("Worker {} dispatcher started", self.worker_id);

        loop {
            tokio::select! {
                msg = rx.recv() => {
                    match msg {
                        Some(msg) => self.handle(msg).await,
                        None => {
                            info!("Worker {} inbox closed", self.worker_id);
                            break;
                        }
                    }
                }
                _ = shutdown.wait() => {
                    info!("Worker {} dispatcher shutting down", self.worker_id);
                    break;
                }
            }
        }
    }

    /// Process one routed frame.
    pub async fn handle(&self, msg: WorkerMessage) {
        if !msg.is_valid() {
            debug!("Worker {} dropped frame with empty fields", self.worker_id);
            self.metrics.message_dropped("invalid_frame");
            return;
        }

        if msg.channel != self.activity_channel {
            debug!(
                "Worker {} dropped frame for unexpected channel {}",
                self.worker_id, msg.channel
            );
            self.metrics.message_dropped("unexpected_channel");
            return;
        }

        let bytes = match transit::decode(&msg.message) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Worker {} could not decode frame: {e}", self.worker_id);
                self.metrics.message_dropped("transit_decode");
                return;
            }
        };

        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => {
                warn!(
                    "Worker {} dropped frame with invalid UTF-8: {e}",
                    self.worker_id
                );
                self.metrics.message_dropped("invalid_utf8");
                return;
            }
        };

        let value: serde_json::Value = match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(e) => {
                warn!(
                    "Worker {} dropped frame with invalid JSON: {e}",
                    self.worker_id
                );
                self.metrics.message_dropped("invalid_json");
                return;
            }
        };

        let Some(room) = activity::access_token(&value).map(str::to_string) else {
            debug!(
                "Worker {} dropped activity without an access token",
                self.worker_id
            );
            self.metrics.message_dropped("missing_access_token");
            return;
        };

        let delivered = self
            .registry
            .emit_to_room(&room, &ServerEvent::Activity(value))
            .await;
        self.metrics.activity_delivered(delivered);
        debug!(
            "Worker {} delivered activity to {delivered} connections in room {room}",
            self.worker_id
        );
    }
}
