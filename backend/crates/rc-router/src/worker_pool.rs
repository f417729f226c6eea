use rc_proto::WorkerMessage;

use std::sync::Arc;

use log::info;
use tokio::sync::{RwLock, mpsc};

/// Identifier of one worker in the pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorkerId(usize);

impl WorkerId {
    pub fn new(id: usize) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for WorkerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Routing endpoint of one worker: its id and inbox sender.
///
/// Workers are interchangeable from the router's point of view; the
/// handle carries no room knowledge.
#[derive(Clone)]
pub struct WorkerHandle {
    pub id: WorkerId,
    pub sender: mpsc::Sender<WorkerMessage>,
}

impl WorkerHandle {
    pub fn new(id: WorkerId, sender: mpsc::Sender<WorkerMessage>) -> Self {
        Self { id, sender }
    }
}

/// Registry of live worker handles
pub struct WorkerPool {
    inner: Arc<RwLock<Vec<WorkerHandle>>>,
}

impl WorkerPool {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn register(&self, handle: WorkerHandle) {
        let mut workers = self.inner.write().await;
        info!("Worker {} registered with the pool", handle.id);
        workers.push(handle);
    }

    /// Drop a worker that exited; frames stop being routed its way
    pub async fn remove(&self, id: WorkerId) {
        let mut workers = self.inner.write().await;
        workers.retain(|handle| handle.id != id);
        info!("Worker {id} removed from the pool ({} live)", workers.len());
    }

    /// Snapshot of the live handles
    pub async fn live(&self) -> Vec<WorkerHandle> {
        let workers = self.inner.read().await;
        workers.clone()
    }

    pub async fn len(&self) -> usize {
        let workers = self.inner.read().await;
        workers.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for WorkerPool {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for WorkerPool {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
