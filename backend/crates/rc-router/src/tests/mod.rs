
use crate::{WorkerHandle, WorkerId, WorkerPool};

use rc_proto::WorkerMessage;

use tokio::sync::mpsc;

async fn pool_with_workers(count: usize, buffer: usize) -> (WorkerPool, Vec<mpsc::Receiver<WorkerMessage>>) {
    let pool = WorkerPool::new();
    let mut inboxes = Vec::new();
    for id in 0..count {
        let (tx, rx) = mpsc::channel(buffer);
        pool.register(WorkerHandle::new(WorkerId::new(id), tx)).await;
        inboxes.push(rx);
    }
    (pool, inboxes)
}
