//! Documents the routing behavior when one project's members are
//! spread across worker shards: each activity frame reaches a single
//! randomly chosen worker, so only that worker's local members see it.

use rc_router::{ActivityRouter, WorkerHandle, WorkerId, WorkerPool};
use rc_ws::{ConnectionLimits, ConnectionRegistry, Metrics, WorkerDispatcher};

use rc_proto::{UserRef, WorkerMessage};

use axum::extract::ws::Message;
use serde_json::json;
use tokio::sync::mpsc;

struct Shard {
    dispatcher: WorkerDispatcher,
    inbox: mpsc::Receiver<WorkerMessage>,
    member_rx: mpsc::Receiver<Message>,
}

async fn shard_with_member(worker_id: usize, pool: &WorkerPool) -> Shard {
    let registry = ConnectionRegistry::new(ConnectionLimits { max_total: 10 });

    let (member_tx, member_rx) = mpsc::channel(8);
    let connection_id = registry.register(member_tx).await.unwrap();
    registry
        .join_room(
            connection_id,
            "p1",
            UserRef {
                id: worker_id as i64,
                name: format!("user-{worker_id}"),
            },
        )
        .await
        .unwrap();

    let (inbox_tx, inbox) = mpsc::channel(8);
    pool.register(WorkerHandle::new(WorkerId::new(worker_id), inbox_tx))
        .await;

    Shard {
        dispatcher: WorkerDispatcher::new(
            worker_id,
            registry,
            "activity".to_string(),
            Metrics::new(),
        ),
        inbox,
        member_rx,
    }
}

#[tokio::test]
async fn given_members_on_two_shards_when_routed_then_only_one_shard_delivers() {
    let pool = WorkerPool::new();
    let mut shards = vec![
        shard_with_member(0, &pool).await,
        shard_with_member(1, &pool).await,
    ];

    let router = ActivityRouter::new(pool);
    let payload = json!({ "project": { "access_token": "p1" }, "text": "hi" });
    router.route("activity", payload.to_string().as_bytes()).await;

    // Drain each worker inbox through its dispatcher.
    let mut frames = 0;
    for shard in &mut shards {
        while let Ok(frame) = shard.inbox.try_recv() {
            frames += 1;
            shard.dispatcher.handle(frame).await;
        }
    }
    assert_eq!(frames, 1, "exactly one worker receives the frame");

    // Both shards have a member of room p1, but only the chosen
    // worker's member gets the event; the other shard's member is
    // silently skipped.
    let deliveries = shards
        .iter_mut()
        .filter_map(|shard| shard.member_rx.try_recv().ok())
        .count();
    assert_eq!(deliveries, 1);
}
