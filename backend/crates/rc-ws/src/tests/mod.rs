mod membership;

use crate::{ConnectionId, ConnectionLimits, ConnectionRegistry};

use axum::extract::ws::Message;
use tokio::sync::mpsc;

/// Register a connection with the given outgoing buffer capacity,
/// returning its id and the receiving half of its send channel.
async fn connect(
    registry: &ConnectionRegistry,
    buffer: usize,
) -> (ConnectionId, mpsc::Receiver<Message>) {
    let (tx, rx) = mpsc::channel(buffer);
    let connection_id = registry.register(tx).await.unwrap();
    (connection_id, rx)
}

fn registry_with_limit(max_total: usize) -> ConnectionRegistry {
    ConnectionRegistry::new(ConnectionLimits { max_total })
}

/// Decode the next queued outgoing frame as JSON.
fn next_json(rx: &mut mpsc::Receiver<Message>) -> serde_json::Value {
    match rx.try_recv().expect("expected a queued frame") {
        Message::Text(text) => serde_json::from_str(text.as_str()).unwrap(),
        other => panic!("expected text frame, got {other:?}"),
    }
}

fn user(id: i64) -> rc_proto::UserRef {
    rc_proto::UserRef {
        id,
        name: format!("user-{id}"),
    }
}
