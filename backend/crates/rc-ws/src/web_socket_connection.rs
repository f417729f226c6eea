use crate::{
    ConnectionConfig, ConnectionRegistry, HandlerContext, Metrics, Result as WsErrorResult,
    ShutdownGuard, WsError, create_event_span, handlers,
};

use rc_auth::AclGateway;
use rc_proto::{ClientEvent, ServerEvent};

use std::panic::Location;
use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use error_location::ErrorLocation;
use futures::{SinkExt, StreamExt};
use log::{debug, error, info};
use tokio::sync::mpsc;
use tracing::Instrument;

/// Manages a single WebSocket connection
pub struct WebSocketConnection {
    registry: ConnectionRegistry,
    acl: Arc<AclGateway>,
    config: ConnectionConfig,
    metrics: Metrics,
}

impl WebSocketConnection {
    pub fn new(
        registry: ConnectionRegistry,
        acl: Arc<AclGateway>,
        config: ConnectionConfig,
        metrics: Metrics,
    ) -> Self {
        Self {
            registry,
            acl,
            config,
            metrics,
        }
    }

    /// Handle the WebSocket connection lifecycle
    pub async fn handle(
        self,
        socket: WebSocket,
        mut shutdown_guard: ShutdownGuard,
    ) -> WsErrorResult<()> {
        // Split socket into sender and receiver
        let (mut ws_sender, mut ws_receiver) = socket.split();

        // Bounded channel for outgoing messages (backpressure handling)
        let (tx, mut rx) = mpsc::channel::<Message>(self.config.send_buffer_size);

        let connection_id = self.registry.register(tx.clone()).await?;
        self.metrics.connection_established();
        info!("WebSocket connection {connection_id} established");

        // Spawn send task
        let send_task = tokio::spawn(async move {
            while let Some(msg) = rx.recv().await {
                if ws_sender.send(msg).await.is_err() {
                    break;
                }
            }
        });

        let ctx = HandlerContext::new(
            connection_id,
            self.registry.clone(),
            Arc::clone(&self.acl),
            self.metrics.clone(),
        );

        // Greeting comes before any client event is processed
        ctx.emit(&ServerEvent::Connected).await;

        let result = loop {
            tokio::select! {
                msg = ws_receiver.next() => {
                    match msg {
                        Some(Ok(msg)) => self.handle_client_message(msg, &ctx, &tx).await,
                        Some(Err(e)) => {
                            error!("WebSocket error on connection {connection_id}: {e}");
                            break Err(WsError::ConnectionClosed {
                                reason: format!("WebSocket error: {}", e),
                                location: ErrorLocation::from(Location::caller()),
                            });
                        }
                        None => {
                            info!("Connection {connection_id} closed by client");
                            break Ok(());
                        }
                    }
                }

                _ = shutdown_guard.wait() => {
                    info!("Shutting down connection {connection_id} gracefully");
                    break Ok(());
                }
            }
        };

        // Disconnect releases every room membership
        self.registry.unregister(connection_id).await;
        drop(tx); // Close channel to terminate send task
        let _ = send_task.await;

        self.metrics
            .connection_closed(if result.is_ok() { "normal" } else { "error" });

        result
    }

    /// Handle a message from the client
    async fn handle_client_message(
        &self,
        msg: Message,
        ctx: &HandlerContext,
        tx: &mpsc::Sender<Message>,
    ) {
        match msg {
            Message::Text(text) => match ClientEvent::parse(text.as_str()) {
                Ok(ClientEvent::Enter(request)) => {
                    self.metrics.event_received("enter");
                    let span = create_event_span(&ctx.connection_id, "enter");
                    handlers::enter::handle_enter(request, ctx)
                        .instrument(span)
                        .await;
                }
                Ok(ClientEvent::Leave) => {
                    self.metrics.event_received("leave");
                    let span = create_event_span(&ctx.connection_id, "leave");
                    handlers::leave::handle_leave(ctx).instrument(span).await;
                }
                Err(e) => {
                    debug!(
                        "Unrecognized event from connection {}: {e}",
                        ctx.connection_id
                    );
                    self.metrics.message_dropped("unrecognized_event");
                }
            },
            Message::Binary(data) => {
                debug!(
                    "Ignoring binary frame ({} bytes) from connection {}",
                    data.len(),
                    ctx.connection_id
                );
                self.metrics.message_dropped("binary_frame");
            }
            Message::Ping(data) => {
                if tx.send(Message::Pong(data)).await.is_err() {
                    debug!("Could not pong connection {}", ctx.connection_id);
                }
            }
            Message::Pong(_) => {
                // Heartbeat response received
            }
            Message::Close(_) => {
                info!(
                    "Received close frame from connection {}",
                    ctx.connection_id
                );
            }
        }
    }
}
