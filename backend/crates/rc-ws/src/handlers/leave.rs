use crate::WsError;
use crate::handlers::context::HandlerContext;

use rc_proto::ServerEvent;

use log::{debug, warn};

/// Handle a `leave` event: release every room the connection occupies
/// and acknowledge. A connection with no memberships gets no reply.
pub async fn handle_leave(ctx: &HandlerContext) {
    match ctx.registry.leave_rooms(ctx.connection_id).await {
        Ok(left) => {
            if left.is_empty() {
                debug!(
                    "Leave from connection {} with no memberships",
                    ctx.connection_id
                );
                return;
            }
            ctx.emit(&ServerEvent::Left).await;
        }
        Err(WsError::UnknownConnection { .. }) => {
            debug!("Leave from already-gone connection {}", ctx.connection_id);
        }
        Err(e) => {
            warn!(
                "Could not release rooms for connection {}: {e}",
                ctx.connection_id
            );
            ctx.metrics.error_occurred(e.error_code());
        }
    }
}
