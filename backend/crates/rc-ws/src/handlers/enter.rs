use crate::WsError;
use crate::handlers::context::HandlerContext;

use rc_auth::AclDecision;
use rc_proto::{EnterRequest, ServerEvent};

use log::{debug, info, warn};

/// Handle an `enter` event: confirm access with the ACL API, then record
/// room membership and acknowledge.
///
/// Failures stay on this connection as `error` events; nothing here tears
/// the connection down.
pub async fn handle_enter(request: EnterRequest, ctx: &HandlerContext) {
    let (Some(project), Some(user)) = (request.project, request.user) else {
        debug!(
            "Enter from connection {} missing project or user",
            ctx.connection_id
        );
        ctx.emit(&ServerEvent::error("invalid request parameters"))
            .await;
        return;
    };

    match ctx.acl.check_access(&project, user.id).await {
        AclDecision::Authorized => {
            match ctx.registry.join_room(ctx.connection_id, &project, user).await {
                Ok(_) => {
                    ctx.emit(&ServerEvent::Entered).await;
                }
                Err(WsError::UnknownConnection { .. }) => {
                    // Client disconnected while the ACL check was in flight.
                    debug!(
                        "Connection {} gone before entering room {project}",
                        ctx.connection_id
                    );
                }
                Err(e) => {
                    warn!(
                        "Could not record membership for connection {}: {e}",
                        ctx.connection_id
                    );
                    ctx.metrics.error_occurred(e.error_code());
                }
            }
        }
        AclDecision::Denied => {
            info!(
                "Access denied for user {} on project {project} (connection {})",
                user.id, ctx.connection_id
            );
            ctx.emit(&ServerEvent::error("no access capability for this project"))
                .await;
        }
    }
}
