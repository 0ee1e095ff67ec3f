//! Live board channel: every JSON text frame received from one client is
//! relayed verbatim to all connected clients, the sender included.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::AppQuery;
use crate::hub::{BroadcastHub, ConnectionId, Subscription};
use crate::middlewares::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LiveQuery {
    /// Bearer token; browsers cannot set headers on an upgrade request
    pub token: Option<String>,
}

/// Upgrade to the live board channel
pub async fn kanban_socket(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<LiveQuery>,
) -> AppResult<Response> {
    let token = params
        .token
        .as_deref()
        .filter(|token| !token.is_empty())
        .ok_or(AppError::Unauthorized)?;
    let user = AuthUser::from_token(token, &state.config)?;

    // Registered before the handshake completes, so the client receives
    // everything broadcast after its upgrade response
    let subscription = state.hub.subscribe();
    let hub = state.hub.clone();

    Ok(ws.on_upgrade(move |socket| run_connection(socket, hub, subscription, user)))
}

async fn run_connection(
    mut socket: WebSocket,
    hub: BroadcastHub,
    mut subscription: Subscription,
    user: AuthUser,
) {
    let id = subscription.id();
    tracing::info!(connection_id = %id, user = %user.username, "live connection opened");

    loop {
        tokio::select! {
            inbound = socket.recv() => match inbound {
                Some(Ok(Message::Text(text))) => relay(&hub, id, text.as_str()),
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::debug!(connection_id = %id, "live receive failed: {}", e);
                    break;
                }
            },
            outbound = subscription.recv() => match outbound {
                Some(message) => {
                    let frame = Message::Text(message.to_string().into());
                    if let Err(e) = socket.send(frame).await {
                        tracing::debug!(connection_id = %id, "live send failed: {}", e);
                        break;
                    }
                }
                None => break,
            },
        }
    }

    drop(subscription);
    tracing::info!(connection_id = %id, "live connection closed");
}

fn relay(hub: &BroadcastHub, from: ConnectionId, text: &str) {
    if serde_json::from_str::<serde_json::Value>(text).is_err() {
        tracing::warn!(connection_id = %from, "ignoring non-JSON live message");
        return;
    }

    let delivered = hub.broadcast(text);
    tracing::debug!(connection_id = %from, delivered, "relayed live message");
}
