//! WebSocket handler — bidirectional message relay.
//!
//! DESIGN
//! ======
//! On upgrade, registers a session with the hub and enters a `select!` loop:
//! - Incoming client text → decode + apply through the hub
//! - Queued broadcasts for this session → encode + forward to the socket
//!
//! The hub decides who receives what; this module only translates between
//! websocket frames and protocol messages.
//!
//! LIFECYCLE
//! =========
//! 1. Upgrade → hub `connect` queues `init` for this session
//! 2. Client sends text → decode → hub `apply` → broadcast queued
//! 3. Close or send failure → hub `disconnect` → `clients` to peers
//!
//! ERROR HANDLING
//! ==============
//! Malformed or unknown inbound messages are logged and dropped; the
//! connection stays open. Binary and ping frames are ignored.

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use protocol::{DecodeError, ServerMessage};
use tokio::sync::mpsc;
use tracing::{info, trace, warn};

use crate::state::AppState;

// =============================================================================
// UPGRADE
// =============================================================================

pub async fn handle_ws(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| run_ws(socket, state))
}

// =============================================================================
// CONNECTION
// =============================================================================

async fn run_ws(mut socket: WebSocket, state: AppState) {
    // Per-connection queue for messages fanned out by the hub.
    let (client_tx, mut client_rx) = mpsc::channel::<ServerMessage>(state.client_channel_capacity);
    let client_id = state.hub.write().await.connect(client_tx);

    info!(%client_id, "ws: client connected");

    loop {
        tokio::select! {
            msg = socket.recv() => {
                let Some(Ok(msg)) = msg else { break };
                match msg {
                    Message::Text(text) => {
                        process_inbound_text(&state, &client_id, text.as_str()).await;
                    }
                    Message::Close(_) => break,
                    _ => {}
                }
            }
            Some(message) = client_rx.recv() => {
                if send_message(&mut socket, &client_id, &message).await.is_err() {
                    break;
                }
            }
        }
    }

    state.hub.write().await.disconnect(&client_id);
    info!(%client_id, "ws: client disconnected");
}

async fn send_message(socket: &mut WebSocket, client_id: &str, message: &ServerMessage) -> Result<(), axum::Error> {
    match protocol::encode_server_message(message) {
        Ok(text) => socket.send(Message::Text(text.into())).await,
        Err(e) => {
            warn!(%client_id, kind = message.kind(), error = %e, "ws: failed to encode outbound message");
            Ok(())
        }
    }
}

// =============================================================================
// INBOUND
// =============================================================================

/// Decode one inbound text frame and apply it through the hub.
///
/// Returns the broadcast the hub fanned out, if any. Kept apart from the
/// socket loop so tests can drive it without a transport.
async fn process_inbound_text(state: &AppState, client_id: &str, text: &str) -> Option<ServerMessage> {
    let message = match protocol::decode_client_message(text) {
        Ok(message) => message,
        Err(DecodeError::UnknownType(kind)) => {
            warn!(%client_id, %kind, "ws: unknown message type dropped");
            return None;
        }
        Err(e) => {
            warn!(%client_id, error = %e, "ws: invalid inbound message dropped");
            return None;
        }
    };

    trace!(%client_id, kind = message.kind(), "ws: recv");
    state.hub.write().await.apply(client_id, message)
}

#[cfg(test)]
#[path = "ws_test.rs"]
mod tests;
