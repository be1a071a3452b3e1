//! Hub — the single serialization point for board and session mutation.
//!
//! DESIGN
//! ======
//! The hub aggregates the `Board` and the `Sessions` registry. `AppState`
//! shares it behind one `RwLock`; every connection task takes the write guard
//! to apply an inbound message and fans out the resulting broadcast before
//! releasing it. Processing order therefore equals broadcast order for every
//! recipient.
//!
//! LIFECYCLE
//! =========
//! 1. `connect` → register session, `init` to the newcomer, `clients` to peers
//! 2. `apply` → dispatch one `ClientMessage`, broadcast the delta to everyone
//! 3. `disconnect` → unregister session, `clients` to the remaining sessions

use protocol::{ClientId, ClientMessage, ServerMessage};
use tokio::sync::mpsc;
use tracing::{debug, info};
use uuid::Uuid;

use super::board::Board;
use super::session::Sessions;

pub struct Hub {
    board: Board,
    sessions: Sessions,
}

impl Hub {
    #[must_use]
    pub fn new(board: Board) -> Self {
        Self { board, sessions: Sessions::new() }
    }

    #[cfg(test)]
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    #[must_use]
    pub fn sessions(&self) -> &Sessions {
        &self.sessions
    }

    /// Accept a new session and return its generated id.
    ///
    /// The newcomer receives `init` with the full snapshot and its own id;
    /// every other session receives the updated `clients` list.
    pub fn connect(&mut self, tx: mpsc::Sender<ServerMessage>) -> ClientId {
        let client_id = Uuid::new_v4().to_string();
        let session = self.sessions.register(client_id.clone(), tx);

        let mut init = self.snapshot();
        if let ServerMessage::Init { client_id: own_id, .. } = &mut init {
            *own_id = Some(client_id.clone());
        }
        self.sessions.send_to(&client_id, init);

        let clients = ServerMessage::Clients { clients: self.sessions.clients() };
        self.sessions.broadcast(&clients, Some(&client_id));

        info!(%client_id, color = %session.color, sessions = self.sessions.len(), "hub: session registered");
        client_id
    }

    /// Drop a session and tell the remaining sessions. Unknown ids are ignored.
    pub fn disconnect(&mut self, client_id: &str) -> bool {
        if self.sessions.unregister(client_id).is_none() {
            return false;
        }
        let clients = ServerMessage::Clients { clients: self.sessions.clients() };
        self.sessions.broadcast(&clients, None);
        info!(%client_id, sessions = self.sessions.len(), "hub: session unregistered");
        if self.sessions.is_empty() {
            info!("hub: no sessions connected");
        }
        true
    }

    /// Apply one inbound message and fan out its broadcast to every session,
    /// the origin included.
    ///
    /// Returns the broadcast, or `None` when the message was a no-op.
    pub fn apply(&mut self, client_id: &str, message: ClientMessage) -> Option<ServerMessage> {
        let event = match message {
            ClientMessage::MoveWord { word_id, x, y } => self.board.move_word(word_id, x, y, client_id),
            ClientMessage::AddToCanvas { word_id, x, y } => self.board.place_on_canvas(word_id, x, y, client_id),
            ClientMessage::RemoveFromCanvas { word_id } => self.board.remove_from_canvas(word_id, client_id),
            ClientMessage::Cursor { x, y } => self.sessions.update_cursor(client_id, x, y),
        };

        let Some(event) = event else {
            debug!(%client_id, "hub: message ignored");
            return None;
        };
        let delivered = self.sessions.broadcast(&event, None);
        if !matches!(event, ServerMessage::CursorMoved { .. }) {
            debug!(%client_id, kind = event.kind(), delivered, "hub: broadcast");
        }
        Some(event)
    }

    /// Current words and sessions, in the shape of an `init` message.
    #[must_use]
    pub fn snapshot(&self) -> ServerMessage {
        ServerMessage::Init { client_id: None, words: self.board.words().to_vec(), clients: self.sessions.clients() }
    }
}

#[cfg(test)]
#[path = "hub_test.rs"]
mod tests;
