//! Session registry — connected clients, their colors and last cursors.
//!
//! ARCHITECTURE
//! ============
//! A session exists exactly as long as its websocket connection. Each entry
//! holds the public `Session` record plus the sender half of the connection's
//! outbound queue; the connection task drains the receiver half.
//!
//! TRADE-OFFS
//! ==========
//! Fan-out uses `try_send` so one slow or dead connection never blocks the
//! others. A full queue drops that message for that recipient only; a closed
//! queue is skipped and cleaned up when its connection task observes the
//! close.

use std::collections::HashMap;

use protocol::{ClientId, PaletteColor, ServerMessage, Session};
use rand::Rng;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::debug;

struct Entry {
    session: Session,
    /// Join sequence number, used to keep the client list in join order.
    seq: u64,
    tx: mpsc::Sender<ServerMessage>,
}

#[derive(Default)]
pub struct Sessions {
    entries: HashMap<ClientId, Entry>,
    next_seq: u64,
}

/// Pick a palette color uniformly at random. Collisions are allowed.
#[must_use]
pub fn random_color() -> PaletteColor {
    let index = rand::rng().random_range(0..PaletteColor::ALL.len());
    PaletteColor::ALL[index]
}

impl Sessions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a session with a random color and its cursor at the origin.
    pub fn register(&mut self, client_id: ClientId, tx: mpsc::Sender<ServerMessage>) -> Session {
        let session = Session { id: client_id.clone(), color: random_color(), cursor_x: 0.0, cursor_y: 0.0 };
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.insert(client_id, Entry { session: session.clone(), seq, tx });
        session
    }

    /// Remove a session. Returns the removed record, if it existed.
    pub fn unregister(&mut self, client_id: &str) -> Option<Session> {
        self.entries.remove(client_id).map(|entry| entry.session)
    }

    /// Overwrite a session's cursor. Last write wins.
    ///
    /// Returns the `cursorMoved` broadcast, or `None` for an unknown session.
    pub fn update_cursor(&mut self, client_id: &str, x: f64, y: f64) -> Option<ServerMessage> {
        let entry = self.entries.get_mut(client_id)?;
        entry.session.cursor_x = x;
        entry.session.cursor_y = y;
        Some(ServerMessage::CursorMoved { client_id: client_id.to_owned(), x, y, color: entry.session.color })
    }

    #[cfg(test)]
    #[must_use]
    pub fn get(&self, client_id: &str) -> Option<&Session> {
        self.entries.get(client_id).map(|entry| &entry.session)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshot of every session, in join order.
    #[must_use]
    pub fn clients(&self) -> Vec<Session> {
        let mut entries: Vec<&Entry> = self.entries.values().collect();
        entries.sort_by_key(|entry| entry.seq);
        entries.into_iter().map(|entry| entry.session.clone()).collect()
    }

    /// Queue a message for one session. Returns whether it was queued.
    pub fn send_to(&self, client_id: &str, message: ServerMessage) -> bool {
        let Some(entry) = self.entries.get(client_id) else {
            return false;
        };
        deliver(client_id, &entry.tx, message)
    }

    /// Queue a message for every session, optionally skipping one.
    /// Returns how many sessions it was queued for.
    pub fn broadcast(&self, message: &ServerMessage, exclude: Option<&str>) -> usize {
        let mut delivered = 0;
        for (client_id, entry) in &self.entries {
            if exclude == Some(client_id.as_str()) {
                continue;
            }
            if deliver(client_id, &entry.tx, message.clone()) {
                delivered += 1;
            }
        }
        delivered
    }
}

fn deliver(client_id: &str, tx: &mpsc::Sender<ServerMessage>, message: ServerMessage) -> bool {
    match tx.try_send(message) {
        Ok(()) => true,
        Err(TrySendError::Full(message)) => {
            debug!(%client_id, kind = message.kind(), "session queue full; message dropped");
            false
        }
        Err(TrySendError::Closed(_)) => {
            debug!(%client_id, "session queue closed; skipped");
            false
        }
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
