//! Mirrored board view: the client's read-only copy of words and sessions.
//!
//! This module owns the local state the renderer draws from. It is rebuilt by
//! `init` and patched by every later server broadcast; nothing else writes to
//! it. Word tiles also carry a cosmetic tilt that is chosen locally on every
//! `init` and never sent to the server, so two viewers may see the same word
//! at different angles.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use protocol::{ClientId, ServerMessage, Session, Word, WordId};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::consts::WORD_TILT_DEG;

/// A word as displayed by this client.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewWord {
    pub word: Word,
    /// Client-local tilt in degrees.
    pub rotation: f64,
}

/// The client's copy of the shared board.
pub struct BoardView {
    words: Vec<ViewWord>,
    clients: Vec<Session>,
    own_id: Option<ClientId>,
    rng: SmallRng,
}

impl BoardView {
    /// Empty view. `seed` drives the cosmetic tilt of words.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self { words: Vec::new(), clients: Vec::new(), own_id: None, rng: SmallRng::seed_from_u64(seed) }
    }

    // --- Queries ---

    #[must_use]
    pub fn words(&self) -> &[ViewWord] {
        &self.words
    }

    #[must_use]
    pub fn word(&self, word_id: WordId) -> Option<&ViewWord> {
        self.words.iter().find(|w| w.word.id == word_id)
    }

    /// Words placed on the canvas.
    pub fn canvas_words(&self) -> impl Iterator<Item = &ViewWord> {
        self.words.iter().filter(|w| w.word.on_canvas)
    }

    /// Words waiting in the tray.
    pub fn tray_words(&self) -> impl Iterator<Item = &ViewWord> {
        self.words.iter().filter(|w| !w.word.on_canvas)
    }

    /// Every connected session, this client included.
    #[must_use]
    pub fn clients(&self) -> &[Session] {
        &self.clients
    }

    /// Sessions other than this client, i.e. the remote cursors to draw.
    pub fn peers(&self) -> impl Iterator<Item = &Session> {
        self.clients.iter().filter(|s| !self.is_own(&s.id))
    }

    /// This client's id, once `init` has named it.
    #[must_use]
    pub fn own_id(&self) -> Option<&str> {
        self.own_id.as_deref()
    }

    #[must_use]
    pub fn is_own(&self, client_id: &str) -> bool {
        self.own_id.as_deref() == Some(client_id)
    }

    // --- Server messages ---

    /// Apply one server broadcast. Returns whether anything visible changed.
    ///
    /// Messages referencing unknown words or sessions are ignored.
    pub fn apply(&mut self, message: ServerMessage) -> bool {
        match message {
            ServerMessage::Init { client_id, words, clients } => {
                self.load(client_id, words, clients);
                true
            }
            ServerMessage::WordMoved { word_id, x, y, .. } => self.patch_word(word_id, |w| {
                w.x = x;
                w.y = y;
            }),
            ServerMessage::WordAddedToCanvas { word_id, x, y, .. } => self.patch_word(word_id, |w| {
                w.x = x;
                w.y = y;
                w.on_canvas = true;
            }),
            ServerMessage::WordRemovedFromCanvas { word_id, .. } => self.patch_word(word_id, |w| {
                w.x = 0.0;
                w.y = 0.0;
                w.on_canvas = false;
            }),
            ServerMessage::Clients { clients } => {
                self.clients = clients;
                true
            }
            ServerMessage::CursorMoved { client_id, x, y, .. } => {
                if self.is_own(&client_id) {
                    return false;
                }
                let Some(session) = self.clients.iter_mut().find(|s| s.id == client_id) else {
                    return false;
                };
                session.cursor_x = x;
                session.cursor_y = y;
                true
            }
        }
    }

    fn load(&mut self, client_id: Option<ClientId>, words: Vec<Word>, clients: Vec<Session>) {
        let rng = &mut self.rng;
        self.words = words
            .into_iter()
            .map(|word| ViewWord { word, rotation: rng.random_range(WORD_TILT_DEG) })
            .collect();
        self.clients = clients;
        if client_id.is_some() {
            self.own_id = client_id;
        }
    }

    fn patch_word(&mut self, word_id: WordId, patch: impl FnOnce(&mut Word)) -> bool {
        match self.words.iter_mut().find(|w| w.word.id == word_id) {
            Some(view) => {
                patch(&mut view.word);
                true
            }
            None => false,
        }
    }
}
