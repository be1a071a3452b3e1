//! Board store — authoritative word placement state.
//!
//! DESIGN
//! ======
//! The board owns every `Word` for the lifetime of the process. Words are
//! created once from the catalog and never added or removed afterwards; only
//! their placement changes. Each mutation returns the broadcast it produced,
//! or `None` when it was a no-op. The caller (the hub) owns fan-out.
//!
//! Conflicts are resolved by processing order alone: the last move applied
//! wins, with no version or timestamp check.
//!
//! ERROR HANDLING
//! ==============
//! Unknown word ids and state-inconsistent requests (moving a word that is in
//! the tray, placing one that is already on the canvas) are ignored. Stale
//! clients routinely send these after a race and must not be disconnected.

use protocol::{ServerMessage, Word, WordId};
use tracing::trace;

/// Fixed canvas geometry shared by every session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardDimensions {
    pub width: f64,
    pub height: f64,
    /// Minimum distance between a placed word and the canvas edge.
    pub padding: f64,
}

impl BoardDimensions {
    /// Clamp a position into `[padding, dimension - padding]` on both axes.
    #[must_use]
    pub fn clamp(&self, x: f64, y: f64) -> (f64, f64) {
        (clamp_axis(x, self.padding, self.width), clamp_axis(y, self.padding, self.height))
    }

    /// Whether a position already satisfies the padding bounds.
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        (self.padding..=self.width - self.padding).contains(&x) && (self.padding..=self.height - self.padding).contains(&y)
    }
}

fn clamp_axis(value: f64, padding: f64, dimension: f64) -> f64 {
    padding.max(value.min(dimension - padding))
}

pub struct Board {
    words: Vec<Word>,
    dimensions: BoardDimensions,
}

impl Board {
    /// Build a board from catalog text. Word ids are catalog positions.
    #[must_use]
    pub fn new(catalog: impl IntoIterator<Item = String>, dimensions: BoardDimensions) -> Self {
        let words = catalog
            .into_iter()
            .zip(0..)
            .map(|(text, id)| Word::new(id, text))
            .collect();
        Self { words, dimensions }
    }

    #[must_use]
    pub fn dimensions(&self) -> BoardDimensions {
        self.dimensions
    }

    /// All words in id order, tray and canvas alike.
    #[must_use]
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    #[cfg(test)]
    #[must_use]
    pub fn word(&self, word_id: WordId) -> Option<&Word> {
        self.words.get(usize::try_from(word_id).ok()?)
    }

    /// Number of words currently on the canvas.
    #[must_use]
    pub fn placed_count(&self) -> usize {
        self.words.iter().filter(|w| w.on_canvas).count()
    }

    fn word_mut(&mut self, word_id: WordId) -> Option<&mut Word> {
        self.words.get_mut(usize::try_from(word_id).ok()?)
    }

    /// Move a tray word onto the canvas at the given position.
    ///
    /// The position is stored as given; the placing client computes it from
    /// its own viewport and is trusted to stay on the canvas.
    pub fn place_on_canvas(&mut self, word_id: WordId, x: f64, y: f64, requester: &str) -> Option<ServerMessage> {
        let word = self.word_mut(word_id)?;
        if word.on_canvas {
            return None;
        }
        word.on_canvas = true;
        word.x = x;
        word.y = y;
        Some(ServerMessage::WordAddedToCanvas { word_id, x, y, added_by: requester.to_owned() })
    }

    /// Reposition a word that is on the canvas. Last write wins.
    ///
    /// The position is clamped into the padded canvas bounds before it is
    /// stored and broadcast.
    pub fn move_word(&mut self, word_id: WordId, x: f64, y: f64, requester: &str) -> Option<ServerMessage> {
        if !self.dimensions.contains(x, y) {
            trace!(word_id, x, y, "board: move clamped");
        }
        let (x, y) = self.dimensions.clamp(x, y);
        let word = self.word_mut(word_id)?;
        if !word.on_canvas {
            return None;
        }
        word.x = x;
        word.y = y;
        Some(ServerMessage::WordMoved { word_id, x, y, moved_by: requester.to_owned() })
    }

    /// Return a word to the tray. Its position is zeroed.
    pub fn remove_from_canvas(&mut self, word_id: WordId, requester: &str) -> Option<ServerMessage> {
        let word = self.word_mut(word_id)?;
        if !word.on_canvas {
            return None;
        }
        word.on_canvas = false;
        word.x = 0.0;
        word.y = 0.0;
        Some(ServerMessage::WordRemovedFromCanvas { word_id, removed_by: requester.to_owned() })
    }
}

#[cfg(test)]
#[path = "board_test.rs"]
mod tests;
