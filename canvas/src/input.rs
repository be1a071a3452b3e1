//! Input model: pointer targets and the gesture state machine.
//!
//! `GestureState` is the active gesture tracked between pointer-down and
//! pointer-up. Exactly one gesture is active at a time:
//!
//! ```text
//! Idle ──pointer on word──▶ Dragging ──┐
//!  │  ──pointer on canvas─▶ Panning  ──┼──pointer/touch up──▶ Idle
//!  └───two touches───────▶ Pinching ──┘
//! ```
//!
//! Two touches preempt any single-pointer gesture.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use protocol::WordId;

use crate::camera::Point;

/// What a pointer-down or touch-start landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// A word tile on the canvas.
    Word(WordId),
    /// Empty canvas background.
    Canvas,
}

/// Internal state for the gesture state machine.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum GestureState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// A word is following the pointer.
    Dragging {
        word_id: WordId,
        /// Canvas-space offset from the word position to the pointer at grab time.
        offset: Point,
    },
    /// The canvas is being dragged.
    Panning {
        /// Screen-space position of the previous pointer event.
        last_screen: Point,
    },
    /// Two fingers are zooming the canvas.
    Pinching {
        /// Finger distance when the pinch began.
        start_distance: f64,
        /// Camera scale when the pinch began.
        start_scale: f64,
        /// Previous midpoint between the fingers, used to pan.
        last_mid: Point,
    },
}

impl GestureState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// The word being dragged, if any.
    #[must_use]
    pub fn dragged_word(&self) -> Option<WordId> {
        match self {
            Self::Dragging { word_id, .. } => Some(*word_id),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_panning(&self) -> bool {
        matches!(self, Self::Panning { .. })
    }

    #[must_use]
    pub fn is_pinching(&self) -> bool {
        matches!(self, Self::Pinching { .. })
    }
}
