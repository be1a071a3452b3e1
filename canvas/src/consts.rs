//! Shared numeric constants for the canvas crate.

use std::ops::Range;

// ── Board ───────────────────────────────────────────────────────

/// Default logical canvas width in canvas units.
pub const CANVAS_WIDTH: f64 = 2000.0;

/// Default logical canvas height in canvas units.
pub const CANVAS_HEIGHT: f64 = 1200.0;

/// Minimum distance between a placed word and the canvas edge.
pub const WORD_PADDING: f64 = 20.0;

// ── Zoom ────────────────────────────────────────────────────────

/// Smallest allowed zoom scale.
pub const MIN_SCALE: f64 = 0.5;

/// Largest allowed zoom scale.
pub const MAX_SCALE: f64 = 3.0;

/// Scale change per wheel delta unit: `scale *= 1 - delta * k`.
pub const WHEEL_ZOOM_FACTOR: f64 = 0.001;

// ── Pan ─────────────────────────────────────────────────────────

/// Fraction of the canvas (or viewport, if smaller) that must stay visible.
pub const PAN_VISIBLE_FRACTION: f64 = 0.2;

// ── Presence ────────────────────────────────────────────────────

/// Minimum wall-clock gap between outbound cursor messages, in milliseconds.
pub const CURSOR_SEND_INTERVAL_MS: f64 = 50.0;

/// Cosmetic word tilt range, in degrees.
pub const WORD_TILT_DEG: Range<f64> = -7.0..8.0;
