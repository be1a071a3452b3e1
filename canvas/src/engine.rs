//! Interaction engine: turns host input events into protocol messages.
//!
//! The host (browser glue or any other UI shell) forwards raw pointer,
//! touch, wheel and layout events plus every inbound server text frame. The
//! engine updates its camera and mirrored view and returns [`Action`]s for
//! the host to carry out: send a message, play the release cue, redraw.
//!
//! Word drags are not optimistic. A drag only emits `moveWord` messages; the
//! tile moves when the server's `wordMoved` echo arrives, for the dragging
//! client and its peers alike. The local cursor is optimistic: it follows
//! every move event while outbound cursor messages are throttled.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use log::{debug, warn};
use protocol::{ClientMessage, DecodeError, ServerMessage, WordId};

use crate::camera::{BoardBounds, Camera, Point, Rect, Size, pinch_scale};
use crate::doc::BoardView;
use crate::input::{GestureState, PointerTarget};
use crate::throttle::CursorThrottle;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Encode and send this message over the session's connection.
    Send(ClientMessage),
    /// A dragged word was let go.
    WordReleased(WordId),
    RenderNeeded,
}

/// Core engine state: everything except the host's drawing surface.
pub struct EngineCore {
    view: BoardView,
    camera: Camera,
    gesture: GestureState,
    bounds: BoardBounds,
    board_rect: Option<Rect>,
    viewport: Size,
    local_cursor: Point,
    throttle: CursorThrottle,
    tray_open: bool,
}

impl EngineCore {
    /// Engine on the default canvas. `seed` drives cosmetic word tilt.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_bounds(BoardBounds::default(), seed)
    }

    #[must_use]
    pub fn with_bounds(bounds: BoardBounds, seed: u64) -> Self {
        Self {
            view: BoardView::new(seed),
            camera: Camera::default(),
            gesture: GestureState::Idle,
            bounds,
            board_rect: None,
            viewport: Size::default(),
            local_cursor: Point::default(),
            throttle: CursorThrottle::default(),
            tray_open: false,
        }
    }

    // --- Layout ---

    /// Record the board element's bounding rectangle. `None` while unmounted.
    pub fn set_board_rect(&mut self, rect: Option<Rect>) {
        self.board_rect = rect;
    }

    /// Record the viewport size in screen pixels and re-clamp the pan.
    pub fn set_viewport(&mut self, width: f64, height: f64) -> Vec<Action> {
        self.viewport = Size::new(width, height);
        self.camera.clamp_pan(self.viewport, self.bounds.size());
        vec![Action::RenderNeeded]
    }

    /// While the word tray is open, pointer moves do not update the cursor.
    pub fn set_tray_open(&mut self, open: bool) {
        self.tray_open = open;
    }

    // --- Server input ---

    /// Decode and apply one inbound text frame. Undecodable frames are
    /// logged and dropped.
    pub fn apply_server_text(&mut self, text: &str) -> Vec<Action> {
        match protocol::decode_server_message(text) {
            Ok(message) => self.apply_server_message(message),
            Err(DecodeError::UnknownType(kind)) => {
                warn!("canvas: ignoring unknown server message type {kind:?}");
                Vec::new()
            }
            Err(e) => {
                warn!("canvas: dropping invalid server message: {e}");
                Vec::new()
            }
        }
    }

    /// Apply one decoded server message to the mirrored view.
    pub fn apply_server_message(&mut self, message: ServerMessage) -> Vec<Action> {
        let changed = self.view.apply(message);
        self.drop_stale_drag();
        if changed { vec![Action::RenderNeeded] } else { Vec::new() }
    }

    /// A word removed by a peer cannot stay grabbed.
    fn drop_stale_drag(&mut self) {
        let Some(word_id) = self.gesture.dragged_word() else {
            return;
        };
        if !self.view.word(word_id).is_some_and(|w| w.word.on_canvas) {
            debug!("canvas: word {word_id} left the canvas mid-drag");
            self.gesture = GestureState::Idle;
        }
    }

    // --- Drag ---

    /// Grab a canvas word under the pointer, remembering the pointer's offset
    /// from the word so it does not jump. Only starts from `Idle`.
    pub fn start_drag(&mut self, screen: Point, word_id: WordId) -> Vec<Action> {
        if !self.gesture.is_idle() || self.board_rect.is_none() {
            return Vec::new();
        }
        let Some(word) = self.view.word(word_id).map(|w| &w.word).filter(|w| w.on_canvas) else {
            return Vec::new();
        };
        let pointer = self.pointer_canvas(screen);
        let offset = Point::new(pointer.x - word.x, pointer.y - word.y);
        self.gesture = GestureState::Dragging { word_id, offset };
        vec![Action::RenderNeeded]
    }

    /// Emit a clamped `moveWord` for the pointer's new position.
    pub fn update_drag_position(&mut self, screen: Point) -> Vec<Action> {
        let GestureState::Dragging { word_id, offset } = &self.gesture else {
            return Vec::new();
        };
        let (word_id, offset) = (*word_id, *offset);
        let pointer = self.pointer_canvas(screen);
        let target = self.bounds.clamp(Point::new(pointer.x - offset.x, pointer.y - offset.y));
        vec![Action::Send(ClientMessage::MoveWord { word_id, x: target.x, y: target.y })]
    }

    pub fn stop_drag(&mut self) -> Vec<Action> {
        let Some(word_id) = self.gesture.dragged_word() else {
            return Vec::new();
        };
        self.gesture = GestureState::Idle;
        vec![Action::WordReleased(word_id), Action::RenderNeeded]
    }

    // --- Pan ---

    /// Start dragging the canvas. Ignored while a word or pinch is active.
    pub fn start_panning(&mut self, screen: Point) -> Vec<Action> {
        if self.gesture.is_idle() || self.gesture.is_panning() {
            self.gesture = GestureState::Panning { last_screen: screen };
        }
        Vec::new()
    }

    pub fn update_pan_position(&mut self, screen: Point) -> Vec<Action> {
        let GestureState::Panning { last_screen } = &mut self.gesture else {
            return Vec::new();
        };
        let (dx, dy) = (screen.x - last_screen.x, screen.y - last_screen.y);
        *last_screen = screen;
        self.camera.pan_by(dx, dy, self.viewport, self.bounds.size());
        vec![Action::RenderNeeded]
    }

    pub fn stop_panning(&mut self) -> Vec<Action> {
        if self.gesture.is_panning() {
            self.gesture = GestureState::Idle;
        }
        Vec::new()
    }

    // --- Cursor ---

    /// Move the local cursor immediately; forward it to the server at most
    /// once per throttle window.
    pub fn update_cursor_position(&mut self, screen: Point, now_ms: f64) -> Vec<Action> {
        if self.tray_open {
            return Vec::new();
        }
        let p = self.pointer_canvas(screen);
        self.local_cursor = p;
        let mut actions = vec![Action::RenderNeeded];
        if self.throttle.ready(now_ms) {
            actions.push(Action::Send(ClientMessage::Cursor { x: p.x, y: p.y }));
        }
        actions
    }

    // --- Zoom ---

    /// Apply a wheel delta to the zoom scale.
    pub fn handle_zoom(&mut self, delta_y: f64) -> Vec<Action> {
        self.camera.zoom_by_wheel(delta_y);
        self.camera.clamp_pan(self.viewport, self.bounds.size());
        vec![Action::RenderNeeded]
    }

    /// Raw wheel event. Only zooms with the zoom modifier (ctrl / meta) held;
    /// plain scrolling is left to the host.
    pub fn wheel(&mut self, delta_y: f64, zoom_modifier: bool) -> Vec<Action> {
        if !zoom_modifier {
            return Vec::new();
        }
        self.handle_zoom(delta_y)
    }

    /// Begin a two-finger pinch, releasing any word being dragged.
    pub fn start_pinch(&mut self, a: Point, b: Point) -> Vec<Action> {
        let mut actions = self.stop_drag();
        self.gesture = GestureState::Pinching {
            start_distance: a.distance(b),
            start_scale: self.camera.scale,
            last_mid: a.midpoint(b),
        };
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Rescale by the change in finger distance and pan by the midpoint shift.
    pub fn update_pinch(&mut self, a: Point, b: Point) -> Vec<Action> {
        let GestureState::Pinching { start_distance, start_scale, last_mid } = &mut self.gesture else {
            return Vec::new();
        };
        let mid = a.midpoint(b);
        let (dx, dy) = (mid.x - last_mid.x, mid.y - last_mid.y);
        *last_mid = mid;
        let scale = pinch_scale(*start_scale, *start_distance, a.distance(b));

        self.camera.scale = scale;
        self.camera.pan_by(dx, dy, self.viewport, self.bounds.size());
        vec![Action::RenderNeeded]
    }

    // --- Pointer events ---

    pub fn pointer_down(&mut self, screen: Point, target: PointerTarget) -> Vec<Action> {
        match target {
            PointerTarget::Word(word_id) => self.start_drag(screen, word_id),
            PointerTarget::Canvas => self.start_panning(screen),
        }
    }

    pub fn pointer_move(&mut self, screen: Point, now_ms: f64) -> Vec<Action> {
        let mut actions = self.update_cursor_position(screen, now_ms);
        match self.gesture {
            GestureState::Dragging { .. } => actions.extend(self.update_drag_position(screen)),
            GestureState::Panning { .. } => actions.extend(self.update_pan_position(screen)),
            GestureState::Idle | GestureState::Pinching { .. } => {}
        }
        actions
    }

    pub fn pointer_up(&mut self) -> Vec<Action> {
        let mut actions = self.stop_drag();
        actions.extend(self.stop_panning());
        actions
    }

    // --- Touch events ---

    /// Touch start with every active touch point. Two or more touches always
    /// start a pinch.
    pub fn touch_start(&mut self, touches: &[Point], target: PointerTarget) -> Vec<Action> {
        match touches {
            [a, b, ..] => self.start_pinch(*a, *b),
            [touch] => self.pointer_down(*touch, target),
            [] => Vec::new(),
        }
    }

    pub fn touch_move(&mut self, touches: &[Point]) -> Vec<Action> {
        match touches {
            [a, b, ..] if self.gesture.is_pinching() => self.update_pinch(*a, *b),
            [a, b, ..] => self.start_pinch(*a, *b),
            [touch] => match self.gesture {
                GestureState::Dragging { .. } => self.update_drag_position(*touch),
                GestureState::Panning { .. } => self.update_pan_position(*touch),
                GestureState::Idle | GestureState::Pinching { .. } => Vec::new(),
            },
            [] => Vec::new(),
        }
    }

    /// Any touch end finishes the current gesture.
    pub fn touch_end(&mut self) -> Vec<Action> {
        let actions = self.stop_drag();
        self.gesture = GestureState::Idle;
        actions
    }

    // --- Tray ---

    /// Put a tray word on the canvas at the centre of the viewport.
    pub fn place_from_tray(&mut self, word_id: WordId) -> Vec<Action> {
        if !self.view.word(word_id).is_some_and(|w| !w.word.on_canvas) {
            return Vec::new();
        }
        let centre = Point::new(self.viewport.width / 2.0, self.viewport.height / 2.0);
        let p = self.bounds.clamp(self.pointer_canvas(centre));
        vec![Action::Send(ClientMessage::AddToCanvas { word_id, x: p.x, y: p.y })]
    }

    /// Send a canvas word back to the tray.
    pub fn remove_word(&mut self, word_id: WordId) -> Vec<Action> {
        if !self.view.word(word_id).is_some_and(|w| w.word.on_canvas) {
            return Vec::new();
        }
        vec![Action::Send(ClientMessage::RemoveFromCanvas { word_id })]
    }

    // --- Queries ---

    #[must_use]
    pub fn view(&self) -> &BoardView {
        &self.view
    }

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    #[must_use]
    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    /// Whether a word is being dragged (the renderer raises it above others).
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.gesture.dragged_word().is_some()
    }

    /// The local cursor in canvas coordinates.
    #[must_use]
    pub fn local_cursor(&self) -> Point {
        self.local_cursor
    }

    #[must_use]
    pub fn bounds(&self) -> BoardBounds {
        self.bounds
    }

    fn pointer_canvas(&self, screen: Point) -> Point {
        self.camera.to_canvas(screen, self.board_rect)
    }
}
