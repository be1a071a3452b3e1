#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use crate::consts::{
    CANVAS_HEIGHT, CANVAS_WIDTH, MAX_SCALE, MIN_SCALE, PAN_VISIBLE_FRACTION, WHEEL_ZOOM_FACTOR, WORD_PADDING,
};

/// A point in screen, viewport or canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Point halfway between `self` and `other`.
    #[must_use]
    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// Width and height pair, in whatever units the caller uses.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// The board element's bounding rectangle in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Fixed canvas geometry: logical size plus the placement padding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardBounds {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl Default for BoardBounds {
    fn default() -> Self {
        Self { width: CANVAS_WIDTH, height: CANVAS_HEIGHT, padding: WORD_PADDING }
    }
}

impl BoardBounds {
    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Clamp a canvas point into `[padding, dimension - padding]` on both axes.
    #[must_use]
    pub fn clamp(&self, p: Point) -> Point {
        Point::new(clamp_axis(p.x, self.padding, self.width), clamp_axis(p.y, self.padding, self.height))
    }
}

fn clamp_axis(value: f64, padding: f64, dimension: f64) -> f64 {
    padding.max(value.min(dimension - padding))
}

/// Clamp a zoom scale into `[MIN_SCALE, MAX_SCALE]`.
#[must_use]
pub fn clamp_scale(scale: f64) -> f64 {
    MIN_SCALE.max(scale.min(MAX_SCALE))
}

/// Scale for a pinch gesture: proportional to the change in finger distance.
///
/// A degenerate start distance keeps the starting scale.
#[must_use]
pub fn pinch_scale(start_scale: f64, start_distance: f64, current_distance: f64) -> f64 {
    if start_distance <= 0.0 {
        return clamp_scale(start_scale);
    }
    clamp_scale(start_scale * (current_distance / start_distance))
}

/// Camera state for pan/zoom over the fixed canvas.
///
/// `pan` is in canvas units and is added to canvas coordinates before
/// scaling, so the canvas origin sits at `pan * scale` in viewport pixels.
/// `scale` is a zoom factor (1.0 = no zoom).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub pan: Point,
    pub scale: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { pan: Point::default(), scale: 1.0 }
    }
}

impl Camera {
    /// Convert a screen point to canvas coordinates.
    ///
    /// Without a board rectangle (element not mounted yet) this returns the
    /// origin.
    #[must_use]
    pub fn to_canvas(&self, screen: Point, rect: Option<Rect>) -> Point {
        let Some(rect) = rect else {
            return Point::default();
        };
        Point {
            x: (screen.x - rect.left) / self.scale - self.pan.x,
            y: (screen.y - rect.top) / self.scale - self.pan.y,
        }
    }

    /// Convert a canvas point back to screen coordinates.
    #[must_use]
    pub fn to_screen(&self, canvas: Point, rect: Rect) -> Point {
        Point {
            x: (canvas.x + self.pan.x) * self.scale + rect.left,
            y: (canvas.y + self.pan.y) * self.scale + rect.top,
        }
    }

    /// Apply one wheel step: `scale *= 1 - delta_y * k`, clamped.
    pub fn zoom_by_wheel(&mut self, delta_y: f64) {
        self.scale = clamp_scale(self.scale * (1.0 - delta_y * WHEEL_ZOOM_FACTOR));
    }

    /// Pan by a screen-pixel delta, then clamp.
    pub fn pan_by(&mut self, screen_dx: f64, screen_dy: f64, viewport: Size, canvas: Size) {
        self.pan.x += screen_dx / self.scale;
        self.pan.y += screen_dy / self.scale;
        self.clamp_pan(viewport, canvas);
    }

    /// Keep part of the canvas inside the viewport on every edge.
    ///
    /// With `v = viewport / scale` and `m = min(0.2 * dimension, v)`, each
    /// axis of `pan` is held in `[m - dimension, v - m]`: at least a fifth of
    /// the canvas stays in view, or the whole viewport when it is smaller.
    pub fn clamp_pan(&mut self, viewport: Size, canvas: Size) {
        self.pan.x = clamp_pan_axis(self.pan.x, viewport.width / self.scale, canvas.width);
        self.pan.y = clamp_pan_axis(self.pan.y, viewport.height / self.scale, canvas.height);
    }
}

fn clamp_pan_axis(pan: f64, visible: f64, dimension: f64) -> f64 {
    let margin = (PAN_VISIBLE_FRACTION * dimension).min(visible);
    (margin - dimension).max(pan.min(visible - margin))
}
