use serde::{Deserialize, Serialize};

// ──────────────────────────────────────────────
// Geometry
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

// ──────────────────────────────────────────────
// Identity
// ──────────────────────────────────────────────

/// Stable identity of a panel inside its group. Never derived from position.
pub type PanelId = u64;

// ──────────────────────────────────────────────
// Colors
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

}

// ──────────────────────────────────────────────
// Layout types
// ──────────────────────────────────────────────

/// Layout axis of a panel group.
///
/// `Horizontal` lays children out left to right, `Vertical` top to bottom.
/// Nested groups that don't specify one get `Horizontal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Cursor shown while hovering or dragging a divider of a group with this orientation.
    pub fn resize_cursor(self) -> CursorHint {
        match self {
            Orientation::Horizontal => CursorHint::ColResize,
            Orientation::Vertical => CursorHint::RowResize,
        }
    }

    /// Origin of `rect` along this axis.
    pub fn origin(self, rect: Rect) -> f32 {
        match self {
            Orientation::Horizontal => rect.x,
            Orientation::Vertical => rect.y,
        }
    }

    /// Extent of `rect` along this axis.
    pub fn extent(self, rect: Rect) -> f32 {
        match self {
            Orientation::Horizontal => rect.width,
            Orientation::Vertical => rect.height,
        }
    }

    /// Coordinate of `point` along this axis.
    pub fn coord(self, point: Vec2) -> f32 {
        match self {
            Orientation::Horizontal => point.x,
            Orientation::Vertical => point.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CursorHint {
    #[default]
    Default,
    /// Resizing along the vertical axis.
    RowResize,
    /// Resizing along the horizontal axis.
    ColResize,
}

// ──────────────────────────────────────────────
// Input
// ──────────────────────────────────────────────

/// Primary-button pointer events, in window coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Vec2),
    Move(Vec2),
    Up(Vec2),
    /// The pointer left the window.
    Leave,
    /// The window lost focus.
    Blur,
}

// ──────────────────────────────────────────────
// Trait: Renderer
// ──────────────────────────────────────────────

/// The renderer draws the splitter chrome (dividers and the drag indicator).
/// Panel content is drawn by the embedding application.
pub trait Renderer {
    fn begin_frame(&mut self, size: Size);
    fn draw_rect(&mut self, rect: Rect, color: Color);
    fn set_cursor(&mut self, cursor: CursorHint);
    fn end_frame(&mut self);
}
