//! Per-node state shared by every widget through composition.

use std::sync::atomic::{AtomicU32, Ordering};

use chime_graphics::{Axis, Color, CoordKind, Coordinate, Rect, RenderStyle};

use crate::error::UiError;

/// Identity of a UI node, generator-assigned and never reused.
///
/// Node ids come from their own counter; they are never comparable with
/// song ids or texture ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

static NEXT_NODE_ID: AtomicU32 = AtomicU32::new(0);

impl NodeId {
    fn next() -> Self {
        Self(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// The window dimensions for this frame, passed down every pass.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
    /// True on the frame the window was resized.
    pub size_changed: bool,
}

impl Viewport {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            size_changed: false,
        }
    }
}

/// Geometry, colors, and repaint state common to all interactables.
///
/// Coordinates stay abstract until [`rect`](Self::rect) resolves them
/// against the node's bound (or the viewport when unbound). The dirty
/// flag starts set so every node paints on its first frame.
pub struct NodeState {
    id: NodeId,
    x: Coordinate,
    y: Coordinate,
    w: Coordinate,
    h: Coordinate,
    primary: Color,
    secondary: Color,
    tertiary: Color,
    style: RenderStyle,
    dirty: bool,
    bound: Option<Rect>,
    prev_rect: Option<Rect>,
}

impl Default for NodeState {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeState {
    pub fn new() -> Self {
        Self {
            id: NodeId::next(),
            x: Coordinate::default(),
            y: Coordinate::default(),
            w: Coordinate::default(),
            h: Coordinate::default(),
            primary: Color::rgb(50, 50, 50),
            secondary: Color::rgb(25, 25, 25),
            tertiary: Color::rgb(0, 0, 0),
            style: RenderStyle::None,
            dirty: true,
            bound: None,
            prev_rect: None,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn set_x(&mut self, kind: CoordKind, value: f32) {
        self.x.set(kind, value);
        self.dirty = true;
    }

    pub fn set_y(&mut self, kind: CoordKind, value: f32) {
        self.y.set(kind, value);
        self.dirty = true;
    }

    pub fn set_w(&mut self, kind: CoordKind, value: f32) {
        self.w.set(kind, value);
        self.dirty = true;
    }

    pub fn set_h(&mut self, kind: CoordKind, value: f32) {
        self.h.set(kind, value);
        self.dirty = true;
    }

    pub fn x(&self) -> Coordinate {
        self.x
    }

    pub fn y(&self) -> Coordinate {
        self.y
    }

    pub fn w(&self) -> Coordinate {
        self.w
    }

    pub fn h(&self) -> Coordinate {
        self.h
    }

    pub fn primary_color(&self) -> Color {
        self.primary
    }

    pub fn secondary_color(&self) -> Color {
        self.secondary
    }

    pub fn tertiary_color(&self) -> Color {
        self.tertiary
    }

    pub fn set_primary_color(&mut self, color: Color) {
        self.primary = color;
        self.dirty = true;
    }

    pub fn set_secondary_color(&mut self, color: Color) {
        self.secondary = color;
        self.dirty = true;
    }

    pub fn set_tertiary_color(&mut self, color: Color) {
        self.tertiary = color;
        self.dirty = true;
    }

    pub fn render_style(&self) -> RenderStyle {
        self.style
    }

    pub fn set_render_style(&mut self, style: RenderStyle) {
        self.style = style;
        self.dirty = true;
    }

    /// Binds the node to a zero-origin area of the given size.
    pub fn bind_to_size(&mut self, w: i32, h: i32) -> Result<(), UiError> {
        self.bind_to_area(Rect::new(0, 0, w, h))
    }

    /// Binds the node's coordinates to resolve against `area` instead of
    /// the viewport. The area's origin shifts the resolved position, which
    /// is how scrolled content moves without touching child coordinates.
    pub fn bind_to_area(&mut self, area: Rect) -> Result<(), UiError> {
        if area.w <= 0 || area.h <= 0 {
            return Err(UiError::InvalidBind);
        }
        self.bound = Some(area);
        self.dirty = true;
        Ok(())
    }

    /// Reverts to viewport-relative resolution.
    pub fn unbind(&mut self) {
        self.bound = None;
        self.dirty = true;
    }

    pub fn bound(&self) -> Option<Rect> {
        self.bound
    }

    /// Resolves the node's rectangle for this frame.
    pub fn rect(&self, viewport: Viewport) -> Rect {
        let bound = self
            .bound
            .unwrap_or(Rect::new(0, 0, viewport.width, viewport.height));
        let w = self.w.resolve(Axis::Horizontal, bound.w, bound.h);
        let h = self.h.resolve(Axis::Vertical, bound.w, bound.h);
        let mut x = self.x.resolve(Axis::Horizontal, bound.w, bound.h) - bound.x;
        let mut y = self.y.resolve(Axis::Vertical, bound.w, bound.h) - bound.y;
        if self.style == RenderStyle::Centered {
            x -= w / 2;
            y -= h / 2;
        }
        Rect::new(x, y, w, h)
    }

    /// Recomputes the rectangle and marks the node dirty when it moved,
    /// resized, or the window changed size. The only self-triggered
    /// dirtiness.
    pub fn update_geometry(&mut self, viewport: Viewport) {
        let rect = self.rect(viewport);
        if self.prev_rect != Some(rect) || viewport.size_changed {
            self.dirty = true;
            self.prev_rect = Some(rect);
        }
    }

    /// Strict-edge hit test in the node's resolved space.
    pub fn hit(&self, viewport: Viewport, px: i32, py: i32) -> bool {
        self.rect(viewport).contains_strict(px, py)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }
}
