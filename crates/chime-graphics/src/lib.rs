//! Pure math/data for drawing & units in Chime
//!
//! This crate contains the geometry primitives, color definitions, and the
//! coordinate descriptor type used throughout the Chime player. Nothing in
//! here touches a renderer or a window; everything is plain data that the
//! UI core resolves against a bounding box each frame.

mod color;
mod coordinate;
mod geometry;
mod style;

pub use color::*;
pub use coordinate::*;
pub use geometry::*;
pub use style::*;

pub mod prelude {
    pub use crate::color::Color;
    pub use crate::coordinate::{Axis, CoordKind, Coordinate};
    pub use crate::geometry::{Point, Rect};
    pub use crate::style::RenderStyle;
}
