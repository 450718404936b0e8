//! Renderer contracts and the CPU software backend for Chime.
//!
//! The UI core draws through the [`RenderBackend`] trait: 2D primitives,
//! texture upload/copy, and render-target switching, plus text
//! rasterization. [`SoftwareBackend`] implements the whole contract on
//! plain RGBA buffers so the UI runs identically under a window (the app
//! blits the root surface into its `pixels` frame) and in headless tests.

mod backend;
mod software;
mod text;

pub use backend::*;
pub use software::*;
pub use text::*;

pub mod prelude {
    pub use crate::backend::{RenderBackend, RenderError, TextureId};
    pub use crate::software::SoftwareBackend;
}
