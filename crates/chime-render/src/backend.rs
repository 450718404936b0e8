//! The rendering contract the UI core draws through.

use chime_graphics::{Color, Rect};

/// Stable handle to a backend-owned texture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureId(pub(crate) u32);

/// Errors surfaced by a renderer backend.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("cannot create a {w}x{h} texture")]
    InvalidTextureSize { w: i32, h: i32 },
    #[error("unknown texture {0:?}")]
    UnknownTexture(TextureId),
    #[error("failed to load image {path}: {source}")]
    ImageLoad {
        path: String,
        #[source]
        source: image::ImageError,
    },
    #[error("no font is loaded")]
    FontUnavailable,
    #[error("failed to load font {path}: {reason}")]
    FontLoad { path: String, reason: String },
}

/// Abstraction over the drawing surface: primitives, textures, render
/// targets, and text rasterization.
///
/// Draw calls address the *current render target*: the root surface by
/// default, or an offscreen texture selected with
/// [`set_render_target`](Self::set_render_target). Containers rely on that
/// to composite their children into a cached bitmap.
pub trait RenderBackend {
    /// Allocates a blank render-target texture.
    fn create_texture(&mut self, w: i32, h: i32) -> Result<TextureId, RenderError>;

    /// Frees a texture. Unknown ids are ignored.
    fn destroy_texture(&mut self, id: TextureId);

    /// Decodes a PNG file into a new texture.
    fn load_texture_file(&mut self, path: &str) -> Result<TextureId, RenderError>;

    /// Pixel dimensions of a texture.
    fn texture_size(&self, id: TextureId) -> Result<(i32, i32), RenderError>;

    /// Redirects subsequent draw calls to a texture, or back to the root
    /// surface with `None`. Returns the previously active target.
    fn set_render_target(&mut self, target: Option<TextureId>) -> Option<TextureId>;

    /// Sets the color used by [`clear`](Self::clear) and
    /// [`fill_rect`](Self::fill_rect).
    fn set_draw_color(&mut self, color: Color);

    /// Fills the current target with the draw color, ignoring alpha.
    fn clear(&mut self);

    /// Fills a rectangle on the current target, blending by alpha.
    fn fill_rect(&mut self, rect: Rect);

    /// Copies a texture onto the current target, scaled to `dst`.
    fn copy_texture(&mut self, id: TextureId, dst: Rect) -> Result<(), RenderError>;

    /// Measures a string with the loaded UI font.
    fn measure_text(&self, text: &str) -> Result<(i32, i32), RenderError>;

    /// Rasterizes a string into a new texture.
    fn render_text(&mut self, text: &str, color: Color) -> Result<TextureId, RenderError>;
}
