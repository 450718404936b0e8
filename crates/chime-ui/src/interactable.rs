//! The `Interactable` trait and its leaf variants.

use chime_graphics::Color;
use chime_render::{RenderBackend, TextureId};
use log::{error, warn};

use crate::context::{EventCtx, RenderCtx, UpdateCtx};
use crate::error::UiError;
use crate::node::NodeState;

/// One element of the UI tree.
///
/// Implementors compose a [`NodeState`] and expose it through the two
/// accessors; everything else has a default. The default update is the
/// geometry drift check, the default render fills the resolved rectangle
/// with the primary color, and events are accepted without effect.
///
/// Event handlers return `Ok` for "handled, continue dispatch"; an `Err`
/// is a genuine failure and stops the dispatch that delivered it.
pub trait Interactable {
    fn state(&self) -> &NodeState;

    fn state_mut(&mut self) -> &mut NodeState;

    fn update(&mut self, ctx: &mut UpdateCtx) -> Result<(), UiError> {
        let viewport = ctx.viewport;
        self.state_mut().update_geometry(viewport);
        Ok(())
    }

    fn render(&mut self, ctx: &mut RenderCtx) {
        let rect = self.state().rect(ctx.viewport);
        let color = self.state().primary_color();
        if !color.is_transparent() {
            ctx.backend.set_draw_color(color);
            ctx.backend.fill_rect(rect);
        }
        self.state_mut().mark_clean();
    }

    fn click(&mut self, _ctx: &mut EventCtx, _x: i32, _y: i32) -> Result<(), UiError> {
        Ok(())
    }

    fn mouse_down(&mut self, _ctx: &mut EventCtx, _x: i32, _y: i32) -> Result<(), UiError> {
        Ok(())
    }

    fn scroll(&mut self, _ctx: &mut EventCtx, _x: i32, _y: i32, _speed: f32) -> Result<(), UiError> {
        Ok(())
    }

    /// Releases any backend textures the node owns. Owners call this
    /// before dropping a node; a dropped node cannot reach the backend.
    fn teardown(&mut self, _backend: &mut dyn RenderBackend) {}
}

/// Leaf that draws one image file scaled into its rectangle.
///
/// A failed load is logged and leaves the node imageless; rendering
/// without an image draws nothing rather than failing the frame.
pub struct TextureView {
    state: NodeState,
    path: String,
    texture: Option<TextureId>,
    load_failed: bool,
}

impl TextureView {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            state: NodeState::new(),
            path: path.into(),
            texture: None,
            load_failed: false,
        }
    }

    /// Swaps the displayed image, freeing the old texture.
    pub fn set_texture(&mut self, backend: &mut dyn RenderBackend, path: impl Into<String>) {
        if let Some(old) = self.texture.take() {
            backend.destroy_texture(old);
        }
        self.path = path.into();
        self.load_failed = false;
        self.state.invalidate();
    }

    fn ensure_loaded(&mut self, backend: &mut dyn RenderBackend) {
        if self.texture.is_some() || self.load_failed {
            return;
        }
        match backend.load_texture_file(&self.path) {
            Ok(id) => self.texture = Some(id),
            Err(err) => {
                error!("{err}");
                self.load_failed = true;
            }
        }
    }
}

impl Interactable for TextureView {
    fn state(&self) -> &NodeState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut NodeState {
        &mut self.state
    }

    fn update(&mut self, ctx: &mut UpdateCtx) -> Result<(), UiError> {
        self.state.update_geometry(ctx.viewport);
        self.ensure_loaded(ctx.backend);
        Ok(())
    }

    fn render(&mut self, ctx: &mut RenderCtx) {
        if let Some(id) = self.texture {
            let rect = self.state.rect(ctx.viewport);
            if let Err(err) = ctx.backend.copy_texture(id, rect) {
                warn!("{err}");
            }
        }
        self.state.mark_clean();
    }

    fn teardown(&mut self, backend: &mut dyn RenderBackend) {
        if let Some(id) = self.texture.take() {
            backend.destroy_texture(id);
        }
    }
}

/// Leaf that draws one rasterized line of text at its resolved position.
///
/// The bitmap is drawn at its measured size, not the node's w/h.
pub struct TextView {
    state: NodeState,
    text: String,
    text_color: Color,
    texture: Option<(TextureId, i32, i32)>,
    raster_failed: bool,
}

impl TextView {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            state: NodeState::new(),
            text: text.into(),
            text_color: Color::WHITE,
            texture: None,
            raster_failed: false,
        }
    }

    pub fn set_text_color(&mut self, color: Color) {
        self.text_color = color;
        self.texture = None;
        self.raster_failed = false;
        self.state.invalidate();
    }

    /// Replaces the text, freeing the cached bitmap.
    pub fn set_text(&mut self, backend: &mut dyn RenderBackend, text: impl Into<String>) {
        if let Some((old, _, _)) = self.texture.take() {
            backend.destroy_texture(old);
        }
        self.text = text.into();
        self.raster_failed = false;
        self.state.invalidate();
    }

    fn ensure_rasterized(&mut self, backend: &mut dyn RenderBackend) -> Result<(), UiError> {
        if self.texture.is_some() || self.raster_failed {
            return Ok(());
        }
        match backend.render_text(&self.text, self.text_color) {
            Ok(id) => {
                let (w, h) = backend.texture_size(id)?;
                self.texture = Some((id, w, h));
                Ok(())
            }
            Err(err) => {
                // Tried once; stay blank rather than retrying every frame.
                self.raster_failed = true;
                Err(err.into())
            }
        }
    }
}

impl Interactable for TextView {
    fn state(&self) -> &NodeState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut NodeState {
        &mut self.state
    }

    fn update(&mut self, ctx: &mut UpdateCtx) -> Result<(), UiError> {
        self.state.update_geometry(ctx.viewport);
        self.ensure_rasterized(ctx.backend)
    }

    fn render(&mut self, ctx: &mut RenderCtx) {
        if let Some((id, w, h)) = self.texture {
            let rect = self.state.rect(ctx.viewport);
            let dst = chime_graphics::Rect::new(rect.x, rect.y, w, h);
            if let Err(err) = ctx.backend.copy_texture(id, dst) {
                warn!("{err}");
            }
        }
        self.state.mark_clean();
    }

    fn teardown(&mut self, backend: &mut dyn RenderBackend) {
        if let Some((id, _, _)) = self.texture.take() {
            backend.destroy_texture(id);
        }
    }
}
