//! Skip-forward and skip-back buttons.

use chime_render::RenderBackend;

use crate::context::{EventCtx, RenderCtx, UpdateCtx};
use crate::error::UiError;
use crate::interactable::{Interactable, TextureView};
use crate::node::NodeState;

/// Advances through the history, or to a random song at its head.
pub struct SkipForwardButton {
    view: TextureView,
}

impl SkipForwardButton {
    pub fn new(icon: impl Into<String>) -> Self {
        Self {
            view: TextureView::new(icon),
        }
    }
}

impl Interactable for SkipForwardButton {
    fn state(&self) -> &NodeState {
        self.view.state()
    }

    fn state_mut(&mut self) -> &mut NodeState {
        self.view.state_mut()
    }

    fn update(&mut self, ctx: &mut UpdateCtx) -> Result<(), UiError> {
        self.view.update(ctx)
    }

    fn render(&mut self, ctx: &mut RenderCtx) {
        self.view.render(ctx);
    }

    fn click(&mut self, ctx: &mut EventCtx, x: i32, y: i32) -> Result<(), UiError> {
        if self.view.state().hit(ctx.viewport, x, y) {
            ctx.player.play_next()?;
        }
        Ok(())
    }

    fn teardown(&mut self, backend: &mut dyn RenderBackend) {
        self.view.teardown(backend);
    }
}

/// Replays the next-older history entry.
pub struct SkipBackButton {
    view: TextureView,
}

impl SkipBackButton {
    pub fn new(icon: impl Into<String>) -> Self {
        Self {
            view: TextureView::new(icon),
        }
    }
}

impl Interactable for SkipBackButton {
    fn state(&self) -> &NodeState {
        self.view.state()
    }

    fn state_mut(&mut self) -> &mut NodeState {
        self.view.state_mut()
    }

    fn update(&mut self, ctx: &mut UpdateCtx) -> Result<(), UiError> {
        self.view.update(ctx)
    }

    fn render(&mut self, ctx: &mut RenderCtx) {
        self.view.render(ctx);
    }

    fn click(&mut self, ctx: &mut EventCtx, x: i32, y: i32) -> Result<(), UiError> {
        if self.view.state().hit(ctx.viewport, x, y) {
            ctx.player.play_previous()?;
        }
        Ok(())
    }

    fn teardown(&mut self, backend: &mut dyn RenderBackend) {
        self.view.teardown(backend);
    }
}
