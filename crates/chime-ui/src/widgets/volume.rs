//! The volume bar.

use crate::context::{EventCtx, RenderCtx, UpdateCtx};
use crate::error::UiError;
use crate::interactable::Interactable;
use crate::node::NodeState;

const SCROLL_STEP: f32 = 0.01;

/// Secondary-colored track with a primary-colored fill sized by the
/// current volume. Click and drag map the local x position to a volume
/// fraction; scrolling nudges it.
pub struct VolumeBar {
    state: NodeState,
    shown_volume: f32,
}

impl VolumeBar {
    pub fn new() -> Self {
        Self {
            state: NodeState::new(),
            shown_volume: 0.0,
        }
    }

    fn volume_at(&self, ctx: &EventCtx, x: i32) -> f32 {
        let rect = self.state.rect(ctx.viewport);
        ((x - rect.x) as f32 / rect.w as f32).clamp(0.0, 1.0)
    }
}

impl Default for VolumeBar {
    fn default() -> Self {
        Self::new()
    }
}

impl Interactable for VolumeBar {
    fn state(&self) -> &NodeState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut NodeState {
        &mut self.state
    }

    fn update(&mut self, ctx: &mut UpdateCtx) -> Result<(), UiError> {
        self.state.update_geometry(ctx.viewport);
        let volume = ctx.player.volume();
        if volume != self.shown_volume {
            self.shown_volume = volume;
            self.state.invalidate();
        }
        Ok(())
    }

    fn render(&mut self, ctx: &mut RenderCtx) {
        let rect = self.state.rect(ctx.viewport);
        ctx.backend.set_draw_color(self.state.secondary_color());
        ctx.backend.fill_rect(rect);
        let mut fill = rect;
        fill.w = (rect.w as f32 * self.shown_volume) as i32;
        ctx.backend.set_draw_color(self.state.primary_color());
        ctx.backend.fill_rect(fill);
        self.state.mark_clean();
    }

    fn click(&mut self, ctx: &mut EventCtx, x: i32, y: i32) -> Result<(), UiError> {
        if self.state.hit(ctx.viewport, x, y) {
            let volume = self.volume_at(ctx, x);
            ctx.player.set_volume(volume)?;
        }
        Ok(())
    }

    fn mouse_down(&mut self, ctx: &mut EventCtx, x: i32, y: i32) -> Result<(), UiError> {
        self.click(ctx, x, y)
    }

    fn scroll(&mut self, ctx: &mut EventCtx, x: i32, y: i32, speed: f32) -> Result<(), UiError> {
        if self.state.hit(ctx.viewport, x, y) {
            let volume = (ctx.player.volume() + SCROLL_STEP * speed).clamp(0.0, 1.0);
            ctx.player.set_volume(volume)?;
        }
        Ok(())
    }
}
