//! The play/pause toggle button.

use chime_render::RenderBackend;

use crate::context::{EventCtx, RenderCtx, UpdateCtx};
use crate::error::UiError;
use crate::interactable::{Interactable, TextureView};
use crate::node::NodeState;

/// Button showing the pause icon while playing and the play icon while
/// paused. The paused flag is polled once per update, not event-driven.
pub struct PlayPauseButton {
    view: TextureView,
    play_icon: String,
    pause_icon: String,
    showing_paused: bool,
}

impl PlayPauseButton {
    pub fn new(play_icon: impl Into<String>, pause_icon: impl Into<String>) -> Self {
        let pause_icon = pause_icon.into();
        Self {
            // Playback starts unpaused, so the pause icon shows first.
            view: TextureView::new(pause_icon.clone()),
            play_icon: play_icon.into(),
            pause_icon,
            showing_paused: false,
        }
    }
}

impl Interactable for PlayPauseButton {
    fn state(&self) -> &NodeState {
        self.view.state()
    }

    fn state_mut(&mut self) -> &mut NodeState {
        self.view.state_mut()
    }

    fn update(&mut self, ctx: &mut UpdateCtx) -> Result<(), UiError> {
        let paused = ctx.player.is_paused();
        if paused != self.showing_paused {
            let icon = if paused {
                self.play_icon.clone()
            } else {
                self.pause_icon.clone()
            };
            self.view.set_texture(ctx.backend, icon);
            self.showing_paused = paused;
        }
        self.view.update(ctx)
    }

    fn render(&mut self, ctx: &mut RenderCtx) {
        self.view.render(ctx);
    }

    fn click(&mut self, ctx: &mut EventCtx, x: i32, y: i32) -> Result<(), UiError> {
        if self.view.state().hit(ctx.viewport, x, y) {
            ctx.player.toggle();
        }
        Ok(())
    }

    fn teardown(&mut self, backend: &mut dyn RenderBackend) {
        self.view.teardown(backend);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Viewport;
    use chime_graphics::CoordKind;
    use chime_playback::{Library, Player, SilentBackend};

    #[test]
    fn click_inside_toggles_playback() {
        let mut button = PlayPauseButton::new("play.png", "pause.png");
        button.state_mut().set_x(CoordKind::Pixel, 0.0);
        button.state_mut().set_y(CoordKind::Pixel, 0.0);
        button.state_mut().set_w(CoordKind::Pixel, 50.0);
        button.state_mut().set_h(CoordKind::Pixel, 50.0);

        let mut player =
            Player::new(Library::from_entries(vec![]), Box::new(SilentBackend::new()));
        let mut ctx = EventCtx {
            viewport: Viewport::new(500, 500),
            player: &mut player,
        };

        button.click(&mut ctx, 25, 25).unwrap();
        assert!(ctx.player.is_paused());
        button.click(&mut ctx, 25, 25).unwrap();
        assert!(!ctx.player.is_paused());
        // Outside: no effect.
        button.click(&mut ctx, 100, 100).unwrap();
        assert!(!ctx.player.is_paused());
    }
}
