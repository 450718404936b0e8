//! The scrollable song list and its rows.

use chime_graphics::{Color, CoordKind, Rect};
use chime_render::{RenderBackend, TextureId};
use log::warn;

use crate::container::ListContainer;
use crate::context::{EventCtx, RenderCtx, UpdateCtx};
use crate::error::UiError;
use crate::interactable::Interactable;
use crate::node::NodeState;

use chime_playback::SongEntry;

const HIGHLIGHT: Color = Color::rgb(255, 50, 50);
const TEXT_INSET: i32 = 10;

/// One row of the song list: the title, clickable, highlighted while its
/// song plays.
pub struct SongRow {
    state: NodeState,
    entry: SongEntry,
    text: Option<(TextureId, i32, i32)>,
    raster_failed: bool,
    highlighted: bool,
}

impl SongRow {
    pub fn new(entry: SongEntry) -> Self {
        let mut state = NodeState::new();
        state.set_primary_color(Color::TRANSPARENT);
        Self {
            state,
            entry,
            text: None,
            raster_failed: false,
            highlighted: false,
        }
    }

    pub fn entry(&self) -> &SongEntry {
        &self.entry
    }
}

impl Interactable for SongRow {
    fn state(&self) -> &NodeState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut NodeState {
        &mut self.state
    }

    fn update(&mut self, ctx: &mut UpdateCtx) -> Result<(), UiError> {
        self.state.update_geometry(ctx.viewport);

        // Polled, not subscribed: the row follows playback state with at
        // most one frame of lag.
        let playing = ctx.player.current_song() == Some(self.entry.id);
        if playing != self.highlighted {
            self.highlighted = playing;
            self.state.set_primary_color(if playing {
                HIGHLIGHT
            } else {
                Color::TRANSPARENT
            });
        }

        if self.text.is_none() && !self.raster_failed {
            match ctx.backend.render_text(&self.entry.title, Color::WHITE) {
                Ok(id) => {
                    let (w, h) = ctx.backend.texture_size(id)?;
                    self.text = Some((id, w, h));
                }
                Err(err) => {
                    self.raster_failed = true;
                    return Err(err.into());
                }
            }
        }
        Ok(())
    }

    fn render(&mut self, ctx: &mut RenderCtx) {
        let rect = self.state.rect(ctx.viewport);
        let background = self.state.primary_color();
        if !background.is_transparent() {
            ctx.backend.set_draw_color(background);
            ctx.backend.fill_rect(rect);
        }
        if let Some((id, w, h)) = self.text {
            let dst = Rect::new(rect.x + TEXT_INSET, rect.y + (rect.h - h) / 2, w, h);
            if let Err(err) = ctx.backend.copy_texture(id, dst) {
                warn!("{err}");
            }
        }
        self.state.mark_clean();
    }

    fn click(&mut self, ctx: &mut EventCtx, x: i32, y: i32) -> Result<(), UiError> {
        if self.state.hit(ctx.viewport, x, y) {
            ctx.player.play_song_save(self.entry.id)?;
        }
        Ok(())
    }

    fn teardown(&mut self, backend: &mut dyn RenderBackend) {
        if let Some((id, _, _)) = self.text.take() {
            backend.destroy_texture(id);
        }
    }
}

/// A [`ListContainer`] that grows one fixed-height row per song.
///
/// `max_scroll` tracks the y of the last added row, so the final row can
/// always scroll to the top of the list.
pub struct SongList {
    list: ListContainer,
    row_height: i32,
    stack_height: i32,
}

impl SongList {
    pub fn new(row_height: i32) -> Self {
        Self {
            list: ListContainer::new(),
            row_height,
            stack_height: 0,
        }
    }

    pub fn add_song(&mut self, entry: SongEntry) {
        let mut row = SongRow::new(entry);
        row.state.set_x(CoordKind::Pixel, 0.0);
        row.state.set_y(CoordKind::Pixel, self.stack_height as f32);
        row.state.set_w(CoordKind::Percent, 1.0);
        row.state.set_h(CoordKind::Pixel, self.row_height as f32);
        self.list.set_max_scroll(self.stack_height as f32);
        self.list.add(Box::new(row));
        self.stack_height += self.row_height;
    }

    pub fn add_music(&mut self, entries: &[SongEntry]) {
        for entry in entries {
            self.add_song(entry.clone());
        }
    }

    pub fn len(&self) -> usize {
        self.list.children().len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.children().is_empty()
    }

    pub fn max_scroll(&self) -> f32 {
        self.list.max_scroll()
    }
}

impl Interactable for SongList {
    fn state(&self) -> &NodeState {
        self.list.state()
    }

    fn state_mut(&mut self) -> &mut NodeState {
        self.list.state_mut()
    }

    fn update(&mut self, ctx: &mut UpdateCtx) -> Result<(), UiError> {
        self.list.update(ctx)
    }

    fn render(&mut self, ctx: &mut RenderCtx) {
        self.list.render(ctx);
    }

    fn click(&mut self, ctx: &mut EventCtx, x: i32, y: i32) -> Result<(), UiError> {
        self.list.click(ctx, x, y)
    }

    fn mouse_down(&mut self, ctx: &mut EventCtx, x: i32, y: i32) -> Result<(), UiError> {
        self.list.mouse_down(ctx, x, y)
    }

    fn scroll(&mut self, ctx: &mut EventCtx, x: i32, y: i32, speed: f32) -> Result<(), UiError> {
        self.list.scroll(ctx, x, y, speed)
    }

    fn teardown(&mut self, backend: &mut dyn RenderBackend) {
        self.list.teardown(backend);
    }
}
