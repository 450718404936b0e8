//! Containers: cached-subtree composition and scrolling.

use chime_graphics::{Point, Rect};
use chime_render::{RenderBackend, TextureId};
use log::{error, warn};

use crate::context::{EventCtx, RenderCtx, UpdateCtx};
use crate::error::UiError;
use crate::interactable::Interactable;
use crate::manager::InteractableManager;
use crate::node::NodeState;

/// A node that owns children and paints them into a cached offscreen
/// texture.
///
/// The cache decouples "does this subtree need repainting" (checked every
/// frame) from "repaint the subtree" (only when dirty) and from "present
/// the subtree" (a blit, every frame). Children are bound to a rect sized
/// to the container, so their coordinates resolve in local space.
pub struct Container {
    state: NodeState,
    children: InteractableManager,
    texture: Option<TextureId>,
    bind_origin: Point,
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl Container {
    pub fn new() -> Self {
        Self {
            state: NodeState::new(),
            children: InteractableManager::new(),
            texture: None,
            bind_origin: Point::default(),
        }
    }

    pub fn add(&mut self, child: Box<dyn Interactable>) {
        self.children.add(child);
        self.state.invalidate();
    }

    pub fn children(&self) -> &InteractableManager {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut InteractableManager {
        &mut self.children
    }
}

impl Interactable for Container {
    fn state(&self) -> &NodeState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut NodeState {
        &mut self.state
    }

    fn update(&mut self, ctx: &mut UpdateCtx) -> Result<(), UiError> {
        self.state.update_geometry(ctx.viewport);
        self.children.update(ctx);
        if self.children.any_dirty() {
            self.state.invalidate();
        }
        if !self.state.is_dirty() {
            return Ok(());
        }

        let rect = self.state.rect(ctx.viewport);
        let bind = Rect::new(self.bind_origin.x, self.bind_origin.y, rect.w, rect.h);
        for child in self.children.iter_mut() {
            child.state_mut().bind_to_area(bind)?;
        }

        // The offscreen bitmap always matches the current resolved size.
        // The old bitmap is kept until the replacement exists, so a failed
        // allocation leaves the last good frame on screen.
        let texture = match ctx.backend.create_texture(rect.w, rect.h) {
            Ok(id) => id,
            Err(err) => {
                error!("offscreen allocation failed: {err}");
                return Ok(());
            }
        };
        if let Some(old) = self.texture.replace(texture) {
            ctx.backend.destroy_texture(old);
        }

        let previous = ctx.backend.set_render_target(Some(texture));
        ctx.backend.set_draw_color(self.state.primary_color());
        ctx.backend.clear();
        let mut render_ctx = RenderCtx {
            viewport: ctx.viewport,
            backend: &mut *ctx.backend,
        };
        self.children.render(&mut render_ctx);
        ctx.backend.set_render_target(previous);
        Ok(())
    }

    fn render(&mut self, ctx: &mut RenderCtx) {
        let rect = self.state.rect(ctx.viewport);
        ctx.backend.set_draw_color(self.state.primary_color());
        ctx.backend.fill_rect(rect);
        if let Some(id) = self.texture {
            if let Err(err) = ctx.backend.copy_texture(id, rect) {
                warn!("{err}");
            }
        }
        self.state.mark_clean();
    }

    fn click(&mut self, ctx: &mut EventCtx, x: i32, y: i32) -> Result<(), UiError> {
        let rect = self.state.rect(ctx.viewport);
        if !rect.contains_strict(x, y) {
            return Ok(());
        }
        self.children.click(ctx, x - rect.x, y - rect.y)
    }

    fn mouse_down(&mut self, ctx: &mut EventCtx, x: i32, y: i32) -> Result<(), UiError> {
        let rect = self.state.rect(ctx.viewport);
        if !rect.contains_strict(x, y) {
            return Ok(());
        }
        self.children.mouse_down(ctx, x - rect.x, y - rect.y)
    }

    fn scroll(&mut self, ctx: &mut EventCtx, x: i32, y: i32, speed: f32) -> Result<(), UiError> {
        let rect = self.state.rect(ctx.viewport);
        if !rect.contains_strict(x, y) {
            return Ok(());
        }
        self.children.scroll(ctx, x - rect.x, y - rect.y, speed)
    }

    fn teardown(&mut self, backend: &mut dyn RenderBackend) {
        self.children.clear(backend);
        if let Some(id) = self.texture.take() {
            backend.destroy_texture(id);
        }
    }
}

/// A [`Container`] whose content scrolls vertically.
///
/// The binding rect origin is `(0, scroll_offset)`, so increasing the
/// offset moves content up without touching child coordinates. Scroll
/// events are consumed here and never forwarded to children.
pub struct ListContainer {
    inner: Container,
    scroll_offset: f32,
    max_scroll: f32,
}

impl Default for ListContainer {
    fn default() -> Self {
        Self::new()
    }
}

impl ListContainer {
    pub fn new() -> Self {
        Self {
            inner: Container::new(),
            scroll_offset: 0.0,
            max_scroll: 0.0,
        }
    }

    pub fn add(&mut self, child: Box<dyn Interactable>) {
        self.inner.add(child);
    }

    pub fn children(&self) -> &InteractableManager {
        self.inner.children()
    }

    pub fn children_mut(&mut self) -> &mut InteractableManager {
        self.inner.children_mut()
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    pub fn max_scroll(&self) -> f32 {
        self.max_scroll
    }

    pub fn set_max_scroll(&mut self, max: f32) {
        if max < 0.0 {
            warn!("ignoring negative max scroll {max}");
            return;
        }
        self.max_scroll = max;
        self.set_scroll(self.scroll_offset);
    }

    /// Sets the offset, clamped to `[0, max_scroll]`, and marks the list
    /// for repaint.
    pub fn set_scroll(&mut self, offset: f32) {
        self.scroll_offset = offset.clamp(0.0, self.max_scroll);
        self.inner.state.invalidate();
    }
}

impl Interactable for ListContainer {
    fn state(&self) -> &NodeState {
        &self.inner.state
    }

    fn state_mut(&mut self) -> &mut NodeState {
        &mut self.inner.state
    }

    fn update(&mut self, ctx: &mut UpdateCtx) -> Result<(), UiError> {
        self.inner.bind_origin.y = self.scroll_offset as i32;
        self.inner.update(ctx)
    }

    fn render(&mut self, ctx: &mut RenderCtx) {
        self.inner.render(ctx);
    }

    fn click(&mut self, ctx: &mut EventCtx, x: i32, y: i32) -> Result<(), UiError> {
        self.inner.click(ctx, x, y)
    }

    fn mouse_down(&mut self, ctx: &mut EventCtx, x: i32, y: i32) -> Result<(), UiError> {
        self.inner.mouse_down(ctx, x, y)
    }

    fn scroll(&mut self, ctx: &mut EventCtx, x: i32, y: i32, speed: f32) -> Result<(), UiError> {
        if !self.inner.state.hit(ctx.viewport, x, y) {
            return Ok(());
        }
        self.set_scroll(self.scroll_offset + speed);
        Ok(())
    }

    fn teardown(&mut self, backend: &mut dyn RenderBackend) {
        self.inner.teardown(backend);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Viewport;
    use chime_graphics::CoordKind;
    use chime_playback::{Library, Player, SilentBackend};
    use chime_render::{RenderBackend, SoftwareBackend};

    struct Plain {
        state: NodeState,
    }

    fn sized_state(x: f32, y: f32, w: f32, h: f32) -> NodeState {
        let mut state = NodeState::new();
        state.set_x(CoordKind::Pixel, x);
        state.set_y(CoordKind::Pixel, y);
        state.set_w(CoordKind::Pixel, w);
        state.set_h(CoordKind::Pixel, h);
        state
    }

    impl Plain {
        fn sized(x: f32, y: f32, w: f32, h: f32) -> Self {
            Self {
                state: sized_state(x, y, w, h),
            }
        }
    }

    impl Interactable for Plain {
        fn state(&self) -> &NodeState {
            &self.state
        }

        fn state_mut(&mut self) -> &mut NodeState {
            &mut self.state
        }
    }

    struct ClickSpy {
        state: NodeState,
        hits: std::rc::Rc<std::cell::Cell<u32>>,
    }

    impl Interactable for ClickSpy {
        fn state(&self) -> &NodeState {
            &self.state
        }

        fn state_mut(&mut self) -> &mut NodeState {
            &mut self.state
        }

        fn click(&mut self, ctx: &mut EventCtx, x: i32, y: i32) -> Result<(), UiError> {
            if self.state.hit(ctx.viewport, x, y) {
                self.hits.set(self.hits.get() + 1);
            }
            Ok(())
        }
    }

    fn test_player() -> Player {
        Player::new(Library::from_entries(vec![]), Box::new(SilentBackend::new()))
    }

    fn sized_container(x: f32, y: f32, w: f32, h: f32) -> Container {
        let mut container = Container::new();
        container.state.set_x(CoordKind::Pixel, x);
        container.state.set_y(CoordKind::Pixel, y);
        container.state.set_w(CoordKind::Pixel, w);
        container.state.set_h(CoordKind::Pixel, h);
        container
    }

    fn run_frame(
        node: &mut dyn Interactable,
        backend: &mut SoftwareBackend,
        player: &mut Player,
    ) {
        let viewport = Viewport::new(500, 500);
        let mut update = UpdateCtx {
            viewport,
            backend,
            player,
        };
        node.update(&mut update).unwrap();
        let mut render = RenderCtx { viewport, backend };
        node.render(&mut render);
    }

    #[test]
    fn offscreen_regenerates_only_while_dirty() {
        let mut backend = SoftwareBackend::new(500, 500);
        let mut player = test_player();
        let mut container = sized_container(10.0, 10.0, 100.0, 100.0);
        let child = Plain::sized(5.0, 5.0, 20.0, 20.0);
        let child_id = child.state.id();
        container.add(Box::new(child));

        run_frame(&mut container, &mut backend, &mut player);
        let first = container.texture.unwrap();
        assert_eq!(backend.texture_size(first).unwrap(), (100, 100));

        // Clean frame: same bitmap survives.
        run_frame(&mut container, &mut backend, &mut player);
        assert_eq!(container.texture, Some(first));

        // A dirty child forces exactly one regeneration.
        container
            .children_mut()
            .get_mut(child_id)
            .unwrap()
            .state_mut()
            .invalidate();
        run_frame(&mut container, &mut backend, &mut player);
        let second = container.texture.unwrap();
        assert_ne!(second, first);
        run_frame(&mut container, &mut backend, &mut player);
        assert_eq!(container.texture, Some(second));
    }

    #[test]
    fn offscreen_tracks_the_resolved_size() {
        let mut backend = SoftwareBackend::new(500, 500);
        let mut player = test_player();
        let mut container = sized_container(0.0, 0.0, 80.0, 60.0);
        run_frame(&mut container, &mut backend, &mut player);
        let id = container.texture.unwrap();
        assert_eq!(backend.texture_size(id).unwrap(), (80, 60));

        container.state.set_w(CoordKind::Pixel, 120.0);
        run_frame(&mut container, &mut backend, &mut player);
        let id = container.texture.unwrap();
        assert_eq!(backend.texture_size(id).unwrap(), (120, 60));
    }

    #[test]
    fn children_bind_to_the_container_size() {
        let mut backend = SoftwareBackend::new(500, 500);
        let mut player = test_player();
        let mut container = sized_container(10.0, 10.0, 200.0, 150.0);
        let child = Plain::sized(0.0, 0.0, 10.0, 10.0);
        let child_id = child.state.id();
        container.add(Box::new(child));

        run_frame(&mut container, &mut backend, &mut player);
        let bound = container
            .children()
            .get(child_id)
            .unwrap()
            .state()
            .bound()
            .unwrap();
        assert_eq!(bound, Rect::new(0, 0, 200, 150));
    }

    #[test]
    fn failed_refresh_keeps_the_stale_bitmap() {
        let mut backend = SoftwareBackend::new(500, 500);
        let mut player = test_player();
        let mut container = sized_container(0.0, 0.0, 80.0, 60.0);
        run_frame(&mut container, &mut backend, &mut player);
        let id = container.texture.unwrap();

        // A zero-width resolve makes the allocation fail; the last good
        // bitmap stays owned and valid.
        container.state.set_w(CoordKind::Pixel, 0.0);
        let mut update = UpdateCtx {
            viewport: Viewport::new(500, 500),
            backend: &mut backend,
            player: &mut player,
        };
        container.update(&mut update).unwrap();
        assert_eq!(container.texture, Some(id));
        assert_eq!(backend.texture_size(id).unwrap(), (80, 60));
    }

    /// Owns one backend texture, released through `teardown`.
    struct Textured {
        state: NodeState,
        texture: Option<chime_render::TextureId>,
    }

    impl Interactable for Textured {
        fn state(&self) -> &NodeState {
            &self.state
        }

        fn state_mut(&mut self) -> &mut NodeState {
            &mut self.state
        }

        fn teardown(&mut self, backend: &mut dyn RenderBackend) {
            if let Some(id) = self.texture.take() {
                backend.destroy_texture(id);
            }
        }
    }

    #[test]
    fn teardown_releases_the_subtree() {
        let mut backend = SoftwareBackend::new(500, 500);
        let mut player = test_player();
        let mut container = sized_container(0.0, 0.0, 200.0, 200.0);
        let child_tex = backend.create_texture(32, 32).unwrap();
        container.add(Box::new(Textured {
            state: sized_state(10.0, 10.0, 32.0, 32.0),
            texture: Some(child_tex),
        }));
        run_frame(&mut container, &mut backend, &mut player);
        let offscreen = container.texture.unwrap();

        container.teardown(&mut backend);
        assert!(container.texture.is_none());
        assert!(container.children().is_empty());
        assert!(backend.texture_size(offscreen).is_err());
        assert!(backend.texture_size(child_tex).is_err());
    }

    #[test]
    fn clicks_translate_into_local_space() {
        let hits = std::rc::Rc::new(std::cell::Cell::new(0));
        let mut container = sized_container(100.0, 100.0, 200.0, 200.0);
        container.add(Box::new(ClickSpy {
            state: sized_state(10.0, 10.0, 50.0, 50.0),
            hits: hits.clone(),
        }));

        let mut player = test_player();
        let mut ctx = EventCtx {
            viewport: Viewport::new(500, 500),
            player: &mut player,
        };
        // Global (115, 115) is local (15, 15), inside the child.
        container.click(&mut ctx, 115, 115).unwrap();
        assert_eq!(hits.get(), 1);
        // Outside the container entirely.
        container.click(&mut ctx, 50, 50).unwrap();
        assert_eq!(hits.get(), 1);
        // Inside the container, outside the child.
        container.click(&mut ctx, 299, 299).unwrap();
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn scroll_clamps_at_both_ends() {
        let mut list = ListContainer::new();
        list.state_mut().set_x(CoordKind::Pixel, 0.0);
        list.state_mut().set_y(CoordKind::Pixel, 0.0);
        list.state_mut().set_w(CoordKind::Pixel, 300.0);
        list.state_mut().set_h(CoordKind::Pixel, 300.0);
        list.set_max_scroll(150.0);

        let mut player = test_player();
        let mut ctx = EventCtx {
            viewport: Viewport::new(500, 500),
            player: &mut player,
        };
        list.scroll(&mut ctx, 50, 50, 100.0).unwrap();
        assert_eq!(list.scroll_offset(), 100.0);
        list.scroll(&mut ctx, 50, 50, 100.0).unwrap();
        assert_eq!(list.scroll_offset(), 150.0);
        list.scroll(&mut ctx, 50, 50, -500.0).unwrap();
        assert_eq!(list.scroll_offset(), 0.0);
        // Outside the list: ignored.
        list.scroll(&mut ctx, 400, 400, 50.0).unwrap();
        assert_eq!(list.scroll_offset(), 0.0);
    }

    #[test]
    fn scroll_shifts_the_binding_origin() {
        let mut backend = SoftwareBackend::new(500, 500);
        let mut player = test_player();
        let mut list = ListContainer::new();
        list.state_mut().set_x(CoordKind::Pixel, 0.0);
        list.state_mut().set_y(CoordKind::Pixel, 0.0);
        list.state_mut().set_w(CoordKind::Pixel, 300.0);
        list.state_mut().set_h(CoordKind::Pixel, 300.0);
        list.set_max_scroll(200.0);
        let child = Plain::sized(0.0, 100.0, 300.0, 75.0);
        let child_id = child.state.id();
        list.add(Box::new(child));

        list.set_scroll(40.0);
        run_frame(&mut list, &mut backend, &mut player);
        let child_state = list.children().get(child_id).unwrap().state();
        assert_eq!(child_state.bound().unwrap(), Rect::new(0, 40, 300, 300));
        // The bound origin shifts content up by the offset.
        assert_eq!(
            child_state.rect(Viewport::new(500, 500)),
            Rect::new(0, 60, 300, 75)
        );
    }

    #[test]
    fn scroll_is_not_forwarded_to_children() {
        struct ScrollBomb {
            state: NodeState,
        }
        impl Interactable for ScrollBomb {
            fn state(&self) -> &NodeState {
                &self.state
            }
            fn state_mut(&mut self) -> &mut NodeState {
                &mut self.state
            }
            fn scroll(
                &mut self,
                _ctx: &mut EventCtx,
                _x: i32,
                _y: i32,
                _speed: f32,
            ) -> Result<(), UiError> {
                panic!("children must not receive scrolls");
            }
        }

        let mut list = ListContainer::new();
        list.state_mut().set_x(CoordKind::Pixel, 0.0);
        list.state_mut().set_y(CoordKind::Pixel, 0.0);
        list.state_mut().set_w(CoordKind::Pixel, 300.0);
        list.state_mut().set_h(CoordKind::Pixel, 300.0);
        list.set_max_scroll(100.0);
        list.add(Box::new(ScrollBomb {
            state: NodeState::new(),
        }));

        let mut player = test_player();
        let mut ctx = EventCtx {
            viewport: Viewport::new(500, 500),
            player: &mut player,
        };
        list.scroll(&mut ctx, 50, 50, 10.0).unwrap();
        assert_eq!(list.scroll_offset(), 10.0);
    }
}
