//! Flat ownership and dispatch over a set of interactables.

use chime_render::RenderBackend;
use log::warn;

use crate::context::{EventCtx, RenderCtx, UpdateCtx};
use crate::error::UiError;
use crate::interactable::Interactable;
use crate::node::NodeId;

/// Owns a flat list of nodes. Insertion order is paint order; later nodes
/// paint over earlier ones.
#[derive(Default)]
pub struct InteractableManager {
    nodes: Vec<Box<dyn Interactable>>,
}

impl InteractableManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, node: Box<dyn Interactable>) {
        self.nodes.push(node);
    }

    /// Tears down and drops the node with this id. Ids are unique, so the
    /// search stops at the first match.
    pub fn remove_by_id(&mut self, id: NodeId, backend: &mut dyn RenderBackend) -> bool {
        match self.nodes.iter().position(|n| n.state().id() == id) {
            Some(index) => {
                let mut node = self.nodes.remove(index);
                node.teardown(backend);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: NodeId) -> Option<&dyn Interactable> {
        self.nodes
            .iter()
            .find(|n| n.state().id() == id)
            .map(|n| n.as_ref())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut (dyn Interactable + 'static)> {
        self.nodes
            .iter_mut()
            .find(|n| n.state().id() == id)
            .map(|n| n.as_mut())
    }

    /// Tears down and drops every node.
    pub fn clear(&mut self, backend: &mut dyn RenderBackend) {
        for node in &mut self.nodes {
            node.teardown(backend);
        }
        self.nodes.clear();
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn Interactable>> {
        self.nodes.iter_mut()
    }

    /// True when any owned node needs repainting.
    pub fn any_dirty(&self) -> bool {
        self.nodes.iter().any(|n| n.state().is_dirty())
    }

    /// Updates every node unconditionally; one node's failure never stops
    /// the pass. Returns the failure count.
    pub fn update(&mut self, ctx: &mut UpdateCtx) -> usize {
        let mut failures = 0;
        for node in &mut self.nodes {
            if let Err(err) = node.update(ctx) {
                warn!("node {:?} update failed: {err}", node.state().id());
                failures += 1;
            }
        }
        failures
    }

    pub fn render(&mut self, ctx: &mut RenderCtx) {
        for node in &mut self.nodes {
            node.render(ctx);
        }
    }

    /// Dispatches a click in paint order. The first `Err` stops dispatch
    /// immediately and is returned.
    pub fn click(&mut self, ctx: &mut EventCtx, x: i32, y: i32) -> Result<(), UiError> {
        for node in &mut self.nodes {
            node.click(ctx, x, y)?;
        }
        Ok(())
    }

    pub fn mouse_down(&mut self, ctx: &mut EventCtx, x: i32, y: i32) -> Result<(), UiError> {
        for node in &mut self.nodes {
            node.mouse_down(ctx, x, y)?;
        }
        Ok(())
    }

    pub fn scroll(&mut self, ctx: &mut EventCtx, x: i32, y: i32, speed: f32) -> Result<(), UiError> {
        for node in &mut self.nodes {
            node.scroll(ctx, x, y, speed)?;
        }
        Ok(())
    }
}
