//! Per-pass context objects.
//!
//! Collaborators travel down the tree in these bundles instead of living
//! in process-wide singletons, so widgets state their needs in their
//! signatures.

use chime_playback::Player;
use chime_render::RenderBackend;

use crate::node::Viewport;

/// Context for the per-frame update pass.
pub struct UpdateCtx<'a> {
    pub viewport: Viewport,
    pub backend: &'a mut dyn RenderBackend,
    pub player: &'a mut Player,
}

/// Context for the per-frame render pass.
pub struct RenderCtx<'a> {
    pub viewport: Viewport,
    pub backend: &'a mut dyn RenderBackend,
}

/// Context for input event dispatch.
pub struct EventCtx<'a> {
    pub viewport: Viewport,
    pub player: &'a mut Player,
}
