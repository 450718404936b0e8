//! Retained-mode UI core for Chime.
//!
//! Every visible element is an [`Interactable`] built around a shared
//! [`NodeState`]: abstract coordinates resolved against a bound each
//! frame, a dirty flag driving repaint, and strict-edge hit testing.
//! [`InteractableManager`] owns a flat list of nodes; [`Container`]
//! composes a state and a manager with an offscreen texture cache;
//! [`ListContainer`] adds clamped vertical scrolling. The `widgets`
//! module layers the player's concrete controls on top.

mod container;
mod context;
mod error;
mod interactable;
mod manager;
mod node;
pub mod widgets;

pub use container::*;
pub use context::*;
pub use error::*;
pub use interactable::*;
pub use manager::*;
pub use node::*;

pub mod prelude {
    pub use crate::container::{Container, ListContainer};
    pub use crate::context::{EventCtx, RenderCtx, UpdateCtx};
    pub use crate::error::UiError;
    pub use crate::interactable::{Interactable, TextView, TextureView};
    pub use crate::manager::InteractableManager;
    pub use crate::node::{NodeId, NodeState, Viewport};
}
