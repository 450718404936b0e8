//! Placement styles for rendered elements.

/// How a node's resolved position anchors its rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RenderStyle {
    /// No explicit style; behaves like [`RenderStyle::TopLeft`].
    #[default]
    None,
    /// The resolved (x, y) is the rectangle's top-left corner.
    TopLeft,
    /// The resolved (x, y) is the rectangle's center.
    Centered,
}
