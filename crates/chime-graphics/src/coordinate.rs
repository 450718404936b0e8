//! Coordinate descriptors resolved against a bounding box.

/// Identifies which dimension of the bounding box a coordinate resolves
/// against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Resolve against the bound width.
    Horizontal,
    /// Resolve against the bound height.
    Vertical,
}

impl Axis {
    pub fn is_horizontal(self) -> bool {
        matches!(self, Axis::Horizontal)
    }
}

/// How the stored value of a [`Coordinate`] is interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CoordKind {
    /// No value set; resolves to the `-1` sentinel.
    #[default]
    None,
    /// An absolute pixel value.
    Pixel,
    /// A pixel offset measured inward from the right edge of the bound.
    PixelFromRight,
    /// A pixel offset measured inward from the bottom edge of the bound.
    PixelFromBottom,
    /// A fraction of whichever bound dimension matches the axis.
    Percent,
    /// A fraction of the bound width, regardless of axis.
    PercentWidth,
    /// A fraction of the bound height, regardless of axis.
    PercentHeight,
    /// A fraction of the smaller bound dimension.
    PercentSmallest,
}

/// An abstract position or size that only becomes a pixel value once a
/// bounding box is known.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Coordinate {
    kind: CoordKind,
    value: f32,
}

impl Coordinate {
    pub const fn new(kind: CoordKind, value: f32) -> Self {
        Self { kind, value }
    }

    /// A pixel-kind coordinate.
    pub const fn pixel(value: i32) -> Self {
        Self::new(CoordKind::Pixel, value as f32)
    }

    pub fn set(&mut self, kind: CoordKind, value: f32) {
        self.kind = kind;
        self.value = value;
    }

    pub fn kind(&self) -> CoordKind {
        self.kind
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Resolves the coordinate to a pixel value within a bound of
    /// `bound_w` by `bound_h`.
    ///
    /// `CoordKind::None` resolves to `-1`; callers never feed an unset
    /// coordinate into production geometry. Zero or negative bounds are
    /// not guarded here; binding enforces positive dimensions.
    pub fn resolve(&self, axis: Axis, bound_w: i32, bound_h: i32) -> i32 {
        match self.kind {
            CoordKind::None => -1,
            CoordKind::Pixel => self.value as i32,
            CoordKind::PixelFromRight => bound_w - self.value as i32,
            CoordKind::PixelFromBottom => bound_h - self.value as i32,
            CoordKind::Percent => {
                let dim = if axis.is_horizontal() { bound_w } else { bound_h };
                (dim as f32 * self.value).round() as i32
            }
            CoordKind::PercentWidth => (bound_w as f32 * self.value).round() as i32,
            CoordKind::PercentHeight => (bound_h as f32 * self.value).round() as i32,
            CoordKind::PercentSmallest => {
                (bound_w.min(bound_h) as f32 * self.value).round() as i32
            }
        }
    }

    /// Inverse of [`resolve`](Self::resolve): the coordinate expressed as a
    /// fraction of the bound.
    ///
    /// Edge-relative kinds divide the edge-adjusted pixel position by their
    /// own axis dimension (`PixelFromRight` by the width, `PixelFromBottom`
    /// by the height), so `resolve` and `fraction` round-trip consistently.
    pub fn fraction(&self, axis: Axis, bound_w: i32, bound_h: i32) -> f32 {
        match self.kind {
            CoordKind::None => -1.0,
            CoordKind::Pixel => {
                let dim = if axis.is_horizontal() { bound_w } else { bound_h };
                self.value / dim as f32
            }
            CoordKind::PixelFromRight => {
                self.resolve(axis, bound_w, bound_h) as f32 / bound_w as f32
            }
            CoordKind::PixelFromBottom => {
                self.resolve(axis, bound_w, bound_h) as f32 / bound_h as f32
            }
            CoordKind::Percent
            | CoordKind::PercentWidth
            | CoordKind::PercentHeight
            | CoordKind::PercentSmallest => self.value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_kinds_resolve_directly() {
        let c = Coordinate::new(CoordKind::Pixel, 100.0);
        assert_eq!(c.resolve(Axis::Horizontal, 500, 500), 100);

        let right = Coordinate::new(CoordKind::PixelFromRight, 75.0);
        assert_eq!(right.resolve(Axis::Horizontal, 500, 300), 425);

        let bottom = Coordinate::new(CoordKind::PixelFromBottom, 75.0);
        assert_eq!(bottom.resolve(Axis::Vertical, 300, 500), 425);
    }

    #[test]
    fn percent_kinds_round_to_nearest() {
        let half = Coordinate::new(CoordKind::PercentWidth, 0.5);
        assert_eq!(half.resolve(Axis::Vertical, 500, 300), 250);

        let p = Coordinate::new(CoordKind::Percent, 0.25);
        assert_eq!(p.resolve(Axis::Horizontal, 401, 0), 100);
        assert_eq!(p.resolve(Axis::Vertical, 0, 402), 101);

        let small = Coordinate::new(CoordKind::PercentSmallest, 0.5);
        assert_eq!(small.resolve(Axis::Horizontal, 500, 300), 150);

        let h = Coordinate::new(CoordKind::PercentHeight, 0.1);
        assert_eq!(h.resolve(Axis::Horizontal, 500, 250), 25);
    }

    #[test]
    fn unset_coordinate_resolves_to_sentinel() {
        let c = Coordinate::default();
        assert_eq!(c.resolve(Axis::Horizontal, 500, 500), -1);
        assert_eq!(c.fraction(Axis::Horizontal, 500, 500), -1.0);
    }

    #[test]
    fn resolution_is_monotonic_in_value() {
        let bounds = (640, 480);
        for kind in [
            CoordKind::Pixel,
            CoordKind::Percent,
            CoordKind::PercentWidth,
            CoordKind::PercentHeight,
            CoordKind::PercentSmallest,
        ] {
            let mut prev = i32::MIN;
            for step in 0..50 {
                let c = Coordinate::new(kind, step as f32 * 0.1);
                let px = c.resolve(Axis::Horizontal, bounds.0, bounds.1);
                assert!(px >= prev, "{kind:?} not monotonic");
                prev = px;
            }
        }
        // Edge-relative kinds are monotonically decreasing in value.
        let mut prev = i32::MAX;
        for step in 0..50 {
            let c = Coordinate::new(CoordKind::PixelFromRight, step as f32);
            let px = c.resolve(Axis::Horizontal, bounds.0, bounds.1);
            assert!(px <= prev);
            prev = px;
        }
    }

    #[test]
    fn fraction_inverts_resolution() {
        let c = Coordinate::new(CoordKind::Pixel, 100.0);
        assert_eq!(c.fraction(Axis::Horizontal, 500, 300), 0.2);

        let right = Coordinate::new(CoordKind::PixelFromRight, 100.0);
        assert_eq!(right.fraction(Axis::Horizontal, 500, 300), 0.8);

        let bottom = Coordinate::new(CoordKind::PixelFromBottom, 75.0);
        assert_eq!(bottom.fraction(Axis::Vertical, 500, 300), 0.75);

        let pct = Coordinate::new(CoordKind::Percent, 0.4);
        assert_eq!(pct.fraction(Axis::Vertical, 500, 300), 0.4);
    }
}
