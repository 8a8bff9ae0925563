//! Terminal-cell geometry.
//!
//! The engine stays free of TUI dependencies, so it carries its own point and
//! rectangle types. Coordinates are terminal cells, origin top-left.

/// A 2D screen coordinate in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: u16,
    pub y: u16,
}

impl Point {
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// A rectangular screen region in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounds {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Bounds {
    #[must_use]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub const fn right(self) -> u16 {
        self.x.saturating_add(self.width)
    }

    #[must_use]
    pub const fn bottom(self) -> u16 {
        self.y.saturating_add(self.height)
    }

    /// Edge-inclusive containment: a point on the right or bottom edge still
    /// counts as inside. Zones are adjacent, so drops on the seam resolve to
    /// whichever zone is checked first.
    #[must_use]
    pub const fn contains(self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    /// Shrink the region by `dx` cells on each side and `dy` on top/bottom,
    /// collapsing to an empty region at the center when too small.
    #[must_use]
    pub fn inset(self, dx: u16, dy: u16) -> Self {
        let width = self.width.saturating_sub(dx.saturating_mul(2));
        let height = self.height.saturating_sub(dy.saturating_mul(2));
        Self {
            x: self.x.saturating_add(dx.min(self.width / 2)),
            y: self.y.saturating_add(dy.min(self.height / 2)),
            width,
            height,
        }
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[cfg(test)]
mod tests {
    use super::{Bounds, Point};

    #[test]
    fn contains_is_edge_inclusive() {
        let bounds = Bounds::new(10, 5, 20, 10);
        assert!(bounds.contains(Point::new(10, 5)));
        assert!(bounds.contains(Point::new(30, 15)));
        assert!(bounds.contains(Point::new(15, 8)));
        assert!(!bounds.contains(Point::new(9, 5)));
        assert!(!bounds.contains(Point::new(31, 8)));
    }

    #[test]
    fn inset_shrinks_without_underflow() {
        let bounds = Bounds::new(0, 0, 10, 4);
        let inner = bounds.inset(2, 1);
        assert_eq!(inner, Bounds::new(2, 1, 6, 2));

        let tiny = Bounds::new(0, 0, 3, 1).inset(4, 4);
        assert!(tiny.is_empty());
    }
}
