//! Integer grid points.

use std::fmt;

/// A cell coordinate `(x, y)` on a 2D grid.
///
/// Screen-style axes: `x` grows to the right, `y` grows downward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl Point {
    /// Create a point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The point displaced by `(dx, dy)`, saturating at the `i32` range.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    /// Squared Euclidean distance, widened to `i64`.
    ///
    /// Saturates at `i64::MAX` for points at opposite corners of the `i32`
    /// range.
    pub fn distance_squared(self, other: Point) -> i64 {
        let dx = i64::from(self.x) - i64::from(other.x);
        let dy = i64::from(self.y) - i64::from(other.y);
        dx.saturating_mul(dx).saturating_add(dy.saturating_mul(dy))
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl From<Point> for (i32, i32) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn distance_squared_basic() {
        assert_eq!(Point::new(0, 0).distance_squared(Point::new(3, 4)), 25);
        assert_eq!(Point::new(2, 2).distance_squared(Point::new(2, 2)), 0);
    }

    #[test]
    fn tuple_conversions() {
        let p: Point = (3, -1).into();
        assert_eq!(p, Point::new(3, -1));
        let t: (i32, i32) = p.into();
        assert_eq!(t, (3, -1));
        assert_eq!(p.to_string(), "(3, -1)");
    }

    proptest! {
        #[test]
        fn distance_squared_symmetric(
            ax in -1000i32..1000, ay in -1000i32..1000,
            bx in -1000i32..1000, by in -1000i32..1000,
        ) {
            let a = Point::new(ax, ay);
            let b = Point::new(bx, by);
            prop_assert_eq!(a.distance_squared(b), b.distance_squared(a));
            prop_assert!(a.distance_squared(b) >= 0);
        }

        #[test]
        fn extreme_coordinates_do_not_overflow(
            ax in any::<i32>(), ay in any::<i32>(),
            bx in any::<i32>(), by in any::<i32>(),
        ) {
            let d = Point::new(ax, ay).distance_squared(Point::new(bx, by));
            prop_assert!(d >= 0);
        }
    }
}
