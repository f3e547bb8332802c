//! Points, sizes, rectangles and insets in diagram space.
//!
//! Diagram space is SVG space: the origin is the top-left corner, x grows to
//! the right and y grows downwards. Angles come from `atan2(dy, dx)` and are
//! therefore clockwise on screen.

/// A position in diagram space.
///
/// ```
/// # use classgram_core::geometry::Point;
/// let a = Point::new(10.0, 20.0);
/// let b = Point::new(30.0, 20.0);
///
/// assert_eq!(a.midpoint(b), Point::new(20.0, 20.0));
/// assert_eq!(b.sub_point(a).hypot(), 20.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn x(self) -> f32 {
        self.x
    }

    pub fn y(self) -> f32 {
        self.y
    }

    pub fn add_point(self, other: Point) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }

    pub fn sub_point(self, other: Point) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }

    pub fn midpoint(self, other: Point) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Length of the vector from the origin to this point.
    pub fn hypot(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Direction from `self` toward `other`, in radians.
    ///
    /// Coincident points have no direction; they yield `0.0` so callers never
    /// see NaN.
    ///
    /// ```
    /// # use classgram_core::geometry::Point;
    /// let p = Point::new(3.0, 3.0);
    /// assert_eq!(p.angle_to(Point::new(9.0, 3.0)), 0.0);
    /// assert_eq!(p.angle_to(p), 0.0);
    /// ```
    pub fn angle_to(self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        if dx == 0.0 && dy == 0.0 {
            0.0
        } else {
            dy.atan2(dx)
        }
    }

    /// The point `distance` away from `self` in direction `angle`.
    pub fn polar_offset(self, angle: f32, distance: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(self.x + distance * cos, self.y + distance * sin)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Rectangle of `size` centered on this point.
    pub fn to_bounds(self, size: Size) -> Bounds {
        let half = Point::new(size.width / 2.0, size.height / 2.0);
        Bounds::new_from_top_left(self.sub_point(half), size)
    }
}

/// Width and height of a box or text block.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn width(self) -> f32 {
        self.width
    }

    pub fn height(self) -> f32 {
        self.height
    }

    /// Component-wise maximum.
    pub fn max(self, other: Size) -> Self {
        Self::new(self.width.max(other.width), self.height.max(other.height))
    }

    /// Grows the size by the horizontal and vertical inset sums.
    pub fn add_padding(self, insets: Insets) -> Self {
        Self::new(
            self.width + insets.horizontal_sum(),
            self.height + insets.vertical_sum(),
        )
    }

    pub fn scale(self, factor: f32) -> Self {
        Self::new(self.width * factor, self.height * factor)
    }

    /// True when there is no area to draw in.
    pub fn is_degenerate(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// An axis-aligned rectangle stored by its corners.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    pub fn min_x(self) -> f32 {
        self.min_x
    }

    pub fn min_y(self) -> f32 {
        self.min_y
    }

    pub fn max_x(self) -> f32 {
        self.max_x
    }

    pub fn max_y(self) -> f32 {
        self.max_y
    }

    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Smallest rectangle covering both `self` and `other`.
    ///
    /// ```
    /// # use classgram_core::geometry::{Bounds, Point, Size};
    /// let a = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(50.0, 20.0));
    /// let b = Bounds::new_from_top_left(Point::new(40.0, 30.0), Size::new(60.0, 10.0));
    ///
    /// let both = a.merge(&b);
    /// assert_eq!((both.width(), both.height()), (100.0, 40.0));
    /// ```
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}

/// Space reserved on each side of a box, clockwise from the top.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
}

impl Insets {
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn top(self) -> f32 {
        self.top
    }

    pub fn right(self) -> f32 {
        self.right
    }

    pub fn bottom(self) -> f32 {
        self.bottom
    }

    pub fn left(self) -> f32 {
        self.left
    }

    pub fn horizontal_sum(self) -> f32 {
        self.left + self.right
    }

    pub fn vertical_sum(self) -> f32 {
        self.top + self.bottom
    }
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-1000.0f32..1000.0, -1000.0f32..1000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    fn bounds_strategy() -> impl Strategy<Value = Bounds> {
        (point_strategy(), 1.0f32..500.0, 1.0f32..500.0)
            .prop_map(|(p, w, h)| Bounds::new_from_top_left(p, Size::new(w, h)))
    }

    // ===================
    // Property Test Functions
    // ===================

    fn check_polar_offset_distance(
        from: Point,
        toward: Point,
        distance: f32,
    ) -> Result<(), TestCaseError> {
        let angle = from.angle_to(toward);
        let moved = from.polar_offset(angle, distance);

        prop_assert!(angle.is_finite());
        prop_assert!(approx_eq!(
            f32,
            moved.sub_point(from).hypot(),
            distance,
            epsilon = 0.01
        ));
        Ok(())
    }

    fn check_merge_covers_both(a: Bounds, b: Bounds) -> Result<(), TestCaseError> {
        let merged = a.merge(&b);
        for part in [a, b] {
            prop_assert!(merged.min_x() <= part.min_x() && merged.max_x() >= part.max_x());
            prop_assert!(merged.min_y() <= part.min_y() && merged.max_y() >= part.max_y());
        }
        Ok(())
    }

    // ===================
    // Property Tests
    // ===================

    proptest! {
        #[test]
        fn polar_offset_distance(
            from in point_strategy(),
            toward in point_strategy(),
            distance in 0.0f32..100.0,
        ) {
            check_polar_offset_distance(from, toward, distance)?;
        }

        #[test]
        fn merge_covers_both(a in bounds_strategy(), b in bounds_strategy()) {
            check_merge_covers_both(a, b)?;
        }
    }
}
