//! Geometry in annotation coordinates.
//!
//! Annotation coordinates follow the mathematical convention: `x` grows to
//! the right and `y` grows upwards. Conversion to the y-down SVG coordinate
//! system happens only at export time through [`Point::to_svg`].

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn x(self) -> f64 {
        self.x
    }

    pub fn y(self) -> f64 {
        self.y
    }

    /// Returns the midpoint between `self` and `other`.
    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Rotates the point counter-clockwise about the coordinate origin.
    ///
    /// # Examples
    ///
    /// ```
    /// use annoview_core::geometry::Point;
    ///
    /// let rotated = Point::new(1.0, 0.0).rotate_about_origin(90.0);
    /// assert!(rotated.x().abs() < 1e-12);
    /// assert!((rotated.y() - 1.0).abs() < 1e-12);
    /// ```
    pub fn rotate_about_origin(self, degrees: f64) -> Point {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Point::new(cos * self.x - sin * self.y, sin * self.x + cos * self.y)
    }

    /// Converts to SVG user space, where the y axis points down.
    pub fn to_svg(self) -> (f64, f64) {
        (self.x, -self.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// A bounding box given by two corner points, as written in an annotation.
///
/// The corners are kept in source order, so `width` and `height` may be
/// negative when the extent is written "backwards".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    first: Point,
    second: Point,
}

impl Extent {
    pub fn new(first: Point, second: Point) -> Self {
        Self { first, second }
    }

    pub fn first(&self) -> Point {
        self.first
    }

    pub fn second(&self) -> Point {
        self.second
    }

    pub fn width(&self) -> f64 {
        self.second.x - self.first.x
    }

    pub fn height(&self) -> f64 {
        self.second.y - self.first.y
    }

    pub fn center(&self) -> Point {
        self.first.midpoint(self.second)
    }

    /// Returns the lower-left corner regardless of corner order.
    pub fn min(&self) -> Point {
        Point::new(
            self.first.x.min(self.second.x),
            self.first.y.min(self.second.y),
        )
    }

    /// Returns the upper-right corner regardless of corner order.
    pub fn max(&self) -> Point {
        Point::new(
            self.first.x.max(self.second.x),
            self.first.y.max(self.second.y),
        )
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_extent_dimensions() {
        let extent = Extent::new(Point::new(-50.0, -10.0), Point::new(50.0, 10.0));

        assert_eq!(extent.width(), 100.0);
        assert_eq!(extent.height(), 20.0);
        assert_eq!(extent.center(), Point::new(0.0, 0.0));
    }

    #[test]
    fn test_reversed_extent_normalizes_corners() {
        let extent = Extent::new(Point::new(30.0, 20.0), Point::new(-10.0, -5.0));

        assert_eq!(extent.width(), -40.0);
        assert_eq!(extent.min(), Point::new(-10.0, -5.0));
        assert_eq!(extent.max(), Point::new(30.0, 20.0));
    }

    #[test]
    fn test_rotation_pivots_about_origin_not_center() {
        let rotated = Point::new(10.0, 10.0).rotate_about_origin(180.0);

        assert_approx_eq!(f64, rotated.x(), -10.0, epsilon = 1e-9);
        assert_approx_eq!(f64, rotated.y(), -10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_to_svg_flips_y() {
        assert_eq!(Point::new(3.0, 4.0).to_svg(), (3.0, -4.0));
    }

    proptest! {
        #[test]
        fn rotation_preserves_distance_from_origin(
            x in -500.0f64..500.0,
            y in -500.0f64..500.0,
            degrees in -720.0f64..720.0,
        ) {
            let point = Point::new(x, y);
            let rotated = point.rotate_about_origin(degrees);

            let before = x.hypot(y);
            let after = rotated.x().hypot(rotated.y());
            prop_assert!((before - after).abs() < 1e-9);
        }
    }
}
