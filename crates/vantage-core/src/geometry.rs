//! Geometric primitives for layout and chart rendering.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate produced by the layout engines
//! - [`Size`] - Width and height dimensions of a render canvas
//! - [`Bounds`] - An axis-aligned bounding box over a set of points
//!
//! # Coordinate System
//!
//! Layout coordinates have no absolute meaning: only the relative placement
//! of nodes matters, and renderers are free to translate and rescale them.
//! Renderers use the SVG convention, with the origin at the top-left corner
//! and Y increasing downward.

/// A 2D point with `f32` coordinates.
///
/// # Examples
///
/// ```
/// # use vantage_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 15.0);
/// assert_eq!(sum.y(), 25.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Creates a point at `radius` from the origin in the direction `angle` (radians).
    pub fn from_polar(radius: f32, angle: f32) -> Self {
        Self {
            x: radius * angle.cos(),
            y: radius * angle.sin(),
        }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Checks that neither coordinate is NaN or infinite
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Euclidean length of the point seen as a vector from the origin
    pub fn hypot(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Multiplies both coordinates by the given factor.
    ///
    /// # Examples
    ///
    /// ```
    /// # use vantage_core::geometry::Point;
    /// let point = Point::new(10.0, 20.0);
    ///
    /// let halved = point.scale(0.5);
    /// assert_eq!(halved.x(), 5.0);
    /// assert_eq!(halved.y(), 10.0);
    /// ```
    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }
}

/// Width and height of a rendering surface
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }
}

/// Represents a rectangular bounding box with minimum and maximum coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates bounds from explicit corner coordinates
    pub fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Creates the zero-area bounds located at a single point
    pub fn from_point(point: Point) -> Self {
        Self::new(point.x, point.y, point.x, point.y)
    }

    /// Smallest bounds containing every point, or `None` for an empty iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// # use vantage_core::geometry::{Bounds, Point};
    /// let bounds = Bounds::from_points([
    ///     Point::new(-1.0, 2.0),
    ///     Point::new(3.0, -4.0),
    /// ])
    /// .unwrap();
    /// assert_eq!(bounds.width(), 4.0);
    /// assert_eq!(bounds.height(), 6.0);
    /// assert!(Bounds::from_points(Vec::<Point>::new()).is_none());
    /// ```
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        points
            .into_iter()
            .map(Self::from_point)
            .reduce(|acc, bounds| acc.merge(&bounds))
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns the center point of the bounds
    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Merges two bounds into the smallest bounds containing both.
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Checks whether the point lies inside or on the edge of the bounds
    pub fn contains(self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }
}
