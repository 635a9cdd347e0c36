//! Geometric primitives shared by the layout engine and its callers.
//!
//! Layout positions are expressed in the coordinate space of the parent
//! border box, with the origin at the top-left corner and the y axis
//! pointing down. All values are logical points; they only become device
//! pixels after pixel-grid rounding.

use std::fmt;

/// A 2D point.
///
/// # Examples
///
/// ```
/// use fastflex::geometry::Point;
///
/// let p = Point::new(10.0, 20.0);
/// assert_eq!(p.x, 10.0);
/// assert_eq!(p.y, 20.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
  /// X coordinate
  pub x: f32,
  /// Y coordinate
  pub y: f32,
}

impl Point {
  /// Origin point (0, 0)
  pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

  /// Creates a new point
  pub const fn new(x: f32, y: f32) -> Self {
    Self { x, y }
  }

  /// Returns this point translated by the given deltas
  ///
  /// # Examples
  ///
  /// ```
  /// use fastflex::geometry::Point;
  ///
  /// let p = Point::new(10.0, 20.0).translate(5.0, -5.0);
  /// assert_eq!(p, Point::new(15.0, 15.0));
  /// ```
  pub fn translate(self, dx: f32, dy: f32) -> Self {
    Self {
      x: self.x + dx,
      y: self.y + dy,
    }
  }
}

impl fmt::Display for Point {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "({}, {})", self.x, self.y)
  }
}

/// A 2D size.
///
/// This is the type a measure callback returns: the content size of a leaf
/// node under the constraints it was given.
///
/// # Examples
///
/// ```
/// use fastflex::geometry::Size;
///
/// let size = Size::new(100.0, 50.0);
/// assert_eq!(size.width, 100.0);
/// assert!(!size.is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
  /// Width in points
  pub width: f32,
  /// Height in points
  pub height: f32,
}

impl Size {
  /// Zero size
  pub const ZERO: Self = Self {
    width: 0.0,
    height: 0.0,
  };

  /// Creates a new size
  pub const fn new(width: f32, height: f32) -> Self {
    Self { width, height }
  }

  /// Returns true if either dimension is zero or negative
  pub fn is_empty(self) -> bool {
    self.width <= 0.0 || self.height <= 0.0
  }
}

impl fmt::Display for Size {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}x{}", self.width, self.height)
  }
}

/// A rectangle: origin plus size.
///
/// Layout results read back from a node form a rect in the parent's
/// coordinate space.
///
/// # Examples
///
/// ```
/// use fastflex::geometry::Rect;
///
/// let r = Rect::new(10.0, 20.0, 100.0, 50.0);
/// assert_eq!(r.right(), 110.0);
/// assert_eq!(r.bottom(), 70.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
  /// X coordinate of the left edge
  pub x: f32,
  /// Y coordinate of the top edge
  pub y: f32,
  /// Width in points
  pub width: f32,
  /// Height in points
  pub height: f32,
}

impl Rect {
  /// Empty rect at the origin
  pub const ZERO: Self = Self {
    x: 0.0,
    y: 0.0,
    width: 0.0,
    height: 0.0,
  };

  /// Creates a new rect
  pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
    Self {
      x,
      y,
      width,
      height,
    }
  }

  /// X coordinate of the right edge
  pub fn right(self) -> f32 {
    self.x + self.width
  }

  /// Y coordinate of the bottom edge
  pub fn bottom(self) -> f32 {
    self.y + self.height
  }

  /// Top-left corner
  pub fn origin(self) -> Point {
    Point::new(self.x, self.y)
  }

  /// Size of the rect
  pub fn size(self) -> Size {
    Size::new(self.width, self.height)
  }

  /// Returns true if either dimension is zero or negative
  pub fn is_empty(self) -> bool {
    self.width <= 0.0 || self.height <= 0.0
  }

  /// Returns true if the point lies inside the rect
  ///
  /// # Examples
  ///
  /// ```
  /// use fastflex::geometry::{Point, Rect};
  ///
  /// let r = Rect::new(0.0, 0.0, 100.0, 100.0);
  /// assert!(r.contains(Point::new(50.0, 50.0)));
  /// assert!(!r.contains(Point::new(150.0, 50.0)));
  /// ```
  pub fn contains(self, p: Point) -> bool {
    p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
  }
}

impl fmt::Display for Rect {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "({}, {}) {}x{}",
      self.x, self.y, self.width, self.height
    )
  }
}

/// Edge offsets representing spacing on all four physical sides.
///
/// Used to report resolved margin, border, and padding after layout.
///
/// # Examples
///
/// ```
/// use fastflex::geometry::EdgeOffsets;
///
/// let padding = EdgeOffsets::all(10.0);
/// assert_eq!(padding.horizontal(), 20.0);
/// assert_eq!(padding.vertical(), 20.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EdgeOffsets {
  /// Top edge offset
  pub top: f32,
  /// Right edge offset
  pub right: f32,
  /// Bottom edge offset
  pub bottom: f32,
  /// Left edge offset
  pub left: f32,
}

impl EdgeOffsets {
  /// Zero offsets on all sides
  pub const ZERO: Self = Self {
    top: 0.0,
    right: 0.0,
    bottom: 0.0,
    left: 0.0,
  };

  /// Creates edge offsets with individual values for each side
  pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
    Self {
      top,
      right,
      bottom,
      left,
    }
  }

  /// Creates edge offsets with the same value on all sides
  pub const fn all(value: f32) -> Self {
    Self {
      top: value,
      right: value,
      bottom: value,
      left: value,
    }
  }

  /// Returns the sum of left and right offsets
  pub fn horizontal(self) -> f32 {
    self.left + self.right
  }

  /// Returns the sum of top and bottom offsets
  pub fn vertical(self) -> f32 {
    self.top + self.bottom
  }
}

impl fmt::Display for EdgeOffsets {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "[t:{}, r:{}, b:{}, l:{}]",
      self.top, self.right, self.bottom, self.left
    )
  }
}
