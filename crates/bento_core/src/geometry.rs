//! Points and rectangles in host coordinates.

/// A point in host coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    /// Horizontal position.
    pub x: f32,
    /// Vertical position.
    pub y: f32,
}

impl Point {
    /// The origin.
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A rectangle in host coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    /// X position (left edge).
    pub x: f32,
    /// Y position (top edge).
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// A zero-sized rect at the origin.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Returns the right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Returns the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Returns the center point.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Returns the larger of width and height.
    #[must_use]
    pub fn max_extent(&self) -> f32 {
        self.width.max(self.height)
    }

    /// Returns true if the point is inside the rectangle (right/bottom edges excluded).
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Returns true if the point is inside the rectangle or on any edge.
    #[must_use]
    pub fn contains_inclusive(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.right()
            && point.y >= self.y
            && point.y <= self.bottom()
    }

    /// Offset of a point from the top-left corner.
    #[must_use]
    pub fn local(&self, point: Point) -> Point {
        Point::new(point.x - self.x, point.y - self.y)
    }

    /// Position of a point relative to this rectangle, each axis scaled to 0-100.
    ///
    /// Points outside the rectangle map outside 0-100. A degenerate axis maps to 50.
    #[must_use]
    pub fn relative_percent(&self, point: Point) -> Point {
        let local = self.local(point);
        let x = if self.width > 0.0 { local.x / self.width * 100.0 } else { 50.0 };
        let y = if self.height > 0.0 { local.y / self.height * 100.0 } else { 50.0 };
        Point::new(x, y)
    }

    /// Smallest rectangle covering both.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Self::new(x, y, right - x, bottom - y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);

        assert!(rect.contains(Point::new(50.0, 30.0)));
        assert!(!rect.contains(Point::new(5.0, 30.0)));
        assert!(!rect.contains(Point::new(110.0, 30.0)));
        assert!(rect.contains_inclusive(Point::new(110.0, 70.0)));
        assert!(!rect.contains_inclusive(Point::new(110.1, 70.0)));
    }

    #[test]
    fn test_relative_percent() {
        let rect = Rect::new(100.0, 100.0, 200.0, 50.0);
        let pct = rect.relative_percent(Point::new(150.0, 125.0));

        assert!((pct.x - 25.0).abs() < 1e-4);
        assert!((pct.y - 50.0).abs() < 1e-4);

        let degenerate = Rect::new(0.0, 0.0, 0.0, 10.0);
        assert_eq!(degenerate.relative_percent(Point::ORIGIN).x, 50.0);
    }

    #[test]
    fn test_union() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(20.0, 5.0, 10.0, 10.0);
        assert_eq!(a.union(&b), Rect::new(0.0, 0.0, 30.0, 15.0));
    }
}
