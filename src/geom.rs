//! Geometric primitives used by the chart pipeline.
//!
//! Everything here lives in pixel space. Data-space points are
//! [`DataPoint`](crate::data::DataPoint)s and are never stored in these types.

/// A point in screen space (pixel coordinates).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    /// X value in screen pixels.
    pub x: f32,
    /// Y value in screen pixels.
    pub y: f32,
}

impl ScreenPoint {
    /// Create a new screen point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Offset the point by another point.
    pub fn offset(self, by: Self) -> Self {
        Self::new(self.x + by.x, self.y + by.y)
    }
}

/// A rectangle in screen space (pixel coordinates).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenRect {
    /// Top-left corner.
    pub min: ScreenPoint,
    /// Bottom-right corner.
    pub max: ScreenPoint,
}

impl ScreenRect {
    /// Create a new screen rectangle from corners.
    pub const fn new(min: ScreenPoint, max: ScreenPoint) -> Self {
        Self { min, max }
    }

    /// Create a rectangle from its four edges.
    pub const fn from_edges(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self::new(ScreenPoint::new(left, top), ScreenPoint::new(right, bottom))
    }

    /// Left edge.
    pub fn left(&self) -> f32 {
        self.min.x
    }

    /// Top edge.
    pub fn top(&self) -> f32 {
        self.min.y
    }

    /// Right edge.
    pub fn right(&self) -> f32 {
        self.max.x
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    /// Rectangle width in pixels.
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Rectangle height in pixels.
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_edges_and_size() {
        let rect = ScreenRect::from_edges(10.0, 20.0, 110.0, 70.0);
        assert_eq!(rect.left(), 10.0);
        assert_eq!(rect.bottom(), 70.0);
        assert_eq!(rect.width(), 100.0);
        assert_eq!(rect.height(), 50.0);
    }

    #[test]
    fn point_offset() {
        let moved = ScreenPoint::new(3.0, 4.0).offset(ScreenPoint::new(100.0, 200.0));
        assert_eq!(moved, ScreenPoint::new(103.0, 204.0));
    }
}
