//! Smooth cubic paths through draw points.

use crate::geom::ScreenPoint;

/// One cubic Bézier segment in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSegment {
    /// Segment start (a draw point).
    pub from: ScreenPoint,
    /// First control point.
    pub ctrl1: ScreenPoint,
    /// Second control point.
    pub ctrl2: ScreenPoint,
    /// Segment end (the next draw point).
    pub to: ScreenPoint,
}

impl CubicSegment {
    /// Segment between two draw points with horizontal tangents at both ends.
    ///
    /// Both control points sit at the mid x; each keeps its own endpoint's y.
    pub fn between(p0: ScreenPoint, p1: ScreenPoint) -> Self {
        let mid_x = (p0.x + p1.x) / 2.0;
        Self {
            from: p0,
            ctrl1: ScreenPoint::new(mid_x, p0.y),
            ctrl2: ScreenPoint::new(mid_x, p1.y),
            to: p1,
        }
    }

    /// Evaluate the segment at `t` in `0.0..=1.0`.
    pub fn eval(&self, t: f32) -> ScreenPoint {
        let mt = 1.0 - t;
        let w0 = mt * mt * mt;
        let w1 = 3.0 * mt * mt * t;
        let w2 = 3.0 * mt * t * t;
        let w3 = t * t * t;
        ScreenPoint::new(
            w0 * self.from.x + w1 * self.ctrl1.x + w2 * self.ctrl2.x + w3 * self.to.x,
            w0 * self.from.y + w1 * self.ctrl1.y + w2 * self.ctrl2.y + w3 * self.to.y,
        )
    }
}

/// A path made of consecutive cubic segments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurvePath {
    segments: Vec<CubicSegment>,
}

impl CurvePath {
    /// Build a path through every point, in order.
    ///
    /// Fewer than two points produce an empty path.
    pub fn through(points: &[ScreenPoint]) -> Self {
        Self {
            segments: points
                .windows(2)
                .map(|pair| CubicSegment::between(pair[0], pair[1]))
                .collect(),
        }
    }

    /// Start point of the path.
    pub fn start(&self) -> Option<ScreenPoint> {
        self.segments.first().map(|segment| segment.from)
    }

    /// All segments, in order.
    pub fn segments(&self) -> &[CubicSegment] {
        &self.segments
    }

    /// Check whether there is nothing to stroke.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
