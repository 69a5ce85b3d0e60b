//! Coordinate transforms between data and screen space.

use crate::axis::ChartLayout;
use crate::data::DataPoint;
use crate::geom::{ScreenPoint, ScreenRect};

/// Transform from (visible index, value) pairs into screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    viewport: ScreenRect,
    slot_width: f32,
    min_y: f64,
    max_y: f64,
}

impl Transform {
    /// Create a transform for a viewport, per-point slot width and value range.
    pub fn new(viewport: ScreenRect, slot_width: f32, min_y: f64, max_y: f64) -> Self {
        Self {
            viewport,
            slot_width,
            min_y,
            max_y,
        }
    }

    /// Create the transform matching a computed layout.
    pub fn from_layout(layout: &ChartLayout) -> Self {
        Self::new(
            layout.viewport,
            layout.x_label_width,
            layout.min_y,
            layout.max_y,
        )
    }

    /// Access the viewport.
    pub fn viewport(&self) -> ScreenRect {
        self.viewport
    }

    /// Horizontal distance between consecutive points.
    pub fn slot_width(&self) -> f32 {
        self.slot_width
    }

    /// Position of `value` inside the value range, 0 for a flat range.
    pub fn ratio(&self, value: f64) -> f64 {
        let span = self.max_y - self.min_y;
        if span == 0.0 || !span.is_finite() {
            return 0.0;
        }
        (value - self.min_y) / span
    }

    /// Screen x of the point at `local_index` in the visible window.
    pub fn index_to_x(&self, local_index: usize) -> f32 {
        self.viewport.left() + local_index as f32 * self.slot_width + self.slot_width / 2.0
    }

    /// Map a visible point into screen space.
    pub fn data_to_screen(&self, local_index: usize, value: f64) -> ScreenPoint {
        let y = self.viewport.bottom() as f64 - self.ratio(value) * self.viewport.height() as f64;
        ScreenPoint::new(self.index_to_x(local_index), y as f32)
    }

    /// Map a screen y back into a value. `None` for a flat range.
    pub fn screen_to_value(&self, y: f32) -> Option<f64> {
        let span = self.max_y - self.min_y;
        let height = self.viewport.height() as f64;
        if span == 0.0 || height == 0.0 {
            return None;
        }
        let ratio = (self.viewport.bottom() as f64 - y as f64) / height;
        Some(self.min_y + ratio * span)
    }

    /// Transform every visible point, preserving order.
    pub fn draw_points(&self, visible: &[DataPoint]) -> Vec<ScreenPoint> {
        visible
            .iter()
            .enumerate()
            .map(|(i, point)| self.data_to_screen(i, point.y))
            .collect()
    }
}
