//! Point selection driven by horizontal drags and by the caller.
//!
//! Render backends feed drag samples here so every backend resolves a touch
//! position to the same point.

use tracing::{debug, trace};

use crate::data::{DataPoint, position_of};
use crate::geom::ScreenPoint;
use crate::view::VisibleRange;

/// Resolved selection for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    /// Nothing highlighted.
    #[default]
    Unselected,
    /// Highlighted point, as an index into the visible window.
    Selected(usize),
}

impl SelectionState {
    /// Window-local index of the highlighted point.
    pub fn index(self) -> Option<usize> {
        match self {
            Self::Unselected => None,
            Self::Selected(index) => Some(index),
        }
    }
}

/// Geometry of the last laid-out frame that drag samples are tested against.
#[derive(Debug, Clone, Copy)]
pub struct DragTarget<'a> {
    /// Draw points of the visible window, in order.
    pub draw_points: &'a [ScreenPoint],
    /// Width of the hit zone around each point.
    pub slot_width: f32,
    /// Window the draw points were computed for.
    pub window: Option<VisibleRange>,
}

/// Selected point reference plus its visibility.
///
/// The reference is a value, looked up by equality in the full data every
/// frame, so it survives data refreshes that keep the point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    point: Option<DataPoint>,
    suppressed: bool,
}

impl Selection {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// The selected point reference, whether or not it is shown.
    pub fn point(&self) -> Option<&DataPoint> {
        self.point.as_ref()
    }

    /// Check whether the highlight is hidden after an out-of-window drag.
    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }

    /// Set or replace the selection from outside the chart.
    pub fn set(&mut self, point: Option<DataPoint>) {
        self.point = point;
        self.suppressed = false;
    }

    /// Drop the selection.
    pub fn clear(&mut self) {
        self.set(None);
    }

    /// Resolve the reference into the visible window.
    pub fn state(&self, data: &[DataPoint], window: Option<VisibleRange>) -> SelectionState {
        if self.suppressed {
            return SelectionState::Unselected;
        }
        let (Some(point), Some(window)) = (self.point.as_ref(), window) else {
            return SelectionState::Unselected;
        };
        position_of(data, point)
            .and_then(|index| window.to_local(index))
            .map_or(SelectionState::Unselected, SelectionState::Selected)
    }

    /// Apply one drag sample at `touch_x`.
    ///
    /// Returns the newly selected point when the selection changed. A sample
    /// that hits no point leaves everything untouched.
    pub fn drag(
        &mut self,
        touch_x: f32,
        target: DragTarget<'_>,
        data: &[DataPoint],
    ) -> Option<DataPoint> {
        let local = hit_test_x(touch_x, target.slot_width, target.draw_points)?;
        trace!(touch_x, local, "drag sample hit");

        let full = target.window.and_then(|window| window.to_full(local));
        let Some(point) = full.and_then(|index| data.get(index)) else {
            if !self.suppressed {
                debug!(local, "drag resolved outside the visible window");
            }
            self.suppressed = true;
            return None;
        };

        self.suppressed = false;
        if self.point.as_ref() == Some(point) {
            return None;
        }
        debug!(x = point.x, y = point.y, "selection changed by drag");
        self.point = Some(point.clone());
        Some(point.clone())
    }
}

/// First point whose x lies strictly within `slot_width / 2` of `touch_x`.
pub fn hit_test_x(touch_x: f32, slot_width: f32, draw_points: &[ScreenPoint]) -> Option<usize> {
    let half = slot_width / 2.0;
    draw_points
        .iter()
        .position(|point| (point.x - touch_x).abs() < half)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> Vec<DataPoint> {
        [10.0, 20.0, 15.0, 30.0, 25.0]
            .iter()
            .enumerate()
            .map(|(i, y)| DataPoint::new(i as f64, *y, format!("{i}"), ""))
            .collect()
    }

    fn draw_points(count: usize) -> Vec<ScreenPoint> {
        (0..count)
            .map(|i| ScreenPoint::new(40.0 + 50.0 * i as f32 + 25.0, 100.0))
            .collect()
    }

    #[test]
    fn hit_at_point_and_miss_between() {
        let points = draw_points(3);
        assert_eq!(hit_test_x(115.0, 50.0, &points), Some(1));
        assert_eq!(hit_test_x(130.0, 50.0, &points), Some(1));
        assert_eq!(hit_test_x(140.0, 50.0, &points), None);
        assert_eq!(hit_test_x(0.0, 50.0, &points), None);
        assert_eq!(hit_test_x(115.0, 0.0, &points), None);
    }

    #[test]
    fn drag_selects_visible_point_once() {
        let data = data();
        let window = VisibleRange::new(2, 4);
        let points = draw_points(window.len());
        let target = DragTarget {
            draw_points: &points,
            slot_width: 50.0,
            window: Some(window),
        };
        let mut selection = Selection::new();

        let changed = selection.drag(115.0, target, &data);
        assert_eq!(changed, Some(data[3].clone()));
        assert_eq!(selection.state(&data, Some(window)), SelectionState::Selected(1));

        assert_eq!(selection.drag(115.0, target, &data), None);
        assert_eq!(selection.state(&data, Some(window)), SelectionState::Selected(1));
    }

    #[test]
    fn drag_between_points_keeps_previous() {
        let data = data();
        let window = VisibleRange::new(2, 4);
        let points = draw_points(window.len());
        let target = DragTarget {
            draw_points: &points,
            slot_width: 50.0,
            window: Some(window),
        };
        let mut selection = Selection::new();
        selection.drag(65.0, target, &data);
        assert_eq!(selection.drag(90.0, target, &data), None);
        assert_eq!(selection.point(), Some(&data[2]));
        assert_eq!(selection.state(&data, Some(window)), SelectionState::Selected(0));
    }

    #[test]
    fn stale_geometry_suppresses_without_clearing() {
        let data = data();
        let mut selection = Selection::new();
        selection.set(Some(data[4].clone()));

        let stale = draw_points(5);
        let target = DragTarget {
            draw_points: &stale,
            slot_width: 50.0,
            window: Some(VisibleRange::new(3, 4)),
        };
        assert_eq!(selection.drag(265.0, target, &data), None);
        assert!(selection.is_suppressed());
        assert_eq!(selection.point(), Some(&data[4]));
        assert_eq!(
            selection.state(&data, Some(VisibleRange::new(3, 4))),
            SelectionState::Unselected
        );

        assert_eq!(selection.drag(115.0, target, &data), None);
        assert!(!selection.is_suppressed());
        assert_eq!(
            selection.state(&data, Some(VisibleRange::new(3, 4))),
            SelectionState::Selected(1)
        );
    }

    #[test]
    fn external_point_resolves_through_full_data() {
        let data = data();
        let mut selection = Selection::new();
        selection.set(Some(DataPoint::new(1.0, 20.0, "1", "")));
        assert_eq!(
            selection.state(&data, Some(VisibleRange::new(0, 4))),
            SelectionState::Selected(1)
        );
        assert_eq!(
            selection.state(&data, Some(VisibleRange::new(2, 4))),
            SelectionState::Unselected
        );
        assert_eq!(selection.point(), Some(&data[1]));
        assert_eq!(selection.state(&data, None), SelectionState::Unselected);

        selection.clear();
        assert_eq!(selection.point(), None);
        assert_eq!(
            selection.state(&data, Some(VisibleRange::new(0, 4))),
            SelectionState::Unselected
        );
    }
}
