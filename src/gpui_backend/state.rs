use crate::frame::ChartFrame;
use crate::geom::ScreenPoint;

/// Per-view interaction state, refreshed every prepaint.
#[derive(Debug, Clone, Default)]
pub(crate) struct ChartUiState {
    /// Last frame laid out, used to resolve drag samples.
    pub(crate) frame: ChartFrame,
    /// Window position of the canvas origin.
    pub(crate) origin: ScreenPoint,
    pub(crate) dragging: bool,
}

impl ChartUiState {
    /// Canvas-local x of a window position.
    pub(crate) fn local_x(&self, pos: ScreenPoint) -> f32 {
        pos.x - self.origin.x
    }
}
