//! gpui_pricechart is an interactive price line chart built for GPUI.
//! It shows the most recent slice of a price history that fits the width,
//! draws a smooth curve through it, and lets the user pick a point by dragging.

#![forbid(unsafe_code)]

pub mod axis;
pub mod chart;
pub mod curve;
pub mod data;
pub mod frame;
pub mod geom;
pub mod gpui_backend;
pub mod interaction;
pub mod render;
pub mod style;
pub mod transform;
pub mod view;

pub use axis::{ChartLayout, MonospaceMeasurer, TextMeasurer, TextMetrics, ValueLabel};
pub use chart::{ChartEvent, LineChart, LineChartBuilder};
pub use curve::{CubicSegment, CurvePath};
pub use data::{DataPoint, PriceSample, from_price_history};
pub use frame::ChartFrame;
pub use geom::{ScreenPoint, ScreenRect};
pub use gpui_backend::{ChartHandle, ChartViewConfig, GpuiLineChartView};
pub use interaction::{Selection, SelectionState};
pub use render::{Color, ColorError, RenderCommand, RenderList};
pub use style::{ChartStyle, StyleError};
pub use transform::Transform;
pub use view::{VisibleRange, WindowMode};
