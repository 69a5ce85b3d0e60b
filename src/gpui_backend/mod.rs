//! GPUI integration for the price chart.
//!
//! This module provides a GPUI view that renders a
//! [`LineChart`](crate::chart::LineChart) and turns horizontal drags into
//! point selection.

mod config;
mod paint;
mod state;
mod text;
mod view;

pub use config::ChartViewConfig;
pub use view::{ChartHandle, GpuiLineChartView, LabelWidthCallback, SelectionCallback};
