//! Caller-supplied chart styling.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::render::Color;

/// Visual configuration for a chart.
///
/// All lengths are logical pixels. The chart does not validate or default
/// any of these values; callers decide what looks right for their screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartStyle {
    /// Color of the price curve.
    pub line_color: Color,
    /// Color of labels and helper lines that are not selected.
    pub unselected_color: Color,
    /// Color of the selected label, helper line, markers and callout.
    pub selected_color: Color,
    /// Stroke width of helper lines.
    pub helper_line_thickness: f32,
    /// Stroke width of the price curve.
    pub axis_line_thickness: f32,
    /// Label font size.
    pub label_font_size: f32,
    /// Minimum vertical gap between y-axis labels.
    pub min_y_label_spacing: f32,
    /// Padding above and below the labels.
    pub vertical_padding: f32,
    /// Padding left and right of the y-axis labels.
    pub horizontal_padding: f32,
    /// Gap between adjacent x-axis labels.
    pub x_axis_label_spacing: f32,
}

/// Failure to load a [`ChartStyle`].
#[derive(Debug, Error)]
pub enum StyleError {
    /// The style document could not be parsed.
    #[error("invalid chart style: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ChartStyle {
    /// Parse a style from JSON. Colors are `#RRGGBB` or `#RRGGBBAA` strings.
    pub fn from_json(text: &str) -> Result<Self, StyleError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Serialize the style to pretty JSON.
    pub fn to_json(&self) -> Result<String, StyleError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
