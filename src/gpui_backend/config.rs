use crate::render::Color;

/// Configuration for the GPUI chart view.
#[derive(Debug, Clone)]
pub struct ChartViewConfig {
    /// Font family used for every label.
    pub font_family: String,
    /// Background fill behind the chart. `None` leaves the parent visible.
    pub background: Option<Color>,
}

impl Default for ChartViewConfig {
    fn default() -> Self {
        Self {
            font_family: ".SystemUIFont".to_string(),
            background: Some(Color::WHITE),
        }
    }
}
