//! Axis labels, text measurement, and viewport layout.

use crate::data::DataPoint;
use crate::geom::{ScreenPoint, ScreenRect};
use crate::style::ChartStyle;

/// Gap between the top label line and the viewport top.
pub const VIEWPORT_TOP_OFFSET: f32 = 10.0;

/// Measured size of a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextMetrics {
    /// Width of the widest line in pixels.
    pub width: f32,
    /// Total height in pixels.
    pub height: f32,
    /// Number of lines.
    pub line_count: usize,
}

/// Text measurement capability supplied by the render backend.
pub trait TextMeasurer {
    /// Measure `text` rendered at font `size`. `\n` starts a new line.
    fn measure(&self, text: &str, size: f32) -> TextMetrics;
}

/// Deterministic measurer that treats every glyph as the same width.
///
/// Useful for headless layout and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasurer {
    /// Glyph advance as a fraction of the font size.
    pub advance: f32,
    /// Line height as a fraction of the font size.
    pub line_height: f32,
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self {
            advance: 0.6,
            line_height: 1.2,
        }
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure(&self, text: &str, size: f32) -> TextMetrics {
        let mut widest = 0;
        let mut line_count = 0;
        for line in text.split('\n') {
            widest = widest.max(line.chars().count());
            line_count += 1;
        }
        TextMetrics {
            width: widest as f32 * size * self.advance,
            height: line_count as f32 * size * self.line_height,
            line_count,
        }
    }
}

/// A numeric value with a unit suffix, used for tick labels and callouts.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueLabel {
    /// Value to display.
    pub value: f64,
    /// Unit appended after the number.
    pub unit: String,
}

impl ValueLabel {
    /// Create a new value label.
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
        }
    }

    /// Display string with thousands separators and magnitude-based precision.
    ///
    /// Values above 1000 get no decimals, values in `2..=999` get up to two,
    /// everything else up to three. Trailing zeros are dropped.
    pub fn formatted(&self) -> String {
        let digits = if self.value > 1000.0 {
            0
        } else if (2.0..=999.0).contains(&self.value) {
            2
        } else {
            3
        };
        format!("{}{}", group_thousands(self.value, digits), self.unit)
    }
}

impl std::fmt::Display for ValueLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.formatted())
    }
}

fn group_thousands(value: f64, max_fraction_digits: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let fixed = format!("{:.*}", max_fraction_digits, value.abs());
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut out = String::with_capacity(fixed.len() + integer.len() / 3 + 1);
    let is_zero = integer.bytes().all(|b| b == b'0') && fraction.is_empty();
    if value < 0.0 && !is_zero {
        out.push('-');
    }
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if !fraction.is_empty() {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

/// A positioned axis label.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLabel {
    /// Label text.
    pub text: String,
    /// Top-left corner of the text box.
    pub position: ScreenPoint,
    /// Measured text size.
    pub metrics: TextMetrics,
    /// Helper-line coordinate: centre x for x labels, centre y for y labels.
    pub anchor: f32,
}

/// Layout of one chart frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    /// Plot area.
    pub viewport: ScreenRect,
    /// Height of one x-label line.
    pub line_height: f32,
    /// Smallest visible value.
    pub min_y: f64,
    /// Largest visible value.
    pub max_y: f64,
    /// Number of y-label intervals; `tick_count + 1` labels are produced.
    pub tick_count: usize,
    /// Value step between consecutive y labels.
    pub value_increment: f64,
    /// Y-axis labels, top-down.
    pub y_labels: Vec<AxisLabel>,
    /// X-axis labels, one per visible point.
    pub x_labels: Vec<AxisLabel>,
    /// Horizontal slot width per point: widest x label plus label spacing.
    pub x_label_width: f32,
}

/// Smallest and largest `y` of the points, `(0, 0)` when empty.
pub fn value_bounds(points: &[DataPoint]) -> (f64, f64) {
    let mut iter = points.iter().map(|point| point.y);
    let Some(first) = iter.next() else {
        return (0.0, 0.0);
    };
    iter.fold((first, first), |(min, max), y| (min.min(y), max.max(y)))
}

/// Number of y-label intervals that fit a label column of `label_height`.
pub fn tick_count(label_height: f32, line_height: f32, min_spacing: f32) -> usize {
    let step = line_height + min_spacing;
    if step.is_nan() || step <= 0.0 {
        return 1;
    }
    let count = (label_height / step).floor() - 1.0;
    if count.is_finite() && count >= 1.0 {
        count as usize
    } else {
        1
    }
}

/// Compute viewport and label layout for the visible points.
pub fn compute_layout<M>(
    visible: &[DataPoint],
    size: (f32, f32),
    style: &ChartStyle,
    units: &str,
    measurer: &M,
) -> ChartLayout
where
    M: TextMeasurer + ?Sized,
{
    let (width, height) = size;
    let font_size = style.label_font_size;
    let (min_y, max_y) = value_bounds(visible);

    let x_metrics: Vec<TextMetrics> = visible
        .iter()
        .map(|point| measurer.measure(&point.x_label, font_size))
        .collect();
    let max_x_width = x_metrics.iter().map(|m| m.width).fold(0.0_f32, f32::max);
    let max_x_height = x_metrics.iter().map(|m| m.height).fold(0.0_f32, f32::max);
    let max_line_count = x_metrics.iter().map(|m| m.line_count).max().unwrap_or(0);
    let line_height = if max_x_height > 0.0 && max_line_count > 0 {
        max_x_height / max_line_count as f32
    } else {
        0.0
    };

    let viewport_height = height
        - (max_x_height + 2.0 * style.vertical_padding + line_height + style.x_axis_label_spacing);
    let viewport_top = style.vertical_padding + line_height + VIEWPORT_TOP_OFFSET;
    let viewport_bottom = viewport_top + viewport_height;

    let label_viewport_height = viewport_height + line_height;
    let tick_count = tick_count(label_viewport_height, line_height, style.min_y_label_spacing);
    let value_increment = (max_y - min_y) / tick_count as f64;

    let y_texts: Vec<(String, TextMetrics)> = (0..=tick_count)
        .map(|i| {
            let text = ValueLabel::new(min_y - value_increment * i as f64, units).formatted();
            let metrics = measurer.measure(&text, font_size);
            (text, metrics)
        })
        .collect();
    let max_y_width = y_texts.iter().map(|(_, m)| m.width).fold(0.0_f32, f32::max);
    let viewport_left = 2.0 * style.horizontal_padding + max_y_width;

    let label_gap =
        (label_viewport_height - line_height * (tick_count + 1) as f32) / tick_count as f32;
    let y_labels = y_texts
        .into_iter()
        .enumerate()
        .map(|(i, (text, metrics))| {
            let x = style.horizontal_padding + max_y_width - metrics.width;
            let y = viewport_top + i as f32 * (line_height + label_gap) - line_height / 2.0;
            AxisLabel {
                text,
                position: ScreenPoint::new(x, y),
                metrics,
                anchor: y + metrics.height / 2.0,
            }
        })
        .collect();

    let x_label_width = max_x_width + style.x_axis_label_spacing;
    let x_labels = visible
        .iter()
        .zip(x_metrics)
        .enumerate()
        .map(|(i, (point, metrics))| {
            let center = viewport_left + x_label_width / 2.0 + x_label_width * i as f32;
            AxisLabel {
                text: point.x_label.clone(),
                position: ScreenPoint::new(
                    center - metrics.width / 2.0,
                    viewport_bottom + style.x_axis_label_spacing,
                ),
                metrics,
                anchor: center,
            }
        })
        .collect();

    ChartLayout {
        viewport: ScreenRect::from_edges(viewport_left, viewport_top, width, viewport_bottom),
        line_height,
        min_y,
        max_y,
        tick_count,
        value_increment,
        y_labels,
        x_labels,
        x_label_width,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::tests::sample_style;

    fn points(values: &[f64]) -> Vec<DataPoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, y)| DataPoint::new(i as f64, *y, format!("{i}h\n1/1"), ""))
            .collect()
    }

    #[test]
    fn formats_by_magnitude() {
        assert_eq!(ValueLabel::new(34_445.44, "$").formatted(), "34,445$");
        assert_eq!(ValueLabel::new(12.5, "$").formatted(), "12.5$");
        assert_eq!(ValueLabel::new(999.0, "").formatted(), "999");
        assert_eq!(ValueLabel::new(1.23456, "$").formatted(), "1.235$");
        assert_eq!(ValueLabel::new(1000.0, "$").formatted(), "1,000$");
        assert_eq!(ValueLabel::new(0.0, "$").formatted(), "0$");
        assert_eq!(ValueLabel::new(-1234.5678, "").formatted(), "-1,234.568");
        assert_eq!(ValueLabel::new(-0.0001, "").formatted(), "0");
        assert_eq!(ValueLabel::new(1_234_567.0, " USD").to_string(), "1,234,567 USD");
    }

    #[test]
    fn monospace_measures_lines() {
        let measurer = MonospaceMeasurer::default();
        let metrics = measurer.measure("3PM\n10/17", 10.0);
        assert_eq!(metrics.line_count, 2);
        assert!((metrics.width - 30.0).abs() < 1e-4);
        assert!((metrics.height - 24.0).abs() < 1e-4);
        assert_eq!(measurer.measure("", 10.0).width, 0.0);
    }

    #[test]
    fn bounds_of_empty_are_zero() {
        assert_eq!(value_bounds(&[]), (0.0, 0.0));
        assert_eq!(value_bounds(&points(&[10.0, 20.0, 15.0, 30.0, 25.0])), (10.0, 30.0));
    }

    #[test]
    fn tick_count_floors_at_one() {
        assert_eq!(tick_count(0.0, 0.0, 0.0), 1);
        assert_eq!(tick_count(10.0, 16.8, 25.0), 1);
        assert_eq!(tick_count(-50.0, 16.8, 25.0), 1);
        assert_eq!(tick_count(210.0, 16.0, 25.0), 4);
    }

    #[test]
    fn viewport_reserves_label_space() {
        let style = sample_style();
        let measurer = MonospaceMeasurer::default();
        let data = points(&[10.0, 20.0, 15.0, 30.0, 25.0]);
        let layout = compute_layout(&data, (700.0, 300.0), &style, "$", &measurer);

        // Two-line x labels at 14px: 33.6px tall, 16.8px per line.
        assert!((layout.line_height - 16.8).abs() < 1e-4);
        let expected_top = 8.0 + 16.8 + VIEWPORT_TOP_OFFSET;
        assert!((layout.viewport.top() - expected_top).abs() < 1e-4);
        let expected_height = 300.0 - (33.6 + 16.0 + 16.8 + 8.0);
        assert!((layout.viewport.height() - expected_height).abs() < 1e-3);
        assert_eq!(layout.viewport.right(), 700.0);

        let widest_y = layout
            .y_labels
            .iter()
            .map(|label| label.metrics.width)
            .fold(0.0_f32, f32::max);
        assert!((layout.viewport.left() - (16.0 + widest_y)).abs() < 1e-4);
    }

    #[test]
    fn y_labels_descend_from_min() {
        let style = sample_style();
        let measurer = MonospaceMeasurer::default();
        let data = points(&[10.0, 20.0, 15.0, 30.0, 25.0]);
        let layout = compute_layout(&data, (700.0, 300.0), &style, "$", &measurer);

        assert_eq!(layout.y_labels.len(), layout.tick_count + 1);
        assert_eq!(layout.y_labels[0].text, "10$");
        let expected_step = (30.0 - 10.0) / layout.tick_count as f64;
        assert!((layout.value_increment - expected_step).abs() < 1e-9);
        let second = ValueLabel::new(10.0 - expected_step, "$").formatted();
        assert_eq!(layout.y_labels[1].text, second);
        for pair in layout.y_labels.windows(2) {
            assert!(pair[1].position.y > pair[0].position.y);
        }
        for label in &layout.y_labels {
            let right = label.position.x + label.metrics.width;
            assert!((right - (8.0 + layout.viewport.left() - 16.0)).abs() < 1e-3);
        }
    }

    #[test]
    fn x_labels_are_centred_in_slots() {
        let style = sample_style();
        let measurer = MonospaceMeasurer::default();
        let data = points(&[1.0, 2.0, 3.0]);
        let layout = compute_layout(&data, (700.0, 300.0), &style, "$", &measurer);

        let widest = layout
            .x_labels
            .iter()
            .map(|label| label.metrics.width)
            .fold(0.0_f32, f32::max);
        assert!((layout.x_label_width - (widest + 8.0)).abs() < 1e-4);
        for (i, label) in layout.x_labels.iter().enumerate() {
            let center = layout.viewport.left()
                + layout.x_label_width / 2.0
                + layout.x_label_width * i as f32;
            assert!((label.anchor - center).abs() < 1e-4);
            assert!((label.position.x + label.metrics.width / 2.0 - center).abs() < 1e-4);
            assert!((label.position.y - (layout.viewport.bottom() + 8.0)).abs() < 1e-4);
        }
    }

    #[test]
    fn empty_input_is_total() {
        let style = sample_style();
        let layout = compute_layout(&[], (0.0, 0.0), &style, "$", &MonospaceMeasurer::default());
        assert!(layout.x_labels.is_empty());
        assert_eq!(layout.x_label_width, 8.0);
        assert_eq!(layout.tick_count, 1);
        assert_eq!(layout.value_increment, 0.0);
        assert!(layout.y_labels.iter().all(|label| label.text == "0$"));
    }
}
