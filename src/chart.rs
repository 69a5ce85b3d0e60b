//! Line chart container and builder.

use tracing::debug;

use crate::axis::TextMeasurer;
use crate::data::DataPoint;
use crate::frame::{ChartFrame, FrameInputs, build_frame};
use crate::interaction::Selection;
use crate::style::ChartStyle;
use crate::view::{VisibleRange, WindowMode};

/// Notifications produced by the chart for its host.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartEvent {
    /// A drag moved the selection to a different point.
    SelectionChanged(DataPoint),
    /// The measured x-label slot width changed.
    LabelWidthChanged(f32),
}

/// Interactive price line chart.
///
/// Holds the inputs and the transient interaction state. Each trigger (resize,
/// data or style change, drag sample) is a method call that recomputes what it
/// needs synchronously.
#[derive(Debug, Clone)]
pub struct LineChart {
    data: Vec<DataPoint>,
    style: ChartStyle,
    units: String,
    window_mode: WindowMode,
    window: Option<VisibleRange>,
    selection: Selection,
    show_helper_lines: bool,
    label_width: f32,
    available_width: f32,
}

impl LineChart {
    /// Create an empty chart with the given style.
    pub fn new(style: ChartStyle) -> Self {
        Self::builder(style).build()
    }

    /// Start building a chart with custom configuration.
    pub fn builder(style: ChartStyle) -> LineChartBuilder {
        LineChartBuilder::new(style)
    }

    /// Access the full data sequence.
    pub fn data(&self) -> &[DataPoint] {
        &self.data
    }

    /// Access the style.
    pub fn style(&self) -> &ChartStyle {
        &self.style
    }

    /// Unit appended to value labels.
    pub fn units(&self) -> &str {
        &self.units
    }

    /// Active window mode.
    pub fn window_mode(&self) -> WindowMode {
        self.window_mode
    }

    /// Current visible window, `None` when there is no data.
    pub fn window(&self) -> Option<VisibleRange> {
        self.window
    }

    /// The visible sub-sequence.
    pub fn visible_data(&self) -> &[DataPoint] {
        match self.window {
            Some(window) => &self.data[window.as_range()],
            None => &[],
        }
    }

    /// Current selection.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Whether helper lines are drawn.
    pub fn show_helper_lines(&self) -> bool {
        self.show_helper_lines
    }

    /// Last measured x-label slot width; 0 before the first layout.
    pub fn label_width(&self) -> f32 {
        self.label_width
    }

    /// Replace the data sequence.
    ///
    /// The selection reference is kept; it is simply not shown if the new
    /// window does not contain an equal point.
    pub fn set_data(&mut self, data: Vec<DataPoint>) {
        self.data = data;
        self.refresh_window();
    }

    /// Replace the style.
    pub fn set_style(&mut self, style: ChartStyle) {
        self.style = style;
    }

    /// Replace the unit string.
    pub fn set_units(&mut self, units: impl Into<String>) {
        self.units = units.into();
    }

    /// Change how the window is chosen.
    pub fn set_window_mode(&mut self, mode: WindowMode) {
        self.window_mode = mode;
        self.refresh_window();
    }

    /// Show a caller-chosen window.
    pub fn set_visible_range(&mut self, range: VisibleRange) {
        self.set_window_mode(WindowMode::Manual(range));
    }

    /// Toggle helper lines.
    pub fn set_show_helper_lines(&mut self, show: bool) {
        self.show_helper_lines = show;
    }

    /// Select a point from outside the chart. Does not emit an event.
    pub fn set_selected_point(&mut self, point: Option<DataPoint>) {
        self.selection.set(point);
    }

    /// Drop the selection.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Lay the chart out for a surface size.
    ///
    /// In [`WindowMode::FitWidth`] the window is first computed from the
    /// previous label width; if this pass measures a different width the
    /// window is recomputed and laid out once more. A width measured by that
    /// extra pass still refits the window, so the next layout draws it; see
    /// [`LineChart::needs_layout`]. The returned event carries the final
    /// measured width when it differs from the previous one.
    pub fn layout<M>(&mut self, size: (f32, f32), measurer: &M) -> (ChartFrame, Option<ChartEvent>)
    where
        M: TextMeasurer + ?Sized,
    {
        let previous_width = self.label_width;
        if self.available_width != size.0 {
            self.available_width = size.0;
            self.refresh_window();
        }

        let mut frame = self.build(size, measurer);
        for pass in 0..2 {
            let Some(width) = frame.x_label_width() else {
                break;
            };
            if width == self.label_width {
                break;
            }
            self.label_width = width;
            let before = self.window;
            self.refresh_window();
            if self.window == before || pass == 1 {
                break;
            }
            debug!(
                label_width = width,
                first = self.window.map(|w| w.first()),
                "window refit after label width change"
            );
            frame = self.build(size, measurer);
        }

        let event = (self.label_width != previous_width).then(|| {
            debug!(label_width = self.label_width, "x label width changed");
            ChartEvent::LabelWidthChanged(self.label_width)
        });
        (frame, event)
    }

    /// Check whether `frame` shows a different window than the chart would
    /// lay out now.
    pub fn needs_layout(&self, frame: &ChartFrame) -> bool {
        frame.window != self.window
    }

    /// Apply a horizontal drag sample against a frame this chart produced.
    pub fn drag(&mut self, touch_x: f32, frame: &ChartFrame) -> Option<ChartEvent> {
        self.selection
            .drag(touch_x, frame.drag_target(), &self.data)
            .map(ChartEvent::SelectionChanged)
    }

    fn build<M>(&self, size: (f32, f32), measurer: &M) -> ChartFrame
    where
        M: TextMeasurer + ?Sized,
    {
        let inputs = FrameInputs {
            data: &self.data,
            window: self.window,
            style: &self.style,
            units: &self.units,
            selection: &self.selection,
            show_helper_lines: self.show_helper_lines,
        };
        build_frame(inputs, size, measurer)
    }

    fn refresh_window(&mut self) {
        let len = self.data.len();
        self.window = match self.window_mode {
            WindowMode::FitWidth => {
                VisibleRange::fit_width(len, self.available_width, self.label_width)
            }
            WindowMode::All => VisibleRange::all(len),
            WindowMode::Manual(range) => range.clamped(len),
        };
    }
}

/// Builder for configuring a chart before construction.
#[derive(Debug, Clone)]
pub struct LineChartBuilder {
    style: ChartStyle,
    data: Vec<DataPoint>,
    units: String,
    window_mode: WindowMode,
    selected: Option<DataPoint>,
    show_helper_lines: bool,
}

impl LineChartBuilder {
    /// Start from a style; everything else has neutral defaults.
    pub fn new(style: ChartStyle) -> Self {
        Self {
            style,
            data: Vec::new(),
            units: String::new(),
            window_mode: WindowMode::default(),
            selected: None,
            show_helper_lines: true,
        }
    }

    /// Set the data sequence.
    pub fn data(mut self, data: Vec<DataPoint>) -> Self {
        self.data = data;
        self
    }

    /// Set the unit string.
    pub fn units(mut self, units: impl Into<String>) -> Self {
        self.units = units.into();
        self
    }

    /// Set the window mode.
    pub fn window_mode(mut self, mode: WindowMode) -> Self {
        self.window_mode = mode;
        self
    }

    /// Preselect a point.
    pub fn selected(mut self, point: DataPoint) -> Self {
        self.selected = Some(point);
        self
    }

    /// Toggle helper lines.
    pub fn show_helper_lines(mut self, show: bool) -> Self {
        self.show_helper_lines = show;
        self
    }

    /// Build the chart.
    pub fn build(self) -> LineChart {
        let mut selection = Selection::new();
        selection.set(self.selected);
        let mut chart = LineChart {
            data: self.data,
            style: self.style,
            units: self.units,
            window_mode: self.window_mode,
            window: None,
            selection,
            show_helper_lines: self.show_helper_lines,
            label_width: 0.0,
            available_width: 0.0,
        };
        chart.refresh_window();
        chart
    }
}
