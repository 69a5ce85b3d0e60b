use std::sync::{Arc, RwLock};

use gpui::prelude::*;
use gpui::{MouseButton, MouseDownEvent, MouseMoveEvent, Pixels, Point, Window, canvas, div};
use tracing::debug;

use crate::chart::{ChartEvent, LineChart};
use crate::data::DataPoint;
use crate::geom::ScreenPoint;
use crate::render::Color;

use super::config::ChartViewConfig;
use super::paint::{paint_frame, to_hsla};
use super::state::ChartUiState;
use super::text::GpuiTextMeasurer;

/// Callback invoked when a drag selects a different point.
pub type SelectionCallback = Arc<dyn Fn(&DataPoint) + Send + Sync>;

/// Callback invoked when the measured x-label width changes.
pub type LabelWidthCallback = Arc<dyn Fn(f32) + Send + Sync>;

/// A GPUI view that renders a [`LineChart`] and handles drag selection.
///
/// Pressing and dragging horizontally moves the highlight between points.
/// Data, style and window changes go through a [`ChartHandle`].
#[derive(Clone)]
pub struct GpuiLineChartView {
    chart: Arc<RwLock<LineChart>>,
    state: Arc<RwLock<ChartUiState>>,
    config: ChartViewConfig,
    on_select: Option<SelectionCallback>,
    on_label_width: Option<LabelWidthCallback>,
}

impl GpuiLineChartView {
    /// Create a new GPUI chart view.
    ///
    /// Uses the default [`ChartViewConfig`].
    pub fn new(chart: LineChart) -> Self {
        Self::with_config(chart, ChartViewConfig::default())
    }

    /// Create a new GPUI chart view with a custom configuration.
    pub fn with_config(chart: LineChart, config: ChartViewConfig) -> Self {
        Self {
            chart: Arc::new(RwLock::new(chart)),
            state: Arc::new(RwLock::new(ChartUiState::default())),
            config,
            on_select: None,
            on_label_width: None,
        }
    }

    /// Register the selected-point-changed callback.
    ///
    /// Only drag-driven changes are reported.
    pub fn on_selection_change(
        mut self,
        callback: impl Fn(&DataPoint) + Send + Sync + 'static,
    ) -> Self {
        self.on_select = Some(Arc::new(callback));
        self
    }

    /// Register the label-width-changed callback.
    pub fn on_label_width_change(mut self, callback: impl Fn(f32) + Send + Sync + 'static) -> Self {
        self.on_label_width = Some(Arc::new(callback));
        self
    }

    /// Get a handle for mutating the underlying chart.
    ///
    /// This is useful for pushing data from async tasks.
    pub fn chart_handle(&self) -> ChartHandle {
        ChartHandle {
            chart: Arc::clone(&self.chart),
        }
    }

    fn on_mouse_down(&mut self, ev: &MouseDownEvent, cx: &mut Context<Self>) {
        self.state.write().expect("chart state lock").dragging = true;
        self.apply_drag(screen_point(ev.position), cx);
    }

    fn on_mouse_move(&mut self, ev: &MouseMoveEvent, cx: &mut Context<Self>) {
        let mut state = self.state.write().expect("chart state lock");
        if ev.pressed_button != Some(MouseButton::Left) {
            state.dragging = false;
        }
        if !state.dragging {
            return;
        }
        drop(state);
        self.apply_drag(screen_point(ev.position), cx);
    }

    fn on_mouse_up(&mut self) {
        self.state.write().expect("chart state lock").dragging = false;
    }

    fn apply_drag(&self, pos: ScreenPoint, cx: &mut Context<Self>) {
        let event = {
            let state = self.state.read().expect("chart state lock");
            let mut chart = self.chart.write().expect("chart lock");
            chart.drag(state.local_x(pos), &state.frame)
        };
        if let Some(ChartEvent::SelectionChanged(point)) = event {
            debug!(x = point.x, y = point.y, "reporting selection change");
            if let Some(callback) = &self.on_select {
                callback(&point);
            }
        }
        cx.notify();
    }
}

impl Render for GpuiLineChartView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let chart = Arc::clone(&self.chart);
        let state = Arc::clone(&self.state);
        let on_label_width = self.on_label_width.clone();
        let measure_family = self.config.font_family.clone();
        let paint_family = self.config.font_family.clone();
        let background = self.config.background.unwrap_or(Color::TRANSPARENT);

        div()
            .size_full()
            .bg(to_hsla(background))
            .child(
                canvas(
                    move |bounds, window, _| {
                        let size = (f32::from(bounds.size.width), f32::from(bounds.size.height));
                        let measurer = GpuiTextMeasurer::new(window, &measure_family);
                        let (frame, event, pending) = {
                            let mut chart = chart.write().expect("chart lock");
                            let (frame, event) = chart.layout(size, &measurer);
                            let pending = chart.needs_layout(&frame);
                            (frame, event, pending)
                        };
                        if pending {
                            window.request_animation_frame();
                        }
                        {
                            let mut state = state.write().expect("chart state lock");
                            state.frame = frame.clone();
                            state.origin = screen_point(bounds.origin);
                        }
                        if let (Some(ChartEvent::LabelWidthChanged(width)), Some(callback)) =
                            (event, &on_label_width)
                        {
                            callback(width);
                        }
                        frame
                    },
                    move |bounds, frame, window, cx| {
                        paint_frame(&frame, bounds, &paint_family, window, cx);
                    },
                )
                .size_full(),
            )
            .on_mouse_down(
                MouseButton::Left,
                cx.listener(|this, ev, _, cx| {
                    this.on_mouse_down(ev, cx);
                }),
            )
            .on_mouse_move(cx.listener(|this, ev, _, cx| {
                this.on_mouse_move(ev, cx);
            }))
            .on_mouse_up(
                MouseButton::Left,
                cx.listener(|this, _, _, _| {
                    this.on_mouse_up();
                }),
            )
    }
}

/// A handle for mutating a [`LineChart`] held inside a `GpuiLineChartView`.
///
/// The handle clones cheaply and can be moved into async tasks. Changes show
/// up on the next frame the view renders.
#[derive(Clone)]
pub struct ChartHandle {
    chart: Arc<RwLock<LineChart>>,
}

impl ChartHandle {
    /// Read the chart state.
    ///
    /// The chart is locked for the duration of the callback.
    pub fn read<R>(&self, f: impl FnOnce(&LineChart) -> R) -> R {
        let chart = self.chart.read().expect("chart lock");
        f(&chart)
    }

    /// Mutate the chart state.
    ///
    /// The chart is locked for the duration of the callback.
    pub fn write<R>(&self, f: impl FnOnce(&mut LineChart) -> R) -> R {
        let mut chart = self.chart.write().expect("chart lock");
        f(&mut chart)
    }
}

fn screen_point(point: Point<Pixels>) -> ScreenPoint {
    ScreenPoint::new(f32::from(point.x), f32::from(point.y))
}
