//! Per-frame pipeline: layout, transform, curve, selection, draw commands.

use tracing::trace;

use crate::axis::{ChartLayout, TextMeasurer, ValueLabel, compute_layout};
use crate::curve::CurvePath;
use crate::data::DataPoint;
use crate::geom::ScreenPoint;
use crate::interaction::{DragTarget, Selection, SelectionState};
use crate::render::{
    Color, LineSegment, LineStyle, MarkerShape, MarkerStyle, RenderCommand, RenderList, TextStyle,
    clamp_to_right_edge,
};
use crate::style::ChartStyle;
use crate::transform::Transform;
use crate::view::VisibleRange;

const MARKER_RADIUS: f32 = 10.0;
const SELECTED_MARKER_RADIUS: f32 = 15.0;
const SELECTED_RING_WIDTH: f32 = 3.0;
const SELECTED_HELPER_SCALE: f32 = 1.8;
const CALLOUT_GAP: f32 = 10.0;

/// Everything a frame is computed from.
#[derive(Debug, Clone, Copy)]
pub struct FrameInputs<'a> {
    /// Full data sequence.
    pub data: &'a [DataPoint],
    /// Visible window into `data`.
    pub window: Option<VisibleRange>,
    /// Styling.
    pub style: &'a ChartStyle,
    /// Unit appended to value labels.
    pub units: &'a str,
    /// Current selection.
    pub selection: &'a Selection,
    /// Draw horizontal and vertical helper lines.
    pub show_helper_lines: bool,
}

/// Result of one pipeline run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartFrame {
    /// Surface size the frame was laid out for.
    pub size: (f32, f32),
    /// Window the frame shows.
    pub window: Option<VisibleRange>,
    /// Label and viewport layout; `None` when there is nothing to show.
    pub layout: Option<ChartLayout>,
    /// Screen positions of the visible points, one per visible point.
    pub draw_points: Vec<ScreenPoint>,
    /// Smooth path through the draw points.
    pub curve: CurvePath,
    /// Selection as resolved for this frame.
    pub selection: SelectionState,
    /// Draw commands in paint order.
    pub render: RenderList,
}

impl ChartFrame {
    /// A frame that draws nothing.
    pub fn empty(size: (f32, f32)) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// Measured x-label slot width, when anything was laid out.
    pub fn x_label_width(&self) -> Option<f32> {
        self.layout.as_ref().map(|layout| layout.x_label_width)
    }

    /// Geometry for resolving drag samples against this frame.
    pub fn drag_target(&self) -> DragTarget<'_> {
        DragTarget {
            draw_points: &self.draw_points,
            slot_width: self.x_label_width().unwrap_or(0.0),
            window: self.window,
        }
    }
}

/// Run the pipeline for one surface size.
pub fn build_frame<M>(inputs: FrameInputs<'_>, size: (f32, f32), measurer: &M) -> ChartFrame
where
    M: TextMeasurer + ?Sized,
{
    let Some(window) = inputs.window.and_then(|window| window.clamped(inputs.data.len())) else {
        return ChartFrame::empty(size);
    };
    let visible = &inputs.data[window.as_range()];
    let style = inputs.style;

    let layout = compute_layout(visible, size, style, inputs.units, measurer);
    let transform = Transform::from_layout(&layout);
    let draw_points = transform.draw_points(visible);
    let curve = CurvePath::through(&draw_points);
    let selection = inputs.selection.state(inputs.data, Some(window));

    let mut render = RenderList::new();
    build_y_axis(&mut render, &layout, style, inputs.show_helper_lines);
    build_x_axis(&mut render, &layout, style, selection, inputs.show_helper_lines);
    if let Some(index) = selection.index() {
        build_callout(&mut render, &layout, visible, index, style, inputs.units, measurer);
    }
    if !curve.is_empty() {
        render.push(RenderCommand::Curve {
            path: curve.clone(),
            style: LineStyle {
                color: style.line_color,
                width: style.axis_line_thickness,
            },
        });
    }
    build_markers(&mut render, &draw_points, selection, style);

    trace!(
        first = window.first(),
        last = window.last(),
        slot = layout.x_label_width,
        "chart frame built"
    );

    ChartFrame {
        size,
        window: Some(window),
        layout: Some(layout),
        draw_points,
        curve,
        selection,
        render,
    }
}

fn build_y_axis(render: &mut RenderList, layout: &ChartLayout, style: &ChartStyle, helpers: bool) {
    let text_style = TextStyle {
        color: style.unselected_color,
        size: style.label_font_size,
    };
    for label in &layout.y_labels {
        render.push(RenderCommand::Text {
            position: label.position,
            text: label.text.clone(),
            style: text_style.clone(),
        });
    }
    if helpers {
        let segments = layout
            .y_labels
            .iter()
            .map(|label| {
                LineSegment::horizontal(
                    label.anchor,
                    layout.viewport.left(),
                    layout.viewport.right(),
                )
            })
            .collect();
        render.push(RenderCommand::LineSegments {
            segments,
            style: LineStyle {
                color: style.unselected_color,
                width: style.helper_line_thickness,
            },
        });
    }
}

fn build_x_axis(
    render: &mut RenderList,
    layout: &ChartLayout,
    style: &ChartStyle,
    selection: SelectionState,
    helpers: bool,
) {
    let selected = selection.index();
    let mut plain = Vec::new();
    let mut highlighted = Vec::new();
    for (i, label) in layout.x_labels.iter().enumerate() {
        let is_selected = selected == Some(i);
        render.push(RenderCommand::Text {
            position: label.position,
            text: label.text.clone(),
            style: TextStyle {
                color: if is_selected {
                    style.selected_color
                } else {
                    style.unselected_color
                },
                size: style.label_font_size,
            },
        });
        let line = LineSegment::vertical(
            label.anchor,
            layout.viewport.top(),
            layout.viewport.bottom(),
        );
        if is_selected {
            highlighted.push(line);
        } else {
            plain.push(line);
        }
    }
    if !helpers {
        return;
    }
    if !plain.is_empty() {
        render.push(RenderCommand::LineSegments {
            segments: plain,
            style: LineStyle {
                color: style.unselected_color,
                width: style.helper_line_thickness,
            },
        });
    }
    if !highlighted.is_empty() {
        render.push(RenderCommand::LineSegments {
            segments: highlighted,
            style: LineStyle {
                color: style.selected_color,
                width: style.helper_line_thickness * SELECTED_HELPER_SCALE,
            },
        });
    }
}

fn build_callout<M>(
    render: &mut RenderList,
    layout: &ChartLayout,
    visible: &[DataPoint],
    index: usize,
    style: &ChartStyle,
    units: &str,
    measurer: &M,
) where
    M: TextMeasurer + ?Sized,
{
    let (Some(point), Some(label)) = (visible.get(index), layout.x_labels.get(index)) else {
        return;
    };
    let text = ValueLabel::new(point.y, units).formatted();
    let metrics = measurer.measure(&text, style.label_font_size);
    let left = if index + 1 == visible.len() {
        label.anchor - metrics.width
    } else {
        label.anchor - metrics.width / 2.0
    };
    let x = clamp_to_right_edge(left, metrics.width, layout.viewport);
    let y = layout.viewport.top() - metrics.height - CALLOUT_GAP;
    render.push(RenderCommand::Text {
        position: ScreenPoint::new(x, y),
        text,
        style: TextStyle {
            color: style.selected_color,
            size: style.label_font_size,
        },
    });
}

fn build_markers(
    render: &mut RenderList,
    draw_points: &[ScreenPoint],
    selection: SelectionState,
    style: &ChartStyle,
) {
    let selected = selection.index();
    let plain: Vec<ScreenPoint> = draw_points
        .iter()
        .enumerate()
        .filter(|(i, _)| selected != Some(*i))
        .map(|(_, point)| *point)
        .collect();
    if !plain.is_empty() {
        render.push(RenderCommand::Points {
            points: plain,
            style: MarkerStyle {
                color: style.selected_color,
                radius: MARKER_RADIUS,
                shape: MarkerShape::Disc,
            },
        });
    }
    let Some(center) = selected.and_then(|i| draw_points.get(i)) else {
        return;
    };
    render.push(RenderCommand::Points {
        points: vec![*center],
        style: MarkerStyle {
            color: Color::WHITE,
            radius: SELECTED_MARKER_RADIUS,
            shape: MarkerShape::Disc,
        },
    });
    render.push(RenderCommand::Points {
        points: vec![*center],
        style: MarkerStyle {
            color: style.selected_color,
            radius: SELECTED_MARKER_RADIUS,
            shape: MarkerShape::Ring {
                width: SELECTED_RING_WIDTH,
            },
        },
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::MonospaceMeasurer;
    use crate::style::tests::sample_style;

    fn data(values: &[f64]) -> Vec<DataPoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, y)| DataPoint::new(i as f64, *y, format!("{i}PM\n1/1"), ""))
            .collect()
    }

    fn frame(
        data: &[DataPoint],
        window: Option<VisibleRange>,
        selection: &Selection,
        size: (f32, f32),
    ) -> ChartFrame {
        let style = sample_style();
        let inputs = FrameInputs {
            data,
            window,
            style: &style,
            units: "$",
            selection,
            show_helper_lines: true,
        };
        build_frame(inputs, size, &MonospaceMeasurer::default())
    }

    fn markers(frame: &ChartFrame) -> Vec<(ScreenPoint, MarkerStyle)> {
        frame
            .render
            .commands()
            .iter()
            .filter_map(|command| match command {
                RenderCommand::Points { points, style } => Some((points.clone(), *style)),
                _ => None,
            })
            .flat_map(|(points, style)| points.into_iter().map(move |p| (p, style)))
            .collect()
    }

    #[test]
    fn draw_points_follow_visible_window() {
        let data = data(&[10.0, 20.0, 15.0, 30.0, 25.0]);
        let window = VisibleRange::new(1, 4);
        let frame = frame(&data, Some(window), &Selection::new(), (700.0, 300.0));
        let layout = frame.layout.as_ref().expect("laid out");
        let transform = Transform::from_layout(layout);

        assert_eq!(frame.draw_points.len(), window.len());
        for (i, point) in frame.draw_points.iter().enumerate() {
            let value = transform.screen_to_value(point.y).expect("non-flat");
            assert!((value - data[window.first() + i].y).abs() < 1e-3);
        }
        assert_eq!(layout.min_y, 15.0);
        assert_eq!(layout.max_y, 30.0);
        assert_eq!(frame.curve.segments().len(), 3);
    }

    #[test]
    fn empty_data_draws_nothing() {
        let frame = frame(&[], VisibleRange::all(0), &Selection::new(), (700.0, 300.0));
        assert!(frame.render.is_empty());
        assert!(frame.layout.is_none());
        assert!(frame.draw_points.is_empty());
        assert_eq!(frame.x_label_width(), None);
    }

    #[test]
    fn single_point_draws_one_marker_and_no_curve() {
        let data = data(&[42.0]);
        let frame = frame(&data, VisibleRange::all(1), &Selection::new(), (300.0, 100.0));
        let layout = frame.layout.as_ref().expect("laid out");

        assert!(frame.curve.is_empty());
        assert_eq!(layout.tick_count, 1);
        assert_eq!(layout.value_increment, 0.0);
        assert!(frame.draw_points[0].y.is_finite());
        assert_eq!(markers(&frame).len(), 1);
        assert!(
            !frame
                .render
                .commands()
                .iter()
                .any(|command| matches!(command, RenderCommand::Curve { .. }))
        );
    }

    #[test]
    fn selected_point_gets_ring_and_callout() {
        let data = data(&[10.0, 20.0, 15.0, 30.0, 25.0]);
        let mut selection = Selection::new();
        selection.set(Some(data[2].clone()));
        let frame = frame(&data, VisibleRange::all(5), &selection, (700.0, 300.0));

        assert_eq!(frame.selection, SelectionState::Selected(2));
        let markers = markers(&frame);
        assert_eq!(markers.len(), 6);
        let rings: Vec<_> = markers
            .iter()
            .filter(|(_, style)| matches!(style.shape, MarkerShape::Ring { .. }))
            .collect();
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].0, frame.draw_points[2]);
        assert_eq!(rings[0].1.radius, SELECTED_MARKER_RADIUS);

        let layout = frame.layout.as_ref().expect("laid out");
        let callout = frame
            .render
            .texts()
            .find(|(text, position, _)| *text == "15$" && position.y < layout.viewport.top())
            .expect("callout drawn above viewport");
        let width = MonospaceMeasurer::default().measure("15$", 14.0).width;
        assert!((callout.1.x + width / 2.0 - layout.x_labels[2].anchor).abs() < 1e-3);

        let highlighted = frame.render.commands().iter().any(|command| {
            matches!(command, RenderCommand::LineSegments { style, .. }
                if (style.width - 1.8).abs() < 1e-6 && style.color == sample_style().selected_color)
        });
        assert!(highlighted);
    }

    #[test]
    fn last_point_callout_is_clamped_to_viewport() {
        let data = data(&[10.0, 20.0, 1_234_567.0]);
        let mut selection = Selection::new();
        selection.set(Some(data[2].clone()));
        let frame = frame(&data, VisibleRange::all(3), &selection, (150.0, 300.0));
        let layout = frame.layout.as_ref().expect("laid out");

        let text = "1,234,567$";
        let width = MonospaceMeasurer::default().measure(text, 14.0).width;
        let (_, position, _) = frame
            .render
            .texts()
            .find(|(t, _, _)| *t == text)
            .expect("callout");
        assert!(position.x + width <= layout.viewport.right() + 1e-3);
    }

    #[test]
    fn selection_outside_window_is_not_shown() {
        let data = data(&[10.0, 20.0, 15.0, 30.0, 25.0]);
        let mut selection = Selection::new();
        selection.set(Some(data[0].clone()));
        let frame = frame(&data, Some(VisibleRange::new(2, 4)), &selection, (700.0, 300.0));
        assert_eq!(frame.selection, SelectionState::Unselected);
        assert!(
            markers(&frame)
                .iter()
                .all(|(_, style)| style.shape == MarkerShape::Disc && style.radius == MARKER_RADIUS)
        );
    }

    #[test]
    fn helper_lines_can_be_disabled() {
        let data = data(&[1.0, 2.0]);
        let style = sample_style();
        let selection = Selection::new();
        let inputs = FrameInputs {
            data: &data,
            window: VisibleRange::all(2),
            style: &style,
            units: "",
            selection: &selection,
            show_helper_lines: false,
        };
        let frame = build_frame(inputs, (400.0, 200.0), &MonospaceMeasurer::default());
        assert!(
            !frame
                .render
                .commands()
                .iter()
                .any(|command| matches!(command, RenderCommand::LineSegments { .. }))
        );
    }
}
