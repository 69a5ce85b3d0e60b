use gpui::{
    App, BorderStyle, Bounds, ContentMask, Corners, Edges, PathBuilder, Pixels, Window, point, px,
    quad,
};

use crate::curve::CurvePath;
use crate::frame::ChartFrame;
use crate::geom::ScreenPoint;
use crate::render::{
    Color, LineSegment, LineStyle, MarkerShape, MarkerStyle, RenderCommand, TextStyle,
};

use super::text::{line_height, shape_line};

pub(crate) fn paint_frame(
    frame: &ChartFrame,
    bounds: Bounds<Pixels>,
    font_family: &str,
    window: &mut Window,
    cx: &mut App,
) {
    let origin = ScreenPoint::new(f32::from(bounds.origin.x), f32::from(bounds.origin.y));
    window.with_content_mask(Some(ContentMask { bounds }), |window| {
        for command in frame.render.commands() {
            match command {
                RenderCommand::LineSegments { segments, style } => {
                    paint_lines(window, origin, segments, *style);
                }
                RenderCommand::Curve { path, style } => {
                    paint_curve(window, origin, path, *style);
                }
                RenderCommand::Points { points, style } => {
                    paint_points(window, origin, points, *style);
                }
                RenderCommand::Text {
                    position,
                    text,
                    style,
                } => {
                    paint_text(window, cx, position.offset(origin), text, style, font_family);
                }
            }
        }
    });
}

fn paint_lines(
    window: &mut Window,
    origin: ScreenPoint,
    segments: &[LineSegment],
    style: LineStyle,
) {
    if segments.is_empty() {
        return;
    }
    let mut builder = PathBuilder::stroke(px(style.width.max(0.5)));
    for segment in segments {
        builder.move_to(to_point(segment.start.offset(origin)));
        builder.line_to(to_point(segment.end.offset(origin)));
    }
    if let Ok(path) = builder.build() {
        window.paint_path(path, to_rgba(style.color));
    }
}

fn paint_curve(window: &mut Window, origin: ScreenPoint, path: &CurvePath, style: LineStyle) {
    let Some(start) = path.start() else {
        return;
    };
    let mut builder = PathBuilder::stroke(px(style.width.max(0.5)));
    builder.move_to(to_point(start.offset(origin)));
    for segment in path.segments() {
        builder.cubic_bezier_to(
            to_point(segment.to.offset(origin)),
            to_point(segment.ctrl1.offset(origin)),
            to_point(segment.ctrl2.offset(origin)),
        );
    }
    if let Ok(path) = builder.build() {
        window.paint_path(path, to_rgba(style.color));
    }
}

fn paint_points(
    window: &mut Window,
    origin: ScreenPoint,
    points: &[ScreenPoint],
    style: MarkerStyle,
) {
    let radius = style.radius.max(1.0);
    let (fill, border) = match style.shape {
        MarkerShape::Disc => (style.color, 0.0),
        MarkerShape::Ring { width } => (Color::TRANSPARENT, width),
    };
    for pt in points {
        let center = pt.offset(origin);
        let bounds = Bounds::from_corners(
            point(px(center.x - radius), px(center.y - radius)),
            point(px(center.x + radius), px(center.y + radius)),
        );
        window.paint_quad(quad(
            bounds,
            Corners::all(px(radius)),
            to_rgba(fill),
            Edges::all(px(border)),
            to_rgba(style.color),
            BorderStyle::default(),
        ));
    }
}

fn paint_text(
    window: &mut Window,
    cx: &mut App,
    position: ScreenPoint,
    text: &str,
    style: &TextStyle,
    font_family: &str,
) {
    let mut y = position.y;
    for line in text.split('\n') {
        if line.is_empty() {
            y += style.size * 1.2;
            continue;
        }
        let shaped = shape_line(window, line, style.size, font_family, to_hsla(style.color));
        let height = line_height(&shaped, style.size);
        let _ = shaped.paint(point(px(position.x), px(y)), px(height), window, cx);
        y += height;
    }
}

fn to_point(pt: ScreenPoint) -> gpui::Point<Pixels> {
    point(px(pt.x), px(pt.y))
}

fn to_rgba(color: Color) -> gpui::Rgba {
    gpui::Rgba {
        r: color.r,
        g: color.g,
        b: color.b,
        a: color.a,
    }
}

pub(crate) fn to_hsla(color: Color) -> gpui::Hsla {
    gpui::Hsla::from(to_rgba(color))
}
