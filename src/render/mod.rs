//! Rendering primitives.
//!
//! These types are backend-agnostic and are used by render backends (such as the
//! GPUI backend) to describe how a chart frame should be drawn.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::curve::CurvePath;
use crate::geom::{ScreenPoint, ScreenRect};

/// RGBA color.
///
/// All components are expected to be in the 0.0..=1.0 range. Colors
/// serialize as `#RRGGBB` or `#RRGGBBAA` strings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

/// Failure to parse a hex color string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// The string does not start with `#`.
    #[error("color `{0}` must start with '#'")]
    MissingHash(String),
    /// The string is not 6 or 8 hex digits long.
    #[error("color `{0}` must have 6 or 8 hex digits")]
    BadLength(String),
    /// A non-hex character was found.
    #[error("color `{0}` contains a non-hex digit")]
    BadDigit(String),
}

impl Color {
    /// Create a new color.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from 8-bit channels.
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            1.0,
        )
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA`.
    pub fn from_hex(text: &str) -> Result<Self, ColorError> {
        let digits = text
            .strip_prefix('#')
            .ok_or_else(|| ColorError::MissingHash(text.to_string()))?;
        if digits.len() != 6 && digits.len() != 8 {
            return Err(ColorError::BadLength(text.to_string()));
        }
        let channel = |index: usize| -> Result<f32, ColorError> {
            let pair = digits
                .get(index * 2..index * 2 + 2)
                .ok_or_else(|| ColorError::BadDigit(text.to_string()))?;
            u8::from_str_radix(pair, 16)
                .map(|value| f32::from(value) / 255.0)
                .map_err(|_| ColorError::BadDigit(text.to_string()))
        };
        let a = if digits.len() == 8 { channel(3)? } else { 1.0 };
        Ok(Self::new(channel(0)?, channel(1)?, channel(2)?, a))
    }

    /// Format as `#RRGGBBAA`.
    pub fn to_hex(&self) -> String {
        let byte = |value: f32| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02X}{:02X}{:02X}{:02X}",
            byte(self.r),
            byte(self.g),
            byte(self.b),
            byte(self.a)
        )
    }

    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// Fully transparent.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// Line stroke styling.
///
/// The width is expressed in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in pixels.
    pub width: f32,
}

/// Marker shape for data point markers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarkerShape {
    /// Filled circle.
    Disc,
    /// Stroked circle outline.
    Ring {
        /// Outline width in pixels.
        width: f32,
    },
}

/// Marker styling.
///
/// Marker radii are expressed in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    /// Marker color.
    pub color: Color,
    /// Marker radius in pixels.
    pub radius: f32,
    /// Marker shape.
    pub shape: MarkerShape,
}

/// Text styling.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// Text color.
    pub color: Color,
    /// Font size in pixels.
    pub size: f32,
}

/// A line segment in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    /// Segment start.
    pub start: ScreenPoint,
    /// Segment end.
    pub end: ScreenPoint,
}

impl LineSegment {
    /// Create a new line segment.
    pub fn new(start: ScreenPoint, end: ScreenPoint) -> Self {
        Self { start, end }
    }

    /// Vertical segment at `x` spanning `top..bottom`.
    pub fn vertical(x: f32, top: f32, bottom: f32) -> Self {
        Self::new(ScreenPoint::new(x, bottom), ScreenPoint::new(x, top))
    }

    /// Horizontal segment at `y` spanning `left..right`.
    pub fn horizontal(y: f32, left: f32, right: f32) -> Self {
        Self::new(ScreenPoint::new(left, y), ScreenPoint::new(right, y))
    }
}

/// A single draw command.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Draw line segments.
    LineSegments {
        /// Segments to draw.
        segments: Vec<LineSegment>,
        /// Styling for the segments.
        style: LineStyle,
    },
    /// Stroke a cubic curve path.
    Curve {
        /// Path to stroke.
        path: CurvePath,
        /// Stroke styling.
        style: LineStyle,
    },
    /// Draw markers centred on points.
    Points {
        /// Marker centres.
        points: Vec<ScreenPoint>,
        /// Marker styling.
        style: MarkerStyle,
    },
    /// Draw text.
    Text {
        /// Top-left corner of the text box.
        position: ScreenPoint,
        /// Text content. Lines are separated by `\n`.
        text: String,
        /// Text styling.
        style: TextStyle,
    },
}

/// Aggregated render commands, in paint order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RenderList {
    commands: Vec<RenderCommand>,
}

impl RenderList {
    /// Create an empty render list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a render command.
    pub fn push(&mut self, command: RenderCommand) {
        self.commands.push(command);
    }

    /// Access all render commands.
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Check whether nothing will be drawn.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Text commands, in paint order.
    pub fn texts(&self) -> impl Iterator<Item = (&str, ScreenPoint, &TextStyle)> {
        self.commands.iter().filter_map(|command| match command {
            RenderCommand::Text {
                text,
                position,
                style,
            } => Some((text.as_str(), *position, style)),
            _ => None,
        })
    }
}

/// Clamp a box's left edge so the box does not pass `bounds.right()`.
///
/// The box is also kept right of `bounds.left()` unless it is wider than
/// `bounds`, in which case the right edge wins.
pub fn clamp_to_right_edge(left: f32, width: f32, bounds: ScreenRect) -> f32 {
    left.max(bounds.left()).min(bounds.right() - width)
}
