use gpui::{Hsla, ShapedLine, TextRun, Window, font, px};

use crate::axis::{TextMeasurer, TextMetrics};

/// Shape a single line of text.
pub(crate) fn shape_line(
    window: &Window,
    text: &str,
    size: f32,
    font_family: &str,
    color: Hsla,
) -> ShapedLine {
    let run = TextRun {
        len: text.len(),
        font: font(font_family.to_string()),
        color,
        background_color: None,
        underline: None,
        strikethrough: None,
    };
    window
        .text_system()
        .shape_line(text.to_string().into(), px(size), &[run], None)
}

/// Height of one shaped line, never less than the nominal line height.
pub(crate) fn line_height(shaped: &ShapedLine, size: f32) -> f32 {
    f32::from(shaped.ascent + shaped.descent).max(size * 1.2)
}

pub(crate) struct GpuiTextMeasurer<'a> {
    window: &'a Window,
    font_family: &'a str,
}

impl<'a> GpuiTextMeasurer<'a> {
    pub(crate) fn new(window: &'a Window, font_family: &'a str) -> Self {
        Self {
            window,
            font_family,
        }
    }
}

impl TextMeasurer for GpuiTextMeasurer<'_> {
    fn measure(&self, text: &str, size: f32) -> TextMetrics {
        let mut metrics = TextMetrics::default();
        for line in text.split('\n') {
            metrics.line_count += 1;
            if line.is_empty() {
                metrics.height += size * 1.2;
                continue;
            }
            let shaped = shape_line(self.window, line, size, self.font_family, gpui::black());
            metrics.width = metrics.width.max(f32::from(shaped.width));
            metrics.height += line_height(&shaped, size);
        }
        metrics
    }
}
