use chrono::{Duration, DurationRound, Utc};
use gpui::{AppContext, Application, Bounds, WindowBounds, WindowOptions, px, size};
use tracing::info;
use tracing_subscriber::EnvFilter;

use gpui_pricechart::{
    ChartStyle, ChartViewConfig, Color, GpuiLineChartView, LineChart, PriceSample,
    from_price_history,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let now = Utc::now()
        .duration_trunc(Duration::hours(1))
        .unwrap_or_else(|_| Utc::now());
    let history: Vec<PriceSample> = (0..48)
        .map(|i| {
            let t = i as f64;
            let price = 61_500.0 + (t * 0.35).sin() * 900.0 + (t * 0.11).cos() * 400.0;
            PriceSample::new(now - Duration::hours(47 - i), price)
        })
        .collect();

    let style = ChartStyle {
        line_color: Color::rgb8(0x1E, 0x88, 0xE5),
        unselected_color: Color::rgb8(0x9E, 0x9E, 0x9E),
        selected_color: Color::rgb8(0x0D, 0x47, 0xA1),
        helper_line_thickness: 1.0,
        axis_line_thickness: 3.0,
        label_font_size: 12.0,
        min_y_label_spacing: 25.0,
        vertical_padding: 8.0,
        horizontal_padding: 8.0,
        x_axis_label_spacing: 8.0,
    };

    Application::new().run(move |cx| {
        let options = WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(Bounds::centered(
                None,
                size(px(720.0), px(420.0)),
                cx,
            ))),
            ..Default::default()
        };

        cx.open_window(options, move |_window, cx| {
            let chart = LineChart::builder(style)
                .data(from_price_history(&history))
                .units("$")
                .build();

            let view = GpuiLineChartView::with_config(chart, ChartViewConfig::default())
                .on_selection_change(|point| {
                    info!(price = point.y, label = %point.x_label.replace('\n', " "), "selected");
                })
                .on_label_width_change(|width| {
                    info!(width, "label width");
                });
            cx.new(|_| view)
        })
        .unwrap();
    });
}
