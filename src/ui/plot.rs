use std::ops::RangeInclusive;

use eframe::egui::{Color32, Ui, Vec2, Vec2b};
use egui_plot::{GridMark, Line, MarkerShape, Plot, PlotPoints, Points};

use crate::data::model::{category_at, X_AXIS_LABEL, Y_AXIS_LABEL};
use crate::state::ChartState;

// ---------------------------------------------------------------------------
// Latency plot (central panel)
// ---------------------------------------------------------------------------

/// Render the latency line chart in the central panel.
pub fn latency_plot(ui: &mut Ui, state: &ChartState) {
    let chart = &state.chart;

    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(&chart.title);
    });

    let mut plot = Plot::new("latency_plot")
        .x_axis_label(X_AXIS_LABEL)
        .y_axis_label(Y_AXIS_LABEL)
        .show_grid(Vec2b::new(true, true))
        // Tight to the data extent, no padding.
        .auto_bounds(Vec2b::new(true, true))
        .set_margin_fraction(Vec2::ZERO)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true);

    if let Some(categories) = chart.x_categories.clone() {
        plot = plot.x_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            category_at(&categories, mark.value)
                .unwrap_or_default()
                .to_string()
        });
    }

    plot.show(ui, |plot_ui| {
        let line = Line::new(PlotPoints::from(chart.points.clone()))
            .color(Color32::LIGHT_BLUE)
            .width(1.5);

        let markers = Points::new(PlotPoints::from(chart.points.clone()))
            .shape(MarkerShape::Circle)
            .filled(true)
            .radius(3.0)
            .color(Color32::LIGHT_BLUE);

        plot_ui.line(line);
        plot_ui.points(markers);
    });
}
