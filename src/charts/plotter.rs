//! Chart Plotter Module
//! Interactive stacked bar chart using egui_plot.

use crate::config::{
    WITHOUT_INTERNET_LABEL, WITHOUT_INTERNET_RGB, WITH_INTERNET_LABEL, WITH_INTERNET_RGB,
    X_AXIS_LABEL, Y_AXIS_LABEL,
};
use crate::data::ChartSeries;
use egui::Color32;
use egui_plot::{Bar, BarChart, GridMark, Legend, Plot};

pub const WITH_INTERNET_COLOR: Color32 =
    Color32::from_rgb(WITH_INTERNET_RGB.0, WITH_INTERNET_RGB.1, WITH_INTERNET_RGB.2);
pub const WITHOUT_INTERNET_COLOR: Color32 =
    Color32::from_rgb(WITHOUT_INTERNET_RGB.0, WITHOUT_INTERNET_RGB.1, WITHOUT_INTERNET_RGB.2);

const BAR_WIDTH: f64 = 0.6;

/// Draws the grade / internet-access chart.
pub struct ChartPlotter;

impl ChartPlotter {
    fn bars(values: &[(String, usize)]) -> Vec<Bar> {
        values
            .iter()
            .enumerate()
            .map(|(i, (grade, count))| {
                Bar::new(i as f64, *count as f64)
                    .name(grade)
                    .width(BAR_WIDTH)
            })
            .collect()
    }

    /// Draw the stacked bar chart: one bar per grade, "Without Internet"
    /// stacked on top of "With Internet".
    pub fn draw_stacked_bar_chart(ui: &mut egui::Ui, series: &ChartSeries, height: f32) {
        let x_labels = series.grades();
        let bar_count = x_labels.len();

        let with_chart = BarChart::new(Self::bars(&series.with_internet))
            .name(WITH_INTERNET_LABEL)
            .color(WITH_INTERNET_COLOR);
        let without_chart = BarChart::new(Self::bars(&series.without_internet))
            .name(WITHOUT_INTERNET_LABEL)
            .color(WITHOUT_INTERNET_COLOR)
            .stack_on(&[&with_chart]);

        Plot::new("grades_chart")
            .height(height)
            .legend(Legend::default())
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .include_y(0.0)
            .include_x(-0.5)
            .include_x(bar_count as f64 - 0.5)
            .x_axis_label(X_AXIS_LABEL)
            .y_axis_label(Y_AXIS_LABEL)
            // One tick per bar so every grade gets a label
            .x_grid_spacer(move |_input| {
                (0..bar_count)
                    .map(|i| GridMark {
                        value: i as f64,
                        step_size: 1.0,
                    })
                    .collect()
            })
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if idx >= 0.0 && (mark.value - idx).abs() < 1e-6 {
                    x_labels.get(idx as usize).cloned().unwrap_or_default()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(with_chart);
                plot_ui.bar_chart(without_chart);
            });
    }
}
