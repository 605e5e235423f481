//! Chart Viewer Widget
//! Central area: stacked bar chart on top, summary table underneath.

use crate::charts::ChartPlotter;
use crate::config::{APP_TITLE, CHART_HEIGHT_RATIO, WITHOUT_INTERNET_LABEL, WITH_INTERNET_LABEL};
use crate::data::{ChartSeries, SummaryRow};
use egui::{RichText, ScrollArea};

const SECTION_SPACING: f32 = 8.0;

/// Displays the chart and summary table for the current data.
#[derive(Default)]
pub struct ChartViewer {
    pub series: Option<ChartSeries>,
    pub rows: Vec<SummaryRow>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace everything shown.
    pub fn set_data(&mut self, series: ChartSeries, rows: Vec<SummaryRow>) {
        self.series = Some(series);
        self.rows = rows;
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        let Some(series) = &self.series else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        let chart_height = (ui.available_height() * CHART_HEIGHT_RATIO).max(150.0);

        ui.vertical_centered(|ui| {
            ui.label(RichText::new(APP_TITLE).size(20.0).strong());
        });
        ChartPlotter::draw_stacked_bar_chart(ui, series, chart_height);

        ui.add_space(SECTION_SPACING);
        ui.separator();
        ui.add_space(SECTION_SPACING);

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                Self::draw_summary_table(ui, &self.rows);
            });
    }

    fn draw_summary_table(ui: &mut egui::Ui, rows: &[SummaryRow]) {
        egui::Grid::new("summary_table")
            .striped(true)
            .min_col_width(120.0)
            .spacing([12.0, 4.0])
            .show(ui, |ui| {
                ui.label(RichText::new("Grade").strong());
                ui.label(RichText::new(WITH_INTERNET_LABEL).strong());
                ui.label(RichText::new(WITHOUT_INTERNET_LABEL).strong());
                ui.end_row();

                for row in rows {
                    ui.label(row.grade.as_str());
                    ui.label(row.with_internet.to_string());
                    ui.label(row.without_internet.to_string());
                    ui.end_row();
                }
            });
    }
}
