//! Grades Chart Main Application
//! Main window with the control bar and chart viewer.

use crate::charts::StaticChartRenderer;
use crate::config::{CHART_IMAGE_SIZE, DEFAULT_CHART_IMAGE_NAME, DEFAULT_EXPORT_NAME};
use crate::data::DataLoader;
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use anyhow::Context;
use egui::TopBottomPanel;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Main application window.
pub struct GradesApp {
    loader: DataLoader,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
}

impl Default for GradesApp {
    fn default() -> Self {
        Self {
            loader: DataLoader::default(),
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(),
        }
    }
}

impl GradesApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self::default()
    }

    /// Ask for a CSV file and load it.
    fn handle_load_csv(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .set_title("Select CSV File")
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        else {
            return; // User cancelled
        };

        self.load_file(&path);
    }

    /// Load `path` and refresh the chart and table. On failure the previous
    /// data stays on screen.
    pub fn load_file(&mut self, path: &Path) {
        match self.loader.load_csv(path) {
            Ok(stats) => {
                let series = self.loader.chart_series().unwrap_or_default();
                let rows = self.loader.summary_rows();
                self.chart_viewer.set_data(series, rows);

                self.control_panel.file_name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string());
                self.control_panel.export_enabled = self.loader.has_data();

                let mut status = format!("Loaded {} rows", stats.counted_rows());
                if stats.skipped_lines > 0 {
                    status.push_str(&format!(" ({} skipped)", stats.skipped_lines));
                }
                self.control_panel.set_status(&status);
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "Failed to load CSV");
                self.control_panel
                    .set_error(&format!("Error processing CSV file: {}", e));
            }
        }
    }

    /// Ask for a destination and export the aggregated CSV.
    fn handle_export_csv(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .set_title("Export Data")
            .add_filter("CSV Files", &["csv"])
            .set_file_name(DEFAULT_EXPORT_NAME)
            .save_file()
        else {
            return;
        };

        self.export_file(&path);
    }

    pub fn export_file(&mut self, path: &Path) {
        match self.loader.export_csv(path) {
            Ok(()) => self.control_panel.set_success("Data exported successfully."),
            Err(e) => {
                error!(path = %path.display(), error = %e, "Export failed");
                self.control_panel
                    .set_error(&format!("Error exporting data: {}", e));
            }
        }
    }

    fn handle_save_chart_png(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .set_title("Save Chart")
            .add_filter("PNG Image", &["png"])
            .set_file_name(DEFAULT_CHART_IMAGE_NAME)
            .save_file()
        else {
            return;
        };

        match self.save_chart_png(path) {
            Ok(path) => {
                info!(path = %path.display(), "Chart image written");
                self.control_panel.set_success("Chart saved successfully.");
            }
            Err(e) => {
                error!(error = ?e, "Chart save failed");
                self.control_panel
                    .set_error(&format!("Error saving chart: {:#}", e));
            }
        }
    }

    fn save_chart_png(&self, path: PathBuf) -> anyhow::Result<PathBuf> {
        let series = self.loader.chart_series().context("No data loaded")?;
        StaticChartRenderer::render_png(&series, &path, CHART_IMAGE_SIZE)
            .with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }

    pub fn control_panel(&self) -> &ControlPanel {
        &self.control_panel
    }

    pub fn chart_viewer(&self) -> &ChartViewer {
        &self.chart_viewer
    }
}

impl eframe::App for GradesApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        TopBottomPanel::top("control_panel").show(ctx, |ui| {
            let action = self.control_panel.show(ui);

            match action {
                ControlPanelAction::LoadCsv => self.handle_load_csv(),
                ControlPanelAction::ExportCsv => self.handle_export_csv(),
                ControlPanelAction::SaveChartPng => self.handle_save_chart_png(),
                ControlPanelAction::None => {}
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_file_updates_views() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("grades.csv");
        fs::write(&path, "Grade,Internet\nB,yes\nA,no\nshort\n").unwrap();

        let mut app = GradesApp::default();
        app.load_file(&path);

        assert!(app.control_panel().export_enabled);
        assert_eq!(app.control_panel().file_name.as_deref(), Some("grades.csv"));
        assert_eq!(app.control_panel().status(), "Loaded 2 rows (1 skipped)");
        assert_eq!(app.chart_viewer().rows.len(), 2);
        assert_eq!(app.chart_viewer().rows[0].grade, "A");
    }

    #[test]
    fn test_failed_load_keeps_views() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("good.csv");
        let bad = dir.path().join("bad.csv");
        fs::write(&good, "Grade,Internet\nC,yes\n").unwrap();
        fs::write(&bad, "Grade\nC\n").unwrap();

        let mut app = GradesApp::default();
        app.load_file(&bad);
        assert!(!app.control_panel().export_enabled);

        app.load_file(&good);
        app.load_file(&bad);

        assert!(app
            .control_panel()
            .status()
            .starts_with("Error processing CSV file:"));
        assert_eq!(app.control_panel().file_name.as_deref(), Some("good.csv"));
        assert!(app.control_panel().export_enabled);
        assert_eq!(app.chart_viewer().rows.len(), 1);
    }

    #[test]
    fn test_export_reports_status() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("grades.csv");
        fs::write(&input, "Grade,Internet\nD,no\n").unwrap();

        let mut app = GradesApp::default();
        app.load_file(&input);
        app.export_file(&dir.path().join("AggregatedData.csv"));
        assert_eq!(app.control_panel().status(), "Data exported successfully.");

        app.export_file(&dir.path().join("missing_dir").join("out.csv"));
        assert!(app
            .control_panel()
            .status()
            .starts_with("Error exporting data:"));
    }
}
