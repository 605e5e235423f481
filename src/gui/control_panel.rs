//! Control Panel Widget
//! Top bar with load / export buttons and the status line.

use egui::{Color32, RichText};

const STATUS_OK: Color32 = Color32::from_rgb(40, 167, 69);
const STATUS_ERROR: Color32 = Color32::from_rgb(220, 53, 69);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusKind {
    Info,
    Success,
    Error,
}

/// Button row plus the current file name and status message.
pub struct ControlPanel {
    pub file_name: Option<String>,
    pub export_enabled: bool,
    status: String,
    status_kind: StatusKind,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            file_name: None,
            export_enabled: false,
            status: "Ready".to_string(),
            status_kind: StatusKind::Info,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
        self.status_kind = StatusKind::Info;
    }

    pub fn set_success(&mut self, status: &str) {
        self.status = status.to_string();
        self.status_kind = StatusKind::Success;
    }

    pub fn set_error(&mut self, status: &str) {
        self.status = status.to_string();
        self.status_kind = StatusKind::Error;
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            let load = egui::Button::new(RichText::new("📂 Load CSV").size(14.0).strong())
                .min_size(egui::vec2(120.0, 28.0));
            if ui.add(load).clicked() {
                action = ControlPanelAction::LoadCsv;
            }

            ui.add_enabled_ui(self.export_enabled, |ui| {
                let export = egui::Button::new(RichText::new("💾 Export CSV").size(14.0).strong())
                    .min_size(egui::vec2(120.0, 28.0));
                if ui.add(export).clicked() {
                    action = ControlPanelAction::ExportCsv;
                }

                let png = egui::Button::new(RichText::new("🖼 Save Chart PNG").size(14.0))
                    .min_size(egui::vec2(140.0, 28.0));
                if ui.add(png).clicked() {
                    action = ControlPanelAction::SaveChartPng;
                }
            });

            ui.separator();

            let (file_text, file_color) = match &self.file_name {
                Some(name) => (name.as_str(), ui.visuals().text_color()),
                None => ("No file selected", Color32::GRAY),
            };
            ui.label(RichText::new(file_text).size(12.0).color(file_color));
        });

        let status_color = match self.status_kind {
            StatusKind::Info => Color32::GRAY,
            StatusKind::Success => STATUS_OK,
            StatusKind::Error => STATUS_ERROR,
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));
        ui.add_space(4.0);

        action
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    LoadCsv,
    ExportCsv,
    SaveChartPng,
}
