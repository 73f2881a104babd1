// EHR Log Analyzer - ui/panels/upload.rs
//
// Upload screen: shown while no result is loaded. A drop zone that
// highlights while a file hovers over the window, a Browse button, the
// loading spinner, and the last rejection or parse error.
//
// The panel only records the picked path in `state.pending_path`;
// gui.rs validates it and starts the load.

use crate::app::state::AppState;
use crate::ui::theme;
use crate::util::constants;

/// Render the upload screen (central area).
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.heading(constants::APP_NAME);
        ui.label(
            egui::RichText::new(
                "Extract players, RPC events, chat and EAC reports from an EHR log.",
            )
            .weak(),
        );
        ui.add_space(24.0);

        let outline = if state.drag_hover {
            theme::DROP_ZONE_HOVER
        } else {
            theme::DROP_ZONE_IDLE
        };

        egui::Frame::group(ui.style())
            .stroke(egui::Stroke::new(2.0, outline))
            .inner_margin(egui::Margin::same(24))
            .show(ui, |ui| {
                ui.set_min_height(theme::DROP_ZONE_HEIGHT);
                ui.set_width(ui.available_width().min(560.0));
                ui.vertical_centered(|ui| {
                    ui.add_space(40.0);
                    if state.loading {
                        ui.spinner();
                        ui.add_space(8.0);
                        ui.label("Parsing log file\u{2026}");
                        return;
                    }

                    let prompt = if state.drag_hover {
                        "Release to load the file"
                    } else {
                        "Drop an EHR log file (.html) here"
                    };
                    ui.label(egui::RichText::new(prompt).size(18.0).strong());
                    ui.add_space(8.0);
                    ui.label(egui::RichText::new("or").weak());
                    ui.add_space(8.0);

                    if ui.button("Browse\u{2026}").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("HTML log", constants::HTML_EXTENSIONS)
                            .pick_file()
                        {
                            state.pending_path = Some(path);
                        }
                    }
                });
            });

        if let Some(ref error) = state.upload_error {
            ui.add_space(12.0);
            ui.colored_label(theme::ERROR_TEXT, error);
        }
    });
}
