// EHR Log Analyzer - gui.rs
//
// Top-level eframe::App implementation.
// Wires together all UI panels, file intake (picker and drag-and-drop),
// and the background load lifecycle.

use crate::app::load::{LoadManager, LoadProgress, LoadSource};
use crate::app::state::AppState;
use crate::core::export::ExportFormat;
use crate::core::intake::CandidateFile;
use crate::ui;
use crate::util::constants;
use std::sync::Arc;

/// The EHR Log Analyzer application.
pub struct AnalyzerApp {
    pub state: AppState,
    pub load_manager: LoadManager,
}

impl AnalyzerApp {
    /// Create a new application instance with the given state.
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            load_manager: LoadManager::new(),
        }
    }

    /// Validate a selection and, if accepted, start loading it.
    ///
    /// `dropped_bytes` supplies content for drops that carry no filesystem
    /// path (e.g. on the web or from some file managers).
    fn handle_selection(
        &mut self,
        candidates: &[CandidateFile],
        dropped_bytes: Option<Arc<[u8]>>,
    ) {
        let Some(file) = self.state.accept_selection(candidates) else {
            return;
        };

        let source = match (file.path, dropped_bytes) {
            (Some(path), _) => LoadSource::Path(path),
            (None, Some(bytes)) => LoadSource::Bytes {
                name: file.name,
                bytes,
            },
            (None, None) => {
                tracing::warn!(file = %file.name, "Dropped file has neither path nor content");
                self.state.upload_error = Some(constants::INVALID_LOG_MESSAGE.to_string());
                return;
            }
        };

        self.state.begin_load(&source.name());
        self.load_manager
            .start_load(source, self.state.config.max_file_size);
    }

    /// Collect files hovering over or dropped onto the window.
    fn handle_drag_and_drop(&mut self, ctx: &egui::Context) {
        let (hovering, dropped) = ctx.input(|i| {
            (
                !i.raw.hovered_files.is_empty(),
                i.raw.dropped_files.clone(),
            )
        });
        self.state.drag_hover = hovering;

        if dropped.is_empty() {
            return;
        }

        let candidates: Vec<CandidateFile> = dropped
            .iter()
            .map(|f| {
                let name = if f.name.is_empty() {
                    f.path
                        .as_deref()
                        .map(crate::platform::fs::display_name)
                        .unwrap_or_default()
                } else {
                    f.name.clone()
                };
                let size = match (&f.bytes, &f.path) {
                    (Some(bytes), _) => Some(bytes.len() as u64),
                    (None, Some(path)) => crate::platform::fs::candidate_file(path).size,
                    (None, None) => None,
                };
                CandidateFile {
                    name,
                    media_type: Some(f.mime.clone()).filter(|m| !m.is_empty()),
                    path: f.path.clone(),
                    size,
                }
            })
            .collect();

        let bytes = dropped.first().and_then(|f| f.bytes.clone());
        self.handle_selection(&candidates, bytes);
    }

    /// Ask for a destination and export the visible rows of the active tab.
    fn export_dialog(&mut self, format: ExportFormat) {
        let file_name = format.default_file_name(self.state.active_tab);
        let filter_name = match format {
            ExportFormat::Csv => "CSV",
            ExportFormat::Json => "JSON",
        };
        let Some(dest) = rfd::FileDialog::new()
            .add_filter(filter_name, &[format.extension()])
            .set_file_name(&file_name)
            .save_file()
        else {
            return;
        };

        match self.state.export_visible(&dest, format) {
            Ok(n) => {
                self.state.status_message =
                    format!("Exported {n} rows to {}.", dest.display());
            }
            Err(e) => {
                tracing::warn!(path = %dest.display(), error = %e, "Export failed");
                self.state.status_message = format!("{filter_name} export failed: {e}");
            }
        }
    }
}

impl eframe::App for AnalyzerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Poll for load progress
        let messages = self
            .load_manager
            .poll_progress(constants::MAX_LOAD_MESSAGES_PER_FRAME);
        for msg in messages {
            match msg {
                LoadProgress::Started { name } => {
                    self.state.begin_load(&name);
                }
                LoadProgress::Completed {
                    name,
                    result,
                    duration,
                } => {
                    self.state.set_result(name, result, duration);
                }
                LoadProgress::Failed { name, error } => {
                    self.state.fail_load(&name, &error);
                }
            }
        }
        // Repaint while loading so the spinner animates and the result
        // appears as soon as it arrives.
        if self.state.loading || self.load_manager.is_active() {
            ctx.request_repaint();
        }

        self.handle_drag_and_drop(ctx);

        // pending_path: set by the upload panel's Browse button, the File menu or the CLI.
        if let Some(path) = self.state.pending_path.take() {
            let candidate = crate::platform::fs::candidate_file(&path);
            self.handle_selection(std::slice::from_ref(&candidate), None);
        }

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Log File\u{2026}").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("HTML log", constants::HTML_EXTENSIONS)
                            .pick_file()
                        {
                            self.state.pending_path = Some(path);
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    // Export -- enabled only when the active tab has visible rows
                    let has_rows = self.state.visible_count() > 0;
                    ui.add_enabled_ui(has_rows, |ui| {
                        let default_format = self.state.config.export_format;
                        let label = format!(
                            "Export {} ({})\u{2026}",
                            self.state.active_tab.label(),
                            default_format.extension().to_uppercase()
                        );
                        if ui.button(label).clicked() {
                            self.export_dialog(default_format);
                            ui.close_menu();
                        }
                        ui.menu_button("Export As", |ui| {
                            if ui.button("CSV\u{2026}").clicked() {
                                self.export_dialog(ExportFormat::Csv);
                                ui.close_menu();
                            }
                            if ui.button("JSON\u{2026}").clicked() {
                                self.export_dialog(ExportFormat::Json);
                                ui.close_menu();
                            }
                        });
                    });
                    ui.separator();
                    let has_result = self.state.result.is_some();
                    ui.add_enabled_ui(has_result, |ui| {
                        if ui.button("Upload New File").clicked() {
                            self.state.clear();
                            ui.close_menu();
                        }
                    });
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.menu_button("View", |ui| {
                    let has_result = self.state.result.is_some();
                    ui.add_enabled_ui(has_result, |ui| {
                        if ui.button("Log Summary").clicked() {
                            self.state.show_summary = true;
                            ui.close_menu();
                        }
                    });
                    ui.separator();
                    if ui.button("About").clicked() {
                        self.state.show_about = true;
                        ui.close_menu();
                    }
                });

                if self.state.result.is_some() {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Upload New File").clicked() {
                            self.state.clear();
                        }
                    });
                }
            });
        });

        // Status bar
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if self.state.loading {
                    ui.spinner();
                }
                ui.label(&self.state.status_message);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if let Some(ref name) = self.state.loaded_file {
                        ui.label(egui::RichText::new(name).monospace().weak());
                    }
                    if self.state.debug_mode {
                        ui.label(egui::RichText::new("DEBUG").small().weak());
                    }
                });
            });
        });

        // Central panel: upload screen, or cards + filters + table
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.result.is_none() {
                ui::panels::upload::render(ui, &mut self.state);
                return;
            }
            ui::panels::stats::render(ui, &self.state);
            ui.add_space(8.0);
            ui::panels::filters::render(ui, &mut self.state);
            ui.separator();
            ui::panels::tables::render(ui, &self.state);
        });

        // Dialogs (modal-ish)
        ui::panels::summary::render(ctx, &mut self.state);
        ui::panels::about::render(ctx, &mut self.state);
    }
}
