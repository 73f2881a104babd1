// EHR Log Analyzer - ui/panels/filters.rs
//
// Tab bar and filter controls above the table: one tab per category,
// substring search, optional regex search, the category dropdown for the
// RPC and EAC tabs, and the "Showing N results" count. A rejected or
// failed load while a log is shown is reported above the tabs.

use crate::app::state::AppState;
use crate::core::model::{Category, ReportSeverity};
use crate::ui::theme;

/// Render the tab bar and the filter row.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    if let Some(error) = state.upload_error.clone() {
        ui.horizontal(|ui| {
            ui.colored_label(theme::ERROR_TEXT, error);
            if ui.small_button("Dismiss").clicked() {
                state.upload_error = None;
            }
        });
        ui.separator();
    }

    // Tabs
    let mut selected_tab = state.active_tab;
    ui.horizontal(|ui| {
        for &category in Category::all() {
            ui.selectable_value(&mut selected_tab, category, category.label());
        }
    });
    if selected_tab != state.active_tab {
        state.set_tab(selected_tab);
    }

    ui.separator();

    let mut changed = false;
    ui.horizontal(|ui| {
        ui.label("Search:");
        changed |= ui
            .add(
                egui::TextEdit::singleline(&mut state.filter_state.text_search)
                    .hint_text("Search\u{2026}")
                    .desired_width(theme::SEARCH_WIDTH),
            )
            .changed();

        ui.label("Regex:");
        let regex_response = ui.add(
            egui::TextEdit::singleline(&mut state.regex_input)
                .hint_text("optional")
                .desired_width(theme::SEARCH_WIDTH * 0.6),
        );
        if regex_response.changed() {
            state.update_regex();
        }

        if state.active_tab.has_category_filter() {
            ui.separator();
            changed |= match state.active_tab {
                Category::Rpcs => rpc_type_combo(ui, state),
                _ => severity_combo(ui, state),
            };
        }

        if !state.filter_state.is_empty() && ui.small_button("Clear").clicked() {
            state.filter_state = Default::default();
            state.regex_input.clear();
            state.regex_error = None;
            changed = true;
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(format!("Showing {} results", state.visible_count()));
        });
    });

    if let Some(ref err) = state.regex_error {
        ui.colored_label(theme::ERROR_TEXT, format!("Invalid regex: {err}"));
    }

    if changed {
        state.apply_filters();
    }
}

/// RPC type dropdown. Returns true when the selection changed.
fn rpc_type_combo(ui: &mut egui::Ui, state: &mut AppState) -> bool {
    let before = state.filter_state.rpc_type.clone();
    let selected_text = before.clone().unwrap_or_else(|| "All RPC Types".to_string());
    egui::ComboBox::from_id_salt("rpc_type_filter")
        .selected_text(selected_text)
        .show_ui(ui, |ui| {
            ui.selectable_value(&mut state.filter_state.rpc_type, None, "All RPC Types");
            for rpc_type in &state.rpc_types {
                ui.selectable_value(
                    &mut state.filter_state.rpc_type,
                    Some(rpc_type.clone()),
                    rpc_type,
                );
            }
        });
    state.filter_state.rpc_type != before
}

/// Report severity dropdown. Returns true when the selection changed.
fn severity_combo(ui: &mut egui::Ui, state: &mut AppState) -> bool {
    let before = state.filter_state.report_severity;
    let selected_text = before.map_or("All Severities", |s| s.label());
    egui::ComboBox::from_id_salt("severity_filter")
        .selected_text(selected_text)
        .show_ui(ui, |ui| {
            ui.selectable_value(&mut state.filter_state.report_severity, None, "All Severities");
            for &severity in ReportSeverity::all() {
                ui.selectable_value(
                    &mut state.filter_state.report_severity,
                    Some(severity),
                    egui::RichText::new(severity.label()).color(theme::report_colour(severity)),
                );
            }
        });
    state.filter_state.report_severity != before
}
