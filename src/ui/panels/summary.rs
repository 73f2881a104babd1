// EHR Log Analyzer - ui/panels/summary.rs
//
// Log summary window: headline counts, the chat time span, and the most
// frequent RPC types across all players.

use crate::app::state::AppState;
use crate::ui::theme;

/// Number of RPC types listed in the summary window.
const TOP_RPC_TYPES: usize = 15;

/// Render the summary dialog (if `state.show_summary` is true).
pub fn render(ctx: &egui::Context, state: &mut AppState) {
    if !state.show_summary {
        return;
    }

    let mut open = true;
    egui::Window::new("Log Summary")
        .open(&mut open)
        .collapsible(false)
        .resizable(true)
        .min_width(420.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            let Some(ref metrics) = state.metrics else {
                ui.label("No log file has been loaded yet.");
                return;
            };

            ui.strong("Overview");
            egui::Grid::new("summary_overview")
                .num_columns(2)
                .spacing([16.0, 4.0])
                .show(ui, |ui| {
                    if let Some(ref name) = state.loaded_file {
                        ui.label("File:");
                        ui.label(egui::RichText::new(name).monospace());
                        ui.end_row();
                    }

                    ui.label("Players:");
                    ui.label(metrics.total_players.to_string());
                    ui.end_row();

                    ui.label("RPC events:");
                    ui.label(metrics.total_rpc_events.to_string());
                    ui.end_row();

                    ui.label("Chat messages:");
                    ui.label(metrics.chat_messages.to_string());
                    ui.end_row();

                    ui.label("EAC reports:");
                    let eac_colour = if metrics.eac_reports > 0 {
                        theme::CARD_EAC
                    } else {
                        ui.style().visuals.text_color()
                    };
                    ui.colored_label(
                        eac_colour,
                        format!("{} ({} fatal)", metrics.eac_reports, metrics.fatal_reports),
                    );
                    ui.end_row();

                    ui.label("Chat span:");
                    let span = match metrics.chat_span {
                        Some((first, last)) if first == last => {
                            first.format("%H:%M:%S").to_string()
                        }
                        Some((first, last)) => format!(
                            "{} \u{2013} {}",
                            first.format("%H:%M:%S"),
                            last.format("%H:%M:%S")
                        ),
                        None => "--".to_string(),
                    };
                    ui.label(egui::RichText::new(span).monospace());
                    ui.end_row();

                    if let Some(duration) = state.load_duration {
                        ui.label("Parse time:");
                        ui.label(format!("{:.2}s", duration.as_secs_f64()));
                        ui.end_row();
                    }
                });

            if !metrics.top_rpc_types.is_empty() {
                ui.add_space(8.0);
                ui.separator();
                ui.strong("Most frequent RPC types");

                egui::ScrollArea::vertical()
                    .id_salt("summary_rpc_types")
                    .max_height(260.0)
                    .show(ui, |ui| {
                        egui::Grid::new("summary_rpc_table")
                            .num_columns(2)
                            .striped(true)
                            .spacing([12.0, 3.0])
                            .show(ui, |ui| {
                                ui.strong("RPC Type");
                                ui.strong("Count");
                                ui.end_row();

                                for (rpc_type, count) in
                                    metrics.top_rpc_types.iter().take(TOP_RPC_TYPES)
                                {
                                    ui.label(rpc_type);
                                    ui.label(egui::RichText::new(count.to_string()).monospace());
                                    ui.end_row();
                                }
                            });
                    });
            }
        });

    if !open {
        state.show_summary = false;
    }
}
