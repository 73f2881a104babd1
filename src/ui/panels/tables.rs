// EHR Log Analyzer - ui/panels/tables.rs
//
// Virtual-scrolling table for the active tab.
//
// Uses egui's `ScrollArea::show_rows`, so only the rows in the viewport
// are laid out regardless of how many records the log produced. Rows are
// addressed through `state.filtered_indices`; the collections themselves
// are never reordered.

use crate::app::state::AppState;
use crate::core::model::{Category, ParseResult};
use crate::ui::theme;

/// Column titles and widths (points) per tab. The last column takes the
/// remaining width.
fn columns(category: Category) -> &'static [(&'static str, f32)] {
    match category {
        Category::Players => &[
            ("Name", 200.0),
            ("Friend Code", 160.0),
            ("Hashed PUID", 280.0),
            ("Platform", 120.0),
            ("Client ID", 0.0),
        ],
        Category::Rpcs => &[
            ("Player ID", 90.0),
            ("Player Name", 200.0),
            ("RPC Type", 260.0),
            ("Count", 0.0),
        ],
        Category::Chats => &[("Time", 90.0), ("Sender", 200.0), ("Message", 0.0)],
        Category::EacReports => &[
            ("Time", 90.0),
            ("Severity", 80.0),
            ("Report", 0.0),
        ],
    }
}

/// Render the table for the active tab (central area).
pub fn render(ui: &mut egui::Ui, state: &AppState) {
    let Some(ref result) = state.result else {
        return;
    };
    let category = state.active_tab;
    let cols = columns(category);

    header(ui, cols);
    ui.separator();

    let visible = state.filtered_indices.len();
    if visible == 0 {
        ui.centered_and_justified(|ui| {
            if result.len_of(category) == 0 {
                ui.label(format!("No {} found in this log.", category.label()));
            } else {
                ui.label("No results match the current filters.");
            }
        });
        return;
    }

    let body_colour = theme::row_text_colour(state.config.dark_mode);

    egui::ScrollArea::vertical()
        .id_salt(("table", category))
        .auto_shrink([false; 2])
        .show_rows(ui, theme::ROW_HEIGHT, visible, |ui, row_range| {
            for display_idx in row_range {
                let Some(&idx) = state.filtered_indices.get(display_idx) else {
                    continue;
                };
                row(ui, result, category, idx, cols, body_colour);
            }
        });
}

fn header(ui: &mut egui::Ui, cols: &[(&str, f32)]) {
    ui.horizontal(|ui| {
        for &(title, width) in cols {
            cell(ui, width, egui::RichText::new(title).strong());
        }
    });
}

fn row(
    ui: &mut egui::Ui,
    result: &ParseResult,
    category: Category,
    idx: usize,
    cols: &[(&str, f32)],
    body_colour: egui::Color32,
) {
    let text = |s: &str| egui::RichText::new(s).color(body_colour);
    let mono = |s: &str| egui::RichText::new(s).monospace().color(body_colour);

    match category {
        Category::Players => {
            let Some(p) = result.players.get(idx) else {
                return;
            };
            ui.horizontal(|ui| {
                cell(ui, cols[0].1, text(&p.name));
                cell(ui, cols[1].1, mono(&p.friend_code));
                cell(ui, cols[2].1, mono(&p.hashed_puid));
                cell(ui, cols[3].1, text(&p.platform));
                cell(ui, cols[4].1, mono(&p.client_id));
            });
        }
        Category::Rpcs => {
            let Some(r) = result.rpcs.get(idx) else {
                return;
            };
            ui.horizontal(|ui| {
                cell(ui, cols[0].1, mono(&r.player_id));
                cell(ui, cols[1].1, text(&r.player_name));
                cell(ui, cols[2].1, text(&r.rpc_type));
                cell(ui, cols[3].1, mono(&r.count.to_string()).strong());
            });
        }
        Category::Chats => {
            let Some(c) = result.chats.get(idx) else {
                return;
            };
            ui.horizontal(|ui| {
                cell(ui, cols[0].1, mono(&c.timestamp));
                cell(ui, cols[1].1, text(&c.sender).strong());
                cell(ui, cols[2].1, text(&c.message));
            });
        }
        Category::EacReports => {
            let Some(r) = result.eac_reports.get(idx) else {
                return;
            };
            let tint_rect = egui::Rect::from_min_size(
                ui.cursor().min,
                egui::vec2(ui.available_width(), theme::ROW_HEIGHT),
            );
            ui.painter()
                .rect_filled(tint_rect, 0.0, theme::report_bg_colour(r.severity));

            let response = ui
                .horizontal(|ui| {
                    cell(ui, cols[0].1, mono(&r.timestamp));
                    cell(
                        ui,
                        cols[1].1,
                        egui::RichText::new(r.severity.label())
                            .strong()
                            .color(theme::report_colour(r.severity)),
                    );
                    cell(ui, cols[2].1, text(&r.report));
                })
                .response;
            // Full entry text on hover; the report column is often a fragment.
            response.on_hover_ui(|ui| {
                ui.set_max_width(640.0);
                ui.label(egui::RichText::new(&r.full_text).monospace().small());
            });
        }
    }
}

/// One fixed-width, single-line cell. A width of 0 fills the rest of the row.
fn cell(ui: &mut egui::Ui, width: f32, text: impl Into<egui::WidgetText>) {
    let width = if width > 0.0 {
        width
    } else {
        ui.available_width().max(80.0)
    };
    ui.allocate_ui_with_layout(
        egui::vec2(width, theme::ROW_HEIGHT),
        egui::Layout::left_to_right(egui::Align::Center),
        |ui| {
            ui.set_min_width(width);
            ui.add(egui::Label::new(text).truncate());
        },
    );
}
