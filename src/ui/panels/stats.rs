// EHR Log Analyzer - ui/panels/stats.rs
//
// Row of four stat cards above the tables: players, RPC events, chat
// messages, EAC reports.

use crate::app::state::AppState;
use crate::ui::theme;

/// Render the stat cards. Nothing is drawn before a result is loaded.
pub fn render(ui: &mut egui::Ui, state: &AppState) {
    let Some(ref metrics) = state.metrics else {
        return;
    };

    ui.horizontal_wrapped(|ui| {
        card(ui, "Total Players", metrics.total_players.to_string(), theme::CARD_PLAYERS);
        card(ui, "RPC Events", metrics.total_rpc_events.to_string(), theme::CARD_RPCS);
        card(ui, "Chat Messages", metrics.chat_messages.to_string(), theme::CARD_CHATS);
        card(ui, "EAC Reports", metrics.eac_reports.to_string(), theme::CARD_EAC);
    });
}

fn card(ui: &mut egui::Ui, title: &str, value: String, accent: egui::Color32) {
    egui::Frame::group(ui.style())
        .stroke(egui::Stroke::new(1.5, accent))
        .inner_margin(egui::Margin::symmetric(12, 8))
        .show(ui, |ui| {
            ui.set_min_size(egui::vec2(theme::CARD_WIDTH, theme::CARD_HEIGHT));
            ui.vertical(|ui| {
                ui.label(egui::RichText::new(title).weak());
                ui.label(egui::RichText::new(value).size(26.0).strong().color(accent));
            });
        });
}
