// EHR Log Analyzer - ui/theme.rs
//
// Colour scheme, report severity colour mapping, and layout constants.
// No dependencies on app state or business logic.

use crate::core::model::ReportSeverity;
use egui::Color32;

/// Text colour for a report severity.
pub fn report_colour(severity: ReportSeverity) -> Color32 {
    match severity {
        ReportSeverity::Fatal => Color32::from_rgb(239, 68, 68), // Red 500
        ReportSeverity::Error => Color32::from_rgb(245, 158, 11), // Amber 500
    }
}

/// Subtle row background for a report severity.
pub fn report_bg_colour(severity: ReportSeverity) -> Color32 {
    match severity {
        ReportSeverity::Fatal => Color32::from_rgba_premultiplied(239, 68, 68, 28),
        ReportSeverity::Error => Color32::from_rgba_premultiplied(245, 158, 11, 20),
    }
}

/// Stat card accents, in card order: players, RPC events, chat, EAC.
pub const CARD_PLAYERS: Color32 = Color32::from_rgb(0, 165, 255);
pub const CARD_RPCS: Color32 = Color32::from_rgb(0, 255, 165);
pub const CARD_CHATS: Color32 = Color32::from_rgb(0, 165, 255);
pub const CARD_EAC: Color32 = Color32::from_rgb(239, 68, 68);

/// Drop zone outline, idle and while a file hovers over the window.
pub const DROP_ZONE_IDLE: Color32 = Color32::from_rgb(107, 114, 128); // Gray 500
pub const DROP_ZONE_HOVER: Color32 = Color32::from_rgb(0, 165, 255);

/// Inline error text (upload rejection, bad regex).
pub const ERROR_TEXT: Color32 = Color32::from_rgb(248, 113, 113); // Red 400

/// Primary foreground for table text.
pub fn row_text_colour(dark_mode: bool) -> Color32 {
    if dark_mode {
        Color32::from_rgb(243, 244, 246) // Gray 100
    } else {
        Color32::from_rgb(17, 24, 39) // Gray 900
    }
}

/// Apply the configured theme and body font size to the context.
pub fn apply(ctx: &egui::Context, dark_mode: bool, font_size: f32) {
    ctx.set_visuals(if dark_mode {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    });
    ctx.style_mut(|style| {
        for (text_style, font_id) in style.text_styles.iter_mut() {
            font_id.size = match text_style {
                egui::TextStyle::Heading => font_size * 1.4,
                egui::TextStyle::Small => font_size * 0.75,
                _ => font_size,
            };
        }
    });
}

/// Layout constants.
pub const ROW_HEIGHT: f32 = 22.0;
pub const CARD_WIDTH: f32 = 180.0;
pub const CARD_HEIGHT: f32 = 72.0;
pub const DROP_ZONE_HEIGHT: f32 = 220.0;
pub const SEARCH_WIDTH: f32 = 260.0;
