// Layout constants for the kura window

use eframe::egui;

// --- Sizing ---
pub const ICON_SIZE: f32 = 14.0;
pub const ICON_COL_WIDTH: f32 = 30.0;
pub const ROW_HEIGHT: f32 = 24.0;
pub const HEADER_HEIGHT: f32 = 20.0;
pub const ICON_CELL_WIDTH: f32 = 96.0;
pub const ICON_CELL_HEIGHT: f32 = 64.0;
pub const COMPACT_CELL_WIDTH: f32 = 180.0;

// --- Side panel constraints ---
pub const SIDE_PANEL_MIN: f32 = 100.0;
pub const SIDE_PANEL_MAX: f32 = 400.0;

// --- Tab bar ---
pub const TAB_SPACING: f32 = 6.0;

/// Render a label that truncates overflowing text with an ellipsis and uses the provided sense.
pub fn truncated_label_with_sense(
    ui: &mut egui::Ui,
    text: impl Into<egui::WidgetText>,
    sense: egui::Sense,
) -> egui::Response {
    ui.add(egui::Label::new(text).truncate().sense(sense))
}
