//! Colors and sizes shared by the form widgets.

use eframe::egui;

pub const ERROR_COLOR: egui::Color32 = egui::Color32::from_rgb(220, 53, 69);
pub const CARD_FILL: egui::Color32 = egui::Color32::from_rgb(13, 202, 240);
pub const CARD_WIDTH: f32 = 400.0;
pub const FIELD_WIDTH: f32 = 300.0;

pub fn card_frame() -> egui::Frame {
    egui::Frame::NONE
        .fill(CARD_FILL)
        .corner_radius(14.0)
        .inner_margin(egui::Margin::symmetric(20, 16))
}
