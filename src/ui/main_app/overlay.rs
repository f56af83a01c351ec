use eframe::egui::{self, Align2, Color32, RichText, Stroke};

use crate::ui::components::StatusMessage;
use crate::ui::{HINT, SUBTITLE, TITLE};

/// Title and subtitle at the top, usage hint at the bottom, status in the corner.
pub fn show_overlay(ctx: &egui::Context, status: &StatusMessage) {
    egui::Area::new(egui::Id::new("title"))
        .anchor(Align2::CENTER_TOP, egui::vec2(0.0, 32.0))
        .interactable(false)
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(RichText::new(TITLE).size(40.0).strong().color(Color32::WHITE));
                ui.add_space(8.0);
                ui.label(RichText::new(SUBTITLE).size(18.0).color(Color32::from_gray(209)));
            });
        });

    egui::Area::new(egui::Id::new("hint"))
        .anchor(Align2::CENTER_BOTTOM, egui::vec2(0.0, -32.0))
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::new()
                .fill(Color32::from_black_alpha(77))
                .stroke(Stroke::new(1.0, Color32::from_white_alpha(51)))
                .corner_radius(20.0)
                .inner_margin(12.0)
                .show(ui, |ui| {
                    ui.label(RichText::new(HINT).size(14.0).color(Color32::WHITE));
                });
        });

    egui::Area::new(egui::Id::new("status"))
        .anchor(Align2::LEFT_TOP, egui::vec2(12.0, 12.0))
        .interactable(false)
        .show(ctx, |ui| status.show(ui));
}
