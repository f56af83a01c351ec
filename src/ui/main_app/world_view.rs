use eframe::egui;
use glam::Vec2;
use tracing::trace;

use crate::rendering::{RenderStats, Stage};
use crate::world::InputSource;

/// The 3D viewport. Drag orbits, scroll zooms, a click on the floor publishes a
/// ground hit for the next simulation tick.
pub fn show_world_view(
    ctx: &egui::Context,
    stage: &mut Stage,
    input: &InputSource,
) -> RenderStats {
    egui::CentralPanel::default()
        .frame(egui::Frame::NONE)
        .show(ctx, |ui| {
            let (response, painter) =
                ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());

            if response.dragged() {
                let delta = response.drag_delta();
                stage.camera.rotate(Vec2::new(delta.x, delta.y));
            }
            if response.hovered() {
                let scroll = ui.input(|i| i.smooth_scroll_delta.y);
                if scroll != 0.0 {
                    stage.camera.zoom(scroll);
                }
            }
            if response.clicked() {
                if let Some(pos) = response.interact_pointer_pos() {
                    match stage.pick_ground(pos, response.rect) {
                        Some(hit) => {
                            input.ground_clicked(hit);
                        }
                        None => trace!("Click at {:?} missed the ground", pos),
                    }
                }
            }

            stage.paint(&painter, response.rect)
        })
        .inner
}
