use eframe::egui;
use glam::Vec2;
use tracing::{debug, info};

use crate::config::WalkbotSettings;
use crate::rendering::{RenderStats, Stage};
use crate::ui::components::StatusMessage;
use crate::ui::main_app::{show_overlay, show_world_view};
use crate::world::rig::MissingJoint;
use crate::world::{InputSource, InputSubscription, PointerNormalized, Simulation};

/// The eframe application: captures input, advances the simulation once per
/// frame and draws the stage with its overlay.
pub struct WalkbotApp {
    simulation: Simulation,
    stage: Stage,
    input: InputSource,
    last_pointer: Option<egui::Pos2>,
    last_stats: RenderStats,
}

impl WalkbotApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: WalkbotSettings,
        input: InputSource,
        subscription: InputSubscription,
    ) -> Result<Self, MissingJoint> {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());
        let stage = Stage::new(&settings)?;
        let simulation = Simulation::new(&settings, subscription);
        info!("Walkbot ready, speed mode {:?}", settings.locomotion.speed_mode);
        Ok(Self {
            simulation,
            stage,
            input,
            last_pointer: None,
            last_stats: RenderStats::default(),
        })
    }

    /// Publish the pointer relative to the whole window whenever it moves.
    fn capture_pointer(&mut self, ctx: &egui::Context) {
        let Some(pos) = ctx.input(|i| i.pointer.latest_pos()) else {
            return;
        };
        if self.last_pointer == Some(pos) {
            return;
        }
        self.last_pointer = Some(pos);

        let screen = ctx.screen_rect();
        let pointer = PointerNormalized::from_viewport(
            Vec2::new(pos.x - screen.left(), pos.y - screen.top()),
            Vec2::new(screen.width(), screen.height()),
        );
        self.input.pointer_moved(pointer);
    }
}

impl eframe::App for WalkbotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.capture_pointer(ctx);

        let (elapsed, delta) = ctx.input(|i| (i.time, i.stable_dt));
        let report = self.simulation.tick(elapsed, delta);
        if report.events > 0 {
            debug!("Applied {} input events", report.events);
        }
        self.stage.sync(&self.simulation);

        let stats = show_world_view(ctx, &mut self.stage, &self.input);
        if stats.faces.abs_diff(self.last_stats.faces) > 64 {
            debug!(
                "Drawing {} faces ({} culled, {} clipped, {} shadow)",
                stats.faces, stats.culled, stats.clipped, stats.shadows
            );
        }
        self.last_stats = stats;

        show_overlay(ctx, &StatusMessage::for_simulation(&self.simulation));
        ctx.request_repaint();
    }
}

impl Drop for WalkbotApp {
    fn drop(&mut self) {
        self.simulation.shutdown();
    }
}
