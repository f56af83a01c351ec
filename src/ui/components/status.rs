use eframe::egui;
use egui::Color32;

use crate::world::Simulation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
}

impl StatusLevel {
    fn color(&self) -> Color32 {
        match self {
            StatusLevel::Info => Color32::from_rgb(23, 162, 184),
            StatusLevel::Success => Color32::from_rgb(40, 167, 69),
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            StatusLevel::Info => "ⓘ",
            StatusLevel::Success => "✓",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub level: StatusLevel,
    pub message: String,
    pub show_icon: bool,
}

impl StatusMessage {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Info,
            message: message.into(),
            show_icon: true,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Success,
            message: message.into(),
            show_icon: true,
        }
    }

    /// One-line summary of what the robot is doing.
    pub fn for_simulation(simulation: &Simulation) -> Self {
        let figure = simulation.figure();
        match simulation.target() {
            Some(target) if figure.walking => Self::success(format!(
                "Walking to ({:.1}, {:.1}), {:.1} left",
                target.x,
                target.z,
                figure.position.distance(target)
            )),
            Some(_) => {
                let clicks = simulation.selections();
                let plural = if clicks == 1 { "" } else { "s" };
                Self::info(format!("Arrived, {} click{} so far", clicks, plural))
            }
            None => Self::info("Idle"),
        }
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if self.show_icon {
                ui.colored_label(self.level.color(), self.level.icon());
            }
            ui.colored_label(self.level.color(), &self.message);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WalkbotSettings;
    use crate::world::events::input_channel;
    use glam::Vec3;

    #[test]
    fn test_status_tracks_walking() {
        let (source, subscription) = input_channel();
        let mut sim = Simulation::new(&WalkbotSettings::default(), subscription);
        assert_eq!(StatusMessage::for_simulation(&sim), StatusMessage::info("Idle"));

        source.ground_clicked(Vec3::new(0.0, -2.0, 1.0));
        sim.tick(0.0, 1.0 / 60.0);
        let status = StatusMessage::for_simulation(&sim);
        assert_eq!(status.level, StatusLevel::Success);
        assert!(status.message.starts_with("Walking to (0.0, 1.0)"));

        for frame in 1..100 {
            sim.tick(frame as f64 / 60.0, 1.0 / 60.0);
        }
        assert_eq!(
            StatusMessage::for_simulation(&sim),
            StatusMessage::info("Arrived, 1 click so far")
        );

        source.ground_clicked(Vec3::new(0.0, -2.0, 0.5));
        for frame in 100..200 {
            sim.tick(frame as f64 / 60.0, 1.0 / 60.0);
        }
        assert_eq!(
            StatusMessage::for_simulation(&sim),
            StatusMessage::info("Arrived, 2 clicks so far")
        );
    }
}
