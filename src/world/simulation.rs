use glam::Vec3;
use tracing::{debug, info};

use crate::config::WalkbotSettings;
use crate::world::avatar::{FigureState, FrameInput, LocomotionController};
use crate::world::events::{InputEvent, InputSubscription, PointerNormalized};
use crate::world::target::TargetSelection;

/// What changed during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameReport {
    pub walking: bool,
    pub started_walking: bool,
    pub arrived: bool,
    pub events: usize,
}

/// Owns the target, the pointer and the figure's pose, and advances them once per frame.
pub struct Simulation {
    controller: LocomotionController,
    targets: TargetSelection,
    pointer: PointerNormalized,
    figure: FigureState,
    subscription: Option<InputSubscription>,
    frames: u64,
}

impl Simulation {
    pub fn new(settings: &WalkbotSettings, subscription: InputSubscription) -> Self {
        let locomotion = settings.locomotion.clone();
        let figure = FigureState::at(Vec3::from_array(locomotion.start_position));
        Self {
            targets: TargetSelection::new(locomotion.target_height),
            controller: LocomotionController::new(locomotion, settings.head.clone()),
            pointer: PointerNormalized::CENTER,
            figure,
            subscription: Some(subscription),
            frames: 0,
        }
    }

    /// Apply queued input, then run the controller for this frame.
    pub fn tick(&mut self, elapsed: f64, delta: f32) -> FrameReport {
        let events = self.apply_input();
        let was_walking = self.figure.walking;

        let input = FrameInput {
            elapsed,
            delta,
            target: self.targets.current(),
            pointer: self.pointer,
        };
        self.controller.update(&mut self.figure, &input);
        self.frames += 1;

        let report = FrameReport {
            walking: self.figure.walking,
            started_walking: !was_walking && self.figure.walking,
            arrived: was_walking && !self.figure.walking,
            events,
        };
        if report.started_walking {
            if let Some(target) = input.target {
                info!("Walking from {} to {}", self.figure.position, target);
            }
        }
        if report.arrived {
            info!("Arrived at {} after {} frames", self.figure.position, self.frames);
        }
        report
    }

    fn apply_input(&mut self) -> usize {
        let Some(subscription) = &self.subscription else {
            return 0;
        };
        let mut count = 0;
        for event in subscription.drain() {
            match event {
                InputEvent::PointerMoved(pointer) => self.pointer = pointer,
                InputEvent::GroundClicked(hit) => {
                    let target = self.targets.select(hit);
                    debug!("Ground clicked at {}, target {}", hit, target);
                }
            }
            count += 1;
        }
        count
    }

    /// Release the input subscription. Later ticks keep animating without input.
    pub fn shutdown(&mut self) {
        if self.subscription.take().is_some() {
            info!("Simulation stopped after {} frames", self.frames);
        }
    }

    pub fn figure(&self) -> &FigureState {
        &self.figure
    }

    pub fn target(&self) -> Option<Vec3> {
        self.targets.current()
    }

    pub fn selections(&self) -> u64 {
        self.targets.selections()
    }

    pub fn pointer(&self) -> PointerNormalized {
        self.pointer
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn is_listening(&self) -> bool {
        self.subscription.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::events::input_channel;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_click_then_walk() {
        let (source, subscription) = input_channel();
        let mut sim = Simulation::new(&WalkbotSettings::default(), subscription);

        let report = sim.tick(0.0, DT);
        assert!(!report.walking);

        source.ground_clicked(Vec3::new(1.0, -2.0, 0.0));
        let report = sim.tick(DT as f64, DT);
        assert!(report.started_walking);
        assert_eq!(report.events, 1);
        assert_eq!(sim.target(), Some(Vec3::new(1.0, -1.0, 0.0)));

        let mut arrived = false;
        for frame in 2..200 {
            if sim.tick(frame as f64 * DT as f64, DT).arrived {
                arrived = true;
                break;
            }
        }
        assert!(arrived);
        // The target stays latched after arrival.
        assert!(sim.target().is_some());
        assert!(!sim.figure().walking);
    }

    #[test]
    fn test_pointer_events_reach_the_head() {
        let (source, subscription) = input_channel();
        let mut sim = Simulation::new(&WalkbotSettings::default(), subscription);
        source.pointer_moved(PointerNormalized::new(1.0, 0.0));
        sim.tick(0.0, DT);
        assert_eq!(sim.pointer(), PointerNormalized::new(1.0, 0.0));
        assert!(sim.figure().joints.head_yaw > 0.0);
    }

    #[test]
    fn test_shutdown_disconnects_publishers() {
        let (source, subscription) = input_channel();
        let mut sim = Simulation::new(&WalkbotSettings::default(), subscription);
        assert!(source.pointer_moved(PointerNormalized::CENTER));
        sim.shutdown();
        assert!(!sim.is_listening());
        assert!(!source.pointer_moved(PointerNormalized::CENTER));
        // Still ticks.
        sim.tick(0.0, DT);
        assert_eq!(sim.frames(), 1);
    }
}
