//! Locomotion & pose controller for the robot.
//!
//! Every frame the controller decides whether the figure is walking, steps it
//! toward the target, turns it toward its direction of travel, swings or
//! relaxes the limbs, and eases the head toward the pointer. The gait is a
//! fixed pair of sine waves; nothing here is physically simulated.

use glam::Vec3;
use std::f64::consts::PI;

use crate::config::{HeadTrackingSettings, LocomotionSettings, SpeedMode};
use crate::utils::math::{heading_yaw, lerp};
use crate::world::events::PointerNormalized;

/// Joint angles in radians. Limb values are pitch about the joint's local X axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct JointAngles {
    pub left_leg: f32,
    pub right_leg: f32,
    pub left_arm: f32,
    pub right_arm: f32,
    pub head_yaw: f32,
    pub head_pitch: f32,
}

impl JointAngles {
    pub fn limb_pitches(&self) -> [f32; 4] {
        [self.left_leg, self.right_leg, self.left_arm, self.right_arm]
    }
}

/// Mutable pose of the figure, owned by the simulation and written one-way into the rig.
#[derive(Debug, Clone, PartialEq)]
pub struct FigureState {
    pub position: Vec3,
    /// Yaw about +Y; 0 faces +Z.
    pub facing: f32,
    pub walking: bool,
    pub joints: JointAngles,
}

impl FigureState {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            facing: 0.0,
            walking: false,
            joints: JointAngles::default(),
        }
    }
}

impl Default for FigureState {
    fn default() -> Self {
        Self::at(Vec3::new(0.0, -1.0, 0.0))
    }
}

/// Everything the controller reads for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    /// Seconds since start; drives the gait phase.
    pub elapsed: f64,
    /// Seconds since the previous frame; only used in [`SpeedMode::TimeScaled`].
    pub delta: f32,
    pub target: Option<Vec3>,
    pub pointer: PointerNormalized,
}

#[derive(Debug, Clone, Default)]
pub struct LocomotionController {
    locomotion: LocomotionSettings,
    head: HeadTrackingSettings,
}

impl LocomotionController {
    pub fn new(locomotion: LocomotionSettings, head: HeadTrackingSettings) -> Self {
        Self { locomotion, head }
    }

    /// Advance `state` by one frame.
    pub fn update(&self, state: &mut FigureState, input: &FrameInput) {
        let cfg = &self.locomotion;

        // Walking is recomputed from scratch every frame.
        let remaining = input
            .target
            .map(|target| target - state.position)
            .filter(|offset| offset.length() > cfg.arrival_threshold);
        state.walking = remaining.is_some();

        if let Some(offset) = remaining {
            // A zero-length offset only happens with a negative threshold; skip the step.
            if let Some(direction) = offset.try_normalize() {
                state.position += direction * self.step_length(offset.length(), input.delta);
                state.facing = lerp(state.facing, heading_yaw(direction), cfg.turn_smoothing);
            }
            self.swing_limbs(&mut state.joints, input.elapsed);
        } else {
            self.relax_limbs(&mut state.joints);
        }

        self.track_pointer(&mut state.joints, input.pointer);
    }

    fn step_length(&self, remaining: f32, delta: f32) -> f32 {
        let cfg = &self.locomotion;
        let step = match cfg.speed_mode {
            SpeedMode::PerFrame => cfg.speed,
            SpeedMode::TimeScaled => cfg.speed * cfg.reference_fps * delta.max(0.0),
        };
        if cfg.clamp_overshoot {
            step.min(remaining)
        } else {
            step
        }
    }

    /// Legs half a cycle apart; each arm in phase with the opposite leg.
    fn swing_limbs(&self, joints: &mut JointAngles, elapsed: f64) {
        let cfg = &self.locomotion;
        let phase = elapsed * f64::from(cfg.gait_frequency);
        let forward = phase.sin() as f32;
        let back = (phase + PI).sin() as f32;

        joints.left_leg = forward * cfg.leg_amplitude;
        joints.right_leg = back * cfg.leg_amplitude;
        joints.left_arm = back * cfg.arm_amplitude;
        joints.right_arm = forward * cfg.arm_amplitude;
    }

    fn relax_limbs(&self, joints: &mut JointAngles) {
        let damping = self.locomotion.rest_damping;
        joints.left_leg = lerp(joints.left_leg, 0.0, damping);
        joints.right_leg = lerp(joints.right_leg, 0.0, damping);
        joints.left_arm = lerp(joints.left_arm, 0.0, damping);
        joints.right_arm = lerp(joints.right_arm, 0.0, damping);
    }

    fn track_pointer(&self, joints: &mut JointAngles, pointer: PointerNormalized) {
        let head = &self.head;
        joints.head_yaw = lerp(joints.head_yaw, pointer.x * head.yaw_gain, head.smoothing);
        joints.head_pitch = lerp(joints.head_pitch, pointer.y * head.pitch_gain, head.smoothing);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn controller() -> LocomotionController {
        LocomotionController::default()
    }

    fn frame(elapsed: f64, target: Option<Vec3>) -> FrameInput {
        FrameInput {
            elapsed,
            delta: 1.0 / 60.0,
            target,
            pointer: PointerNormalized::CENTER,
        }
    }

    #[test]
    fn test_no_target_is_idle() {
        let mut state = FigureState::default();
        controller().update(&mut state, &frame(0.0, None));
        assert!(!state.walking);
        assert_eq!(state.position, Vec3::new(0.0, -1.0, 0.0));
    }

    #[test]
    fn test_steps_toward_target() {
        let mut state = FigureState::default();
        let target = Vec3::new(3.0, -1.0, 4.0);
        controller().update(&mut state, &frame(0.0, Some(target)));

        assert!(state.walking);
        let expected = Vec3::new(0.6, 0.0, 0.8) * 0.05 + Vec3::new(0.0, -1.0, 0.0);
        assert!(state.position.distance(expected) < EPS);
    }

    #[test]
    fn test_within_threshold_is_arrived() {
        let mut state = FigureState::at(Vec3::new(1.0, -1.0, 1.0));
        let target = Vec3::new(1.05, -1.0, 1.05);
        controller().update(&mut state, &frame(0.0, Some(target)));
        assert!(!state.walking);
        assert_eq!(state.position, Vec3::new(1.0, -1.0, 1.0));
    }

    #[test]
    fn test_leg_and_arm_phases() {
        let mut state = FigureState::default();
        let target = Vec3::new(0.0, -1.0, 50.0);
        let ctl = controller();
        for i in 0..30 {
            let t = i as f64 * 0.037;
            ctl.update(&mut state, &frame(t, Some(target)));
            let p = (t * 5.0) as f32;
            assert!((state.joints.left_leg - p.sin() * 0.5).abs() < 1e-4);
            assert!((state.joints.right_leg - (p + std::f32::consts::PI).sin() * 0.5).abs() < 1e-4);
            // Arms cross the legs.
            assert!((state.joints.left_arm - state.joints.right_leg * 0.6).abs() < 1e-4);
            assert!((state.joints.right_arm - state.joints.left_leg * 0.6).abs() < 1e-4);
        }
    }

    #[test]
    fn test_idle_limbs_decay_without_crossing_zero() {
        let mut state = FigureState::default();
        state.joints = JointAngles {
            left_leg: 0.5,
            right_leg: -0.5,
            left_arm: -0.3,
            right_arm: 0.3,
            ..JointAngles::default()
        };
        let ctl = controller();
        let mut previous = state.joints.limb_pitches();
        for _ in 0..200 {
            ctl.update(&mut state, &frame(0.0, None));
            let current = state.joints.limb_pitches();
            for (before, after) in previous.iter().zip(current.iter()) {
                assert!(after.abs() <= before.abs());
                assert!(after * before >= 0.0, "pitch crossed zero");
            }
            previous = current;
        }
        assert!(previous.iter().all(|p| p.abs() < 1e-4));
    }

    #[test]
    fn test_first_idle_frame_is_not_a_snap() {
        let mut state = FigureState::default();
        state.joints.left_leg = 0.5;
        controller().update(&mut state, &frame(0.0, None));
        assert!((state.joints.left_leg - 0.45).abs() < EPS);
    }

    #[test]
    fn test_facing_is_smoothed() {
        let mut state = FigureState::default();
        let target = Vec3::new(10.0, -1.0, 0.0);
        let ctl = controller();
        for _ in 0..20 {
            let before = state.facing;
            ctl.update(&mut state, &frame(0.0, Some(target)));
            let desired = std::f32::consts::FRAC_PI_2;
            let change = (state.facing - before).abs();
            assert!(change <= 0.1 * (desired - before).abs() + EPS);
            assert!(change > 0.0);
        }
    }

    #[test]
    fn test_facing_freezes_when_idle() {
        let mut state = FigureState::default();
        let ctl = controller();
        ctl.update(&mut state, &frame(0.0, Some(Vec3::new(10.0, -1.0, 0.0))));
        let facing = state.facing;
        ctl.update(&mut state, &frame(0.1, None));
        ctl.update(&mut state, &frame(0.2, None));
        assert_eq!(state.facing, facing);
    }

    #[test]
    fn test_head_follows_pointer_while_idle() {
        let mut state = FigureState::default();
        let ctl = controller();
        let mut input = frame(0.0, None);
        input.pointer = PointerNormalized::new(1.0, -1.0);
        ctl.update(&mut state, &input);
        assert!((state.joints.head_yaw - 0.05).abs() < EPS);
        assert!((state.joints.head_pitch + 0.03).abs() < EPS);

        for _ in 0..200 {
            ctl.update(&mut state, &input);
        }
        assert!((state.joints.head_yaw - 0.5).abs() < 1e-4);
        assert!((state.joints.head_pitch + 0.3).abs() < 1e-4);
    }

    #[test]
    fn test_zero_direction_is_a_no_op() {
        let locomotion = LocomotionSettings {
            arrival_threshold: -1.0,
            ..LocomotionSettings::default()
        };
        let ctl = LocomotionController::new(locomotion, HeadTrackingSettings::default());
        let mut state = FigureState::default();
        state.facing = 0.7;
        let here = state.position;
        ctl.update(&mut state, &frame(0.0, Some(here)));
        assert!(state.walking);
        assert_eq!(state.position, here);
        assert_eq!(state.facing, 0.7);
        assert!(state.position.is_finite());
    }

    #[test]
    fn test_time_scaled_step() {
        let locomotion = LocomotionSettings {
            speed_mode: SpeedMode::TimeScaled,
            ..LocomotionSettings::default()
        };
        let ctl = LocomotionController::new(locomotion, HeadTrackingSettings::default());
        let mut state = FigureState::default();
        let mut input = frame(0.0, Some(Vec3::new(0.0, -1.0, 10.0)));

        // Half the reference frame rate covers twice the distance per frame.
        input.delta = 1.0 / 30.0;
        ctl.update(&mut state, &input);
        assert!((state.position.z - 0.1).abs() < EPS);
    }

    #[test]
    fn test_overshoot_clamp() {
        let locomotion = LocomotionSettings {
            speed: 1.0,
            ..LocomotionSettings::default()
        };
        let clamped =
            LocomotionController::new(locomotion.clone(), HeadTrackingSettings::default());
        let target = Vec3::new(0.0, -1.0, 0.5);

        let mut state = FigureState::default();
        clamped.update(&mut state, &frame(0.0, Some(target)));
        assert!(state.position.distance(target) < EPS);

        let loose = LocomotionController::new(
            LocomotionSettings { clamp_overshoot: false, ..locomotion },
            HeadTrackingSettings::default(),
        );
        let mut state = FigureState::default();
        loose.update(&mut state, &frame(0.0, Some(target)));
        assert!((state.position.z - 1.0).abs() < EPS);
    }
}
