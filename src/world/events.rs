use crossbeam_channel::{unbounded, Receiver, Sender};
use glam::{Vec2, Vec3};
use tracing::{debug, trace};

use crate::utils::math::normalize_viewport;

// Events sent from the platform layer to the simulation.
// These are clean, application-friendly data structures.

/// Last observed pointer position relative to the viewport, in [-1, 1] on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerNormalized {
    pub x: f32,
    pub y: f32,
}

impl PointerNormalized {
    pub const CENTER: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// `x = (px / width) * 2 - 1`, `y = (py / height) * 2 - 1`, with no Y inversion.
    pub fn from_viewport(pos: Vec2, size: Vec2) -> Self {
        let v = normalize_viewport(pos, size);
        Self { x: v.x, y: v.y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerMoved(PointerNormalized),
    /// World-space intersection of a click with the ground plane.
    GroundClicked(Vec3),
}

/// Create the input channel injected into the app at startup.
///
/// The source side is handed to whatever captures platform input, the
/// subscription side to the simulation. Dropping the subscription is the
/// unsubscribe: later publishes report `false`.
pub fn input_channel() -> (InputSource, InputSubscription) {
    let (tx, rx) = unbounded();
    debug!("Input channel opened");
    (InputSource { tx }, InputSubscription { rx })
}

#[derive(Debug, Clone)]
pub struct InputSource {
    tx: Sender<InputEvent>,
}

impl InputSource {
    /// Queue an event for the next frame. Returns `false` once the subscription is gone.
    pub fn publish(&self, event: InputEvent) -> bool {
        match self.tx.send(event) {
            Ok(()) => true,
            Err(_) => {
                trace!("Input subscription closed, dropping {:?}", event);
                false
            }
        }
    }

    pub fn pointer_moved(&self, pointer: PointerNormalized) -> bool {
        self.publish(InputEvent::PointerMoved(pointer))
    }

    pub fn ground_clicked(&self, hit: Vec3) -> bool {
        self.publish(InputEvent::GroundClicked(hit))
    }
}

#[derive(Debug)]
pub struct InputSubscription {
    rx: Receiver<InputEvent>,
}

impl InputSubscription {
    /// Everything published since the last drain, oldest first. Never blocks.
    pub fn drain(&self) -> impl Iterator<Item = InputEvent> + '_ {
        self.rx.try_iter()
    }

    pub fn pending(&self) -> usize {
        self.rx.len()
    }
}

impl Drop for InputSubscription {
    fn drop(&mut self) {
        debug!("Input subscription released ({} events discarded)", self.rx.len());
    }
}
