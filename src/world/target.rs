use glam::Vec3;
use tracing::debug;

/// Sole owner of the navigation target.
///
/// A click always replaces the current target; there is no queue and no
/// rejection while the figure is still walking. The target is never cleared
/// automatically, not even on arrival.
#[derive(Debug, Clone)]
pub struct TargetSelection {
    current: Option<Vec3>,
    target_height: f32,
    selections: u64,
}

impl TargetSelection {
    pub fn new(target_height: f32) -> Self {
        Self {
            current: None,
            target_height,
            selections: 0,
        }
    }

    /// Latch a ground hit at the fixed target height and make it the target.
    pub fn select(&mut self, hit: Vec3) -> Vec3 {
        let target = Vec3::new(hit.x, self.target_height, hit.z);
        if let Some(previous) = self.current {
            debug!("Target {} superseded by {}", previous, target);
        }
        self.current = Some(target);
        self.selections += 1;
        target
    }

    pub fn current(&self) -> Option<Vec3> {
        self.current
    }

    pub fn selections(&self) -> u64 {
        self.selections
    }
}
