use glam::{Vec2, Vec3};

/// Linear interpolation with an unclamped factor.
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// Yaw that turns a +Z-facing object toward `direction`.
pub fn heading_yaw(direction: Vec3) -> f32 {
    direction.x.atan2(direction.z)
}

/// Map a position inside a viewport of `size` onto [-1, 1] on both axes.
///
/// Y grows downward like the screen does; it is not inverted.
pub fn normalize_viewport(pos: Vec2, size: Vec2) -> Vec2 {
    if size.x <= 0.0 || size.y <= 0.0 {
        return Vec2::ZERO;
    }
    let v = Vec2::new(pos.x / size.x * 2.0 - 1.0, pos.y / size.y * 2.0 - 1.0);
    v.clamp(Vec2::splat(-1.0), Vec2::splat(1.0))
}

/// Half-line used for picking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Intersection with the horizontal plane `y = height`, if it lies ahead of the origin.
    pub fn intersect_horizontal_plane(&self, height: f32) -> Option<Vec3> {
        if self.direction.y.abs() < 1e-6 {
            return None;
        }
        let t = (height - self.origin.y) / self.direction.y;
        (t >= 0.0).then(|| self.at(t))
    }
}
