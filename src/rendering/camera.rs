use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::config::CameraSettings;
use crate::utils::math::Ray;

const MIN_POLAR: f32 = 1e-3;

/// Perspective camera orbiting a fixed target (rotate and zoom, no pan).
///
/// Spherical coordinates follow the Y-up convention: `polar` is measured from
/// +Y, `azimuth` around Y starting at +Z.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    pub target: Vec3,
    radius: f32,
    azimuth: f32,
    polar: f32,
    fov_y: f32,
    near: f32,
    far: f32,
    min_distance: f32,
    max_distance: f32,
    max_polar: f32,
    rotate_speed: f32,
    zoom_speed: f32,
}

impl OrbitCamera {
    pub fn from_settings(settings: &CameraSettings) -> Self {
        let offset = Vec3::from_array(settings.position);
        let radius = offset.length().max(f32::EPSILON);
        let mut camera = Self {
            target: Vec3::ZERO,
            radius,
            azimuth: offset.x.atan2(offset.z),
            polar: (offset.y / radius).clamp(-1.0, 1.0).acos(),
            fov_y: settings.fov_degrees.to_radians(),
            near: settings.near,
            far: settings.far,
            min_distance: settings.min_distance,
            max_distance: settings.max_distance,
            max_polar: settings.max_polar_angle,
            rotate_speed: settings.rotate_speed,
            zoom_speed: settings.zoom_speed,
        };
        camera.constrain();
        camera
    }

    pub fn eye(&self) -> Vec3 {
        let (sin_p, cos_p) = self.polar.sin_cos();
        let (sin_a, cos_a) = self.azimuth.sin_cos();
        self.target + Vec3::new(sin_p * sin_a, cos_p, sin_p * cos_a) * self.radius
    }

    pub fn distance(&self) -> f32 {
        self.radius
    }

    pub fn polar(&self) -> f32 {
        self.polar
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, aspect.max(f32::EPSILON), self.near, self.far)
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection(aspect) * self.view()
    }

    /// Drag in screen pixels: horizontal spins around the target, vertical tilts.
    pub fn rotate(&mut self, drag: Vec2) {
        self.azimuth -= drag.x * self.rotate_speed;
        self.polar -= drag.y * self.rotate_speed;
        self.constrain();
    }

    /// Positive scroll moves closer.
    pub fn zoom(&mut self, scroll: f32) {
        self.radius *= 1.0 - scroll * self.zoom_speed;
        self.constrain();
    }

    fn constrain(&mut self) {
        self.radius = self.radius.clamp(self.min_distance, self.max_distance);
        self.polar = self.polar.clamp(MIN_POLAR, self.max_polar.max(MIN_POLAR));
    }

    /// Project a world point to normalized device coordinates.
    /// `z` of the result is the view-space depth; `None` behind the near plane.
    pub fn project(view_projection: &Mat4, near: f32, point: Vec3) -> Option<Vec3> {
        let clip: Vec4 = *view_projection * point.extend(1.0);
        if clip.w <= near {
            return None;
        }
        Some(Vec3::new(clip.x / clip.w, clip.y / clip.w, clip.w))
    }

    /// World-space ray through a point given in normalized device coordinates.
    pub fn ray(&self, ndc: Vec2, aspect: f32) -> Ray {
        let inverse = self.view_projection(aspect).inverse();
        let on_near_plane = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 0.0));
        let eye = self.eye();
        Ray::new(eye, on_near_plane - eye)
    }
}
