pub mod graph;

pub use graph::{NodeId, SceneGraph};

use glam::{Mat4, Quat, Vec3};

use crate::rendering::materials::Material;
use crate::rendering::mesh::{Geometry, Triangle};
use crate::utils::math::Ray;

/// Draw order bucket. Ground draws first, decals lie on it, the figure goes on top
/// of both; depth sorting only happens within a bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum RenderLayer {
    Ground,
    Decal,
    #[default]
    Figure,
}

/// Geometry plus material, tessellated once at construction.
#[derive(Debug, Clone)]
pub struct Shape {
    pub geometry: Geometry,
    pub material: Material,
    pub triangles: Vec<Triangle>,
}

impl Shape {
    pub fn new(geometry: Geometry, material: Material) -> Self {
        Self {
            triangles: geometry.triangles(),
            geometry,
            material,
        }
    }
}

/// A scene node: local transform relative to its parent, and an optional shape.
/// Nodes without a shape are pure pivots (joints).
#[derive(Debug, Clone)]
pub struct Object {
    pub name: String,
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    pub shape: Option<Shape>,
    pub visible: bool,
    pub layer: RenderLayer,
    /// Projected onto the floor by the key light.
    pub casts_shadow: bool,
}

impl Object {
    pub fn pivot(name: impl Into<String>, position: Vec3) -> Self {
        Self {
            name: name.into(),
            position,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            shape: None,
            visible: true,
            layer: RenderLayer::Figure,
            casts_shadow: false,
        }
    }

    pub fn mesh(name: impl Into<String>, position: Vec3, shape: Shape) -> Self {
        Self {
            shape: Some(shape),
            ..Self::pivot(name, position)
        }
    }

    pub fn on_layer(mut self, layer: RenderLayer) -> Self {
        self.layer = layer;
        self
    }

    pub fn casting_shadow(mut self, casts_shadow: bool) -> Self {
        self.casts_shadow = casts_shadow;
        self
    }

    pub fn local_transform(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

/// The walkable floor: a square of side `size` centred on the origin at `y = height`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundPlane {
    pub height: f32,
    pub size: f32,
}

impl GroundPlane {
    pub fn new(height: f32, size: f32) -> Self {
        Self { height, size }
    }

    pub fn contains(&self, point: Vec3) -> bool {
        let half = self.size / 2.0;
        point.x.abs() <= half && point.z.abs() <= half
    }

    /// First point where `ray` meets the floor, if it hits within its bounds.
    pub fn intersect(&self, ray: &Ray) -> Option<Vec3> {
        ray.intersect_horizontal_plane(self.height)
            .filter(|hit| self.contains(*hit))
    }
}
