use eframe::egui::{Painter, Pos2, Rect};
use glam::{Vec2, Vec3};
use tracing::debug;

use crate::config::WalkbotSettings;
use crate::rendering::camera::OrbitCamera;
use crate::rendering::light::Lighting;
use crate::rendering::materials::Material;
use crate::rendering::mesh::Geometry;
use crate::rendering::renderer::{GridLines, RenderStats, SceneRenderer};
use crate::rendering::scene::{GroundPlane, NodeId, Object, RenderLayer, SceneGraph, Shape};
use crate::world::rig::{self, MissingJoint, Rig};
use crate::world::simulation::Simulation;

const MARKER_RADIUS: f32 = 0.3;
const MARKER_SEGMENTS: u32 = 32;
/// Marker hovers just above the floor so it never fights the grid.
const MARKER_LIFT: f32 = 0.1;

/// Everything visible in the viewport: floor, grid, target marker, the robot,
/// lights and the orbit camera.
pub struct Stage {
    graph: SceneGraph,
    rig: Rig,
    marker: NodeId,
    ground: GroundPlane,
    renderer: SceneRenderer,
    pub camera: OrbitCamera,
    show_marker: bool,
}

impl Stage {
    pub fn new(settings: &WalkbotSettings) -> Result<Self, MissingJoint> {
        let scene = &settings.scene;
        let ground = GroundPlane::new(scene.ground_height, scene.ground_size);
        let mut graph = SceneGraph::new();

        graph.add_root(
            Object::mesh(
                "ground",
                Vec3::new(0.0, ground.height, 0.0),
                Shape::new(
                    Geometry::Plane {
                        width: ground.size,
                        depth: ground.size,
                        subdivisions: scene.grid_divisions,
                    },
                    Material::standard(0x1a1a2e).metalness(0.3).roughness(0.8),
                ),
            )
            .on_layer(RenderLayer::Ground),
        );

        let mut marker = Object::mesh(
            "target_marker",
            Vec3::new(0.0, ground.height + MARKER_LIFT, 0.0),
            Shape::new(
                Geometry::Disc { radius: MARKER_RADIUS, segments: MARKER_SEGMENTS },
                Material::basic(0x00ff00).opacity(0.5),
            ),
        )
        .on_layer(RenderLayer::Decal);
        marker.visible = false;
        let marker = graph.add_root(marker);

        let rig = Rig::build(&mut graph, &rig::robot(scene.sphere_segments))?;

        let grid = scene
            .show_grid
            .then(|| GridLines::new(ground.height + 0.01, ground.size, scene.grid_divisions));
        let mut renderer = SceneRenderer::new(Lighting::stage(), grid);
        if scene.shadows {
            renderer = renderer.with_shadows(ground.height);
        }
        debug!("Stage built with {} scene nodes", graph.len());

        Ok(Self {
            graph,
            rig,
            marker,
            ground,
            renderer,
            camera: OrbitCamera::from_settings(&settings.camera),
            show_marker: scene.show_target_marker,
        })
    }

    /// Copy the simulation's state onto the scene nodes.
    pub fn sync(&mut self, simulation: &Simulation) {
        self.rig.apply(&mut self.graph, simulation.figure());

        let marker = self.graph.object_mut(self.marker);
        match simulation.target() {
            Some(target) if self.show_marker => {
                marker.visible = true;
                marker.position = Vec3::new(target.x, self.ground.height + MARKER_LIFT, target.z);
            }
            _ => marker.visible = false,
        }
    }

    pub fn paint(&self, painter: &Painter, rect: Rect) -> RenderStats {
        self.renderer.paint(painter, &self.graph, &self.camera, rect)
    }

    /// Ground point under a screen position inside `rect`, if any.
    pub fn pick_ground(&self, pos: Pos2, rect: Rect) -> Option<Vec3> {
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return None;
        }
        let ndc = Vec2::new(
            (pos.x - rect.left()) / rect.width() * 2.0 - 1.0,
            1.0 - (pos.y - rect.top()) / rect.height() * 2.0,
        );
        let ray = self.camera.ray(ndc, rect.width() / rect.height());
        self.ground.intersect(&ray)
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn rig(&self) -> &Rig {
        &self.rig
    }

    pub fn marker(&self) -> &Object {
        self.graph.object(self.marker)
    }
}
