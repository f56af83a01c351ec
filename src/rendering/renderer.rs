use eframe::egui::{self, epaint::Mesh, Color32, Painter, Pos2, Rect, Stroke};
use glam::{Mat4, Vec3, Vec4};

use crate::rendering::camera::OrbitCamera;
use crate::rendering::light::Lighting;
use crate::rendering::scene::{RenderLayer, SceneGraph};

/// Square line grid lying on a horizontal plane, centred on the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLines {
    pub height: f32,
    pub size: f32,
    pub divisions: u32,
    pub center_color: Color32,
    pub line_color: Color32,
}

impl GridLines {
    pub fn new(height: f32, size: f32, divisions: u32) -> Self {
        Self {
            height,
            size,
            divisions: divisions.max(1),
            center_color: Color32::from_rgb(0x44, 0x44, 0x44),
            line_color: Color32::from_rgb(0x22, 0x22, 0x22),
        }
    }

    /// World-space segments with their colour, one per line in each direction.
    pub fn segments(&self) -> Vec<([Vec3; 2], Color32)> {
        let half = self.size / 2.0;
        let step = self.size / self.divisions as f32;
        let mut out = Vec::with_capacity((self.divisions as usize + 1) * 2);
        for i in 0..=self.divisions {
            let offset = -half + i as f32 * step;
            let color = if i * 2 == self.divisions {
                self.center_color
            } else {
                self.line_color
            };
            let y = self.height;
            out.push(([Vec3::new(offset, y, -half), Vec3::new(offset, y, half)], color));
            out.push(([Vec3::new(-half, y, offset), Vec3::new(half, y, offset)], color));
        }
        out
    }
}

/// One shaded, projected triangle ready for painting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    pub layer: RenderLayer,
    /// View-space distance of the centroid; larger is farther.
    pub depth: f32,
    pub points: [Pos2; 3],
    pub color: Color32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub faces: usize,
    pub culled: usize,
    pub clipped: usize,
    pub shadows: usize,
}

/// Shadows flattened onto the horizontal plane `y = height` along the key light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanarShadow {
    pub height: f32,
    pub color: Color32,
}

impl PlanarShadow {
    pub fn new(height: f32) -> Self {
        Self {
            height,
            color: Color32::from_black_alpha(90),
        }
    }

    /// Slide `point` away from the light until it meets the plane. Points already
    /// below the plane drop straight onto it. `toward_light.y` must be positive.
    pub fn flatten(&self, point: Vec3, toward_light: Vec3) -> Vec3 {
        let above = (point.y - self.height).max(0.0);
        let run = above / toward_light.y;
        Vec3::new(
            point.x - toward_light.x * run,
            self.height,
            point.z - toward_light.z * run,
        )
    }
}

/// Painter's-algorithm renderer that draws the scene graph through an egui painter.
#[derive(Debug, Clone)]
pub struct SceneRenderer {
    lighting: Lighting,
    background: Color32,
    grid: Option<GridLines>,
    shadow: Option<PlanarShadow>,
}

impl SceneRenderer {
    pub fn new(lighting: Lighting, grid: Option<GridLines>) -> Self {
        Self {
            lighting,
            background: Color32::from_rgb(0x0a, 0x0a, 0x14),
            grid,
            shadow: None,
        }
    }

    /// Cast shadows of `casts_shadow` objects onto the floor at `height`.
    pub fn with_shadows(mut self, height: f32) -> Self {
        self.shadow = Some(PlanarShadow::new(height));
        self
    }

    /// Project, cull and shade every visible triangle, sorted for back-to-front drawing.
    pub fn collect(
        &self,
        graph: &SceneGraph,
        camera: &OrbitCamera,
        rect: Rect,
    ) -> (Vec<Face>, RenderStats) {
        let aspect = rect.width() / rect.height().max(1.0);
        let view_projection = camera.view_projection(aspect);
        let eye = camera.eye();
        let mut stats = RenderStats::default();
        let mut faces = Vec::new();

        // The floor hides its own shadows from below, and a light at or under the
        // horizon casts none.
        let shadow = self
            .shadow
            .filter(|shadow| eye.y > shadow.height)
            .zip(self.lighting.key_direction().filter(|d| d.y > 0.0));

        for (object, world) in graph.drawables() {
            let Some(shape) = &object.shape else { continue };
            for triangle in &shape.triangles {
                let corners = triangle.positions.map(|p| world.transform_point3(p));
                let normal = world.transform_vector3(triangle.normal).normalize_or_zero();

                if let Some((shadow, toward_light)) = shadow.filter(|_| object.casts_shadow) {
                    if normal.dot(toward_light) > 0.0 {
                        let flat = corners.map(|c| shadow.flatten(c, toward_light));
                        match project_face(&view_projection, camera.near(), rect, flat) {
                            Some((depth, points)) => {
                                stats.shadows += 1;
                                faces.push(Face {
                                    layer: RenderLayer::Decal,
                                    depth,
                                    points,
                                    color: shadow.color,
                                });
                            }
                            None => stats.clipped += 1,
                        }
                    }
                }

                let centroid = (corners[0] + corners[1] + corners[2]) / 3.0;
                if normal.dot(eye - centroid) <= 0.0 {
                    stats.culled += 1;
                    continue;
                }
                let Some((depth, points)) =
                    project_face(&view_projection, camera.near(), rect, corners)
                else {
                    stats.clipped += 1;
                    continue;
                };

                let color = self
                    .lighting
                    .shade(&shape.material, centroid, normal, eye)
                    .to_color32(shape.material.opacity);
                faces.push(Face {
                    layer: object.layer,
                    depth,
                    points,
                    color,
                });
            }
        }

        faces.sort_by(|a, b| {
            a.layer
                .cmp(&b.layer)
                .then_with(|| b.depth.total_cmp(&a.depth))
        });
        stats.faces = faces.len();
        (faces, stats)
    }

    pub fn paint(
        &self,
        painter: &Painter,
        graph: &SceneGraph,
        camera: &OrbitCamera,
        rect: Rect,
    ) -> RenderStats {
        painter.rect_filled(rect, 0.0, self.background);
        let (faces, stats) = self.collect(graph, camera, rect);

        let mut start = 0;
        let mut grid_drawn = false;
        while start < faces.len() {
            let layer = faces[start].layer;
            let end = faces[start..]
                .iter()
                .position(|f| f.layer != layer)
                .map_or(faces.len(), |n| start + n);

            if layer > RenderLayer::Ground && !grid_drawn {
                self.paint_grid(painter, camera, rect);
                grid_drawn = true;
            }
            painter.add(egui::Shape::mesh(build_mesh(&faces[start..end])));
            if layer == RenderLayer::Ground {
                self.paint_grid(painter, camera, rect);
                grid_drawn = true;
            }
            start = end;
        }
        if !grid_drawn {
            self.paint_grid(painter, camera, rect);
        }
        stats
    }

    fn paint_grid(&self, painter: &Painter, camera: &OrbitCamera, rect: Rect) {
        let Some(grid) = &self.grid else { return };
        let view_projection = camera.view_projection(rect.width() / rect.height().max(1.0));
        for ([a, b], color) in grid.segments() {
            if let Some([p, q]) = clip_segment(&view_projection, camera.near(), a, b) {
                let stroke = Stroke::new(1.0, color);
                painter.line_segment([to_screen(rect, p), to_screen(rect, q)], stroke);
            }
        }
    }
}

impl Default for SceneRenderer {
    fn default() -> Self {
        Self::new(Lighting::stage(), None)
    }
}

fn build_mesh(faces: &[Face]) -> Mesh {
    let mut mesh = Mesh::default();
    for face in faces {
        let base = mesh.vertices.len() as u32;
        for point in face.points {
            mesh.colored_vertex(point, face.color);
        }
        mesh.add_triangle(base, base + 1, base + 2);
    }
    mesh
}

/// Screen points and mean depth of a world-space triangle, or `None` when any
/// corner is behind the near plane.
fn project_face(
    view_projection: &Mat4,
    near: f32,
    rect: Rect,
    corners: [Vec3; 3],
) -> Option<(f32, [Pos2; 3])> {
    let [a, b, c] = corners.map(|c| OrbitCamera::project(view_projection, near, c));
    let (a, b, c) = (a?, b?, c?);
    Some((
        (a.z + b.z + c.z) / 3.0,
        [to_screen(rect, a), to_screen(rect, b), to_screen(rect, c)],
    ))
}

fn to_screen(rect: Rect, ndc: Vec3) -> Pos2 {
    Pos2::new(
        rect.left() + (ndc.x + 1.0) * 0.5 * rect.width(),
        rect.top() + (1.0 - ndc.y) * 0.5 * rect.height(),
    )
}

/// Clip a world-space segment against the near plane and project what remains.
fn clip_segment(view_projection: &Mat4, near: f32, a: Vec3, b: Vec3) -> Option<[Vec3; 2]> {
    let ca: Vec4 = *view_projection * a.extend(1.0);
    let cb: Vec4 = *view_projection * b.extend(1.0);
    let limit = near * 1.001;
    let (ca, cb) = match (ca.w > limit, cb.w > limit) {
        (true, true) => (ca, cb),
        (false, false) => return None,
        (true, false) => (ca, ca.lerp(cb, (ca.w - limit) / (ca.w - cb.w))),
        (false, true) => (cb.lerp(ca, (cb.w - limit) / (cb.w - ca.w)), cb),
    };
    let ndc = |c: Vec4| Vec3::new(c.x / c.w, c.y / c.w, c.w);
    Some([ndc(ca), ndc(cb)])
}
