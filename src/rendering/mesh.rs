use glam::Vec3;
use std::f32::consts::{PI, TAU};

/// A flat-shaded triangle in local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub positions: [Vec3; 3],
    /// Outward face normal.
    pub normal: Vec3,
}

impl Triangle {
    pub fn centroid(&self) -> Vec3 {
        (self.positions[0] + self.positions[1] + self.positions[2]) / 3.0
    }
}

/// Primitive shapes, all centred on their local origin.
///
/// `Plane` and `Disc` lie in the XZ plane facing +Y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    Cuboid { width: f32, height: f32, depth: f32 },
    Sphere { radius: f32, segments: u32, rings: u32 },
    Cylinder { radius: f32, height: f32, segments: u32 },
    Plane { width: f32, depth: f32, subdivisions: u32 },
    Disc { radius: f32, segments: u32 },
}

impl Geometry {
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        Self::Cuboid { width, height, depth }
    }

    pub fn sphere(radius: f32, segments: u32) -> Self {
        Self::Sphere { radius, segments, rings: segments }
    }

    pub fn cylinder(radius: f32, height: f32, segments: u32) -> Self {
        Self::Cylinder { radius, height, segments }
    }

    pub fn triangles(&self) -> Vec<Triangle> {
        match *self {
            Self::Cuboid { width, height, depth } => cuboid(width, height, depth),
            Self::Sphere { radius, segments, rings } => {
                sphere(radius, segments.max(3), rings.max(2))
            }
            Self::Cylinder { radius, height, segments } => {
                cylinder(radius, height, segments.max(3))
            }
            Self::Plane { width, depth, subdivisions } => plane(width, depth, subdivisions.max(1)),
            Self::Disc { radius, segments } => disc(radius, segments.max(3)),
        }
    }
}

fn quad(normal: Vec3, [a, b, c, d]: [Vec3; 4]) -> [Triangle; 2] {
    [
        Triangle { positions: [a, b, c], normal },
        Triangle { positions: [a, c, d], normal },
    ]
}

fn cuboid(width: f32, height: f32, depth: f32) -> Vec<Triangle> {
    let (x, y, z) = (width / 2.0, height / 2.0, depth / 2.0);
    let v = Vec3::new;
    let faces = [
        (Vec3::X, [v(x, -y, z), v(x, -y, -z), v(x, y, -z), v(x, y, z)]),
        (Vec3::NEG_X, [v(-x, -y, -z), v(-x, -y, z), v(-x, y, z), v(-x, y, -z)]),
        (Vec3::Y, [v(-x, y, z), v(x, y, z), v(x, y, -z), v(-x, y, -z)]),
        (Vec3::NEG_Y, [v(-x, -y, -z), v(x, -y, -z), v(x, -y, z), v(-x, -y, z)]),
        (Vec3::Z, [v(-x, -y, z), v(x, -y, z), v(x, y, z), v(-x, y, z)]),
        (Vec3::NEG_Z, [v(x, -y, -z), v(-x, -y, -z), v(-x, y, -z), v(x, y, -z)]),
    ];
    faces.into_iter().flat_map(|(normal, corners)| quad(normal, corners)).collect()
}

fn sphere(radius: f32, segments: u32, rings: u32) -> Vec<Triangle> {
    let point = |seg: u32, ring: u32| {
        let theta = PI * ring as f32 / rings as f32;
        let phi = TAU * seg as f32 / segments as f32;
        Vec3::new(theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin()) * radius
    };

    let mut out = Vec::with_capacity((segments * rings * 2) as usize);
    for ring in 0..rings {
        for seg in 0..segments {
            let corners = [
                point(seg, ring),
                point(seg + 1, ring),
                point(seg + 1, ring + 1),
                point(seg, ring + 1),
            ];
            let center = (corners[0] + corners[1] + corners[2] + corners[3]) / 4.0;
            let normal = center.normalize_or_zero();
            // Pole rows collapse one edge; keep only the non-degenerate half.
            if ring > 0 {
                out.push(Triangle { positions: [corners[0], corners[1], corners[2]], normal });
            }
            if ring + 1 < rings {
                out.push(Triangle { positions: [corners[0], corners[2], corners[3]], normal });
            }
        }
    }
    out
}

fn cylinder(radius: f32, height: f32, segments: u32) -> Vec<Triangle> {
    let half = height / 2.0;
    let rim = |seg: u32, y: f32| {
        let phi = TAU * seg as f32 / segments as f32;
        Vec3::new(phi.cos() * radius, y, phi.sin() * radius)
    };

    let mut out = Vec::with_capacity((segments * 4) as usize);
    for seg in 0..segments {
        let mid = TAU * (seg as f32 + 0.5) / segments as f32;
        let normal = Vec3::new(mid.cos(), 0.0, mid.sin());
        let side = [rim(seg, -half), rim(seg + 1, -half), rim(seg + 1, half), rim(seg, half)];
        out.extend(quad(normal, side));
        out.push(Triangle {
            positions: [Vec3::new(0.0, half, 0.0), rim(seg, half), rim(seg + 1, half)],
            normal: Vec3::Y,
        });
        out.push(Triangle {
            positions: [Vec3::new(0.0, -half, 0.0), rim(seg + 1, -half), rim(seg, -half)],
            normal: Vec3::NEG_Y,
        });
    }
    out
}

fn plane(width: f32, depth: f32, subdivisions: u32) -> Vec<Triangle> {
    let (cell_w, cell_d) = (width / subdivisions as f32, depth / subdivisions as f32);
    let (x0, z0) = (-width / 2.0, -depth / 2.0);
    let mut out = Vec::with_capacity((subdivisions * subdivisions * 2) as usize);
    for i in 0..subdivisions {
        for j in 0..subdivisions {
            let (x, z) = (x0 + i as f32 * cell_w, z0 + j as f32 * cell_d);
            out.extend(quad(
                Vec3::Y,
                [
                    Vec3::new(x, 0.0, z),
                    Vec3::new(x, 0.0, z + cell_d),
                    Vec3::new(x + cell_w, 0.0, z + cell_d),
                    Vec3::new(x + cell_w, 0.0, z),
                ],
            ));
        }
    }
    out
}

fn disc(radius: f32, segments: u32) -> Vec<Triangle> {
    (0..segments)
        .map(|seg| {
            let a = TAU * seg as f32 / segments as f32;
            let b = TAU * (seg + 1) as f32 / segments as f32;
            Triangle {
                positions: [
                    Vec3::ZERO,
                    Vec3::new(b.cos() * radius, 0.0, b.sin() * radius),
                    Vec3::new(a.cos() * radius, 0.0, a.sin() * radius),
                ],
                normal: Vec3::Y,
            }
        })
        .collect()
}
