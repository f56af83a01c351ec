use glam::Vec3;

use crate::rendering::materials::{Material, Rgb};

#[derive(Debug, Clone, PartialEq)]
pub enum Light {
    Ambient { color: Rgb, intensity: f32 },
    /// Parallel light arriving from `position` toward the origin.
    Directional { position: Vec3, color: Rgb, intensity: f32 },
    Point { position: Vec3, color: Rgb, intensity: f32 },
}

#[derive(Debug, Clone, Default)]
pub struct Lighting {
    lights: Vec<Light>,
}

impl Lighting {
    pub fn new(lights: Vec<Light>) -> Self {
        Self { lights }
    }

    /// Ambient fill, a white key light and two coloured rim lights behind the stage.
    pub fn stage() -> Self {
        Self::new(vec![
            Light::Ambient { color: Rgb::WHITE, intensity: 0.4 },
            Light::Directional {
                position: Vec3::new(5.0, 5.0, 5.0),
                color: Rgb::WHITE,
                intensity: 1.0,
            },
            Light::Point {
                position: Vec3::new(-5.0, 3.0, -5.0),
                color: Rgb::from_hex(0xff6b6b),
                intensity: 0.5,
            },
            Light::Point {
                position: Vec3::new(5.0, 3.0, -5.0),
                color: Rgb::from_hex(0x4a90e2),
                intensity: 0.5,
            },
        ])
    }

    /// Unit vector toward the first directional light, the one that casts shadows.
    pub fn key_direction(&self) -> Option<Vec3> {
        self.lights.iter().find_map(|light| match light {
            Light::Directional { position, .. } => position.try_normalize(),
            _ => None,
        })
    }

    /// Flat shading for one face: Lambert diffuse plus a Blinn highlight that
    /// sharpens as roughness drops. Metals trade diffuse for specular.
    pub fn shade(&self, material: &Material, point: Vec3, normal: Vec3, eye: Vec3) -> Rgb {
        let emission = material.emissive.scale(material.emissive_intensity);
        if material.unlit {
            return material.color.add(emission);
        }

        let view = (eye - point).normalize_or_zero();
        let diffuse_weight = 1.0 - 0.5 * material.metalness;
        let shininess = 2.0 + (1.0 - material.roughness) * 62.0;
        let specular_weight = (1.0 - material.roughness) * (0.25 + 0.75 * material.metalness);

        let mut diffuse = Rgb::BLACK;
        let mut specular = Rgb::BLACK;
        for light in &self.lights {
            let (to_light, color, intensity) = match light {
                Light::Ambient { color, intensity } => {
                    diffuse = diffuse.add(color.scale(*intensity));
                    continue;
                }
                Light::Directional { position, color, intensity } => {
                    (position.normalize_or_zero(), color, intensity)
                }
                Light::Point { position, color, intensity } => {
                    ((*position - point).normalize_or_zero(), color, intensity)
                }
            };
            let lambert = normal.dot(to_light).max(0.0);
            if lambert <= 0.0 {
                continue;
            }
            diffuse = diffuse.add(color.scale(intensity * lambert));
            let half = (to_light + view).normalize_or_zero();
            let highlight = normal.dot(half).max(0.0).powf(shininess);
            specular = specular.add(color.scale(intensity * highlight * specular_weight));
        }

        material
            .color
            .modulate(diffuse.scale(diffuse_weight))
            .add(specular)
            .add(emission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlit_ignores_lights() {
        let lighting = Lighting::stage();
        let m = Material::basic(0x00ff00);
        let c = lighting.shade(&m, Vec3::ZERO, Vec3::NEG_Y, Vec3::new(0.0, 1.0, 6.0));
        assert_eq!(c, Rgb::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_faces_toward_key_light_are_brighter() {
        let lighting = Lighting::stage();
        let m = Material::standard(0xffffff);
        let eye = Vec3::new(0.0, 1.0, 6.0);
        let lit = lighting.shade(&m, Vec3::ZERO, Vec3::new(1.0, 1.0, 1.0).normalize(), eye);
        let away = lighting.shade(&m, Vec3::ZERO, Vec3::new(-1.0, -1.0, 1.0).normalize(), eye);
        assert!(lit.r > away.r);
        // Ambient keeps unlit faces visible.
        assert!(away.r >= 0.4 - 1e-6);
    }

    #[test]
    fn test_key_direction_points_at_first_directional_light() {
        let key = Lighting::stage().key_direction().unwrap();
        assert!(key.distance(Vec3::ONE.normalize()) < 1e-6);
        let ambient = Light::Ambient { color: Rgb::WHITE, intensity: 1.0 };
        assert_eq!(Lighting::new(vec![ambient]).key_direction(), None);
    }

    #[test]
    fn test_emissive_adds_glow() {
        let lighting = Lighting::new(vec![]);
        let m = Material::standard(0xffffff).emissive(0xff0000, 1.0);
        let c = lighting.shade(&m, Vec3::ZERO, Vec3::Y, Vec3::Z);
        assert_eq!(c, Rgb::new(1.0, 0.0, 0.0));
    }
}
