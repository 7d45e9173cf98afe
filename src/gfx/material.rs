//! Material presets for PBR rendering
//!
//! Each [`MaterialKind`] maps to one fixed parameter set. The renderer packs a
//! preset into a [`MaterialUniform`] for the fragment shader.

use crate::gfx::scene::config::{MaterialKind, Rgb};

/// Material definition with PBR properties
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub kind: MaterialKind,
    pub base_color: Rgb,
    /// 0.0 = dielectric, 1.0 = metal
    pub metallic: f32,
    /// 0.0 = mirror, 1.0 = fully diffuse
    pub roughness: f32,
    /// Strength of the reflected backdrop
    pub env_intensity: f32,
    pub clearcoat: f32,
    pub clearcoat_roughness: f32,
    pub transmission: f32,
    pub opacity: f32,
    pub ior: f32,
    pub thickness: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            kind: MaterialKind::Standard,
            base_color: Rgb::WHITE,
            metallic: 0.0,
            roughness: 0.5,
            env_intensity: 1.0,
            clearcoat: 0.0,
            clearcoat_roughness: 0.0,
            transmission: 0.0,
            opacity: 1.0,
            ior: 1.5,
            thickness: 0.0,
        }
    }
}

impl Material {
    pub fn preset(kind: MaterialKind) -> Self {
        let base = Material {
            kind,
            ..Default::default()
        };
        match kind {
            MaterialKind::Standard => Material {
                base_color: Rgb::from_hex(0x667eea),
                metallic: 0.3,
                roughness: 0.4,
                ..base
            },
            MaterialKind::Physical => Material {
                base_color: Rgb::from_hex(0x764ba2),
                metallic: 0.5,
                roughness: 0.2,
                clearcoat: 1.0,
                clearcoat_roughness: 0.1,
                ..base
            },
            MaterialKind::Metallic => Material {
                metallic: 1.0,
                roughness: 0.2,
                env_intensity: 1.5,
                ..base
            },
            MaterialKind::Glass => Material {
                metallic: 0.0,
                roughness: 0.0,
                transmission: 0.9,
                opacity: 0.5,
                thickness: 0.5,
                ..base
            },
        }
    }

    /// Needs alpha blending and no depth writes
    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0
    }
}

/// GPU uniform data for materials
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    /// Linear base color, opacity in w
    pub base_color: [f32; 4],
    /// metallic, roughness, env intensity, clearcoat
    pub surface: [f32; 4],
    /// clearcoat roughness, transmission, ior, thickness
    pub optics: [f32; 4],
}

impl From<&Material> for MaterialUniform {
    fn from(material: &Material) -> Self {
        let [r, g, b] = material.base_color.to_linear();
        Self {
            base_color: [r, g, b, material.opacity],
            surface: [
                material.metallic,
                material.roughness,
                material.env_intensity,
                material.clearcoat,
            ],
            optics: [
                material.clearcoat_roughness,
                material.transmission,
                material.ior,
                material.thickness,
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_match_their_kind() {
        for kind in MaterialKind::ALL {
            assert_eq!(Material::preset(kind).kind, kind);
        }
    }

    #[test]
    fn test_only_glass_is_transparent() {
        let transparent: Vec<_> = MaterialKind::ALL
            .into_iter()
            .filter(|kind| Material::preset(*kind).is_transparent())
            .collect();
        assert_eq!(transparent, vec![MaterialKind::Glass]);
    }

    #[test]
    fn test_uniform_packing() {
        let physical = Material::preset(MaterialKind::Physical);
        let uniform = MaterialUniform::from(&physical);
        assert_eq!(uniform.base_color[3], 1.0);
        assert_eq!(uniform.surface, [0.5, 0.2, 1.0, 1.0]);
        assert!((uniform.optics[0] - 0.1).abs() < 1e-6);

        let metallic = MaterialUniform::from(&Material::preset(MaterialKind::Metallic));
        assert!(metallic.base_color.iter().all(|c| (c - 1.0).abs() < 1e-5));
        assert_eq!(metallic.surface[2], 1.5);
    }
}
