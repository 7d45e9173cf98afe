//! Fixed light rig with two point lights circling the object

use std::f32::consts::PI;

use cgmath::Vector3;

use crate::gfx::scene::config::Rgb;

/// Radius of the point-light orbit in the XZ plane
pub const POINT_LIGHT_ORBIT_RADIUS: f32 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub color: Rgb,
    pub intensity: f32,
    /// Light shines from here towards the origin
    pub position: Vector3<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub color: Rgb,
    pub intensity: f32,
    /// Distance at which the contribution reaches zero
    pub range: f32,
    pub position: Vector3<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HemisphereLight {
    pub sky: Rgb,
    pub ground: Rgb,
    pub intensity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightRig {
    pub ambient: Rgb,
    pub ambient_intensity: f32,
    pub key: DirectionalLight,
    pub rim: DirectionalLight,
    pub points: [PointLight; 2],
    pub hemisphere: HemisphereLight,
}

impl Default for LightRig {
    fn default() -> Self {
        Self {
            ambient: Rgb::from_hex(0x404040),
            ambient_intensity: 0.5,
            key: DirectionalLight {
                color: Rgb::WHITE,
                intensity: 1.0,
                position: Vector3::new(5.0, 5.0, 5.0),
            },
            rim: DirectionalLight {
                color: Rgb::from_hex(0x667eea),
                intensity: 0.8,
                position: Vector3::new(-5.0, 0.0, -5.0),
            },
            points: [
                PointLight {
                    color: Rgb::from_hex(0xff00ff),
                    intensity: 1.0,
                    range: 50.0,
                    position: Vector3::new(3.0, 3.0, 3.0),
                },
                PointLight {
                    color: Rgb::from_hex(0x00ffff),
                    intensity: 0.8,
                    range: 50.0,
                    position: Vector3::new(-3.0, -3.0, 3.0),
                },
            ],
            hemisphere: HemisphereLight {
                sky: Rgb::from_hex(0x667eea),
                ground: Rgb::from_hex(0x764ba2),
                intensity: 0.3,
            },
        }
    }
}

impl LightRig {
    /// Moves the point lights along their orbit for wall-clock time `t`
    /// (seconds). The second light runs half a turn behind the first; heights
    /// are left untouched.
    pub fn animate(&mut self, t: f32) {
        for (i, light) in self.points.iter_mut().enumerate() {
            let phase = t + i as f32 * PI;
            light.position.x = phase.sin() * POINT_LIGHT_ORBIT_RADIUS;
            light.position.z = phase.cos() * POINT_LIGHT_ORBIT_RADIUS;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_lights_orbit_opposite_each_other() {
        let mut rig = LightRig::default();
        rig.animate(0.0);
        assert!(rig.points[0].position.x.abs() < 1e-6);
        assert!((rig.points[0].position.z - 3.0).abs() < 1e-6);
        assert!((rig.points[1].position.z + 3.0).abs() < 1e-5);

        rig.animate(1.3);
        let sum = rig.points[0].position + rig.points[1].position;
        assert!(sum.x.abs() < 1e-5 && sum.z.abs() < 1e-5);
    }

    #[test]
    fn test_animation_keeps_heights() {
        let mut rig = LightRig::default();
        rig.animate(42.0);
        assert_eq!(rig.points[0].position.y, 3.0);
        assert_eq!(rig.points[1].position.y, -3.0);
    }
}
