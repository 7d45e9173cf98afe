//! Uniform layouts shared with `mesh.wgsl` and `skybox.wgsl`
//!
//! Every field is a `vec4` or `mat4x4` so the Rust and WGSL layouts line up
//! without manual padding. Field order must match the shader structs.

use cgmath::{InnerSpace, Matrix4, SquareMatrix, Vector3};

use crate::gfx::lights::LightRig;
use crate::gfx::material::{Material, MaterialUniform};
use crate::gfx::scene::config::{Backdrop, Rgb, SkyboxGradient};

use super::FrameView;

/// Shader exposure fed into the ACES curve
pub const EXPOSURE: f32 = 1.2;

const BACKDROP_SKYBOX: f32 = 0.0;
const BACKDROP_FOG: f32 = 1.0;

/// Per-frame camera, lights and backdrop
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUniform {
    pub view_proj: [[f32; 4]; 4],
    pub inv_view_proj: [[f32; 4]; 4],
    pub camera_position: [f32; 4],
    /// Linear color premultiplied by intensity
    pub ambient: [f32; 4],
    pub hemisphere_sky: [f32; 4],
    pub hemisphere_ground: [f32; 4],
    /// Unit vectors pointing towards each directional light
    pub directional_direction: [[f32; 4]; 2],
    pub directional_color: [[f32; 4]; 2],
    /// xyz position, w range
    pub point_position: [[f32; 4]; 2],
    pub point_color: [[f32; 4]; 2],
    /// Gradient stops, still sRGB encoded
    pub sky_top: [f32; 4],
    pub sky_horizon: [f32; 4],
    pub sky_bottom: [f32; 4],
    /// exponent, backdrop mode, fog near, fog far
    pub backdrop: [f32; 4],
    /// Linear fog color, w exposure
    pub fog_color: [f32; 4],
}

fn linear(color: Rgb, intensity: f32) -> [f32; 4] {
    let [r, g, b] = color.to_linear();
    [r * intensity, g * intensity, b * intensity, 1.0]
}

fn srgb(color: Rgb) -> [f32; 4] {
    [color.r, color.g, color.b, 1.0]
}

fn point(v: Vector3<f32>, w: f32) -> [f32; 4] {
    [v.x, v.y, v.z, w]
}

impl GlobalUniform {
    pub fn from_frame(frame: &FrameView<'_>) -> Self {
        let inv_view_proj = frame.view_proj.invert().unwrap_or_else(Matrix4::identity);
        let mut uniform = Self {
            view_proj: frame.view_proj.into(),
            inv_view_proj: inv_view_proj.into(),
            camera_position: point(frame.camera_position, 1.0),
            ..Self::default()
        };
        uniform.set_lights(frame.lights);

        let default_sky = SkyboxGradient::default();
        let (sky, backdrop) = match &frame.scene.backdrop {
            Backdrop::Skybox(gradient) => (
                gradient,
                [gradient.exponent, BACKDROP_SKYBOX, 0.0, 0.0],
            ),
            Backdrop::Fog(fog) => {
                uniform.fog_color = linear(fog.color, 1.0);
                (&default_sky, [1.0, BACKDROP_FOG, fog.near, fog.far])
            }
        };
        uniform.sky_top = srgb(sky.top);
        uniform.sky_horizon = srgb(sky.horizon);
        uniform.sky_bottom = srgb(sky.bottom);
        uniform.backdrop = backdrop;
        uniform.fog_color[3] = EXPOSURE;
        uniform
    }

    fn set_lights(&mut self, lights: &LightRig) {
        self.ambient = linear(lights.ambient, lights.ambient_intensity);
        self.hemisphere_sky = linear(lights.hemisphere.sky, lights.hemisphere.intensity);
        self.hemisphere_ground = linear(lights.hemisphere.ground, lights.hemisphere.intensity);

        for (i, light) in [lights.key, lights.rim].iter().enumerate() {
            let direction = if light.position.magnitude2() > 0.0 {
                light.position.normalize()
            } else {
                Vector3::unit_y()
            };
            self.directional_direction[i] = point(direction, 0.0);
            self.directional_color[i] = linear(light.color, light.intensity);
        }
        for (i, light) in lights.points.iter().enumerate() {
            self.point_position[i] = point(light.position, light.range);
            self.point_color[i] = linear(light.color, light.intensity);
        }
    }
}

/// Per-drawable transform and surface
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    pub material: MaterialUniform,
    /// x: 1 when drawn as wireframe
    pub flags: [f32; 4],
}

impl ObjectUniform {
    pub fn new(model: Matrix4<f32>, material: &Material, wireframe: bool) -> Self {
        Self {
            model: model.into(),
            material: MaterialUniform::from(material),
            flags: [if wireframe { 1.0 } else { 0.0 }, 0.0, 0.0, 0.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::rendering::Readout;
    use crate::gfx::scene::config::{FogSettings, MaterialKind, SceneConfig};

    fn frame<'a>(lights: &'a LightRig, scene: &'a SceneConfig) -> FrameView<'a> {
        FrameView {
            camera_position: Vector3::new(5.0, 0.0, 0.0),
            look_at: Vector3::new(0.0, 0.0, 0.0),
            view_proj: Matrix4::from_scale(2.0),
            model: Matrix4::identity(),
            drawable: None,
            lights,
            scene,
            readout: Readout::default(),
        }
    }

    #[test]
    fn test_layout_is_vec4_aligned() {
        assert_eq!(std::mem::size_of::<GlobalUniform>() % 16, 0);
        assert_eq!(std::mem::size_of::<ObjectUniform>() % 16, 0);
        assert_eq!(std::mem::size_of::<ObjectUniform>(), 64 + 48 + 16);
    }

    #[test]
    fn test_skybox_frame() {
        let lights = LightRig::default();
        let scene = SceneConfig::default();
        let uniform = GlobalUniform::from_frame(&frame(&lights, &scene));

        assert_eq!(uniform.camera_position, [5.0, 0.0, 0.0, 1.0]);
        assert_eq!(uniform.inv_view_proj[0][0], 0.5);
        assert_eq!(uniform.backdrop, [2.0, BACKDROP_SKYBOX, 0.0, 0.0]);
        let top = scene.skybox().unwrap().top;
        assert_eq!(uniform.sky_top, [top.r, top.g, top.b, 1.0]);
        assert_eq!(uniform.fog_color[3], EXPOSURE);
    }

    #[test]
    fn test_fog_frame() {
        let lights = LightRig::default();
        let scene = SceneConfig {
            backdrop: Backdrop::Fog(FogSettings::default()),
            ..SceneConfig::default()
        };
        let uniform = GlobalUniform::from_frame(&frame(&lights, &scene));
        assert_eq!(uniform.backdrop[1], BACKDROP_FOG);
        assert_eq!(uniform.backdrop[2], 4.0);
        assert_eq!(uniform.backdrop[3], 12.0);
        assert!(uniform.fog_color[0] > 0.0);
    }

    #[test]
    fn test_lights_are_packed() {
        let mut lights = LightRig::default();
        lights.animate(0.0);
        let scene = SceneConfig::default();
        let uniform = GlobalUniform::from_frame(&frame(&lights, &scene));

        let key = uniform.directional_direction[0];
        let len = (key[0] * key[0] + key[1] * key[1] + key[2] * key[2]).sqrt();
        assert!((len - 1.0).abs() < 1e-5);
        // First point light sits at (0, 3, 3) at t = 0, range in w
        assert!(uniform.point_position[0][0].abs() < 1e-5);
        assert!((uniform.point_position[0][2] - 3.0).abs() < 1e-5);
        assert_eq!(uniform.point_position[0][3], 50.0);
        // Magenta: no green
        assert_eq!(uniform.point_color[0][1], 0.0);
    }

    #[test]
    fn test_object_uniform_flags() {
        let material = Material::preset(MaterialKind::Glass);
        let solid = ObjectUniform::new(Matrix4::identity(), &material, false);
        let wire = ObjectUniform::new(Matrix4::identity(), &material, true);
        assert_eq!(solid.flags[0], 0.0);
        assert_eq!(wire.flags[0], 1.0);
        assert_eq!(wire.material.base_color[3], 0.5);
    }
}
