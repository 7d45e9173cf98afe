use super::camera_utils::{convert_matrix4_to_array, Camera, CameraUniform};
use cgmath::*;

use crate::config::CameraConfig;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);

/// Orbit camera around the world origin
///
/// Position is parameterized by `distance`, `azimuth` (around the Y axis) and
/// `polar` (angle from +Y). The polar angle is kept strictly away from the poles
/// and the distance inside its bounds, so `position_vector` is always defined.
#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub distance: f32,
    pub azimuth: f32,
    pub polar: f32,
    pub eye: Vector3<f32>,
    pub target: Vector3<f32>,
    pub up: Vector3<f32>,
    pub bounds: OrbitCameraBounds,
    pub aspect: f32,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
    pub uniform: CameraUniform,
}

impl Camera for OrbitCamera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        let eye = Point3::from_vec(self.eye);
        let target = Point3::from_vec(self.target);
        let view = Matrix4::look_at_rh(eye, target, self.up);
        let proj =
            OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar);
        proj * view
    }
}

impl OrbitCamera {
    pub fn new(distance: f32, azimuth: f32, polar: f32, aspect: f32) -> Self {
        let mut camera = Self {
            distance,
            azimuth,
            polar,
            eye: Vector3::zero(), // recomputed below
            target: Vector3::zero(),
            up: Vector3::unit_y(),
            bounds: OrbitCameraBounds::default(),
            aspect,
            fovy: Rad::from(Deg(75.0)),
            znear: 0.1,
            zfar: 1000.0,
            uniform: CameraUniform::default(),
        };
        camera.distance = camera.bounds.clamp_distance(distance);
        camera.polar = camera.bounds.clamp_polar(polar);
        camera.update();
        camera.update_view_proj();
        camera
    }

    /// Builds a camera from configuration, applying its bounds before the
    /// initial position is clamped.
    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        let mut camera = Self::new(config.distance, config.azimuth, config.polar, aspect);
        camera.bounds = OrbitCameraBounds {
            min_distance: config.min_distance,
            max_distance: config.max_distance,
            min_polar: config.polar_margin,
            max_polar: config.max_polar(),
        };
        camera.fovy = Rad::from(Deg(config.fov_degrees));
        camera.znear = config.znear;
        camera.zfar = config.zfar;
        camera.distance = camera.bounds.clamp_distance(config.distance);
        camera.polar = camera.bounds.clamp_polar(config.polar);
        camera.update();
        camera.update_view_proj();
        camera
    }

    /// Orbits the camera. Dragging right moves the camera the opposite way
    /// around the target, hence the subtraction.
    pub fn set_delta(&mut self, d_azimuth: f32, d_polar: f32) {
        self.azimuth -= d_azimuth;
        self.polar = self.bounds.clamp_polar(self.polar + d_polar);
        self.update();
    }

    pub fn set_zoom_delta(&mut self, d_distance: f32) {
        self.distance = self.bounds.clamp_distance(self.distance + d_distance);
        self.update();
    }

    /// Cartesian eye position relative to the look-at target
    pub fn position_vector(&self) -> Vector3<f32> {
        spherical_to_cartesian(self.distance, self.polar, self.azimuth)
    }

    pub fn look_at_target(&self) -> Vector3<f32> {
        self.target
    }

    /// Recomputes the eye after changing `distance`, `azimuth` or `polar`.
    fn update(&mut self) {
        self.eye = self.position_vector() + self.target;
    }

    /// Adjusts the projection aspect ratio. Zero-sized surfaces (minimized
    /// windows) keep the previous aspect.
    pub fn resize_projection(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
    }

    /// Publishes the current eye and view-projection to [`Self::uniform`].
    pub fn update_view_proj(&mut self) {
        self.uniform.view_position = [self.eye.x, self.eye.y, self.eye.z, 1.0];
        self.uniform.view_proj = convert_matrix4_to_array(self.build_view_projection_matrix());
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCameraBounds {
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar: f32,
    pub max_polar: f32,
}

impl OrbitCameraBounds {
    pub fn clamp_distance(&self, distance: f32) -> f32 {
        distance.clamp(self.min_distance, self.max_distance)
    }

    pub fn clamp_polar(&self, polar: f32) -> f32 {
        polar.clamp(self.min_polar, self.max_polar)
    }
}

impl Default for OrbitCameraBounds {
    fn default() -> Self {
        Self {
            min_distance: 2.0,
            max_distance: 20.0,
            min_polar: 0.1,
            max_polar: std::f32::consts::PI - 0.1,
        }
    }
}

fn spherical_to_cartesian(distance: f32, polar: f32, azimuth: f32) -> Vector3<f32> {
    Vector3::new(
        distance * polar.sin() * azimuth.cos(),
        distance * polar.cos(),
        distance * polar.sin() * azimuth.sin(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use std::f32::consts::{FRAC_PI_2, PI};

    const EPS: f32 = 1e-4;

    fn camera() -> OrbitCamera {
        OrbitCamera::new(5.0, 0.0, FRAC_PI_2, 1.5)
    }

    #[test]
    fn test_initial_position_on_positive_x() {
        let cam = camera();
        let p = cam.position_vector();
        assert!((p.x - 5.0).abs() < EPS);
        assert!(p.y.abs() < EPS);
        assert!(p.z.abs() < EPS);
    }

    #[test]
    fn test_quarter_orbit_moves_to_negative_z() {
        let mut cam = camera();
        cam.set_delta(FRAC_PI_2, 0.0);
        assert!((cam.azimuth + FRAC_PI_2).abs() < EPS);

        let p = cam.position_vector();
        assert!(p.x.abs() < EPS);
        assert!(p.y.abs() < EPS);
        assert!((p.z + 5.0).abs() < EPS);
        assert_eq!(cam.eye, p);
    }

    #[test]
    fn test_zoom_sequences_stay_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut cam = camera();
        for _ in 0..2_000 {
            cam.set_zoom_delta(rng.random_range(-8.0..8.0));
            assert!((2.0..=20.0).contains(&cam.distance), "{}", cam.distance);
        }
        cam.set_zoom_delta(1_000.0);
        assert_eq!(cam.distance, 20.0);
        cam.set_zoom_delta(-1_000.0);
        assert_eq!(cam.distance, 2.0);
    }

    #[test]
    fn test_orbit_sequences_keep_polar_off_the_poles() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut cam = camera();
        let mut expected_azimuth = cam.azimuth;
        for _ in 0..2_000 {
            let d_azimuth = rng.random_range(-3.0..3.0);
            let d_polar = rng.random_range(-3.0..3.0);
            cam.set_delta(d_azimuth, d_polar);
            expected_azimuth -= d_azimuth;
            assert!(cam.polar >= 0.1 && cam.polar <= PI - 0.1, "{}", cam.polar);
        }
        assert!((cam.azimuth - expected_azimuth).abs() < 1e-2);
    }

    #[test]
    fn test_position_norm_equals_distance() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut cam = camera();
        for _ in 0..500 {
            cam.set_delta(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0));
            cam.set_zoom_delta(rng.random_range(-2.0..2.0));
            let norm = cam.position_vector().magnitude();
            assert!((norm - cam.distance).abs() < 1e-3 * cam.distance);
        }
    }

    #[test]
    fn test_constructor_clamps_out_of_range_input() {
        let cam = OrbitCamera::new(100.0, 0.0, 0.0, 1.0);
        assert_eq!(cam.distance, 20.0);
        assert!((cam.polar - 0.1).abs() < EPS);
    }

    #[test]
    fn test_uniform_published_on_update_view_proj() {
        let mut cam = camera();
        assert_eq!(cam.uniform.eye(), cam.eye);

        cam.set_zoom_delta(1.0);
        assert!((cam.uniform.eye().x - 5.0).abs() < EPS);
        cam.update_view_proj();
        assert!((cam.uniform.eye().x - 6.0).abs() < EPS);
        assert_eq!(
            cam.uniform.view_proj_matrix(),
            cam.build_view_projection_matrix()
        );
    }

    #[test]
    fn test_from_config_uses_polar_margin() {
        let config = CameraConfig {
            polar: PI,
            polar_margin: 0.3,
            ..Default::default()
        };
        let cam = OrbitCamera::from_config(&config, 1.0);
        assert_eq!(cam.bounds.max_polar, config.max_polar());
        assert!((cam.polar - (PI - 0.3)).abs() < EPS);
    }

    #[test]
    fn test_resize_ignores_zero_sized_surface() {
        let mut cam = camera();
        cam.resize_projection(800, 400);
        assert!((cam.aspect - 2.0).abs() < EPS);
        cam.resize_projection(0, 400);
        assert!((cam.aspect - 2.0).abs() < EPS);
    }
}
