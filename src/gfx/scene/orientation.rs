use cgmath::{Matrix4, Rad};

/// Pitch increment per autorotation step at speed 1.0
pub const AUTO_ROTATE_PITCH_STEP: f32 = 0.005;
/// Yaw increment per autorotation step at speed 1.0
pub const AUTO_ROTATE_YAW_STEP: f32 = 0.01;

/// Accumulated rotation of the displayed object
///
/// Angles are never wrapped; the trigonometry in [`Self::model_matrix`] makes
/// them periodic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectOrientation {
    pub pitch: f32,
    pub yaw: f32,
    /// Radians per pixel of drag
    pub sensitivity: f32,
}

impl Default for ObjectOrientation {
    fn default() -> Self {
        Self::new(0.01)
    }
}

impl ObjectOrientation {
    pub fn new(sensitivity: f32) -> Self {
        Self {
            pitch: 0.0,
            yaw: 0.0,
            sensitivity,
        }
    }

    /// Horizontal drag turns the object about Y, vertical drag about X.
    pub fn apply_drag(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.sensitivity;
        self.pitch += dy * self.sensitivity;
    }

    /// Advances autorotation by `frame_units` reference frames.
    ///
    /// `frame_units` is 1.0 for frame-coupled rotation; frame-rate independent
    /// timing passes the elapsed time expressed in reference frames.
    pub fn apply_auto_rotate(&mut self, speed_multiplier: f32, frame_units: f32) {
        let scale = speed_multiplier * frame_units;
        self.pitch += AUTO_ROTATE_PITCH_STEP * scale;
        self.yaw += AUTO_ROTATE_YAW_STEP * scale;
    }

    /// Object-to-world transform, X rotation applied after Y (XYZ Euler order)
    pub fn model_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_angle_x(Rad(self.pitch)) * Matrix4::from_angle_y(Rad(self.yaw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{SquareMatrix, Vector4};

    #[test]
    fn test_horizontal_drag_only_changes_yaw() {
        let mut orientation = ObjectOrientation::default();
        orientation.apply_drag(100.0, 0.0);
        assert!((orientation.yaw - 1.0).abs() < 1e-6);
        assert_eq!(orientation.pitch, 0.0);
    }

    #[test]
    fn test_auto_rotate_steps_scale_with_speed() {
        let mut orientation = ObjectOrientation::default();
        orientation.apply_auto_rotate(2.0, 1.0);
        assert!((orientation.pitch - 0.01).abs() < 1e-6);
        assert!((orientation.yaw - 0.02).abs() < 1e-6);

        orientation.apply_auto_rotate(0.0, 1.0);
        assert!((orientation.pitch - 0.01).abs() < 1e-6);
    }

    #[test]
    fn test_model_matrix_is_identity_at_rest_and_periodic() {
        let mut orientation = ObjectOrientation::default();
        assert_eq!(orientation.model_matrix(), Matrix4::identity());

        orientation.yaw = std::f32::consts::TAU;
        let v = orientation.model_matrix() * Vector4::new(1.0, 0.0, 0.0, 1.0);
        assert!((v.x - 1.0).abs() < 1e-5);
        assert!(v.z.abs() < 1e-5);
    }
}
