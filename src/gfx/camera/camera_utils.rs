use cgmath::{Matrix4, SquareMatrix, Vector3};

pub trait Camera: Sized {
    fn build_view_projection_matrix(&self) -> Matrix4<f32>;
}

/// Camera state published once per frame
///
/// Stored in the layout the shaders read, so the eye is homogeneous to keep
/// the 16 byte alignment.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug, PartialEq)]
pub struct CameraUniform {
    pub view_position: [f32; 4],
    pub view_proj: [[f32; 4]; 4],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self {
            view_position: [0.0, 0.0, 0.0, 1.0],
            view_proj: Matrix4::identity().into(),
        }
    }
}

impl CameraUniform {
    pub fn eye(&self) -> Vector3<f32> {
        let [x, y, z, _] = self.view_position;
        Vector3::new(x, y, z)
    }

    pub fn view_proj_matrix(&self) -> Matrix4<f32> {
        Matrix4::from(self.view_proj)
    }
}

pub fn convert_matrix4_to_array(matrix4: Matrix4<f32>) -> [[f32; 4]; 4] {
    matrix4.into()
}
