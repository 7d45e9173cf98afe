//! # Vertex Data Structures
//!
//! GPU vertex format shared by every generated solid.

/// A 3D vertex with position and normal data.
///
/// `#[repr(C)]` keeps the layout stable for upload through `bytemuck`.
///
/// ```
/// use spindle::gfx::scene::vertex::Vertex3D;
///
/// let vertex = Vertex3D {
///     position: [0.0, 1.5, 0.0],
///     normal: [0.0, 1.0, 0.0],
/// };
/// assert_eq!(bytemuck::bytes_of(&vertex).len(), 24);
/// ```
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex3D {
    /// Object-space position
    pub position: [f32; 3],
    /// Unit normal for lighting
    pub normal: [f32; 3],
}

impl Vertex3D {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    /// Vertex buffer layout: position at location 0, normal at location 1.
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex3D>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}
