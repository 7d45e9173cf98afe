use crate::gfx::scene::config::{GeometryKind, MaterialKind};

/// Identifies the GPU resources a backend holds for one drawable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DrawableId(pub u64);

/// Handle to one shape + material pairing owned by a render backend
///
/// Not `Clone`: a handle is moved into
/// [`RenderBackend::release_drawable`](crate::gfx::rendering::RenderBackend::release_drawable),
/// so a released drawable cannot be drawn again.
#[derive(Debug, PartialEq)]
pub struct Drawable {
    id: DrawableId,
    geometry: GeometryKind,
    material: MaterialKind,
    vertex_count: usize,
    wireframe: bool,
}

impl Drawable {
    pub fn new(
        id: DrawableId,
        geometry: GeometryKind,
        material: MaterialKind,
        vertex_count: usize,
    ) -> Self {
        Self {
            id,
            geometry,
            material,
            vertex_count,
            wireframe: false,
        }
    }

    pub fn id(&self) -> DrawableId {
        self.id
    }

    pub fn geometry(&self) -> GeometryKind {
        self.geometry
    }

    pub fn material(&self) -> MaterialKind {
        self.material
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn wireframe(&self) -> bool {
        self.wireframe
    }

    /// Switches between filled and edge rendering without rebuilding buffers.
    pub fn set_wireframe(&mut self, wireframe: bool) {
        self.wireframe = wireframe;
    }
}
