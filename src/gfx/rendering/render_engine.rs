//! WGPU-based rendering engine for the viewer
//!
//! Owns the surface, device and pipelines, keeps one set of GPU buffers per
//! live [`Drawable`] and draws the backdrop, the object and the UI overlay
//! each frame.

use std::{collections::HashMap, sync::Arc};

use wgpu::{util::DeviceExt, Device, TextureFormat};
use winit::{
    event::WindowEvent,
    window::{Window, WindowId},
};

use crate::config::ViewerConfig;
use crate::error::ViewerError;
use crate::gfx::geometry;
use crate::gfx::material::Material;
use crate::gfx::resources::texture_resource::TextureResource;
use crate::gfx::scene::config::{Backdrop, ConfigChange, GeometryKind, MaterialKind, SceneConfig};
use crate::gfx::scene::drawable::{Drawable, DrawableId};
use crate::ui::UiLayer;
use crate::wgpu_utils::{uniform_bind_group, uniform_layout, UniformBuffer};

use super::frame_uniforms::{GlobalUniform, ObjectUniform};
use super::pipeline_manager::{PipelineConfig, PipelineManager};
use super::{FrameOutcome, FrameView, RenderBackend};

const MESH_PIPELINE: &str = "Mesh";
const TRANSPARENT_PIPELINE: &str = "MeshTransparent";
const WIREFRAME_PIPELINE: &str = "Wireframe";
const SKYBOX_PIPELINE: &str = "Skybox";

/// GPU side of one drawable
struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    edge_buffer: wgpu::Buffer,
    edge_count: u32,
    object_ubo: UniformBuffer<ObjectUniform>,
    object_bind_group: wgpu::BindGroup,
    material: Material,
}

/// Core rendering engine managing GPU resources and draw calls
pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: TextureResource,
    pipeline_manager: PipelineManager,
    global_ubo: UniformBuffer<GlobalUniform>,
    global_bind_group: wgpu::BindGroup,
    object_layout: wgpu::BindGroupLayout,
    meshes: HashMap<DrawableId, GpuMesh>,
    next_id: u64,
    ui: Option<UiLayer>,
}

impl RenderEngine {
    /// Creates a render engine drawing into `window`.
    ///
    /// Fails when no adapter, device or surface format is available.
    pub async fn new(window: Arc<Window>, viewer: &ViewerConfig) -> Result<Self, ViewerError> {
        let size = window.inner_size();
        let width = if size.width > 0 { size.width } else { viewer.window.width };
        let height = if size.height > 0 { size.height } else { viewer.window.height };

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        let info = adapter.get_info();
        log::info!("using adapter {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits {
                    max_texture_dimension_2d: 4096,
                    ..wgpu::Limits::downlevel_defaults()
                },
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        // Shaders encode sRGB themselves
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_capabilities.formats.first().copied())
            .ok_or(ViewerError::UnsupportedSurface)?;
        let alpha_mode = surface_capabilities
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let present_mode = if viewer.vsync {
            wgpu::PresentMode::Fifo
        } else if surface_capabilities
            .present_modes
            .contains(&wgpu::PresentMode::Immediate)
        {
            wgpu::PresentMode::Immediate
        } else {
            wgpu::PresentMode::AutoNoVsync
        };
        log::info!("surface format {format:?}, present mode {present_mode:?}, {width}x{height}");

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture =
            TextureResource::create_depth_texture(&device, &config, "depth_texture");

        let global_layout = uniform_layout(
            &device,
            "Global Bind Group Layout",
            wgpu::ShaderStages::VERTEX_FRAGMENT,
        );
        let object_layout = uniform_layout(
            &device,
            "Object Bind Group Layout",
            wgpu::ShaderStages::VERTEX_FRAGMENT,
        );
        let global_ubo = UniformBuffer::new_with_data(&device, &GlobalUniform::default());
        let global_bind_group = uniform_bind_group(
            &device,
            "Global Bind Group",
            &global_layout,
            global_ubo.binding_resource(),
        );

        let device: Arc<Device> = device.into();
        let queue: Arc<wgpu::Queue> = queue.into();

        let mut pipeline_manager = PipelineManager::new(device.clone());
        pipeline_manager.load_shader("mesh", include_str!("mesh.wgsl"));
        pipeline_manager.load_shader("skybox", include_str!("skybox.wgsl"));
        register_pipelines(&mut pipeline_manager, format, global_layout, &object_layout);
        pipeline_manager.create_all_pipelines()?;

        let ui = UiLayer::new(&device, &queue, format, window);

        Ok(RenderEngine {
            surface,
            device,
            queue,
            config,
            depth_texture,
            pipeline_manager,
            global_ubo,
            global_bind_group,
            object_layout,
            meshes: HashMap::new(),
            next_id: 0,
            ui: Some(ui),
        })
    }

    /// Offers a window event to the UI overlay. Returns true when the
    /// overlay captured it.
    pub fn handle_ui_event(&mut self, window_id: WindowId, event: &WindowEvent) -> bool {
        self.ui
            .as_mut()
            .is_some_and(|ui| ui.handle_event(window_id, event))
    }

    /// Edits made in the control panel since the last call
    pub fn take_config_changes(&mut self) -> Vec<ConfigChange> {
        self.ui
            .as_mut()
            .map(UiLayer::take_changes)
            .unwrap_or_default()
    }

    pub fn surface_size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    fn upload_mesh(&self, kind: GeometryKind, material: Material, label: &str) -> (GpuMesh, usize) {
        let data = geometry::build(kind);
        let vertices = data.to_vertices();
        let edges = data.edge_indices();

        let vertex_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Vertex Buffer")),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Index Buffer")),
                contents: bytemuck::cast_slice(&data.indices),
                usage: wgpu::BufferUsages::INDEX,
            });
        let edge_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Edge Buffer")),
                contents: bytemuck::cast_slice(&edges),
                usage: wgpu::BufferUsages::INDEX,
            });

        let object_ubo = UniformBuffer::new_with_data(
            &self.device,
            &ObjectUniform::new(cgmath::SquareMatrix::identity(), &material, false),
        );
        let object_bind_group = uniform_bind_group(
            &self.device,
            &format!("{label} Object Bind Group"),
            &self.object_layout,
            object_ubo.binding_resource(),
        );

        let mesh = GpuMesh {
            vertex_buffer,
            index_buffer,
            index_count: data.indices.len() as u32,
            edge_buffer,
            edge_count: edges.len() as u32,
            object_ubo,
            object_bind_group,
            material,
        };
        (mesh, data.vertex_count())
    }

    fn clear_color(scene: &SceneConfig) -> wgpu::Color {
        let color = match &scene.backdrop {
            Backdrop::Skybox(gradient) => gradient.horizon,
            Backdrop::Fog(fog) => fog.color,
        };
        wgpu::Color {
            r: f64::from(color.r),
            g: f64::from(color.g),
            b: f64::from(color.b),
            a: 1.0,
        }
    }
}

fn register_pipelines(
    pipeline_manager: &mut PipelineManager,
    format: TextureFormat,
    global_layout: wgpu::BindGroupLayout,
    object_layout: &wgpu::BindGroupLayout,
) {
    let mesh_layouts = vec![global_layout.clone(), object_layout.clone()];
    let mesh = PipelineConfig::default()
        .with_shader("mesh")
        .with_bind_group_layouts(mesh_layouts)
        .with_color_target(format, Some(wgpu::BlendState::ALPHA_BLENDING));

    pipeline_manager.register_pipeline(
        MESH_PIPELINE,
        mesh.clone()
            .with_label("MESH")
            .with_depth(TextureResource::DEPTH_FORMAT, true),
    );
    pipeline_manager.register_pipeline(
        TRANSPARENT_PIPELINE,
        mesh.clone()
            .with_label("MESH TRANSPARENT")
            .with_depth(TextureResource::DEPTH_FORMAT, false),
    );
    pipeline_manager.register_pipeline(
        WIREFRAME_PIPELINE,
        mesh.with_label("WIREFRAME")
            .with_primitive_topology(wgpu::PrimitiveTopology::LineList)
            .with_depth(TextureResource::DEPTH_FORMAT, true),
    );
    pipeline_manager.register_pipeline(
        SKYBOX_PIPELINE,
        PipelineConfig::default()
            .with_label("SKYBOX")
            .with_shader("skybox")
            .with_bind_group_layouts(vec![global_layout])
            .with_color_target(format, Some(wgpu::BlendState::REPLACE))
            .with_depth(TextureResource::DEPTH_FORMAT, false)
            .with_no_vertex_buffers(),
    );
}

impl RenderBackend for RenderEngine {
    fn create_drawable(&mut self, geometry: GeometryKind, material: MaterialKind) -> Drawable {
        self.next_id += 1;
        let id = DrawableId(self.next_id);
        let (mesh, vertex_count) =
            self.upload_mesh(geometry, Material::preset(material), geometry.label());
        log::debug!(
            "created drawable {} ({} / {}, {vertex_count} vertices)",
            id.0,
            geometry.tag(),
            material.tag()
        );
        self.meshes.insert(id, mesh);
        Drawable::new(id, geometry, material, vertex_count)
    }

    fn release_drawable(&mut self, drawable: Drawable) {
        match self.meshes.remove(&drawable.id()) {
            Some(mesh) => {
                mesh.vertex_buffer.destroy();
                mesh.index_buffer.destroy();
                mesh.edge_buffer.destroy();
                log::debug!("released drawable {}", drawable.id().0);
            }
            None => log::warn!("release of unknown drawable {}", drawable.id().0),
        }
    }

    fn draw(&mut self, frame: &FrameView<'_>) -> Result<FrameOutcome, ViewerError> {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("surface lost or outdated, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return Ok(FrameOutcome::Skipped);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                return Err(ViewerError::Frame(wgpu::SurfaceError::OutOfMemory));
            }
            Err(err) => {
                log::warn!("skipping frame: {err}");
                return Ok(FrameOutcome::Skipped);
            }
        };

        self.global_ubo
            .update_content(&self.queue, GlobalUniform::from_frame(frame));

        if let Some(drawable) = frame.drawable {
            if let Some(mesh) = self.meshes.get_mut(&drawable.id()) {
                let uniform = ObjectUniform::new(frame.model, &mesh.material, drawable.wireframe());
                mesh.object_ubo.update_content(&self.queue, uniform);
            }
        }
        let mesh = frame.drawable.and_then(|drawable| {
            self.meshes
                .get(&drawable.id())
                .map(|mesh| (mesh, drawable.wireframe()))
        });

        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(Self::clear_color(frame.scene)),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_bind_group(0, &self.global_bind_group, &[]);

            if frame.scene.skybox().is_some() {
                if let Some(pipeline) = self.pipeline_manager.pipeline(SKYBOX_PIPELINE) {
                    render_pass.set_pipeline(pipeline);
                    render_pass.draw(0..3, 0..1);
                }
            }

            if let Some((mesh, wireframe)) = mesh {
                let (pipeline_name, buffer, count) = if wireframe {
                    (WIREFRAME_PIPELINE, &mesh.edge_buffer, mesh.edge_count)
                } else if mesh.material.is_transparent() {
                    (TRANSPARENT_PIPELINE, &mesh.index_buffer, mesh.index_count)
                } else {
                    (MESH_PIPELINE, &mesh.index_buffer, mesh.index_count)
                };

                if let Some(pipeline) = self.pipeline_manager.pipeline(pipeline_name) {
                    render_pass.set_pipeline(pipeline);
                    render_pass.set_bind_group(1, &mesh.object_bind_group, &[]);
                    render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                    render_pass.set_index_buffer(buffer.slice(..), wgpu::IndexFormat::Uint32);
                    render_pass.draw_indexed(0..count, 0, 0..1);
                }
            }
        }

        if let Some(ui) = self.ui.as_mut() {
            ui.build(frame.scene, &frame.readout);
            ui.render(&self.device, &self.queue, &mut encoder, &surface_texture_view);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        Ok(FrameOutcome::Presented)
    }

    fn on_resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 || (width, height) == self.surface_size() {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, &self.config, "depth_texture");
        if let Some(ui) = self.ui.as_mut() {
            ui.resize(width, height);
        }
    }
}
