//! Render pipeline management system for wgpu
//!
//! Shaders are loaded by name, pipelines are described by a [`PipelineConfig`]
//! and all of them are built up front with [`PipelineManager::create_all_pipelines`].

use std::{collections::HashMap, sync::Arc};
use wgpu::*;

use crate::error::ViewerError;
use crate::gfx::scene::vertex::Vertex3D;

/// Depth test settings for a pipeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthConfig {
    pub format: TextureFormat,
    pub write_enabled: bool,
    pub compare: CompareFunction,
}

/// Configuration for creating a render pipeline
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub label: String,
    pub shader: String,
    pub bind_group_layouts: Vec<BindGroupLayout>,
    pub primitive_topology: PrimitiveTopology,
    pub cull_mode: Option<Face>,
    pub depth: Option<DepthConfig>,
    pub color_targets: Vec<Option<ColorTargetState>>,
    /// Fullscreen passes generate their vertices in the shader
    pub no_vertex_buffers: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            label: "Default Pipeline".to_string(),
            shader: "mesh".to_string(),
            bind_group_layouts: Vec::new(),
            primitive_topology: PrimitiveTopology::TriangleList,
            cull_mode: None,
            depth: None,
            color_targets: vec![Some(ColorTargetState {
                format: TextureFormat::Bgra8Unorm,
                blend: Some(BlendState::REPLACE),
                write_mask: ColorWrites::ALL,
            })],
            no_vertex_buffers: false,
        }
    }
}

impl PipelineConfig {
    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_owned();
        self
    }

    pub fn with_shader(mut self, shader: &str) -> Self {
        self.shader = shader.to_string();
        self
    }

    pub fn with_bind_group_layouts(mut self, layouts: Vec<BindGroupLayout>) -> Self {
        self.bind_group_layouts = layouts;
        self
    }

    pub fn with_primitive_topology(mut self, topology: PrimitiveTopology) -> Self {
        self.primitive_topology = topology;
        self
    }

    pub fn with_cull_mode(mut self, face: Option<Face>) -> Self {
        self.cull_mode = face;
        self
    }

    /// Enables depth testing against a buffer of `format`
    pub fn with_depth(mut self, format: TextureFormat, write_enabled: bool) -> Self {
        self.depth = Some(DepthConfig {
            format,
            write_enabled,
            compare: CompareFunction::Less,
        });
        self
    }

    /// Single color target of `format` with the given blending
    pub fn with_color_target(mut self, format: TextureFormat, blend: Option<BlendState>) -> Self {
        self.color_targets = vec![Some(ColorTargetState {
            format,
            blend,
            write_mask: ColorWrites::ALL,
        })];
        self
    }

    pub fn with_no_vertex_buffers(mut self) -> Self {
        self.no_vertex_buffers = true;
        self
    }
}

/// Owns shader modules and the pipelines built from them
pub struct PipelineManager {
    device: Arc<Device>,
    pipelines: HashMap<String, RenderPipeline>,
    pipeline_configs: HashMap<String, PipelineConfig>,
    shader_modules: HashMap<String, ShaderModule>,
}

impl PipelineManager {
    pub fn new(device: Arc<Device>) -> Self {
        Self {
            device,
            pipelines: HashMap::new(),
            pipeline_configs: HashMap::new(),
            shader_modules: HashMap::new(),
        }
    }

    /// Compiles a WGSL module under `name`.
    pub fn load_shader(&mut self, name: &str, source: &str) {
        let shader_module = self.device.create_shader_module(ShaderModuleDescriptor {
            label: Some(name),
            source: ShaderSource::Wgsl(source.into()),
        });
        self.shader_modules.insert(name.to_string(), shader_module);
    }

    /// Registers a pipeline configuration; it is built by
    /// [`Self::create_all_pipelines`].
    pub fn register_pipeline(&mut self, name: &str, config: PipelineConfig) {
        self.pipeline_configs.insert(name.to_string(), config);
    }

    /// Builds every registered pipeline that does not exist yet.
    pub fn create_all_pipelines(&mut self) -> Result<(), ViewerError> {
        let pending: Vec<String> = self
            .pipeline_configs
            .keys()
            .filter(|name| !self.pipelines.contains_key(*name))
            .cloned()
            .collect();

        for name in pending {
            let config = &self.pipeline_configs[&name];
            let pipeline = self.create_pipeline_from_config(&name, config)?;
            log::debug!("created pipeline {name}");
            self.pipelines.insert(name, pipeline);
        }
        Ok(())
    }

    pub fn pipeline(&self, name: &str) -> Option<&RenderPipeline> {
        self.pipelines.get(name)
    }

    fn create_pipeline_from_config(
        &self,
        name: &str,
        config: &PipelineConfig,
    ) -> Result<RenderPipeline, ViewerError> {
        let shader = self
            .shader_modules
            .get(&config.shader)
            .ok_or_else(|| ViewerError::MissingShader {
                pipeline: name.to_string(),
                shader: config.shader.clone(),
            })?;

        let bind_group_layout_refs: Vec<&BindGroupLayout> =
            config.bind_group_layouts.iter().collect();
        let pipeline_layout = self
            .device
            .create_pipeline_layout(&PipelineLayoutDescriptor {
                label: Some(&format!("{} Layout", name)),
                bind_group_layouts: &bind_group_layout_refs,
                push_constant_ranges: &[],
            });

        let vertex_buffers: &[VertexBufferLayout] = if config.no_vertex_buffers {
            &[]
        } else {
            &[Vertex3D::desc()]
        };

        let depth_stencil = config.depth.map(|depth| DepthStencilState {
            format: depth.format,
            depth_write_enabled: depth.write_enabled,
            depth_compare: depth.compare,
            stencil: StencilState::default(),
            bias: DepthBiasState::default(),
        });

        Ok(self
            .device
            .create_render_pipeline(&RenderPipelineDescriptor {
                label: Some(&config.label),
                layout: Some(&pipeline_layout),
                vertex: VertexState {
                    module: shader,
                    entry_point: Some("vs_main"),
                    buffers: vertex_buffers,
                    compilation_options: PipelineCompilationOptions::default(),
                },
                fragment: Some(FragmentState {
                    module: shader,
                    entry_point: Some("fs_main"),
                    targets: &config.color_targets,
                    compilation_options: PipelineCompilationOptions::default(),
                }),
                primitive: PrimitiveState {
                    topology: config.primitive_topology,
                    strip_index_format: None,
                    front_face: FrontFace::Ccw,
                    cull_mode: config.cull_mode,
                    polygon_mode: PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil,
                multisample: MultisampleState::default(),
                multiview: None,
                cache: None,
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = PipelineConfig::default()
            .with_label("Wireframe")
            .with_shader("mesh")
            .with_primitive_topology(PrimitiveTopology::LineList)
            .with_depth(TextureFormat::Depth32Float, false)
            .with_color_target(TextureFormat::Rgba8Unorm, Some(BlendState::ALPHA_BLENDING));

        assert_eq!(config.label, "Wireframe");
        assert_eq!(config.primitive_topology, PrimitiveTopology::LineList);
        assert_eq!(
            config.depth.map(|d| d.write_enabled),
            Some(false)
        );
        let target = config.color_targets[0].as_ref().unwrap();
        assert_eq!(target.format, TextureFormat::Rgba8Unorm);
        assert!(!config.no_vertex_buffers);
    }
}
