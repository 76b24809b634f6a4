use crate::mesh::{
    CUBE_VERTEX_COUNT, LitVertex, TexturedVertex, lit_cube_vertices, textured_cube_vertices,
};
use crate::shaders::{self, ShaderSources};
use crate::texture::{GpuTexture, load_or_fallback};
use bytemuck::{Pod, Zeroable};
use flycube_common::{SceneSettings, Settings};
use flycube_frame::FrameTransforms;
use glam::Mat4;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct FrameUniforms {
    view: [[f32; 4]; 4],
    projection: [[f32; 4]; 4],
    light_position: [f32; 4],
    light_color: [f32; 4],
    object_color: [f32; 4],
    params: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct InstanceData {
    model: [[f32; 4]; 4],
}

impl InstanceData {
    const ATTRIBUTES: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        2 => Float32x4,
        3 => Float32x4,
        4 => Float32x4,
        5 => Float32x4,
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<InstanceData>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

fn rgb(c: [f32; 3]) -> [f32; 4] {
    [c[0], c[1], c[2], 1.0]
}

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Room for the lit cube, the marker and the textured instances.
const MAX_INSTANCES: u32 = 64;

/// Instance slots in draw order; textured instances start after the two fixed models.
const LIT_SLOT: u32 = 0;
const LIGHT_SLOT: u32 = 1;
const TEXTURED_FIRST_SLOT: u32 = 2;

/// wgpu-based scene renderer.
pub struct WgpuRenderer {
    lit_pipeline: wgpu::RenderPipeline,
    light_pipeline: wgpu::RenderPipeline,
    textured_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    texture_bind_group: wgpu::BindGroup,
    lit_vertex_buffer: wgpu::Buffer,
    textured_vertex_buffer: wgpu::Buffer,
    instance_buffer: wgpu::Buffer,
    depth_texture: wgpu::TextureView,
    // Keeps both textures alive alongside their bind group.
    _textures: [GpuTexture; 2],
    scene: SceneSettings,
}

impl WgpuRenderer {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        settings: &Settings,
    ) -> Self {
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("frame_uniform_buffer"),
            contents: bytemuck::bytes_of(&FrameUniforms {
                view: Mat4::IDENTITY.to_cols_array_2d(),
                projection: Mat4::IDENTITY.to_cols_array_2d(),
                light_position: [0.0; 4],
                light_color: [1.0; 4],
                object_color: [1.0; 4],
                params: [0.0; 4],
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_layout = frame_uniform_layout(device);

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("frame_uniform_bind_group"),
            layout: &uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        // Textures
        let max_texture_side = device.limits().max_texture_dimension_2d;
        let primary = GpuTexture::upload(
            device,
            queue,
            "primary_texture",
            &load_or_fallback(&settings.assets.primary_texture, max_texture_side),
        );
        let secondary = GpuTexture::upload(
            device,
            queue,
            "secondary_texture",
            &load_or_fallback(&settings.assets.secondary_texture, max_texture_side),
        );
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("texture_sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let texture_entry = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                view_dimension: wgpu::TextureViewDimension::D2,
                multisampled: false,
            },
            count: None,
        };
        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("texture_layout"),
            entries: &[
                texture_entry(0),
                texture_entry(1),
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });
        let texture_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("texture_bind_group"),
            layout: &texture_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&primary.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&secondary.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        let solid_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("solid_pipeline_layout"),
            bind_group_layouts: &[&uniform_layout],
            push_constant_ranges: &[],
        });
        let textured_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("textured_pipeline_layout"),
            bind_group_layouts: &[&uniform_layout, &texture_layout],
            push_constant_ranges: &[],
        });

        // Shaders and pipelines
        let builtin = ShaderSources::builtin();
        let sources = ShaderSources::load(settings.assets.shader_dir.as_deref());
        let (lit_pipeline, _) = build_pipeline(
            device,
            "lit_pipeline",
            &solid_layout,
            (&*sources.lit, &*builtin.lit),
            LitVertex::layout(),
            surface_format,
        );
        let (light_pipeline, _) = build_pipeline(
            device,
            "light_pipeline",
            &solid_layout,
            (&*sources.light, &*builtin.light),
            LitVertex::layout(),
            surface_format,
        );
        let (textured_pipeline, _) = build_pipeline(
            device,
            "textured_pipeline",
            &textured_layout,
            (&*sources.textured, &*builtin.textured),
            TexturedVertex::layout(),
            surface_format,
        );

        // Cube meshes
        let lit_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("lit_cube_vertex_buffer"),
            contents: bytemuck::cast_slice(&lit_cube_vertices()),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let textured_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("textured_cube_vertex_buffer"),
            contents: bytemuck::cast_slice(&textured_cube_vertices()),
            usage: wgpu::BufferUsages::VERTEX,
        });

        // Instance buffer (pre-allocated)
        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("instance_buffer"),
            size: (MAX_INSTANCES as u64) * std::mem::size_of::<InstanceData>() as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let depth_texture = Self::create_depth_texture(device, width, height);

        Self {
            lit_pipeline,
            light_pipeline,
            textured_pipeline,
            uniform_buffer,
            uniform_bind_group,
            texture_bind_group,
            lit_vertex_buffer,
            textured_vertex_buffer,
            instance_buffer,
            depth_texture,
            _textures: [primary, secondary],
            scene: settings.scene.clone(),
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    /// Render one frame: lit cube, light marker, then the textured cubes.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        frame: &FrameTransforms,
    ) {
        let scene = &self.scene;
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&FrameUniforms {
                view: frame.view.to_cols_array_2d(),
                projection: frame.projection.to_cols_array_2d(),
                light_position: scene.light_position.extend(1.0).to_array(),
                light_color: rgb(scene.light_color),
                object_color: rgb(scene.object_color),
                params: [scene.secondary_texture_mix, 0.0, 0.0, 0.0],
            }),
        );

        let instances: Vec<InstanceData> = frame
            .models()
            .take(MAX_INSTANCES as usize)
            .map(|model| InstanceData {
                model: model.to_cols_array_2d(),
            })
            .collect();
        if frame.model_count() > instances.len() {
            tracing::warn!(
                "frame has {} models; drawing the first {MAX_INSTANCES}",
                frame.model_count()
            );
        }
        queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));
        let instance_end = instances.len() as u32;

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });

        {
            let [r, g, b] = scene.clear_color;
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("main_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            pass.set_vertex_buffer(1, self.instance_buffer.slice(..));

            // Lit cube
            pass.set_pipeline(&self.lit_pipeline);
            pass.set_vertex_buffer(0, self.lit_vertex_buffer.slice(..));
            pass.draw(0..CUBE_VERTEX_COUNT, LIT_SLOT..LIGHT_SLOT);

            // Light marker shares the lit cube's vertices
            pass.set_pipeline(&self.light_pipeline);
            pass.draw(0..CUBE_VERTEX_COUNT, LIGHT_SLOT..TEXTURED_FIRST_SLOT);

            // Textured cubes
            if instance_end > TEXTURED_FIRST_SLOT {
                pass.set_pipeline(&self.textured_pipeline);
                pass.set_bind_group(1, &self.texture_bind_group, &[]);
                pass.set_vertex_buffer(0, self.textured_vertex_buffer.slice(..));
                pass.draw(0..CUBE_VERTEX_COUNT, TEXTURED_FIRST_SLOT..instance_end);
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}

fn frame_uniform_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("frame_uniform_layout"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    })
}

/// Which WGSL a pipeline was finally built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShaderOrigin {
    Configured,
    Builtin,
}

/// Build a pipeline from the configured source (`sources.0`). If the module or
/// the pipeline fails validation (missing entry point, mismatched bindings or
/// vertex inputs), rebuild it from the built-in source (`sources.1`).
fn build_pipeline(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::PipelineLayout,
    sources: (&str, &str),
    vertex_layout: wgpu::VertexBufferLayout<'static>,
    surface_format: wgpu::TextureFormat,
) -> (wgpu::RenderPipeline, ShaderOrigin) {
    let (source, builtin) = sources;
    let attempt = shaders::validated(device, label, || {
        let module = shaders::shader_module(device, label, source);
        create_pipeline(device, label, layout, &module, vertex_layout.clone(), surface_format)
    });
    match attempt {
        Ok(pipeline) => (pipeline, ShaderOrigin::Configured),
        Err(err) => {
            tracing::error!("{err}; using built-in shader");
            let module = shaders::shader_module(device, label, builtin);
            let pipeline =
                create_pipeline(device, label, layout, &module, vertex_layout, surface_format);
            (pipeline, ShaderOrigin::Builtin)
        }
    }
}

fn create_pipeline(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    vertex_layout: wgpu::VertexBufferLayout<'static>,
    surface_format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[vertex_layout, InstanceData::layout()],
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            // Cube winding is mixed, so nothing is culled.
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: Default::default(),
            bias: Default::default(),
        }),
        multisample: Default::default(),
        multiview: None,
        cache: None,
    })
}
