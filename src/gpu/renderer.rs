//! wgpu renderer for the model viewport
//!
//! Owns the pipelines and GPU buffers. Scene geometry is uploaded when
//! the snapshot's revision changes and dropped with it; per-draw uniforms
//! are rewritten every frame from the snapshot's model matrices.

use crate::scene::MeshData;
use crate::viewer::RenderSnapshot;
use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use log::debug;
use std::collections::HashSet;
use std::mem;
use wgpu::util::DeviceExt;
use wgpu::{
    BindGroup, BindGroupLayout, Buffer, BufferUsages, CompareFunction, DepthBiasState,
    DepthStencilState, Device, Face, FrontFace, PolygonMode, PrimitiveTopology, Queue,
    RenderPass, RenderPipeline, ShaderStages, TextureFormat, VertexAttribute,
    VertexBufferLayout, VertexFormat, VertexStepMode,
};

/// Surface format of the egui render pass we draw into
const TARGET_FORMAT: TextureFormat = TextureFormat::Bgra8Unorm;
const DEPTH_FORMAT: TextureFormat = TextureFormat::Depth32Float;

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct Vertex3D {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex3D {
    const ATTRIBUTES: [VertexAttribute; 3] = [
        VertexAttribute {
            offset: 0,
            shader_location: 0,
            format: VertexFormat::Float32x3,
        },
        VertexAttribute {
            offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
            shader_location: 1,
            format: VertexFormat::Float32x3,
        },
        VertexAttribute {
            offset: mem::size_of::<[f32; 6]>() as wgpu::BufferAddress,
            shader_location: 2,
            format: VertexFormat::Float32x2,
        },
    ];

    pub fn desc<'a>() -> VertexBufferLayout<'a> {
        VertexBufferLayout {
            array_stride: mem::size_of::<Vertex3D>() as wgpu::BufferAddress,
            step_mode: VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Per-draw uniforms, mirrored by `MeshUniforms` in the WGSL
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct MeshUniforms {
    view_proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    /// xyz = camera position, w = exposure
    camera: [f32; 4],
    base_color: [f32; 4],
    /// x = metallic, y = roughness, z = hemisphere, w = key intensity
    material: [f32; 4],
    /// x = rim intensity
    light: [f32; 4],
}

/// Per-frame uniforms shared by the grid, axes, and background
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct FrameUniforms {
    view_proj: [[f32; 4]; 4],
    camera: [f32; 4],
    background: [f32; 4],
}

struct GpuMesh {
    vertex_buffer: Buffer,
    index_buffer: Buffer,
    index_count: u32,
    /// Line-list edge indices for wireframe draws
    wire_index_buffer: Buffer,
    wire_index_count: u32,
}

struct UploadedScene {
    revision: u64,
    meshes: Vec<GpuMesh>,
}

/// 3D renderer shared by the viewport paint callbacks
pub struct Renderer3D {
    pub device: Option<Device>,
    pub queue: Option<Queue>,

    bind_group_layout: Option<BindGroupLayout>,
    mesh_pipeline: Option<RenderPipeline>,
    mesh_pipeline_double_sided: Option<RenderPipeline>,
    wireframe_pipeline: Option<RenderPipeline>,
    grid_pipeline: Option<RenderPipeline>,
    axis_pipeline: Option<RenderPipeline>,
    background_pipeline: Option<RenderPipeline>,

    frame_uniform_buffer: Option<Buffer>,
    frame_bind_group: Option<BindGroup>,
    grid_vertex_buffer: Option<Buffer>,
    grid_vertex_count: u32,
    axis_vertex_buffer: Option<Buffer>,
    axis_vertex_count: u32,

    /// One uniform buffer + bind group per draw slot, grown on demand
    draw_resources: Vec<(Buffer, BindGroup)>,
    uploaded: Option<UploadedScene>,
}

impl Default for Renderer3D {
    fn default() -> Self {
        Self {
            device: None,
            queue: None,
            bind_group_layout: None,
            mesh_pipeline: None,
            mesh_pipeline_double_sided: None,
            wireframe_pipeline: None,
            grid_pipeline: None,
            axis_pipeline: None,
            background_pipeline: None,
            frame_uniform_buffer: None,
            frame_bind_group: None,
            grid_vertex_buffer: None,
            grid_vertex_count: 0,
            axis_vertex_buffer: None,
            axis_vertex_count: 0,
            draw_resources: Vec::new(),
            uploaded: None,
        }
    }
}

impl Renderer3D {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_initialized(&self) -> bool {
        self.device.is_some() && self.mesh_pipeline.is_some()
    }

    /// One-time setup from the egui-provided device and queue
    pub fn initialize_from_refs(&mut self, device: &Device, queue: &Queue) {
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: ShaderStages::VERTEX | ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
            label: Some("Viewer Bind Group Layout"),
        });

        let frame_uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Frame Uniform Buffer"),
            size: mem::size_of::<FrameUniforms>() as u64,
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_uniform_buffer.as_entire_binding(),
            }],
            label: Some("Frame Bind Group"),
        });

        self.create_pipelines(device, &bind_group_layout);
        self.create_grid_buffer(device, 10.0, 20);
        self.create_axis_buffer(device, 1.5);

        self.frame_uniform_buffer = Some(frame_uniform_buffer);
        self.frame_bind_group = Some(frame_bind_group);
        self.bind_group_layout = Some(bind_group_layout);
        self.device = Some(device.clone());
        self.queue = Some(queue.clone());
    }

    fn depth_state(write: bool, compare: CompareFunction) -> DepthStencilState {
        DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: write,
            depth_compare: compare,
            stencil: wgpu::StencilState::default(),
            bias: DepthBiasState::default(),
        }
    }

    fn create_pipelines(&mut self, device: &Device, bind_group_layout: &BindGroupLayout) {
        let mesh_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Mesh Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/mesh3d.wgsl").into()),
        });
        let wireframe_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Wireframe Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/wireframe3d.wgsl").into()),
        });
        let grid_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Grid Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/grid3d.wgsl").into()),
        });
        let axis_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Axis Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/axis_gizmo.wgsl").into()),
        });
        let background_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Background Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/background3d.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Viewer Pipeline Layout"),
            bind_group_layouts: &[bind_group_layout],
            push_constant_ranges: &[],
        });

        let mesh_pipeline = |cull: Option<Face>, label: &str| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&pipeline_layout),
                cache: None,
                vertex: wgpu::VertexState {
                    module: &mesh_shader,
                    entry_point: Some("vs_main"),
                    buffers: &[Vertex3D::desc()],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &mesh_shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: TARGET_FORMAT,
                        blend: Some(wgpu::BlendState::REPLACE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: FrontFace::Ccw,
                    cull_mode: cull,
                    polygon_mode: PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: Some(Self::depth_state(true, CompareFunction::Less)),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
            })
        };
        self.mesh_pipeline = Some(mesh_pipeline(Some(Face::Back), "Mesh Pipeline"));
        self.mesh_pipeline_double_sided = Some(mesh_pipeline(None, "Mesh Pipeline Double Sided"));

        self.wireframe_pipeline = Some(device.create_render_pipeline(
            &wgpu::RenderPipelineDescriptor {
                label: Some("Wireframe Pipeline"),
                layout: Some(&pipeline_layout),
                cache: None,
                vertex: wgpu::VertexState {
                    module: &wireframe_shader,
                    entry_point: Some("vs_main"),
                    buffers: &[Vertex3D::desc()],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &wireframe_shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: TARGET_FORMAT,
                        blend: Some(wgpu::BlendState::REPLACE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: PrimitiveTopology::LineList,
                    strip_index_format: None,
                    front_face: FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: Some(Self::depth_state(true, CompareFunction::Less)),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
            },
        ));

        let position_only = VertexBufferLayout {
            array_stride: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
            step_mode: VertexStepMode::Vertex,
            attributes: &[VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: VertexFormat::Float32x3,
            }],
        };
        self.grid_pipeline = Some(device.create_render_pipeline(
            &wgpu::RenderPipelineDescriptor {
                label: Some("Grid Pipeline"),
                layout: Some(&pipeline_layout),
                cache: None,
                vertex: wgpu::VertexState {
                    module: &grid_shader,
                    entry_point: Some("vs_main"),
                    buffers: std::slice::from_ref(&position_only),
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &grid_shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: TARGET_FORMAT,
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: PrimitiveTopology::LineList,
                    strip_index_format: None,
                    front_face: FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: Some(Self::depth_state(false, CompareFunction::Less)),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
            },
        ));

        let axis_vertex_layout = VertexBufferLayout {
            array_stride: mem::size_of::<[f32; 6]>() as wgpu::BufferAddress,
            step_mode: VertexStepMode::Vertex,
            attributes: &[
                VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: VertexFormat::Float32x3,
                },
                VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: VertexFormat::Float32x3,
                },
            ],
        };
        self.axis_pipeline = Some(device.create_render_pipeline(
            &wgpu::RenderPipelineDescriptor {
                label: Some("Axis Pipeline"),
                layout: Some(&pipeline_layout),
                cache: None,
                vertex: wgpu::VertexState {
                    module: &axis_shader,
                    entry_point: Some("vs_main"),
                    buffers: std::slice::from_ref(&axis_vertex_layout),
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &axis_shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: TARGET_FORMAT,
                        blend: Some(wgpu::BlendState::REPLACE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: PrimitiveTopology::LineList,
                    strip_index_format: None,
                    front_face: FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: Some(Self::depth_state(false, CompareFunction::Less)),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
            },
        ));

        self.background_pipeline = Some(device.create_render_pipeline(
            &wgpu::RenderPipelineDescriptor {
                label: Some("Background Pipeline"),
                layout: Some(&pipeline_layout),
                cache: None,
                vertex: wgpu::VertexState {
                    module: &background_shader,
                    entry_point: Some("vs_main"),
                    buffers: &[],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &background_shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: TARGET_FORMAT,
                        blend: Some(wgpu::BlendState::REPLACE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: Some(Self::depth_state(false, CompareFunction::Always)),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
            },
        ));
    }

    fn create_grid_buffer(&mut self, device: &Device, half_extent: f32, divisions: u32) {
        let mut vertices: Vec<[f32; 3]> = Vec::new();
        let step = (half_extent * 2.0) / divisions as f32;
        for i in 0..=divisions {
            let offset = -half_extent + i as f32 * step;
            vertices.push([offset, 0.0, -half_extent]);
            vertices.push([offset, 0.0, half_extent]);
            vertices.push([-half_extent, 0.0, offset]);
            vertices.push([half_extent, 0.0, offset]);
        }
        self.grid_vertex_count = vertices.len() as u32;
        self.grid_vertex_buffer = Some(device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Grid Vertex Buffer"),
                contents: bytemuck::cast_slice(&vertices),
                usage: BufferUsages::VERTEX,
            },
        ));
    }

    fn create_axis_buffer(&mut self, device: &Device, length: f32) {
        // position + color interleaved
        let vertices: [[f32; 6]; 6] = [
            [0.0, 0.0, 0.0, 0.9, 0.2, 0.2],
            [length, 0.0, 0.0, 0.9, 0.2, 0.2],
            [0.0, 0.0, 0.0, 0.2, 0.9, 0.2],
            [0.0, length, 0.0, 0.2, 0.9, 0.2],
            [0.0, 0.0, 0.0, 0.2, 0.4, 0.9],
            [0.0, 0.0, length, 0.2, 0.4, 0.9],
        ];
        self.axis_vertex_count = vertices.len() as u32;
        self.axis_vertex_buffer = Some(device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Axis Vertex Buffer"),
                contents: bytemuck::cast_slice(&vertices),
                usage: BufferUsages::VERTEX,
            },
        ));
    }

    /// Upload geometry for a new scene revision and refresh all uniforms
    pub fn prepare(&mut self, queue: &Queue, snapshot: &RenderSnapshot) {
        let Some(device) = self.device.clone() else { return };

        let stale = self
            .uploaded
            .as_ref()
            .map(|u| u.revision != snapshot.revision)
            .unwrap_or(true);
        if stale {
            self.uploaded = snapshot.geometry.as_ref().map(|geometry| {
                debug!("uploading scene revision {} ({} meshes)", snapshot.revision, geometry.len());
                UploadedScene {
                    revision: snapshot.revision,
                    meshes: geometry.iter().map(|m| upload_mesh(&device, m)).collect(),
                }
            });
            if self.uploaded.is_none() && snapshot.geometry.is_none() {
                // Remember the empty revision so we do not re-check every frame
                self.uploaded = Some(UploadedScene {
                    revision: snapshot.revision,
                    meshes: Vec::new(),
                });
            }
        }

        // Grow per-draw uniform slots as needed
        let Some(layout) = self.bind_group_layout.as_ref() else { return };
        while self.draw_resources.len() < snapshot.draws.len() {
            let buffer = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("Mesh Uniform Buffer"),
                size: mem::size_of::<MeshUniforms>() as u64,
                usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                }],
                label: Some("Mesh Bind Group"),
            });
            self.draw_resources.push((buffer, bind_group));
        }

        let view_proj = snapshot.camera.build_view_projection_matrix();
        let camera_vec = camera_vec4(snapshot.camera.position, snapshot.env.exposure);

        for (draw, (buffer, _)) in snapshot.draws.iter().zip(&self.draw_resources) {
            let uniforms = MeshUniforms {
                view_proj: view_proj.to_cols_array_2d(),
                model: draw.model.to_cols_array_2d(),
                camera: camera_vec,
                base_color: draw.material.base_color,
                material: [
                    draw.material.metallic,
                    draw.material.roughness,
                    snapshot.env.hemisphere,
                    snapshot.env.key,
                ],
                light: [snapshot.env.rim, 0.0, 0.0, 0.0],
            };
            queue.write_buffer(buffer, 0, bytemuck::bytes_of(&uniforms));
        }

        if let Some(frame_buffer) = &self.frame_uniform_buffer {
            let frame = FrameUniforms {
                view_proj: view_proj.to_cols_array_2d(),
                camera: camera_vec,
                background: [
                    snapshot.env.background[0],
                    snapshot.env.background[1],
                    snapshot.env.background[2],
                    1.0,
                ],
            };
            queue.write_buffer(frame_buffer, 0, bytemuck::bytes_of(&frame));
        }
    }

    /// Record this frame's draws into the egui render pass
    pub fn render(&self, render_pass: &mut RenderPass<'static>, snapshot: &RenderSnapshot) {
        let (Some(background), Some(frame_bind_group)) =
            (&self.background_pipeline, &self.frame_bind_group)
        else {
            return;
        };

        render_pass.set_pipeline(background);
        render_pass.set_bind_group(0, frame_bind_group, &[]);
        render_pass.draw(0..3, 0..1);

        if snapshot.env.show_grid {
            if let (Some(pipeline), Some(buffer)) = (&self.grid_pipeline, &self.grid_vertex_buffer)
            {
                render_pass.set_pipeline(pipeline);
                render_pass.set_bind_group(0, frame_bind_group, &[]);
                render_pass.set_vertex_buffer(0, buffer.slice(..));
                render_pass.draw(0..self.grid_vertex_count, 0..1);
            }
        }
        if snapshot.env.show_axes {
            if let (Some(pipeline), Some(buffer)) = (&self.axis_pipeline, &self.axis_vertex_buffer)
            {
                render_pass.set_pipeline(pipeline);
                render_pass.set_bind_group(0, frame_bind_group, &[]);
                render_pass.set_vertex_buffer(0, buffer.slice(..));
                render_pass.draw(0..self.axis_vertex_count, 0..1);
            }
        }

        let Some(uploaded) = &self.uploaded else { return };
        let (Some(mesh_pipeline), Some(double_sided), Some(wireframe)) = (
            &self.mesh_pipeline,
            &self.mesh_pipeline_double_sided,
            &self.wireframe_pipeline,
        ) else {
            return;
        };

        for (draw, (_, bind_group)) in snapshot.draws.iter().zip(&self.draw_resources) {
            let Some(gpu_mesh) = uploaded.meshes.get(draw.mesh) else {
                continue;
            };
            render_pass.set_bind_group(0, bind_group, &[]);
            render_pass.set_vertex_buffer(0, gpu_mesh.vertex_buffer.slice(..));
            if draw.material.wireframe {
                render_pass.set_pipeline(wireframe);
                render_pass
                    .set_index_buffer(gpu_mesh.wire_index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                render_pass.draw_indexed(0..gpu_mesh.wire_index_count, 0, 0..1);
            } else {
                let pipeline = if draw.material.double_sided {
                    double_sided
                } else {
                    mesh_pipeline
                };
                render_pass.set_pipeline(pipeline);
                render_pass
                    .set_index_buffer(gpu_mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                render_pass.draw_indexed(0..gpu_mesh.index_count, 0, 0..1);
            }
        }
    }
}

fn camera_vec4(position: Vec3, exposure: f32) -> [f32; 4] {
    [position.x, position.y, position.z, exposure]
}

fn upload_mesh(device: &Device, mesh: &MeshData) -> GpuMesh {
    let vertices: Vec<Vertex3D> = mesh
        .positions
        .iter()
        .enumerate()
        .map(|(i, &position)| Vertex3D {
            position,
            normal: mesh.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
            uv: mesh.uvs.get(i).copied().unwrap_or([0.0, 0.0]),
        })
        .collect();

    let wire_indices = edge_indices(&mesh.indices);

    GpuMesh {
        vertex_buffer: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: BufferUsages::VERTEX,
        }),
        index_buffer: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Index Buffer"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: BufferUsages::INDEX,
        }),
        index_count: mesh.indices.len() as u32,
        wire_index_buffer: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Wireframe Index Buffer"),
            contents: bytemuck::cast_slice(&wire_indices),
            usage: BufferUsages::INDEX,
        }),
        wire_index_count: wire_indices.len() as u32,
    }
}

/// Unique triangle edges as a line list
fn edge_indices(indices: &[u32]) -> Vec<u32> {
    let mut seen = HashSet::new();
    let mut edges = Vec::new();
    for tri in indices.chunks_exact(3) {
        for &(a, b) in &[(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
            let key = (a.min(b), a.max(b));
            if seen.insert(key) {
                edges.push(a);
                edges.push(b);
            }
        }
    }
    edges
}
