use bytemuck::{Pod, Zeroable};

use crate::mesh::Mesh;
use crate::render::{RenderCtx, RenderTarget};

const SHADER_SRC: &str = include_str!("shaders/mesh.wgsl");

/// Smallest element capacity allocated for a stream buffer.
const MIN_CAPACITY: usize = 256;

/// Renders a [`Mesh`] as one indexed triangle list.
///
/// Vertex colors are modulated in the fragment shader by a pure function of
/// clip-space position and the `time` passed to [`render`](Self::render).
/// Stream buffers grow to the next power of two and are never shrunk.
#[derive(Default)]
pub struct MeshRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    globals_ubo: Option<wgpu::Buffer>,

    position_vbo: Option<wgpu::Buffer>,
    color_vbo: Option<wgpu::Buffer>,
    vertex_capacity: usize,

    ibo: Option<wgpu::Buffer>,
    index_capacity: usize,
}

impl MeshRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uploads `mesh` and draws it into `target`.
    ///
    /// The target is expected to be cleared already (see `FrameCtx::render`).
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        mesh: &Mesh,
        time: f64,
    ) {
        debug_assert!(mesh.is_consistent(), "MeshRenderer: inconsistent mesh");
        if mesh.is_empty() {
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_bindings(ctx);
        self.ensure_vertex_capacity(ctx, mesh.vertex_count());
        self.ensure_index_capacity(ctx, mesh.index_count());

        // Mutating methods must happen before borrowing pipeline/buffers immutably.
        let Some(globals_ubo) = self.globals_ubo.as_ref() else { return };
        let Some(position_vbo) = self.position_vbo.as_ref() else { return };
        let Some(color_vbo) = self.color_vbo.as_ref() else { return };
        let Some(ibo) = self.ibo.as_ref() else { return };

        // The shader only sees a phase; f32 is enough there.
        let globals = GlobalsUniform { time: time as f32, _pad: [0.0; 3] };
        ctx.queue.write_buffer(globals_ubo, 0, bytemuck::bytes_of(&globals));
        ctx.queue.write_buffer(position_vbo, 0, bytemuck::cast_slice(mesh.positions()));
        ctx.queue.write_buffer(color_vbo, 0, bytemuck::cast_slice(mesh.colors()));
        ctx.queue.write_buffer(ibo, 0, bytemuck::cast_slice(mesh.indices()));

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };

        let mut rpass = target.color_pass("umbra mesh pass", wgpu::LoadOp::Load);

        let position_bytes = (mesh.vertex_count() * std::mem::size_of::<[f32; 2]>()) as u64;
        let color_bytes = (mesh.vertex_count() * std::mem::size_of::<[f32; 4]>()) as u64;
        let index_bytes = (mesh.index_count() * std::mem::size_of::<u32>()) as u64;

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, position_vbo.slice(..position_bytes));
        rpass.set_vertex_buffer(1, color_vbo.slice(..color_bytes));
        rpass.set_index_buffer(ibo.slice(..index_bytes), wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(0..mesh.index_count() as u32, 0, 0..1);
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("umbra mesh shader"),
            source: wgpu::ShaderSource::Wgsl(SHADER_SRC.into()),
        });

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("umbra mesh bgl"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: wgpu::BufferSize::new(
                                std::mem::size_of::<GlobalsUniform>() as u64,
                            ),
                        },
                        count: None,
                    }],
                });

        let pipeline_layout =
            ctx.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("umbra mesh pipeline layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    immediate_size: 0,
                });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("umbra mesh pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[position_layout(), color_layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    // Later triangles overwrite earlier ones, matching paint order.
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // Shadow quads flip winding depending on which side the attractor is on.
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::debug!("mesh pipeline built for {:?}", ctx.surface_format);

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);

        self.bind_group = None;
        self.globals_ubo = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.globals_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let globals_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("umbra mesh globals ubo"),
            size: std::mem::size_of::<GlobalsUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("umbra mesh bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_ubo.as_entire_binding(),
            }],
        });

        self.globals_ubo = Some(globals_ubo);
        self.bind_group = Some(bind_group);
    }

    fn ensure_vertex_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.vertex_capacity
            && self.position_vbo.is_some()
            && self.color_vbo.is_some()
        {
            return;
        }

        let new_cap = grown_capacity(required);
        log::debug!("mesh vertex buffers: {} -> {new_cap}", self.vertex_capacity);

        self.position_vbo = Some(stream_buffer(
            ctx,
            "umbra mesh position vbo",
            new_cap * std::mem::size_of::<[f32; 2]>(),
            wgpu::BufferUsages::VERTEX,
        ));
        self.color_vbo = Some(stream_buffer(
            ctx,
            "umbra mesh color vbo",
            new_cap * std::mem::size_of::<[f32; 4]>(),
            wgpu::BufferUsages::VERTEX,
        ));
        self.vertex_capacity = new_cap;
    }

    fn ensure_index_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.index_capacity && self.ibo.is_some() {
            return;
        }

        let new_cap = grown_capacity(required);
        log::debug!("mesh index buffer: {} -> {new_cap}", self.index_capacity);

        self.ibo = Some(stream_buffer(
            ctx,
            "umbra mesh ibo",
            new_cap * std::mem::size_of::<u32>(),
            wgpu::BufferUsages::INDEX,
        ));
        self.index_capacity = new_cap;
    }
}

fn grown_capacity(required: usize) -> usize {
    required.next_power_of_two().max(MIN_CAPACITY)
}

fn stream_buffer(
    ctx: &RenderCtx<'_>,
    label: &'static str,
    size: usize,
    usage: wgpu::BufferUsages,
) -> wgpu::Buffer {
    ctx.device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: size as u64,
        usage: usage | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

const POSITION_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];
const COLOR_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x4];

fn position_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<[f32; 2]>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &POSITION_ATTRS,
    }
}

fn color_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<[f32; 4]>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &COLOR_ATTRS,
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct GlobalsUniform {
    time: f32,
    _pad: [f32; 3], // 16-byte uniform size
}
