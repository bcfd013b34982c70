use bytemuck::{Pod, Zeroable};

use crate::device::Gpu;

/// Cells per grid axis.
pub const GRID_SIZE: u32 = 32;

/// Quad half-extent in normalized device coordinates.
const QUAD_EXTENT: f32 = 0.8;

/// Embedded WGSL program: entry points `vertexMain` / `fragmentMain`, one
/// vec2f uniform at group 0, binding 0. Opaque to this layer; it is handed
/// to the device verbatim.
const GRID_SHADER: &str = include_str!("shaders/grid.wgsl");

/// Grid dimensions handed to the shader through the uniform buffer.
///
/// The shader derives each instance's cell as
/// `(instance mod cols, instance div cols)`; drawing exactly
/// `instance_count()` instances keeps every cell index in
/// `[0, cols) x [0, rows)`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct GridParams {
    pub cols: u32,
    pub rows: u32,
}

impl Default for GridParams {
    fn default() -> Self {
        Self {
            cols: GRID_SIZE,
            rows: GRID_SIZE,
        }
    }
}

impl GridParams {
    /// One instance per cell.
    pub const fn instance_count(self) -> u32 {
        self.cols * self.rows
    }

    fn uniform(self) -> GridUniform {
        GridUniform {
            size: [self.cols as f32, self.rows as f32],
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct GridUniform {
    size: [f32; 2],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct GridVertex {
    pos: [f32; 2],
}

impl GridVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GridVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

const fn v(x: f32, y: f32) -> GridVertex {
    GridVertex { pos: [x, y] }
}

/// Two triangles whose union is the axis-aligned square with corners at
/// (±QUAD_EXTENT, ±QUAD_EXTENT).
const QUAD_VERTICES: [GridVertex; 6] = [
    v(-QUAD_EXTENT, -QUAD_EXTENT),
    v(QUAD_EXTENT, -QUAD_EXTENT),
    v(QUAD_EXTENT, QUAD_EXTENT),
    v(-QUAD_EXTENT, -QUAD_EXTENT),
    v(QUAD_EXTENT, QUAD_EXTENT),
    v(-QUAD_EXTENT, QUAD_EXTENT),
];

/// Renders an instanced grid of colored cells in a single pass.
///
/// Construction performs the upload-and-pipeline half of the sequence
/// (vertex buffer, grid uniform, shader module, pipeline, bind group);
/// [`GridRenderer::render`] records and submits the one clear-and-draw
/// command buffer.
pub struct GridRenderer {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    params: GridParams,
}

impl GridRenderer {
    /// Builds the renderer for the default 32x32 grid.
    pub fn new(gpu: &Gpu<'_>) -> Self {
        Self::with_params(gpu, GridParams::default())
    }

    pub fn with_params(gpu: &Gpu<'_>, params: GridParams) -> Self {
        let device = gpu.device();

        // Buffer writes are enqueued immediately; transfer timing is the
        // queue's concern, and FIFO submission order puts them before the
        // draw below.
        let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("cellgrid quad vbo"),
            size: std::mem::size_of_val(&QUAD_VERTICES) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        gpu.queue()
            .write_buffer(&vertex_buffer, 0, bytemuck::cast_slice(&QUAD_VERTICES));

        let uniform = params.uniform();
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("cellgrid grid ubo"),
            size: std::mem::size_of::<GridUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        gpu.queue()
            .write_buffer(&uniform_buffer, 0, bytemuck::bytes_of(&uniform));

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("cellgrid grid shader"),
            source: wgpu::ShaderSource::Wgsl(GRID_SHADER.into()),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("cellgrid grid pipeline"),
            // Auto layout: the shader's declared bindings define the bind
            // group layout, so the bind group must be built from this
            // pipeline afterwards.
            layout: None,

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vertexMain"),
                compilation_options: Default::default(),
                buffers: &[GridVertex::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fragmentMain"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: gpu.surface_format(),
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
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

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("cellgrid grid bind group"),
            layout: &pipeline.get_bind_group_layout(0),
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        Self {
            pipeline,
            vertex_buffer,
            uniform_buffer,
            bind_group,
            params,
        }
    }

    pub fn params(&self) -> GridParams {
        self.params
    }

    /// Records and submits the single clear-and-draw command buffer.
    ///
    /// Fire-and-forget: returns once the command buffer is enqueued, without
    /// waiting for GPU completion.
    pub fn render(&self, gpu: &Gpu<'_>) -> Result<(), wgpu::SurfaceError> {
        let mut frame = gpu.begin_frame()?;
        self.encode(&mut frame.encoder, &frame.view);
        gpu.submit(frame);
        Ok(())
    }

    fn encode(&self, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView) {
        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("cellgrid grid pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(&self.pipeline);
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.draw(0..QUAD_VERTICES.len() as u32, 0..self.params.instance_count());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── quad geometry ─────────────────────────────────────────────────────

    #[test]
    fn quad_is_twelve_floats() {
        assert_eq!(QUAD_VERTICES.len(), 6);
        assert_eq!(bytemuck::cast_slice::<GridVertex, f32>(&QUAD_VERTICES).len(), 12);
        assert_eq!(std::mem::size_of_val(&QUAD_VERTICES), 48);
    }

    #[test]
    fn quad_spans_the_expected_square() {
        for vert in &QUAD_VERTICES {
            assert_eq!(vert.pos[0].abs(), QUAD_EXTENT);
            assert_eq!(vert.pos[1].abs(), QUAD_EXTENT);
        }
    }

    #[test]
    fn quad_covers_all_four_corners() {
        for corner in [
            [-QUAD_EXTENT, -QUAD_EXTENT],
            [QUAD_EXTENT, -QUAD_EXTENT],
            [QUAD_EXTENT, QUAD_EXTENT],
            [-QUAD_EXTENT, QUAD_EXTENT],
        ] {
            assert!(QUAD_VERTICES.iter().any(|v| v.pos == corner));
        }
    }

    #[test]
    fn quad_triangles_share_the_diagonal() {
        // Both triangles contain (-E, -E) and (E, E); their union is the
        // full square rather than two disjoint slivers.
        assert_eq!(QUAD_VERTICES[0], QUAD_VERTICES[3]);
        assert_eq!(QUAD_VERTICES[2], QUAD_VERTICES[4]);
    }

    // ── vertex layout ─────────────────────────────────────────────────────

    #[test]
    fn vertex_layout_is_one_vec2_at_location_zero() {
        let layout = GridVertex::layout();
        assert_eq!(layout.array_stride, 8);
        assert_eq!(layout.step_mode, wgpu::VertexStepMode::Vertex);
        assert_eq!(layout.attributes.len(), 1);
        assert_eq!(layout.attributes[0].shader_location, 0);
        assert_eq!(layout.attributes[0].offset, 0);
        assert_eq!(layout.attributes[0].format, wgpu::VertexFormat::Float32x2);
    }

    // ── grid params ───────────────────────────────────────────────────────

    #[test]
    fn default_grid_is_32_by_32() {
        let params = GridParams::default();
        assert_eq!(params.cols, 32);
        assert_eq!(params.rows, 32);
    }

    #[test]
    fn instance_count_covers_every_cell() {
        assert_eq!(GridParams::default().instance_count(), 1024);
        assert_eq!(GridParams { cols: 4, rows: 3 }.instance_count(), 12);
    }

    #[test]
    fn uniform_payload_is_the_two_grid_dimensions() {
        let u = GridParams::default().uniform();
        assert_eq!(u.size, [32.0, 32.0]);
        assert_eq!(std::mem::size_of::<GridUniform>(), 8);
        assert_eq!(
            bytemuck::bytes_of(&u),
            bytemuck::cast_slice::<f32, u8>(&[32.0, 32.0])
        );
    }

    // ── shader source ─────────────────────────────────────────────────────

    #[test]
    fn shader_declares_the_expected_interface() {
        assert!(GRID_SHADER.contains("@group(0) @binding(0)"));
        assert!(GRID_SHADER.contains("var<uniform> grid: vec2f"));
        assert!(GRID_SHADER.contains("fn vertexMain"));
        assert!(GRID_SHADER.contains("fn fragmentMain"));
        assert!(GRID_SHADER.contains("@builtin(instance_index)"));
        assert!(GRID_SHADER.contains("@location(0) pos: vec2f"));
    }

    #[test]
    fn shader_computes_cell_from_instance_index() {
        assert!(GRID_SHADER.contains("i % grid.x"));
        assert!(GRID_SHADER.contains("floor(i / grid.x)"));
    }

    #[test]
    fn shader_colors_cells_from_their_coordinate() {
        assert!(GRID_SHADER.contains("cell / grid"));
        assert!(GRID_SHADER.contains("vec4f(c.x, c.y, 1.0 - c.x, 1.0)"));
    }
}
