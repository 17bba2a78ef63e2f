use std::ops::Range;

use wgpu::util::DeviceExt;

use crate::geometry::{Triangle, Vertex};
use crate::render::pipeline::{begin_load_pass, build_pipeline};
use crate::render::{DrawPlan, RenderCtx, RenderTarget};
use crate::shader::ShaderProgram;

/// Full-viewport triangle with red, green and blue corners.
pub const STATIC_TRIANGLE: Triangle = Triangle::new(
    Vertex::new([0.0, 1.0], [1.0, 0.0, 0.0]),
    Vertex::new([-1.0, -1.0], [0.0, 1.0, 0.0]),
    Vertex::new([1.0, -1.0], [0.0, 0.0, 1.0]),
);

/// Element order for [`STATIC_TRIANGLE`].
pub const STATIC_INDICES: [u16; 3] = [0, 1, 2];

/// Chooses the index range for a static mesh of `index_count` indices.
pub fn plan_indexed(index_count: u32, has_program: bool) -> DrawPlan {
    if !has_program {
        return DrawPlan::NoProgram;
    }
    if index_count == 0 {
        return DrawPlan::Nothing;
    }
    DrawPlan::Indexed { indices: 0..index_count }
}

/// Uploads one triangle and its indices once, then draws it every frame
/// with `draw_indexed`.
pub struct StaticTriangleRenderer {
    program: Option<ShaderProgram>,
    triangle: Triangle,
    indices: [u16; 3],

    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    vbo: Option<wgpu::Buffer>,
    ibo: Option<wgpu::Buffer>,

    warned_no_program: bool,
}

impl StaticTriangleRenderer {
    pub fn new(program: Option<ShaderProgram>) -> Self {
        Self::with_triangle(STATIC_TRIANGLE, program)
    }

    pub fn with_triangle(triangle: Triangle, program: Option<ShaderProgram>) -> Self {
        Self {
            program,
            triangle,
            indices: STATIC_INDICES,
            pipeline_format: None,
            pipeline: None,
            vbo: None,
            ibo: None,
            warned_no_program: false,
        }
    }

    #[inline]
    pub fn triangle(&self) -> &Triangle {
        &self.triangle
    }

    #[inline]
    pub fn has_program(&self) -> bool {
        self.program.is_some()
    }

    #[inline]
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    /// Returns the plan that was carried out.
    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) -> DrawPlan {
        let indices: Range<u32> = match plan_indexed(self.index_count(), self.has_program()) {
            DrawPlan::Indexed { indices } if ctx.viewport.is_valid() => indices,
            DrawPlan::NoProgram => {
                if !self.warned_no_program {
                    log::warn!("no linked shader program; skipping draws");
                    self.warned_no_program = true;
                }
                return DrawPlan::NoProgram;
            }
            _ => return DrawPlan::Nothing,
        };

        self.ensure_buffers(ctx);
        self.ensure_pipeline(ctx);

        let Some(pipeline) = self.pipeline.as_ref() else { return DrawPlan::NoProgram };
        let (Some(vbo), Some(ibo)) = (self.vbo.as_ref(), self.ibo.as_ref()) else {
            return DrawPlan::Nothing;
        };

        let mut rpass = begin_load_pass(target, "trimarch static triangle pass", ctx.viewport);
        rpass.set_pipeline(pipeline);
        rpass.set_vertex_buffer(0, vbo.slice(..));
        rpass.set_index_buffer(ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(indices.clone(), 0, 0..1);

        DrawPlan::Indexed { indices }
    }

    fn ensure_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.vbo.is_some() && self.ibo.is_some() {
            return;
        }

        self.vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("trimarch static triangle vbo"),
            contents: bytemuck::bytes_of(&self.triangle),
            usage: wgpu::BufferUsages::VERTEX,
        }));
        self.ibo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("trimarch static triangle ibo"),
            contents: bytemuck::cast_slice(&self.indices),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }
        let Some(program) = self.program.as_ref() else { return };

        self.pipeline = Some(build_pipeline(ctx, program, "trimarch static triangle pipeline"));
        self.pipeline_format = Some(ctx.surface_format);
    }
}
