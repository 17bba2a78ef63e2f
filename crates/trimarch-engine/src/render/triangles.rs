use std::ops::Range;

use crate::geometry::{AppendOutcome, DrawMode, FillState, SlotWriter, Triangle, TriangleArena};
use crate::render::pipeline::{begin_load_pass, build_pipeline};
use crate::render::{RenderCtx, RenderTarget};
use crate::shader::ShaderProgram;

/// What a draw call would cover, decided before touching the GPU.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum DrawPlan {
    /// Non-indexed draw over `vertices`.
    Draw { vertices: Range<u32> },
    /// Indexed draw over `indices` of a static index buffer.
    Indexed { indices: Range<u32> },
    /// Nothing written yet, or nothing visible to draw into.
    Nothing,
    /// Shader setup failed; drawing is disabled.
    NoProgram,
}

/// Chooses the vertex range to draw.
///
/// A missing program wins over everything else: drawing without a linked
/// program is never attempted.
pub fn plan_draw(arena: &TriangleArena, mode: DrawMode, has_program: bool) -> DrawPlan {
    if !has_program {
        return DrawPlan::NoProgram;
    }
    match arena.draw_range(mode) {
        Some(vertices) => DrawPlan::Draw { vertices },
        None => DrawPlan::Nothing,
    }
}

/// Incremental triangle renderer.
///
/// Owns a vertex buffer sized for `capacity` triangles. Each append writes
/// exactly one triangle's byte range with `Queue::write_buffer`; earlier
/// slots are never rewritten. The buffer is allocated on first use and never
/// grows.
pub struct TriangleRenderer {
    program: Option<ShaderProgram>,
    arena: TriangleArena,

    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    vbo: Option<wgpu::Buffer>,

    warned_no_program: bool,
}

impl TriangleRenderer {
    /// `program` is `None` when shader setup failed; appends still advance
    /// the arena but nothing is drawn.
    pub fn new(capacity: usize, program: Option<ShaderProgram>) -> Self {
        Self {
            program,
            arena: TriangleArena::new(capacity),
            pipeline_format: None,
            pipeline: None,
            vbo: None,
            warned_no_program: false,
        }
    }

    #[inline]
    pub fn arena(&self) -> &TriangleArena {
        &self.arena
    }

    #[inline]
    pub fn has_program(&self) -> bool {
        self.program.is_some()
    }

    /// Appends one triangle, uploading only its slot.
    pub fn append(&mut self, ctx: &RenderCtx<'_>, tri: Triangle) -> AppendOutcome {
        self.ensure_vertex_buffer(ctx);

        let outcome = match self.vbo.as_ref() {
            Some(buffer) => {
                let mut upload = QueueUpload { queue: ctx.queue, buffer };
                self.arena.append_into(tri, &mut upload)
            }
            None => self.arena.append(tri),
        };
        match outcome {
            AppendOutcome::Appended { slot } => {
                log::trace!("triangle {slot} appended");
                if self.arena.state() == FillState::Full {
                    log::info!("triangle buffer full ({} triangles)", self.arena.capacity());
                }
            }
            AppendOutcome::Full => {}
        }
        outcome
    }

    /// Draws the range selected by `mode` into `target`.
    ///
    /// Returns the plan that was carried out.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        mode: DrawMode,
    ) -> DrawPlan {
        let plan = plan_draw(&self.arena, mode, self.has_program());
        let vertices = match &plan {
            DrawPlan::Draw { vertices } if ctx.viewport.is_valid() => vertices.clone(),
            DrawPlan::Draw { .. } | DrawPlan::Indexed { .. } | DrawPlan::Nothing => {
                return DrawPlan::Nothing;
            }
            DrawPlan::NoProgram => {
                if !self.warned_no_program {
                    log::warn!("no linked shader program; skipping draws");
                    self.warned_no_program = true;
                }
                return DrawPlan::NoProgram;
            }
        };

        self.ensure_pipeline(ctx);

        let Some(pipeline) = self.pipeline.as_ref() else { return DrawPlan::NoProgram };
        let Some(vbo) = self.vbo.as_ref() else { return DrawPlan::Nothing };

        let mut rpass = begin_load_pass(target, "trimarch triangle pass", ctx.viewport);
        rpass.set_pipeline(pipeline);
        rpass.set_vertex_buffer(0, vbo.slice(..));
        rpass.draw(vertices.clone(), 0..1);

        DrawPlan::Draw { vertices }
    }

    fn ensure_vertex_buffer(&mut self, ctx: &RenderCtx<'_>) {
        if self.vbo.is_some() {
            return;
        }

        // Zero-capacity arenas never write, but wgpu still wants a real size.
        let size = self.arena.byte_size().max(wgpu::COPY_BUFFER_ALIGNMENT);

        self.vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("trimarch triangle vbo"),
            size,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        log::debug!(
            "reserved {size} bytes for {} triangles",
            self.arena.capacity()
        );
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }
        let Some(program) = self.program.as_ref() else { return };

        self.pipeline = Some(build_pipeline(ctx, program, "trimarch triangle pipeline"));
        self.pipeline_format = Some(ctx.surface_format);
    }
}

/// Uploads slot bytes straight into the vertex buffer.
struct QueueUpload<'a> {
    queue: &'a wgpu::Queue,
    buffer: &'a wgpu::Buffer,
}

impl SlotWriter for QueueUpload<'_> {
    fn write_slot(&mut self, offset: u64, bytes: &[u8]) {
        self.queue.write_buffer(self.buffer, offset, bytes);
    }
}
