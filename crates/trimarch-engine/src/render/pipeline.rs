use crate::geometry::Vertex;
use crate::render::{RenderCtx, RenderTarget, Viewport};
use crate::shader::ShaderProgram;

/// Builds a triangle-list pipeline from a linked program.
///
/// Vertex input is always [`Vertex::layout`]; the program was linked against
/// the same attribute list.
pub(crate) fn build_pipeline(
    ctx: &RenderCtx<'_>,
    program: &ShaderProgram,
    label: &str,
) -> wgpu::RenderPipeline {
    let vs = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("trimarch vertex shader"),
        source: wgpu::ShaderSource::Wgsl(program.vertex.source.as_str().into()),
    });
    let fs = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("trimarch fragment shader"),
        source: wgpu::ShaderSource::Wgsl(program.fragment.source.as_str().into()),
    });

    let layout = ctx
        .device
        .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(label),
            bind_group_layouts: &[],
            immediate_size: 0,
        });

    let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(&layout),

        vertex: wgpu::VertexState {
            module: &vs,
            entry_point: Some(program.vertex.entry_point.as_str()),
            compilation_options: Default::default(),
            buffers: &[Vertex::layout()],
        },

        fragment: Some(wgpu::FragmentState {
            module: &fs,
            entry_point: Some(program.fragment.entry_point.as_str()),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: ctx.surface_format,
                blend: Some(wgpu::BlendState::REPLACE),
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

    log::debug!("{label} built for {:?}", ctx.surface_format);
    pipeline
}

/// Starts a pass that keeps the cleared frame and covers the whole viewport.
pub(crate) fn begin_load_pass<'e>(
    target: &'e mut RenderTarget<'_>,
    label: &str,
    viewport: Viewport,
) -> wgpu::RenderPass<'e> {
    let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target.color_view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Load,
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
        multiview_mask: None,
    });

    rpass.set_viewport(
        0.0,
        0.0,
        viewport.width as f32,
        viewport.height as f32,
        0.0,
        1.0,
    );
    rpass
}
