use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use trimarch_engine::core::{App, AppControl, FrameCtx};
use trimarch_engine::geometry::{AppendOutcome, DrawMode, Marcher};
use trimarch_engine::render::{DrawPlan, StaticTriangleRenderer, TriangleRenderer};
use trimarch_engine::shader::ShaderProgram;

use crate::config::{MarchConfig, Scene};

enum Renderer {
    March {
        renderer: TriangleRenderer,
        marcher: Marcher,
        mode: DrawMode,
    },
    Static(StaticTriangleRenderer),
}

/// Appends one marching triangle per frame, then draws; or draws the
/// static indexed triangle.
pub struct MarchApp {
    renderer: Renderer,
    clear: wgpu::Color,
}

impl MarchApp {
    pub fn new(config: &MarchConfig, program: Option<ShaderProgram>) -> Self {
        let renderer = match config.scene {
            Scene::March => Renderer::March {
                renderer: TriangleRenderer::new(config.capacity, program),
                marcher: Marcher::new(config.x_delta),
                mode: config.draw_mode,
            },
            Scene::Static => Renderer::Static(StaticTriangleRenderer::new(program)),
        };
        Self { renderer, clear: config.clear }
    }
}

impl App for MarchApp {
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => AppControl::Exit,
            _ => AppControl::Continue,
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let frame = ctx.frame_index;

        match &mut self.renderer {
            Renderer::March { renderer, marcher, mode } => {
                let mode = *mode;
                ctx.render(self.clear, |rctx, target| {
                    let next = marcher.triangle(renderer.arena().len());
                    if let AppendOutcome::Appended { slot } = renderer.append(rctx, next) {
                        log::trace!("frame {frame}: wrote slot {slot}");
                    }

                    if let DrawPlan::Draw { vertices } = renderer.render(rctx, target, mode) {
                        log::trace!("frame {frame}: drew vertices {vertices:?}");
                    }
                })
            }
            Renderer::Static(renderer) => ctx.render(self.clear, |rctx, target| {
                if let DrawPlan::Indexed { indices } = renderer.render(rctx, target) {
                    log::trace!("frame {frame}: drew indices {indices:?}");
                }
            }),
        }
    }
}
