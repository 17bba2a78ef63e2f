//! GPU rendering.
//!
//! Renderers own their GPU resources (pipelines, buffers) and create them
//! lazily on first use, recreating pipelines when the surface format changes.
//!
//! Geometry is already in clip space; no viewport uniform is involved. The
//! viewport rectangle is applied per draw from the window size.

mod ctx;
mod indexed;
mod pipeline;
mod triangles;

pub use ctx::{RenderCtx, RenderTarget, Viewport};
pub use indexed::{plan_indexed, StaticTriangleRenderer, STATIC_INDICES, STATIC_TRIANGLE};
pub use triangles::{plan_draw, DrawPlan, TriangleRenderer};
