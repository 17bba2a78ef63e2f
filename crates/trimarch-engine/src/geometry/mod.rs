//! CPU-side geometry for the incremental triangle buffer.
//!
//! - `vertex`: interleaved vertex and triangle layouts (`bytemuck` Pod)
//! - `arena`: bounded bump allocator over triangle slots
//! - `march`: deterministic generator for the marching triangles
//!
//! Nothing here touches the GPU; the renderer mirrors arena writes into a
//! vertex buffer.

mod arena;
mod march;
mod vertex;

pub use arena::{AppendOutcome, DrawMode, FillState, SlotWriter, TriangleArena};
pub use march::{Marcher, MAX_TRIS, X_DELTA};
pub use vertex::{Triangle, Vertex};
