use bytemuck::{Pod, Zeroable};

/// Interleaved vertex: clip-space position followed by a linear RGB color.
///
/// The layout is tightly packed (`[f32; 2]` then `[f32; 3]`, 20 bytes) and is
/// declared to the pipeline once through [`Vertex::layout`].
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 3],
}

impl Vertex {
    /// Attributes supplied to the vertex stage, in location order.
    pub const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2, // position
        1 => Float32x3  // color
    ];

    /// Byte distance between consecutive vertices.
    pub const STRIDE: u64 = std::mem::size_of::<Vertex>() as u64;

    #[inline]
    pub const fn new(position: [f32; 2], color: [f32; 3]) -> Self {
        Self { position, color }
    }

    /// Attribute binding: location 0 = position, location 1 = color.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: Self::STRIDE,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Exactly three vertices, stored contiguously.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub const VERTEX_COUNT: u32 = 3;

    /// Size of one triangle slot in the vertex buffer.
    pub const BYTE_SIZE: u64 = std::mem::size_of::<Triangle>() as u64;

    #[inline]
    pub const fn new(a: Vertex, b: Vertex, c: Vertex) -> Self {
        Self { vertices: [a, b, c] }
    }

    /// Smallest x coordinate among the three vertices.
    pub fn leftmost_x(&self) -> f32 {
        self.vertices
            .iter()
            .map(|v| v.position[0])
            .fold(f32::INFINITY, f32::min)
    }
}
