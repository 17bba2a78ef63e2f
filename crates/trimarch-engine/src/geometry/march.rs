use super::vertex::{Triangle, Vertex};

/// Horizontal step between consecutive triangles, in clip-space units.
pub const X_DELTA: f32 = 0.1;

/// Default arena capacity.
pub const MAX_TRIS: usize = 20;

const RED: [f32; 3] = [1.0, 0.0, 0.0];
const GREEN: [f32; 3] = [0.0, 1.0, 0.0];
const BLUE: [f32; 3] = [0.0, 0.0, 1.0];

/// Generates right triangles that march left to right across the top half of
/// clip space.
///
/// Triangle `n` has its right angle at `(-1 + n * x_delta, 1)`, its base on
/// `y = 1` and its height reaching down to `y = 0`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Marcher {
    x_delta: f32,
}

impl Marcher {
    pub fn new(x_delta: f32) -> Self {
        Self { x_delta }
    }

    #[inline]
    pub fn x_delta(&self) -> f32 {
        self.x_delta
    }

    /// Left edge of triangle `index`.
    #[inline]
    pub fn left_edge(&self, index: usize) -> f32 {
        -1.0 + index as f32 * self.x_delta
    }

    /// Triangle for slot `index`. Deterministic in `index` alone.
    pub fn triangle(&self, index: usize) -> Triangle {
        let x = self.left_edge(index);
        Triangle::new(
            Vertex::new([x, 1.0], RED),
            Vertex::new([x + self.x_delta, 1.0], GREEN),
            Vertex::new([x, 0.0], BLUE),
        )
    }
}

impl Default for Marcher {
    fn default() -> Self {
        Self::new(X_DELTA)
    }
}
