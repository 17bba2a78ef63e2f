use std::ops::Range;

use super::vertex::Triangle;

/// Fill state of a [`TriangleArena`].
///
/// Transitions only move forward (`Empty -> Filling -> Full`) and only on a
/// successful append.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FillState {
    Empty,
    Filling,
    Full,
}

/// Result of [`TriangleArena::append`].
#[must_use]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppendOutcome {
    /// The triangle now occupies `slot`.
    Appended { slot: usize },
    /// The arena is at capacity; nothing was written.
    Full,
}

/// Which written vertices a draw call covers.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum DrawMode {
    /// Only the most recently appended triangle.
    #[default]
    Latest,
    /// Every triangle appended so far.
    Accumulated,
}

/// Destination for the bytes of a newly written slot.
///
/// `offset` is the slot's start in the backing buffer and `bytes` is exactly
/// one triangle.
pub trait SlotWriter {
    fn write_slot(&mut self, offset: u64, bytes: &[u8]);
}

/// Bump allocator over a fixed number of triangle slots.
///
/// Slots `[0, len)` hold written triangles, slots `[len, capacity)` are
/// unwritten. `len` grows by one per successful append and never exceeds
/// `capacity`. A host-side copy of every written slot is kept so that the
/// byte range of a slot can be re-derived and inspected without reading
/// back GPU memory.
#[derive(Debug, Clone)]
pub struct TriangleArena {
    capacity: usize,
    written: Vec<Triangle>,
}

impl TriangleArena {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            written: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of written triangles.
    #[inline]
    pub fn len(&self) -> usize {
        self.written.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.written.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.written.len() == self.capacity
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.capacity - self.written.len()
    }

    /// A zero-capacity arena starts (and stays) `Full`.
    pub fn state(&self) -> FillState {
        if self.is_full() {
            FillState::Full
        } else if self.is_empty() {
            FillState::Empty
        } else {
            FillState::Filling
        }
    }

    /// Writes `tri` into the next free slot.
    ///
    /// At capacity this is a no-op that reports [`AppendOutcome::Full`].
    pub fn append(&mut self, tri: Triangle) -> AppendOutcome {
        if self.is_full() {
            return AppendOutcome::Full;
        }

        let slot = self.written.len();
        self.written.push(tri);
        AppendOutcome::Appended { slot }
    }

    /// Like [`append`](Self::append), and hands the slot bytes to `writer`.
    ///
    /// `writer` is called at most once, with `slot_byte_range(slot)`.
    pub fn append_into<W>(&mut self, tri: Triangle, writer: &mut W) -> AppendOutcome
    where
        W: SlotWriter + ?Sized,
    {
        let outcome = self.append(tri);
        if let AppendOutcome::Appended { slot } = outcome {
            writer.write_slot(Self::slot_byte_range(slot).start, bytemuck::bytes_of(&tri));
        }
        outcome
    }

    /// Returns the triangle written into `slot`, if any.
    #[inline]
    pub fn slot(&self, slot: usize) -> Option<&Triangle> {
        self.written.get(slot)
    }

    /// All written triangles in slot order.
    #[inline]
    pub fn written(&self) -> &[Triangle] {
        &self.written
    }

    /// Bytes needed to back every slot.
    #[inline]
    pub fn byte_size(&self) -> u64 {
        self.capacity as u64 * Triangle::BYTE_SIZE
    }

    /// Byte range occupied by `slot` inside the backing buffer.
    #[inline]
    pub fn slot_byte_range(slot: usize) -> Range<u64> {
        let start = slot as u64 * Triangle::BYTE_SIZE;
        start..start + Triangle::BYTE_SIZE
    }

    /// Vertex range of the most recently written triangle.
    pub fn latest_vertices(&self) -> Option<Range<u32>> {
        let n = self.written.len() as u32;
        if n == 0 {
            return None;
        }
        Some((n - 1) * Triangle::VERTEX_COUNT..n * Triangle::VERTEX_COUNT)
    }

    /// Vertex range covering every written triangle.
    pub fn written_vertices(&self) -> Option<Range<u32>> {
        let n = self.written.len() as u32;
        if n == 0 {
            return None;
        }
        Some(0..n * Triangle::VERTEX_COUNT)
    }

    /// Vertex range selected by `mode`, or `None` before the first append.
    pub fn draw_range(&self, mode: DrawMode) -> Option<Range<u32>> {
        match mode {
            DrawMode::Latest => self.latest_vertices(),
            DrawMode::Accumulated => self.written_vertices(),
        }
    }
}
