/// Frame geometry buffer.
///
/// Rebuilt from empty every frame. `clear()` keeps allocated capacity so a
/// warmed-up mesh does not allocate in steady state.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Mesh {
    pub(crate) positions: Vec<[f32; 2]>,
    pub(crate) colors: Vec<[f32; 4]>,
    pub(crate) indices: Vec<u32>,
}

impl Mesh {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empties all streams. Keeps allocated capacity for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.positions.clear();
        self.colors.clear();
        self.indices.clear();
    }

    /// Clip-space vertex positions.
    #[inline]
    pub fn positions(&self) -> &[[f32; 2]] {
        &self.positions
    }

    /// Per-vertex straight-alpha colors, parallel to [`positions`](Self::positions).
    #[inline]
    pub fn colors(&self) -> &[[f32; 4]] {
        &self.colors
    }

    /// Triangle-list indices.
    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Checks the stream invariants. Intended for tests and debug assertions.
    pub fn is_consistent(&self) -> bool {
        let n = self.positions.len() as u64;
        self.colors.len() == self.positions.len()
            && self.indices.len() % 3 == 0
            && self.indices.iter().all(|&i| (i as u64) < n)
    }
}
