use crate::coords::{ColorRgba, Vec2, Viewport};

use super::Mesh;

/// Converts a world-space position (top-left origin, +Y down) to clip space
/// (`[-1, 1]`, +Y up).
#[inline]
pub fn world_to_clip(p: Vec2, viewport: Viewport) -> [f32; 2] {
    [
        (p.x / viewport.width) * 2.0 - 1.0,
        ((viewport.height - p.y) / viewport.height) * 2.0 - 1.0,
    ]
}

/// Appends vertices and triangles to a [`Mesh`].
///
/// Positions are given in world space and converted with [`world_to_clip`]
/// against the builder's viewport.
pub struct MeshBuilder<'a> {
    mesh: &'a mut Mesh,
    viewport: Viewport,
}

impl<'a> MeshBuilder<'a> {
    #[inline]
    pub fn new(mesh: &'a mut Mesh, viewport: Viewport) -> Self {
        debug_assert!(viewport.is_valid(), "MeshBuilder: invalid viewport {viewport:?}");
        Self { mesh, viewport }
    }

    /// Appends one vertex and returns its index.
    pub fn vertex(&mut self, position: Vec2, color: ColorRgba) -> u32 {
        let index = self.mesh.positions.len() as u32;
        self.mesh.positions.push(world_to_clip(position, self.viewport));
        self.mesh.colors.push(color.to_array());
        index
    }

    /// Appends one triangle referencing already-emitted vertices.
    pub fn triangle(&mut self, i1: u32, i2: u32, i3: u32) {
        debug_assert!(
            [i1, i2, i3].iter().all(|&i| (i as usize) < self.mesh.positions.len()),
            "MeshBuilder::triangle: index out of range"
        );
        self.mesh.indices.extend_from_slice(&[i1, i2, i3]);
    }

    /// Appends the quad `i1 i2 i3 i4` as triangles `(i1, i2, i3)` and `(i3, i4, i1)`.
    ///
    /// The split diagonal is always `i1`–`i3`, whatever the quad's shape.
    pub fn quad(&mut self, i1: u32, i2: u32, i3: u32, i4: u32) {
        self.triangle(i1, i2, i3);
        self.triangle(i3, i4, i1);
    }

    /// Emits four corner vertices and the quad joining them.
    pub fn quad_points(&mut self, corners: [Vec2; 4], color: ColorRgba) {
        let [a, b, c, d] = corners.map(|p| self.vertex(p, color));
        self.quad(a, b, c, d);
    }

    /// Emits a quad covering the whole viewport.
    pub fn fill_viewport(&mut self, color: ColorRgba) {
        let Viewport { width: w, height: h } = self.viewport;
        self.quad_points(
            [
                Vec2::new(0.0, 0.0),
                Vec2::new(w, 0.0),
                Vec2::new(w, h),
                Vec2::new(0.0, h),
            ],
            color,
        );
    }

    /// Emits a convex polygon as a triangle fan rooted at its first point.
    ///
    /// Produces `n - 2` triangles for `n >= 3` points. Fewer points emit their
    /// vertices but no triangles. Output is only correct for convex,
    /// non-self-intersecting input.
    pub fn fan(&mut self, points: &[Vec2], color: ColorRgba) {
        let Some(&first) = points.first() else { return };
        let v0 = self.vertex(first, color);
        let mut prev = None;
        for &p in &points[1..] {
            let v = self.vertex(p, color);
            if let Some(prev) = prev {
                self.triangle(v0, prev, v);
            }
            prev = Some(v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VP: Viewport = Viewport::new(800.0, 600.0);
    const GRAY: ColorRgba = ColorRgba::gray(0.5);

    fn square() -> Vec<Vec2> {
        vec![
            Vec2::new(10.0, 10.0),
            Vec2::new(20.0, 10.0),
            Vec2::new(20.0, 20.0),
            Vec2::new(10.0, 20.0),
        ]
    }

    // ── world_to_clip ─────────────────────────────────────────────────────

    #[test]
    fn top_left_maps_to_clip_top_left() {
        assert_eq!(world_to_clip(Vec2::new(0.0, 0.0), VP), [-1.0, 1.0]);
    }

    #[test]
    fn bottom_right_maps_to_clip_bottom_right() {
        assert_eq!(world_to_clip(Vec2::new(800.0, 600.0), VP), [1.0, -1.0]);
    }

    #[test]
    fn center_maps_to_origin() {
        assert_eq!(world_to_clip(Vec2::new(400.0, 300.0), VP), [0.0, 0.0]);
    }

    // ── vertex ────────────────────────────────────────────────────────────

    #[test]
    fn vertex_returns_sequential_indices() {
        let mut mesh = Mesh::new();
        let mut b = MeshBuilder::new(&mut mesh, VP);
        assert_eq!(b.vertex(Vec2::zero(), GRAY), 0);
        assert_eq!(b.vertex(Vec2::zero(), GRAY), 1);
        assert_eq!(b.vertex(Vec2::zero(), GRAY), 2);
        assert_eq!(mesh.colors().len(), mesh.positions().len());
    }

    #[test]
    fn vertex_stores_full_rgba() {
        let mut mesh = Mesh::new();
        MeshBuilder::new(&mut mesh, VP).vertex(Vec2::zero(), ColorRgba::new(0.1, 0.2, 0.3, 0.4));
        assert_eq!(mesh.colors()[0], [0.1, 0.2, 0.3, 0.4]);
    }

    // ── quad ──────────────────────────────────────────────────────────────

    #[test]
    fn quad_emits_two_triangles_with_fixed_diagonal() {
        let mut mesh = Mesh::new();
        let mut b = MeshBuilder::new(&mut mesh, VP);
        let ids: Vec<u32> = square().into_iter().map(|p| b.vertex(p, GRAY)).collect();
        b.quad(ids[0], ids[1], ids[2], ids[3]);

        assert_eq!(mesh.index_count(), 6);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.indices(), &[0, 1, 2, 2, 3, 0]);
    }

    #[test]
    fn fill_viewport_covers_clip_rect() {
        let mut mesh = Mesh::new();
        MeshBuilder::new(&mut mesh, VP).fill_viewport(GRAY);

        assert_eq!(
            mesh.positions(),
            &[[-1.0, 1.0], [1.0, 1.0], [1.0, -1.0], [-1.0, -1.0]]
        );
        assert_eq!(mesh.triangle_count(), 2);
    }

    // ── fan ───────────────────────────────────────────────────────────────

    #[test]
    fn fan_of_n_points_has_n_minus_two_triangles() {
        for n in 3..=9usize {
            let points: Vec<Vec2> = (0..n)
                .map(|i| {
                    let a = i as f32 * std::f32::consts::TAU / n as f32;
                    Vec2::new(100.0 + a.sin() * 40.0, 100.0 + a.cos() * 40.0)
                })
                .collect();

            let mut mesh = Mesh::new();
            MeshBuilder::new(&mut mesh, VP).fan(&points, GRAY);

            assert_eq!(mesh.vertex_count(), n);
            assert_eq!(mesh.triangle_count(), n - 2);
            assert!(mesh.is_consistent());
        }
    }

    #[test]
    fn fan_is_rooted_at_first_vertex() {
        let mut mesh = Mesh::new();
        MeshBuilder::new(&mut mesh, VP).fan(&square(), GRAY);
        assert_eq!(mesh.indices(), &[0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn fan_only_references_its_own_vertices() {
        let mut mesh = Mesh::new();
        let mut b = MeshBuilder::new(&mut mesh, VP);
        b.fill_viewport(GRAY);
        b.fan(&square(), GRAY);

        // Background used 0..4; the fan's triangles live in 4..8.
        assert!(mesh.indices()[6..].iter().all(|&i| (4..8).contains(&i)));
    }

    #[test]
    fn fan_with_two_points_emits_no_triangles() {
        let mut mesh = Mesh::new();
        MeshBuilder::new(&mut mesh, VP).fan(&square()[..2], GRAY);
        assert_eq!(mesh.vertex_count(), 2);
        assert!(mesh.is_empty());
    }

    // ── clear ─────────────────────────────────────────────────────────────

    #[test]
    fn clear_empties_all_streams() {
        let mut mesh = Mesh::new();
        MeshBuilder::new(&mut mesh, VP).fan(&square(), GRAY);
        mesh.clear();
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.colors().len(), 0);
        assert_eq!(mesh.index_count(), 0);
    }
}
