//! Shadow silhouettes cast away from the attractor.
//!
//! Every vertex is pushed a fixed distance along the ray from the attractor
//! through it. Each polygon edge then spans a quad between the edge and its
//! projection; the union of those quads is the shadow.

use umbra_engine::coords::{ColorRgba, Vec2};
use umbra_engine::mesh::MeshBuilder;

/// Projects `p` by `distance` along the ray `attractor -> p`.
///
/// A point sitting exactly on the attractor has no direction and is
/// returned unchanged.
pub fn shadow_point(p: Vec2, attractor: Vec2, distance: f32) -> Vec2 {
    let d = p - attractor;
    let len = d.length();
    if len == 0.0 {
        return p;
    }
    p + d * (distance / len)
}

/// One quad `[p_i, s_i, s_j, p_j]` per edge `(p_i, p_j)`, `j = (i + 1) mod n`,
/// where `s` are the projected points.
pub fn shadow_quads(
    points: &[Vec2],
    attractor: Vec2,
    distance: f32,
) -> impl Iterator<Item = [Vec2; 4]> + '_ {
    let n = points.len();
    (0..n).map(move |i| {
        let pi = points[i];
        let pj = points[(i + 1) % n];
        [
            pi,
            shadow_point(pi, attractor, distance),
            shadow_point(pj, attractor, distance),
            pj,
        ]
    })
}

/// Emits the shadow of the polygon `points` into `builder`.
pub fn emit_shadow(
    builder: &mut MeshBuilder<'_>,
    points: &[Vec2],
    attractor: Vec2,
    distance: f32,
    color: ColorRgba,
) {
    for quad in shadow_quads(points, attractor, distance) {
        builder.quad_points(quad, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use umbra_engine::coords::Viewport;
    use umbra_engine::mesh::Mesh;

    const D: f32 = 2000.0;

    fn approx(a: f32, b: f32, eps: f32) -> bool {
        (a - b).abs() <= eps
    }

    // ── shadow_point ──────────────────────────────────────────────────────

    #[test]
    fn displacement_has_fixed_length() {
        let a = Vec2::new(400.0, 300.0);
        for p in [
            Vec2::new(100.0, 100.0),
            Vec2::new(401.0, 300.0),
            Vec2::new(-50.0, 900.0),
        ] {
            let s = shadow_point(p, a, D);
            assert!(approx((s - p).length(), D, 1e-2), "{p:?} -> {s:?}");
        }
    }

    #[test]
    fn projection_stays_on_attractor_ray() {
        let a = Vec2::new(400.0, 300.0);
        let p = Vec2::new(100.0, 100.0);
        let s = shadow_point(p, a, D);

        let dir = p - a;
        let off = s - a;
        // collinear and on the same side of the attractor
        assert!(approx(dir.perp_dot(off) / (dir.length() * off.length()), 0.0, 1e-5));
        assert!(dir.dot(off) > 0.0);
        assert!(off.length() > dir.length());
    }

    #[test]
    fn axis_aligned_projection_is_exact() {
        let s = shadow_point(Vec2::new(10.0, 0.0), Vec2::zero(), D);
        assert_eq!(s, Vec2::new(2010.0, 0.0));
    }

    #[test]
    fn point_on_attractor_is_not_displaced() {
        let p = Vec2::new(42.0, 17.0);
        let s = shadow_point(p, p, D);
        assert_eq!(s, p);
        assert!(s.is_finite());
    }

    // ── shadow_quads ──────────────────────────────────────────────────────

    #[test]
    fn one_quad_per_edge_with_wraparound() {
        let pts = [
            Vec2::new(10.0, 10.0),
            Vec2::new(20.0, 10.0),
            Vec2::new(15.0, 20.0),
        ];
        let quads: Vec<_> = shadow_quads(&pts, Vec2::new(15.0, -100.0), D).collect();
        assert_eq!(quads.len(), 3);

        let last = quads[2];
        assert_eq!(last[0], pts[2]);
        assert_eq!(last[3], pts[0]);
    }

    #[test]
    fn quad_outer_corners_are_projections() {
        let pts = [Vec2::new(0.0, 10.0), Vec2::new(10.0, 10.0)];
        let a = Vec2::new(5.0, 0.0);
        let q = shadow_quads(&pts, a, D).next().unwrap();
        assert_eq!(q[1], shadow_point(pts[0], a, D));
        assert_eq!(q[2], shadow_point(pts[1], a, D));
    }

    // ── emit_shadow ───────────────────────────────────────────────────────

    #[test]
    fn n_sided_polygon_emits_2n_triangles() {
        let vp = Viewport::new(800.0, 600.0);
        let hex: Vec<Vec2> = (0..6)
            .map(|i| {
                let a = i as f32 * std::f32::consts::TAU / 6.0;
                Vec2::new(400.0 + 40.0 * a.sin(), 300.0 + 40.0 * a.cos())
            })
            .collect();

        let mut mesh = Mesh::new();
        let mut b = MeshBuilder::new(&mut mesh, vp);
        emit_shadow(&mut b, &hex, Vec2::new(100.0, 100.0), D, ColorRgba::gray(0.3));

        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.triangle_count(), 12);
        assert!(mesh.colors().iter().all(|c| *c == [0.3, 0.3, 0.3, 1.0]));
        assert!(mesh.is_consistent());
    }
}
