use rand::Rng;

use umbra_engine::coords::{Vec2, Viewport};

use crate::config::PopulationParams;
use crate::error::ShapeError;

/// A regular convex polygon moving as a rigid point mass.
///
/// Vertices live in world space and are only ever translated, so the vertex
/// count and winding order fixed at construction never change.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    points: Vec<Vec2>,
    pub velocity: Vec2,
}

impl Polygon {
    /// Samples `sides` points on a circle of `radius` around `center`.
    ///
    /// `points[i] = center + radius * (sin(i * 2π / n), cos(i * 2π / n))`.
    /// The polygon starts at rest.
    pub fn regular(center: Vec2, sides: usize, radius: f32) -> Result<Self, ShapeError> {
        if sides < 3 {
            return Err(ShapeError::TooFewSides { sides });
        }
        if !(radius.is_finite() && radius > 0.0) {
            return Err(ShapeError::InvalidRadius { radius });
        }
        if !center.is_finite() {
            return Err(ShapeError::InvalidCenter { x: center.x, y: center.y });
        }

        let step = std::f32::consts::TAU / sides as f32;
        let points = (0..sides)
            .map(|i| {
                let a = step * i as f32;
                center + Vec2::new(a.sin(), a.cos()) * radius
            })
            .collect();

        Ok(Self {
            points,
            velocity: Vec2::zero(),
        })
    }

    #[inline]
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    #[inline]
    pub fn sides(&self) -> usize {
        self.points.len()
    }

    /// Centroid of the vertices.
    pub fn center(&self) -> Vec2 {
        let sum = self
            .points
            .iter()
            .fold(Vec2::zero(), |acc, &p| acc + p);
        sum / self.points.len() as f32
    }

    /// Moves every vertex by `delta`.
    pub fn translate(&mut self, delta: Vec2) {
        for p in &mut self.points {
            *p += delta;
        }
    }
}

/// Creates the startup population.
///
/// For each of `params.groups` rounds, one polygon per side count in
/// `min_sides..=max_sides`, centered at a uniformly random viewport position.
/// Creation order is the draw order.
pub fn populate<R>(
    params: &PopulationParams,
    viewport: Viewport,
    rng: &mut R,
) -> Result<Vec<Polygon>, ShapeError>
where
    R: Rng + ?Sized,
{
    let mut polygons = Vec::with_capacity(params.count());
    for _ in 0..params.groups {
        for sides in params.min_sides..=params.max_sides {
            let center = Vec2::new(
                rng.random_range(0.0..viewport.width),
                rng.random_range(0.0..viewport.height),
            );
            polygons.push(Polygon::regular(center, sides, params.radius)?);
        }
    }
    Ok(polygons)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-3
    }

    // ── regular ───────────────────────────────────────────────────────────

    #[test]
    fn first_point_is_straight_below_center() {
        // sin(0) = 0, cos(0) = 1 → +Y, which is down in world space.
        let p = Polygon::regular(Vec2::new(100.0, 100.0), 3, 40.0).unwrap();
        assert!(approx(p.points()[0], Vec2::new(100.0, 140.0)));
    }

    #[test]
    fn square_points_follow_sin_cos_order() {
        let p = Polygon::regular(Vec2::zero(), 4, 10.0).unwrap();
        let expected = [
            Vec2::new(0.0, 10.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(0.0, -10.0),
            Vec2::new(-10.0, 0.0),
        ];
        for (got, want) in p.points().iter().zip(expected) {
            assert!(approx(*got, want), "{got:?} != {want:?}");
        }
    }

    #[test]
    fn all_points_lie_on_the_circle() {
        let c = Vec2::new(50.0, 60.0);
        let p = Polygon::regular(c, 7, 25.0).unwrap();
        assert_eq!(p.sides(), 7);
        for &pt in p.points() {
            assert!(((pt - c).length() - 25.0).abs() < 1e-3);
        }
    }

    #[test]
    fn starts_at_rest() {
        let p = Polygon::regular(Vec2::zero(), 5, 1.0).unwrap();
        assert_eq!(p.velocity, Vec2::zero());
    }

    #[test]
    fn center_is_the_construction_center() {
        let c = Vec2::new(321.0, 123.0);
        let p = Polygon::regular(c, 6, 40.0).unwrap();
        assert!(approx(p.center(), c));
    }

    #[test]
    fn rejects_fewer_than_three_sides() {
        assert_eq!(
            Polygon::regular(Vec2::zero(), 2, 1.0),
            Err(ShapeError::TooFewSides { sides: 2 })
        );
    }

    #[test]
    fn rejects_non_positive_radius() {
        assert!(matches!(
            Polygon::regular(Vec2::zero(), 3, 0.0),
            Err(ShapeError::InvalidRadius { .. })
        ));
        assert!(matches!(
            Polygon::regular(Vec2::zero(), 3, -4.0),
            Err(ShapeError::InvalidRadius { .. })
        ));
    }

    #[test]
    fn rejects_non_finite_center() {
        assert!(matches!(
            Polygon::regular(Vec2::new(f32::INFINITY, 0.0), 3, 1.0),
            Err(ShapeError::InvalidCenter { .. })
        ));
    }

    // ── translate ─────────────────────────────────────────────────────────

    #[test]
    fn translate_moves_rigidly() {
        let mut p = Polygon::regular(Vec2::new(10.0, 10.0), 4, 5.0).unwrap();
        let before = p.points().to_vec();
        p.translate(Vec2::new(3.0, -2.0));
        for (a, b) in before.iter().zip(p.points()) {
            assert!(approx(*b - *a, Vec2::new(3.0, -2.0)));
        }
    }

    // ── populate ──────────────────────────────────────────────────────────

    #[test]
    fn populate_cycles_side_counts_per_group() {
        let mut rng = StdRng::seed_from_u64(7);
        let params = PopulationParams::default();
        let polys = populate(&params, Viewport::new(800.0, 600.0), &mut rng).unwrap();

        assert_eq!(polys.len(), 28);
        let sides: Vec<usize> = polys.iter().map(Polygon::sides).collect();
        assert_eq!(&sides[..8], &[3, 4, 5, 6, 3, 4, 5, 6]);
    }

    #[test]
    fn populate_centers_inside_viewport() {
        let mut rng = StdRng::seed_from_u64(99);
        let vp = Viewport::new(320.0, 200.0);
        let polys = populate(&PopulationParams::default(), vp, &mut rng).unwrap();
        for p in &polys {
            let c = p.center();
            assert!(c.x > -1e-3 && c.x < vp.width + 1e-3);
            assert!(c.y > -1e-3 && c.y < vp.height + 1e-3);
        }
    }
}
