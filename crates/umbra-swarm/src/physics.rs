//! Per-frame point-mass integrator.
//!
//! One [`step`] applies, in order: random jitter, per-axis speed clamp,
//! repulsion from the attractor (all velocity updates), then rigid translation
//! and boundary reflection. Each stage is a pure function so it can be tested
//! on its own.

use rand::Rng;

use umbra_engine::coords::{Vec2, Viewport};

use crate::config::PhysicsParams;
use crate::polygon::Polygon;

/// Shared read-only inputs for one integration step.
#[derive(Debug, Copy, Clone)]
pub struct PhysicsCtx<'a> {
    pub attractor: Vec2,
    pub viewport: Viewport,
    pub params: &'a PhysicsParams,
}

/// Draws an independent uniform delta in `[-amplitude, amplitude]` per axis.
pub fn sample_jitter<R>(rng: &mut R, amplitude: f32) -> Vec2
where
    R: Rng + ?Sized,
{
    if amplitude <= 0.0 {
        return Vec2::zero();
    }
    Vec2::new(
        rng.random_range(-amplitude..=amplitude),
        rng.random_range(-amplitude..=amplitude),
    )
}

#[inline]
pub fn jitter(velocity: Vec2, delta: Vec2) -> Vec2 {
    velocity + delta
}

/// Caps each axis at `max` in magnitude, keeping its sign.
#[inline]
pub fn clamp_speed(velocity: Vec2, max: f32) -> Vec2 {
    debug_assert!(max >= 0.0);
    Vec2::new(velocity.x.clamp(-max, max), velocity.y.clamp(-max, max))
}

/// Velocity change pushing `center` away from `attractor`.
///
/// With `d = attractor - center` and `r = |d|` this is `-strength * d / r^4`,
/// so the magnitude falls off as `1 / r^3`. Coincident points (and distances
/// so small that the result overflows) produce no force.
pub fn repulsion_force(center: Vec2, attractor: Vec2, strength: f32) -> Vec2 {
    let d = attractor - center;
    let r2 = d.length_squared();
    if r2 == 0.0 {
        return Vec2::zero();
    }

    let force = d * (-strength / (r2 * r2));
    if force.is_finite() { force } else { Vec2::zero() }
}

/// Bounces `velocity` off the viewport edges.
///
/// Every point is checked. A point left of `0` makes `x` velocity positive, a
/// point right of `width` makes it negative, both scaled by `restitution`;
/// same for `y`. Each write starts from the incoming `velocity`, so the
/// restitution factor applies once per axis however many points are outside.
/// Positions are not corrected, and when several points trigger on one axis
/// the last one wins.
pub fn reflect_boundary(
    points: &[Vec2],
    velocity: Vec2,
    viewport: Viewport,
    restitution: f32,
) -> Vec2 {
    let mut v = velocity;
    for p in points {
        if p.x < 0.0 {
            v.x = velocity.x.abs() * restitution;
        }
        if p.x > viewport.width {
            v.x = -velocity.x.abs() * restitution;
        }
        if p.y < 0.0 {
            v.y = velocity.y.abs() * restitution;
        }
        if p.y > viewport.height {
            v.y = -velocity.y.abs() * restitution;
        }
    }
    v
}

/// Advances `polygon` by one frame.
///
/// `jitter_delta` is normally drawn with [`sample_jitter`]; passing zero gives
/// a deterministic step.
pub fn step(polygon: &mut Polygon, ctx: &PhysicsCtx<'_>, jitter_delta: Vec2) {
    let params = ctx.params;

    let mut v = jitter(polygon.velocity, jitter_delta);
    v = clamp_speed(v, params.max_speed);
    v += repulsion_force(polygon.center(), ctx.attractor, params.repulsion);

    polygon.translate(v);
    polygon.velocity = reflect_boundary(polygon.points(), v, ctx.viewport, params.restitution);
}
