//! Frame driver.
//!
//! [`Swarm`] owns the polygons, the attractor and the reusable mesh, and runs
//! one full cycle per redraw: emit geometry, integrate physics, advance time,
//! submit. Presentation goes through the [`RenderBackend`] seam so the cycle
//! can run without a GPU.

use rand::Rng;

use umbra_engine::coords::{Vec2, Viewport};
use umbra_engine::core::AppControl;
use umbra_engine::mesh::{Mesh, MeshBuilder};
use umbra_engine::time::FrameClock;

use crate::attractor::Attractor;
use crate::config::SwarmConfig;
use crate::error::SwarmError;
use crate::physics::{self, PhysicsCtx};
use crate::polygon::{populate, Polygon};
use crate::shadow::emit_shadow;

/// Receives the finished mesh once per frame.
pub trait RenderBackend {
    /// Presents `mesh` at animation time `time`.
    fn submit(&mut self, mesh: &Mesh, time: f64) -> AppControl;
}

/// The animated polygon swarm.
pub struct Swarm {
    config: SwarmConfig,
    viewport: Viewport,
    polygons: Vec<Polygon>,
    attractor: Attractor,
    mesh: Mesh,
    clock: FrameClock,
}

impl Swarm {
    /// Validates `config` and seeds the population inside `viewport`.
    pub fn new<R>(config: SwarmConfig, viewport: Viewport, rng: &mut R) -> Result<Self, SwarmError>
    where
        R: Rng + ?Sized,
    {
        config.validate()?;
        check_viewport(viewport)?;

        let polygons = populate(&config.population, viewport, rng)?;
        log::info!(
            "seeded {} polygons in {}x{} viewport",
            polygons.len(),
            viewport.width,
            viewport.height
        );

        Ok(Self::from_parts(config, viewport, polygons))
    }

    /// Builds a swarm around an explicit polygon list.
    pub fn with_polygons(
        config: SwarmConfig,
        viewport: Viewport,
        polygons: Vec<Polygon>,
    ) -> Result<Self, SwarmError> {
        config.validate()?;
        check_viewport(viewport)?;
        Ok(Self::from_parts(config, viewport, polygons))
    }

    fn from_parts(config: SwarmConfig, viewport: Viewport, polygons: Vec<Polygon>) -> Self {
        let clock = FrameClock::new(config.time_step);
        Self {
            config,
            viewport,
            polygons,
            attractor: Attractor::default(),
            mesh: Mesh::new(),
            clock,
        }
    }

    /// Records the latest pointer position.
    pub fn set_attractor(&mut self, position: Vec2) {
        self.attractor.set(position);
    }

    pub fn attractor(&self) -> Vec2 {
        self.attractor.position()
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn config(&self) -> &SwarmConfig {
        &self.config
    }

    /// The mesh built by the most recent frame.
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Animation time of the most recent submission.
    pub fn time(&self) -> f64 {
        self.clock.time()
    }

    pub fn frames(&self) -> u64 {
        self.clock.frames()
    }

    /// Rebuilds the mesh from current positions.
    ///
    /// Draw order: background, every shadow, then every fill, each in
    /// creation order. Fills come after all shadows so no shadow covers a
    /// polygon.
    pub fn build_mesh(&mut self) {
        let palette = self.config.palette;
        let attractor = self.attractor.position();
        let distance = self.config.shadow_distance;

        self.mesh.clear();
        let mut b = MeshBuilder::new(&mut self.mesh, self.viewport);

        b.fill_viewport(palette.background);
        for p in &self.polygons {
            emit_shadow(&mut b, p.points(), attractor, distance, palette.shadow);
        }
        for p in &self.polygons {
            b.fan(p.points(), palette.fill);
        }
    }

    /// Integrates every polygon by one frame.
    pub fn step_physics<R>(&mut self, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        let params = &self.config.physics;
        let ctx = PhysicsCtx {
            attractor: self.attractor.position(),
            viewport: self.viewport,
            params,
        };
        for p in &mut self.polygons {
            let delta = physics::sample_jitter(rng, params.jitter);
            physics::step(p, &ctx, delta);
        }
    }

    /// Runs one full cycle and hands the mesh to `backend`.
    ///
    /// The submitted geometry shows positions from before this frame's
    /// physics step.
    pub fn frame<R, B>(&mut self, rng: &mut R, backend: &mut B) -> AppControl
    where
        R: Rng + ?Sized,
        B: RenderBackend + ?Sized,
    {
        self.build_mesh();
        self.step_physics(rng);

        let ft = self.clock.tick();
        log::trace!(
            "frame {}: {} vertices, {} triangles, t={:.2}",
            ft.frame_index,
            self.mesh.vertex_count(),
            self.mesh.triangle_count(),
            ft.time
        );

        backend.submit(&self.mesh, ft.time)
    }
}

fn check_viewport(viewport: Viewport) -> Result<(), SwarmError> {
    if viewport.is_valid() {
        Ok(())
    } else {
        Err(SwarmError::Viewport {
            width: viewport.width,
            height: viewport.height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use umbra_engine::mesh::world_to_clip;

    const VP: Viewport = Viewport::new(800.0, 600.0);

    #[derive(Default)]
    struct RecordingBackend {
        frames: Vec<(Mesh, f64)>,
        reply: Option<AppControl>,
    }

    impl RenderBackend for RecordingBackend {
        fn submit(&mut self, mesh: &Mesh, time: f64) -> AppControl {
            self.frames.push((mesh.clone(), time));
            self.reply.unwrap_or(AppControl::Continue)
        }
    }

    fn still_config() -> SwarmConfig {
        let mut config = SwarmConfig::default();
        config.physics.jitter = 0.0;
        config
    }

    fn single_triangle() -> Swarm {
        let tri = Polygon::regular(Vec2::new(100.0, 100.0), 3, 40.0).unwrap();
        let mut swarm = Swarm::with_polygons(still_config(), VP, vec![tri]).unwrap();
        swarm.set_attractor(Vec2::new(400.0, 300.0));
        swarm
    }

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn default_config_seeds_28_polygons() {
        let mut rng = StdRng::seed_from_u64(5);
        let swarm = Swarm::new(SwarmConfig::default(), VP, &mut rng).unwrap();
        assert_eq!(swarm.polygons().len(), 28);
        assert_eq!(swarm.attractor(), Vec2::zero());
        assert_eq!(swarm.time(), 0.0);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = SwarmConfig::default();
        config.population.min_sides = 2;
        let mut rng = StdRng::seed_from_u64(5);
        let err = Swarm::new(config, VP, &mut rng).err().unwrap();
        assert!(matches!(err, SwarmError::Config(_)));
    }

    #[test]
    fn empty_viewport_is_rejected() {
        let mut rng = StdRng::seed_from_u64(5);
        let err = Swarm::new(SwarmConfig::default(), Viewport::new(0.0, 600.0), &mut rng)
            .err()
            .unwrap();
        assert!(matches!(err, SwarmError::Viewport { .. }));
    }

    // ── frame ─────────────────────────────────────────────────────────────

    #[test]
    fn single_triangle_frame_layout() {
        let mut swarm = single_triangle();
        let mut rng = StdRng::seed_from_u64(0);
        let mut backend = RecordingBackend::default();

        assert_eq!(swarm.frame(&mut rng, &mut backend), AppControl::Continue);

        let (mesh, _) = &backend.frames[0];
        // background 4 + shadow 3 * 4 + fill 3
        assert_eq!(mesh.vertex_count(), 19);
        // background 2 + shadow 3 * 2 + fill 1
        assert_eq!(mesh.triangle_count(), 9);

        let fill = &mesh.indices()[mesh.index_count() - 3..];
        assert_eq!(fill, &[16, 17, 18]);
        assert!(mesh.colors()[16..].iter().all(|c| *c == [0.5, 0.5, 0.5, 1.0]));
        assert_eq!(mesh.colors()[0], [0.93, 0.93, 0.93, 1.0]);
        assert!(mesh.colors()[4..16].iter().all(|c| *c == [0.3, 0.3, 0.3, 1.0]));
    }

    #[test]
    fn background_covers_clip_rectangle() {
        let mut swarm = single_triangle();
        let mut rng = StdRng::seed_from_u64(0);
        let mut backend = RecordingBackend::default();
        swarm.frame(&mut rng, &mut backend);

        let mesh = swarm.mesh();
        assert_eq!(
            &mesh.positions()[..4],
            &[[-1.0, 1.0], [1.0, 1.0], [1.0, -1.0], [-1.0, -1.0]]
        );
    }

    #[test]
    fn submitted_geometry_predates_physics() {
        let mut swarm = single_triangle();
        let before: Vec<[f32; 2]> = swarm.polygons()[0]
            .points()
            .iter()
            .map(|&p| world_to_clip(p, VP))
            .collect();

        let mut rng = StdRng::seed_from_u64(0);
        let mut backend = RecordingBackend::default();
        swarm.frame(&mut rng, &mut backend);

        let (mesh, _) = &backend.frames[0];
        assert_eq!(&mesh.positions()[16..], before.as_slice());

        let v = swarm.polygons()[0].velocity;
        assert!(v.dot(Vec2::new(300.0, 200.0)) < 0.0);
    }

    #[test]
    fn time_advances_by_step_before_submit() {
        let mut swarm = single_triangle();
        let mut rng = StdRng::seed_from_u64(0);
        let mut backend = RecordingBackend::default();

        for _ in 0..3 {
            swarm.frame(&mut rng, &mut backend);
        }

        let times: Vec<f64> = backend.frames.iter().map(|(_, t)| *t).collect();
        assert!((times[0] - 0.05).abs() < 1e-6);
        assert!(times.windows(2).all(|w| w[1] > w[0]));
        assert_eq!(swarm.frames(), 3);
    }

    #[test]
    fn backend_exit_is_returned() {
        let mut swarm = single_triangle();
        let mut rng = StdRng::seed_from_u64(0);
        let mut backend = RecordingBackend {
            reply: Some(AppControl::Exit),
            ..Default::default()
        };
        assert_eq!(swarm.frame(&mut rng, &mut backend), AppControl::Exit);
    }

    #[test]
    fn mesh_invariants_hold_over_many_frames() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut swarm = Swarm::new(SwarmConfig::default(), VP, &mut rng).unwrap();
        let mut backend = RecordingBackend::default();

        for i in 0..200 {
            swarm.set_attractor(Vec2::new((i * 4) as f32, 300.0));
            swarm.frame(&mut rng, &mut backend);
            let mesh = swarm.mesh();
            assert!(mesh.is_consistent());
            assert_eq!(mesh.colors().len(), mesh.positions().len());
            assert_eq!(mesh.index_count() % 3, 0);
        }

        // 28 polygons with 3..=6 sides, 7 of each: 126 edges, 126 fill points.
        let mesh = swarm.mesh();
        assert_eq!(mesh.vertex_count(), 4 + 126 * 4 + 126);
        assert_eq!(mesh.triangle_count(), 2 + 126 * 2 + 7 * (1 + 2 + 3 + 4));
        assert!(swarm.polygons().iter().all(|p| (3..=6).contains(&p.sides())));
    }

    #[test]
    fn attractor_keeps_last_position() {
        let mut swarm = single_triangle();
        swarm.set_attractor(Vec2::new(10.0, 20.0));
        swarm.set_attractor(Vec2::new(f32::NAN, 0.0));
        assert_eq!(swarm.attractor(), Vec2::new(10.0, 20.0));
    }
}
