//! Swarm configuration.
//!
//! Plain structs with `Default`. The defaults give 28 polygons (7 groups of
//! triangles through hexagons, radius 40), a gray palette and a 0.05 time
//! step.

use umbra_engine::coords::ColorRgba;

use crate::error::ConfigError;

/// Which polygons to create at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct PopulationParams {
    /// How many times the side-count range is repeated.
    pub groups: usize,
    /// Smallest side count (inclusive, at least 3).
    pub min_sides: usize,
    /// Largest side count (inclusive).
    pub max_sides: usize,
    /// Circumradius of every polygon, in logical pixels.
    pub radius: f32,
}

impl PopulationParams {
    /// Number of polygons this produces.
    pub fn count(&self) -> usize {
        if self.max_sides < self.min_sides {
            return 0;
        }
        self.groups * (self.max_sides - self.min_sides + 1)
    }
}

impl Default for PopulationParams {
    fn default() -> Self {
        Self {
            groups: 7,
            min_sides: 3,
            max_sides: 6,
            radius: 40.0,
        }
    }
}

/// Tuning of the per-frame integrator.
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsParams {
    /// Half-width of the uniform random velocity kick per axis.
    pub jitter: f32,
    /// Per-axis speed cap applied after the kick.
    pub max_speed: f32,
    /// Strength `K` of the flee field `-K * d / r^4`.
    pub repulsion: f32,
    /// Speed kept when bouncing off a viewport edge.
    pub restitution: f32,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            jitter: 0.15,
            max_speed: 2.0,
            repulsion: 100_000.0,
            restitution: 0.7,
        }
    }
}

/// Fill colors used by the frame driver.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Palette {
    pub background: ColorRgba,
    pub shadow: ColorRgba,
    pub fill: ColorRgba,
    /// Surface clear color behind the background quad.
    pub clear: ColorRgba,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: ColorRgba::gray(0.93),
            shadow: ColorRgba::gray(0.3),
            fill: ColorRgba::gray(0.5),
            clear: ColorRgba::white(),
        }
    }
}

/// Complete swarm configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SwarmConfig {
    pub population: PopulationParams,
    pub physics: PhysicsParams,
    /// Absolute length each shadow vertex is pushed away from the attractor.
    pub shadow_distance: f32,
    pub palette: Palette,
    /// Animation time added per frame.
    pub time_step: f32,
    /// Fixed RNG seed; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            population: PopulationParams::default(),
            physics: PhysicsParams::default(),
            shadow_distance: 2000.0,
            palette: Palette::default(),
            time_step: 0.05,
            seed: None,
        }
    }
}

impl SwarmConfig {
    /// Checks every field that would otherwise produce undefined geometry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let pop = &self.population;
        if pop.min_sides < 3 {
            return Err(ConfigError::new(
                "population.min_sides",
                format!("must be at least 3, got {}", pop.min_sides),
            ));
        }
        if pop.max_sides < pop.min_sides {
            return Err(ConfigError::new(
                "population.max_sides",
                format!("{} is below min_sides {}", pop.max_sides, pop.min_sides),
            ));
        }
        if !(pop.radius.is_finite() && pop.radius > 0.0) {
            return Err(ConfigError::new(
                "population.radius",
                format!("must be finite and > 0, got {}", pop.radius),
            ));
        }

        let ph = &self.physics;
        non_negative("physics.jitter", ph.jitter)?;
        non_negative("physics.max_speed", ph.max_speed)?;
        non_negative("physics.repulsion", ph.repulsion)?;
        if !(0.0..=1.0).contains(&ph.restitution) {
            return Err(ConfigError::new(
                "physics.restitution",
                format!("must be within [0, 1], got {}", ph.restitution),
            ));
        }

        non_negative("shadow_distance", self.shadow_distance)?;
        if !(self.time_step.is_finite() && self.time_step > 0.0) {
            return Err(ConfigError::new(
                "time_step",
                format!("must be finite and > 0, got {}", self.time_step),
            ));
        }

        Ok(())
    }
}

fn non_negative(field: &'static str, v: f32) -> Result<(), ConfigError> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::new(field, format!("must be finite and >= 0, got {v}")))
    }
}
