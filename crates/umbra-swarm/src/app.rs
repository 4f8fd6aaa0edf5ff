//! Windowed host for a [`Swarm`].
//!
//! [`Application`] is the public entry point; it wires a [`SwarmApp`] into the
//! engine runtime. The swarm is seeded on the first frame, once the window's
//! logical size is known, and that viewport is kept for the whole run.

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use winit::dpi::LogicalSize;

use umbra_engine::coords::{ColorRgba, Viewport};
use umbra_engine::core::{App, AppControl, FrameCtx};
use umbra_engine::device::GpuInit;
use umbra_engine::mesh::Mesh;
use umbra_engine::render::MeshRenderer;
use umbra_engine::window::{Runtime, RuntimeConfig, RuntimeCtx};

use crate::config::SwarmConfig;
use crate::driver::{RenderBackend, Swarm};
use crate::error::SwarmError;

/// Builder and entry point for the swarm window.
///
/// ```rust,ignore
/// Application::new()
///     .title("umbra")
///     .size(1024.0, 768.0)
///     .seed(7)
///     .run()?;
/// ```
pub struct Application {
    title:  String,
    width:  f64,
    height: f64,
    config: SwarmConfig,
}

impl Application {
    pub fn new() -> Self {
        Self {
            title:  "umbra".to_string(),
            width:  1280.0,
            height: 720.0,
            config: SwarmConfig::default(),
        }
    }

    /// Set the window title.
    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.title = t.into();
        self
    }

    /// Set the window size in logical pixels. The window is not resizable.
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width  = width;
        self.height = height;
        self
    }

    /// Replace the whole swarm configuration.
    pub fn config(mut self, config: SwarmConfig) -> Self {
        self.config = config;
        self
    }

    /// Fix the RNG seed so population and jitter repeat between runs.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Validates the configuration, opens the window and runs until it is
    /// closed.
    pub fn run(self) -> Result<()> {
        self.config
            .validate()
            .context("invalid swarm configuration")?;

        let runtime = RuntimeConfig {
            title:        self.title.clone(),
            initial_size: LogicalSize::new(self.width, self.height),
            resizable:    false,
        };
        let app = SwarmApp::new(self.title, self.config);

        Runtime::run(runtime, GpuInit::default(), app)
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}

/// Engine [`App`] driving one swarm.
pub struct SwarmApp {
    title:    String,
    config:   SwarmConfig,
    rng:      StdRng,
    swarm:    Option<Swarm>,
    renderer: MeshRenderer,
}

impl SwarmApp {
    pub fn new(title: impl Into<String>, config: SwarmConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => {
                log::info!("using fixed seed {seed}");
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_os_rng(),
        };

        Self {
            title: title.into(),
            config,
            rng,
            swarm: None,
            renderer: MeshRenderer::new(),
        }
    }

    pub fn swarm(&self) -> Option<&Swarm> {
        self.swarm.as_ref()
    }

    /// Seeds the swarm for `viewport` unless that already happened.
    fn ensure_swarm(&mut self, viewport: Viewport) -> Result<&mut Swarm, SwarmError> {
        match self.swarm {
            Some(ref mut swarm) => Ok(swarm),
            None => {
                let swarm = Swarm::new(self.config.clone(), viewport, &mut self.rng)?;
                Ok(self.swarm.insert(swarm))
            }
        }
    }

    /// Seeds the swarm on the first frame and names the window after it.
    ///
    /// A seeding failure is handed to the runtime, so `Runtime::run` returns
    /// it as an error instead of a clean exit.
    fn start(&mut self, viewport: Viewport, runtime: &mut RuntimeCtx) -> AppControl {
        let title = self.title.clone();
        match self.ensure_swarm(viewport) {
            Ok(swarm) => {
                runtime.set_title(format!("{title} ({} polygons)", swarm.polygons().len()));
                AppControl::Continue
            }
            Err(e) => {
                runtime.fail(anyhow::Error::new(e).context("cannot start swarm"));
                AppControl::Exit
            }
        }
    }
}

impl App for SwarmApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if self.swarm.is_none() {
            let viewport = ctx.window.viewport();
            if self.start(viewport, ctx.runtime) == AppControl::Exit {
                return AppControl::Exit;
            }
        }
        let Some(swarm) = self.swarm.as_mut() else {
            return AppControl::Exit;
        };

        if let Some(p) = ctx.input.last_pointer_pos {
            swarm.set_attractor(p);
        }

        let mut backend = GpuBackend {
            ctx,
            renderer: &mut self.renderer,
            clear: self.config.palette.clear,
        };
        swarm.frame(&mut self.rng, &mut backend)
    }
}

/// Presents meshes through the engine's frame context.
struct GpuBackend<'f, 'a, 'w> {
    ctx: &'f mut FrameCtx<'a, 'w>,
    renderer: &'f mut MeshRenderer,
    clear: ColorRgba,
}

impl RenderBackend for GpuBackend<'_, '_, '_> {
    fn submit(&mut self, mesh: &Mesh, time: f64) -> AppControl {
        let renderer = &mut *self.renderer;
        self.ctx.render(self.clear, |rctx, target| {
            renderer.render(rctx, target, mesh, time);
        })
    }
}
