use rand::prelude::*;

use crate::config::SimConfig;
use crate::constants::TICK_MS;
use crate::engine;
use crate::error::ConfigError;
use crate::obstacle::{FloatingBody, Obstacles};
use crate::palette::HueCycle;
use crate::registry::Registry;
use crate::signal::SignalFrame;
use crate::spawner;
use crate::state::{BodyPose, ParticleView, SceneSnapshot, TickReport};
use crate::sweep::SweepController;

/// The whole scene state, advanced one fixed tick at a time.
///
/// Tick order: sanitize signal, cycle hue, animate the floating body, spawn,
/// update the silence timer, step live particles, age the pile, run the sweep.
pub struct Simulation {
    pub config: SimConfig,
    registry: Registry,
    obstacles: Obstacles,
    sweep: SweepController,
    hue: HueCycle,
    rng: StdRng,
    tick: u64,
}

impl Simulation {
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let obstacles = Obstacles {
            body: FloatingBody::new(&config.body),
            ground: config.ground_region.map(Into::into),
        };
        let sweep = SweepController::new(&config);
        let rng = StdRng::seed_from_u64(config.seed);
        Ok(Self {
            config,
            registry: Registry::new(),
            obstacles,
            sweep,
            hue: HueCycle::default(),
            rng,
            tick: 0,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Direct access for scripted scenes and tests.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    pub fn obstacles(&self) -> &Obstacles {
        &self.obstacles
    }

    pub fn sweep(&self) -> &SweepController {
        &self.sweep
    }

    pub fn sweep_mut(&mut self) -> &mut SweepController {
        &mut self.sweep
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.tick as f64 * TICK_MS
    }

    /// Advance the scene by one frame.
    pub fn tick(&mut self, signal: SignalFrame) -> TickReport {
        let signal = signal.sanitized();
        self.tick += 1;
        let elapsed_ms = self.elapsed_ms();
        let mut report = TickReport {
            tick: self.tick,
            ..TickReport::default()
        };

        self.hue.advance(signal.bass);
        self.obstacles.body.animate(elapsed_ms, signal.bass);

        spawner::spawn(
            signal.volume,
            &self.config.spawn,
            &mut self.registry,
            &mut self.rng,
            &mut report.spawned,
        );
        let loud = spawner::is_loud(signal.volume, &self.config.spawn);
        report.sweep_cancelled = self.sweep.observe_signal(loud, &self.config);

        engine::step_live(
            &mut self.registry,
            &self.obstacles,
            &self.config,
            &mut self.rng,
            &mut report,
        );
        engine::age_resting(&mut self.registry, &self.config, &mut report);
        self.sweep.update(
            &mut self.registry,
            &self.config,
            elapsed_ms,
            &mut self.rng,
            &mut report,
        );
        report
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        let body = &self.obstacles.body;
        SceneSnapshot {
            tick: self.tick,
            particles: self.registry.iter().map(ParticleView::from).collect(),
            live_count: self.registry.live_count(),
            resting_count: self.registry.resting_count(),
            body: BodyPose {
                center: body.center(),
                rotation_y: body.rotation_y,
                radius: body.radius,
                glow_rgb: self.hue.glow_rgb(),
                screen_rgb: self.hue.screen_rgb(),
            },
            ground: self.obstacles.ground,
            agent: *self.sweep.agent(),
            sweep_phase: self.sweep.phase(),
            idle_ticks: self.sweep.idle_ticks(),
        }
    }

    /// Drop every particle and park the cleaner; tick count and hue continue.
    pub fn reset(&mut self) {
        self.registry.clear();
        self.sweep = SweepController::new(&self.config);
        log::info!("[sim] scene reset");
    }
}
