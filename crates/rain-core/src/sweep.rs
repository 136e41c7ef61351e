//! Cleaner car that clears the pile after a stretch of silence.
//!
//! `Idle -> Triggered -> Sweeping -> Idle`. `Triggered` is entered and left
//! within the same tick; it exists so the guard and the start transition can
//! be checked separately. Sound above the spawn threshold parks the car and
//! zeroes the idle timer, cancelling a pass in progress.

use rand::Rng;

use crate::config::{SimConfig, SweepConfig};
use crate::constants::*;
use crate::particle::{Lifecycle, Tint};
use crate::registry::Registry;
use crate::state::TickReport;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SweepPhase {
    Idle,
    Triggered,
    Sweeping,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AgentMode {
    Idle,
    Sweeping,
}

/// Pose of the cleaner car.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepAgent {
    pub x: f32,
    pub y: f32,
    pub wheel_angle: f32,
    pub mode: AgentMode,
}

/// Half-open strip `[blade - window, blade)` in front of the car, with
/// `blade = agent_x + blade_offset`. The trailing edge is swept, the leading
/// edge is not.
#[inline]
pub fn in_window(agent_x: f32, particle_x: f32, config: &SweepConfig) -> bool {
    let blade = agent_x + config.blade_offset;
    particle_x >= blade - config.window && particle_x < blade
}

#[derive(Clone, Debug)]
pub struct SweepController {
    phase: SweepPhase,
    agent: SweepAgent,
    idle_ticks: u32,
}

impl SweepController {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            phase: SweepPhase::Idle,
            agent: SweepAgent {
                x: config.sweep.park_x,
                y: config.floor_y,
                wheel_angle: 0.0,
                mode: AgentMode::Idle,
            },
            idle_ticks: 0,
        }
    }

    pub fn phase(&self) -> SweepPhase {
        self.phase
    }

    pub fn agent(&self) -> &SweepAgent {
        &self.agent
    }

    pub fn idle_ticks(&self) -> u32 {
        self.idle_ticks
    }

    pub fn is_active(&self) -> bool {
        self.phase != SweepPhase::Idle
    }

    /// Seed the silence counter, e.g. when resuming a paused scene.
    pub fn set_idle_ticks(&mut self, ticks: u32) {
        self.idle_ticks = ticks;
    }

    /// Feed this tick's loudness. Returns true if a pass was cancelled.
    pub fn observe_signal(&mut self, loud: bool, config: &SimConfig) -> bool {
        if !loud {
            self.idle_ticks = self.idle_ticks.saturating_add(1);
            return false;
        }
        let cancelled = self.is_active();
        if cancelled {
            log::debug!("[sweep] sound resumed at x={:.1}, cancelling pass", self.agent.x);
        }
        self.park(config);
        self.idle_ticks = 0;
        cancelled
    }

    fn park(&mut self, config: &SimConfig) {
        self.phase = SweepPhase::Idle;
        self.agent.x = config.sweep.park_x;
        self.agent.y = config.floor_y;
        self.agent.mode = AgentMode::Idle;
    }

    /// Guard for `Idle -> Triggered`.
    pub fn should_trigger(&self, resting_count: usize, config: &SimConfig) -> bool {
        self.phase == SweepPhase::Idle
            && self.idle_ticks > config.sweep.idle_ticks
            && resting_count > 0
    }

    /// Run the state machine for one tick.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        registry: &mut Registry,
        config: &SimConfig,
        elapsed_ms: f64,
        rng: &mut R,
        report: &mut TickReport,
    ) {
        match self.phase {
            SweepPhase::Idle => {
                if self.should_trigger(registry.resting_count(), config) {
                    self.phase = SweepPhase::Triggered;
                    self.agent.x = config.sweep.start_x;
                    self.begin(config, elapsed_ms);
                    report.sweep_started = true;
                    log::debug!(
                        "[sweep] starting pass after {} idle ticks, {} resting",
                        self.idle_ticks,
                        registry.resting_count()
                    );
                }
            }
            SweepPhase::Triggered => self.begin(config, elapsed_ms),
            SweepPhase::Sweeping => {
                self.drive(config, elapsed_ms);
                self.clear_window(registry, config, rng, report);
                if self.agent.x > config.sweep.end_x {
                    self.park(config);
                    self.idle_ticks = 0;
                    report.sweep_finished = true;
                    log::debug!("[sweep] pass finished");
                }
            }
        }
    }

    fn begin(&mut self, config: &SimConfig, elapsed_ms: f64) {
        self.phase = SweepPhase::Sweeping;
        self.agent.mode = AgentMode::Sweeping;
        self.agent.y = ride_height(config, elapsed_ms);
    }

    fn drive(&mut self, config: &SimConfig, elapsed_ms: f64) {
        self.agent.x += config.sweep.step;
        self.agent.y = ride_height(config, elapsed_ms);
        self.agent.wheel_angle =
            (self.agent.wheel_angle - SWEEP_WHEEL_SPIN_PER_TICK) % std::f32::consts::TAU;
    }

    fn clear_window<R: Rng + ?Sized>(
        &mut self,
        registry: &mut Registry,
        config: &SimConfig,
        rng: &mut R,
        report: &mut TickReport,
    ) {
        let sweep = &config.sweep;
        let resting = registry.resting_mut();
        let mut i = 0;
        while i < resting.len() {
            let p = &mut resting[i];
            if !in_window(self.agent.x, p.position.x, sweep) {
                i += 1;
                continue;
            }
            p.position.x += sweep.nudge;
            p.position.y += rng.gen::<f32>() * sweep.hop;
            p.state = Lifecycle::Decaying;
            p.tint = Tint::Decaying;
            if p.fade(sweep.fade_per_tick) {
                if let Some(p) = resting.remove(i) {
                    report.removed.push(p.id);
                }
            } else {
                i += 1;
            }
        }
    }
}

fn ride_height(config: &SimConfig, elapsed_ms: f64) -> f32 {
    let vib = (elapsed_ms * SWEEP_VIBRATION_RATE_PER_MS).sin() as f32;
    config.floor_y + SWEEP_RIDE_HEIGHT + vib * SWEEP_VIBRATION_AMPLITUDE
}
