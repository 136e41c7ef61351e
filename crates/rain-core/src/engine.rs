//! Collision and lifecycle engine.
//!
//! Runs once per tick over the live partition (falling and deflected
//! particles), then ages the resting partition when the decay policy is on.

use glam::Vec3;
use rand::Rng;

use crate::config::{LifecyclePolicy, SimConfig};
use crate::constants::*;
use crate::obstacle::Obstacles;
use crate::particle::{Lifecycle, Particle, Tint};
use crate::registry::Registry;
use crate::state::TickReport;

/// What one integration step decided for a live particle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    StillLive,
    /// Stays live; bounced off the floating body this tick.
    Deflected,
    /// Came to rest on the ground-level box.
    RestedOnRegion,
    /// Came to rest on the floor.
    Landed,
    /// Left the world horizontally.
    Escaped,
}

/// Advance one live particle by one tick and apply collision transitions.
pub fn advance<R: Rng + ?Sized>(
    p: &mut Particle,
    obstacles: &Obstacles,
    config: &SimConfig,
    rng: &mut R,
) -> StepOutcome {
    debug_assert!(p.state.is_live());
    let mut outcome = StepOutcome::StillLive;

    p.position += p.velocity;

    // Deflection is only legal from Falling, so a particle bounces at most once.
    if p.state == Lifecycle::Falling && obstacles.body.hits(p.position) {
        deflect(p, obstacles, config);
        outcome = StepOutcome::Deflected;
    }

    if let Some(region) = &obstacles.ground {
        if region.contains(p.position) {
            come_to_rest(p, Tint::Marked, config);
            return StepOutcome::RestedOnRegion;
        }
    }

    if p.position.y <= config.floor_y {
        let jitter = if config.settle_jitter > 0.0 {
            rng.gen::<f32>() * config.settle_jitter
        } else {
            0.0
        };
        p.position.y = config.floor_y + jitter;
        come_to_rest(p, Tint::Settled, config);
        return StepOutcome::Landed;
    }

    if p.state == Lifecycle::Deflected {
        p.velocity.y -= config.body.gravity;
        p.impact *= IMPACT_EASE;
        if p.impact < IMPACT_CUTOFF {
            p.impact = 0.0;
            p.tint = Tint::Default;
        }
    }

    let h = config.world_half_extent;
    if p.position.x.abs() > h || p.position.z.abs() > h {
        return StepOutcome::Escaped;
    }
    outcome
}

fn deflect(p: &mut Particle, obstacles: &Obstacles, config: &SimConfig) {
    let body = &obstacles.body;
    let dir = body.outward(p.position);
    p.position.y = body.band_top();
    p.velocity = Vec3::new(
        dir.x * config.body.outward_speed,
        config.body.bounce_speed,
        dir.y * config.body.outward_speed,
    );
    p.state = Lifecycle::Deflected;
    p.tint = Tint::Impact;
    p.impact = 1.0;
}

fn come_to_rest(p: &mut Particle, tint: Tint, config: &SimConfig) {
    p.state = Lifecycle::Resting;
    p.tint = tint;
    p.impact = 0.0;
    p.velocity = Vec3::ZERO;
    p.remaining_life = match config.lifecycle {
        LifecyclePolicy::Pile => None,
        LifecyclePolicy::Decay { life_ticks, .. } => Some(life_ticks),
    };
}

/// Step every live particle, moving landed ones into the resting partition.
pub fn step_live<R: Rng + ?Sized>(
    registry: &mut Registry,
    obstacles: &Obstacles,
    config: &SimConfig,
    rng: &mut R,
    report: &mut TickReport,
) {
    let mut i = 0;
    while i < registry.live_count() {
        let outcome = advance(&mut registry.live_mut()[i], obstacles, config, rng);
        match outcome {
            StepOutcome::StillLive => i += 1,
            StepOutcome::Deflected => {
                report.deflected += 1;
                i += 1;
            }
            StepOutcome::Landed | StepOutcome::RestedOnRegion => {
                // swap_remove pulls the last particle into slot i; do not advance.
                let p = registry.take_live(i);
                report.settled += 1;
                if let Some(evicted) = registry.settle(p, config.resting_cap) {
                    log::debug!("[engine] resting cap reached, evicting {:?}", evicted.id);
                    report.removed.push(evicted.id);
                }
            }
            StepOutcome::Escaped => {
                let p = registry.take_live(i);
                report.removed.push(p.id);
            }
        }
    }
}

/// Decay policy only: count down resting particles, then fade and drop them.
pub fn age_resting(registry: &mut Registry, config: &SimConfig, report: &mut TickReport) {
    let LifecyclePolicy::Decay { fade_per_tick, .. } = config.lifecycle else {
        return;
    };
    let resting = registry.resting_mut();
    let mut i = 0;
    while i < resting.len() {
        let p = &mut resting[i];
        let gone = match p.state {
            Lifecycle::Resting => {
                match p.remaining_life {
                    Some(0) | None => {
                        p.state = Lifecycle::Decaying;
                        p.tint = Tint::Decaying;
                    }
                    Some(n) => p.remaining_life = Some(n - 1),
                }
                false
            }
            Lifecycle::Decaying => p.fade(fade_per_tick),
            Lifecycle::Falling | Lifecycle::Deflected => false,
        };
        if gone {
            if let Some(p) = resting.remove(i) {
                report.removed.push(p.id);
            }
        } else {
            i += 1;
        }
    }
}
