//! Simulation tuning, loadable from JSON.
//!
//! Every value is expressed per tick (see [`TICK_MS`](crate::constants::TICK_MS)).
//! `SimConfig::default()` is the classic rain scene: particles pile up
//! on the floor until the cleaner sweeps them. `SimConfig::text_scene()` is the
//! variant with a ground-level text box, trickle spawning and decaying piles.

use std::fs;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;

/// How many drops a tick produces from the volume signal.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpawnPolicy {
    /// `floor(volume * rate) + 1` drops whenever volume is above the threshold.
    Burst { rate: f32 },
    /// At most one reactive drop per tick, plus an audio-independent ambient drop.
    Trickle { ambient_chance: f32 },
}

/// What happens to particles once they come to rest.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LifecyclePolicy {
    /// Resting particles stay until swept or evicted by the resting cap.
    Pile,
    /// Resting particles count down `life_ticks`, then fade out by `fade_per_tick`.
    Decay { life_ticks: u32, fade_per_tick: f32 },
}

/// Axis-aligned box, used for the ground-level text obstacle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegionConfig {
    pub min: Vec3,
    pub max: Vec3,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub policy: SpawnPolicy,
    pub threshold: f32,
    pub altitude: f32,
    pub spread_x: f32,
    pub spread_z: f32,
    pub base_fall_speed: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            policy: SpawnPolicy::Burst {
                rate: BURST_SPAWN_RATE,
            },
            threshold: BURST_SPAWN_THRESHOLD,
            altitude: SPAWN_ALTITUDE,
            spread_x: SPAWN_SPREAD_X,
            spread_z: SPAWN_SPREAD_Z,
            base_fall_speed: BASE_FALL_SPEED,
        }
    }
}

/// Floating body collision and animation parameters.
///
/// - `axis`: horizontal (x, z) position of the vertical collision axis
/// - `radius`: planar collision radius around `axis`
/// - `band_half_height`: particles collide only within center +/- this height
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyConfig {
    pub axis: [f32; 2],
    pub radius: f32,
    pub band_half_height: f32,
    pub bob_amplitude: f32,
    pub bass_lift: f32,
    pub outward_speed: f32,
    pub bounce_speed: f32,
    pub gravity: f32,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            axis: [0.0, 0.0],
            radius: BODY_RADIUS,
            band_half_height: BODY_BAND_HALF_HEIGHT,
            bob_amplitude: BODY_BOB_AMPLITUDE,
            bass_lift: BODY_BASS_LIFT,
            outward_speed: DEFLECT_OUTWARD_SPEED,
            bounce_speed: DEFLECT_BOUNCE_SPEED,
            gravity: DEFLECT_GRAVITY,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    pub idle_ticks: u32,
    pub park_x: f32,
    pub start_x: f32,
    pub end_x: f32,
    pub step: f32,
    pub blade_offset: f32,
    pub window: f32,
    pub nudge: f32,
    pub hop: f32,
    pub fade_per_tick: f32,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            idle_ticks: IDLE_TICKS_BEFORE_SWEEP,
            park_x: SWEEP_PARK_X,
            start_x: SWEEP_START_X,
            end_x: SWEEP_END_X,
            step: SWEEP_STEP,
            blade_offset: SWEEP_BLADE_OFFSET,
            window: SWEEP_WINDOW,
            nudge: SWEEP_NUDGE,
            hop: SWEEP_HOP,
            fade_per_tick: SWEEP_FADE_PER_TICK,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub seed: u64,
    pub floor_y: f32,
    pub world_half_extent: f32,
    pub settle_jitter: f32,
    pub resting_cap: usize,
    pub lifecycle: LifecyclePolicy,
    pub ground_region: Option<RegionConfig>,
    pub spawn: SpawnConfig,
    pub body: BodyConfig,
    pub sweep: SweepConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            floor_y: FLOOR_Y,
            world_half_extent: WORLD_HALF_EXTENT,
            settle_jitter: SETTLE_JITTER,
            resting_cap: RESTING_CAP,
            lifecycle: LifecyclePolicy::Pile,
            ground_region: None,
            spawn: SpawnConfig::default(),
            body: BodyConfig::default(),
            sweep: SweepConfig::default(),
        }
    }
}

impl SimConfig {
    /// Text variant: a ground-level text box, trickle spawning and decaying piles.
    pub fn text_scene() -> Self {
        Self {
            lifecycle: LifecyclePolicy::Decay {
                life_ticks: DECAY_LIFE_TICKS,
                fade_per_tick: DECAY_FADE_PER_TICK,
            },
            ground_region: Some(RegionConfig {
                min: text_box_min(),
                max: text_box_max(),
            }),
            spawn: SpawnConfig {
                policy: SpawnPolicy::Trickle {
                    ambient_chance: AMBIENT_SPAWN_CHANCE,
                },
                threshold: TRICKLE_SPAWN_THRESHOLD,
                ..SpawnConfig::default()
            },
            ..Self::default()
        }
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&text)?;
        log::info!("[config] loaded {}", path.display());
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the tick loop cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("world_half_extent", self.world_half_extent)?;
        non_negative("settle_jitter", self.settle_jitter)?;
        if self.resting_cap == 0 {
            return Err(ConfigError::invalid("resting_cap", "must be at least 1"));
        }

        non_negative("spawn.threshold", self.spawn.threshold)?;
        non_negative("spawn.base_fall_speed", self.spawn.base_fall_speed)?;
        non_negative("spawn.spread_x", self.spawn.spread_x)?;
        non_negative("spawn.spread_z", self.spawn.spread_z)?;
        if self.spawn.altitude <= self.floor_y {
            return Err(ConfigError::invalid(
                "spawn.altitude",
                "must be above the floor",
            ));
        }
        match self.spawn.policy {
            SpawnPolicy::Burst { rate } => non_negative("spawn.policy.rate", rate)?,
            SpawnPolicy::Trickle { ambient_chance } => {
                unit("spawn.policy.ambient_chance", ambient_chance)?
            }
        }

        positive("body.radius", self.body.radius)?;
        positive("body.band_half_height", self.body.band_half_height)?;
        non_negative("body.gravity", self.body.gravity)?;
        non_negative("body.outward_speed", self.body.outward_speed)?;

        if let LifecyclePolicy::Decay { fade_per_tick, .. } = self.lifecycle {
            positive("lifecycle.fade_per_tick", fade_per_tick)?;
        }

        if let Some(region) = &self.ground_region {
            if region.min.cmpgt(region.max).any() {
                return Err(ConfigError::invalid(
                    "ground_region",
                    "min must not exceed max on any axis",
                ));
            }
            // The floor and box tests rely on disjoint height ranges.
            if region.min.y <= self.floor_y {
                return Err(ConfigError::invalid(
                    "ground_region",
                    "box must sit above the floor",
                ));
            }
        }

        positive("sweep.step", self.sweep.step)?;
        positive("sweep.window", self.sweep.window)?;
        positive("sweep.fade_per_tick", self.sweep.fade_per_tick)?;
        if self.sweep.end_x <= self.sweep.start_x {
            return Err(ConfigError::invalid(
                "sweep.end_x",
                "track must end after it starts",
            ));
        }
        if self.sweep.idle_ticks == 0 {
            log::warn!("[config] sweep.idle_ticks is 0; the cleaner will run on every quiet tick");
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("expected > 0, got {value}")))
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("expected >= 0, got {value}")))
    }
}

fn unit(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("expected 0..=1, got {value}")))
    }
}
