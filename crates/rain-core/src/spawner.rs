use glam::Vec3;
use rand::Rng;
use smallvec::SmallVec;

use crate::config::{SpawnConfig, SpawnPolicy};
use crate::constants::*;
use crate::particle::{Glyph, Particle, ParticleId};
use crate::registry::Registry;

/// Ids created during one tick; rarely more than a handful.
pub type SpawnedIds = SmallVec<[ParticleId; 8]>;

/// Whether this volume counts as sound (spawns and resets the idle timer).
#[inline]
pub fn is_loud(volume: f32, config: &SpawnConfig) -> bool {
    volume > config.threshold
}

/// Number of reactive and ambient drops for this tick. Reactive drops never
/// exceed `MAX_BURST_DROPS`.
pub fn spawn_counts<R: Rng + ?Sized>(volume: f32, config: &SpawnConfig, rng: &mut R) -> (usize, usize) {
    let loud = is_loud(volume, config);
    match config.policy {
        SpawnPolicy::Burst { rate } => {
            let reactive = if loud {
                ((volume * rate).floor() as usize)
                    .saturating_add(1)
                    .min(MAX_BURST_DROPS)
            } else {
                0
            };
            (reactive, 0)
        }
        SpawnPolicy::Trickle { ambient_chance } => {
            let ambient = rng.gen::<f32>() < ambient_chance;
            (loud as usize, ambient as usize)
        }
    }
}

/// Build a falling drop: random spot in the spawn rectangle, random glyph,
/// fall speed `base + volume`.
pub fn make_drop<R: Rng + ?Sized>(
    id: ParticleId,
    volume: f32,
    config: &SpawnConfig,
    rng: &mut R,
) -> Particle {
    let position = Vec3::new(
        (rng.gen::<f32>() - 0.5) * config.spread_x,
        config.altitude,
        (rng.gen::<f32>() - 0.5) * config.spread_z,
    );
    let glyph = Glyph(rng.gen_range(0..GLYPH_ALPHABET.len()) as u8);
    let size = GLYPH_SIZE_MIN + rng.gen::<f32>() * GLYPH_SIZE_SPAN;
    Particle::falling(id, position, config.base_fall_speed + volume, glyph, size)
}

/// Spawn this tick's drops into the live partition. `volume` must already be
/// sanitized. New ids are appended to `out`.
pub fn spawn<R: Rng + ?Sized>(
    volume: f32,
    config: &SpawnConfig,
    registry: &mut Registry,
    rng: &mut R,
    out: &mut SpawnedIds,
) -> usize {
    let (reactive, ambient) = spawn_counts(volume, config, rng);
    for _ in 0..reactive {
        let id = registry.allocate_id();
        registry.insert_live(make_drop(id, volume, config, rng));
        out.push(id);
    }
    // Ambient drops ignore the audio entirely.
    for _ in 0..ambient {
        let id = registry.allocate_id();
        registry.insert_live(make_drop(id, 0.0, config, rng));
        out.push(id);
    }
    reactive + ambient
}
