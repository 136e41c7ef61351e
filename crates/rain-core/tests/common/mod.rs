#![allow(dead_code)]

use glam::Vec3;
use rain_core::{
    FloatingBody, Glyph, Obstacles, Particle, ParticleId, SimConfig,
};

pub fn drop_at(id: u64, position: Vec3, fall_speed: f32) -> Particle {
    Particle::falling(ParticleId(id), position, fall_speed, Glyph(0), 2.0)
}

/// A particle already lying on the floor at `x`.
pub fn resting_at(id: u64, x: f32, config: &SimConfig) -> Particle {
    let mut p = drop_at(id, Vec3::new(x, config.floor_y, 0.0), 0.0);
    p.state = rain_core::Lifecycle::Resting;
    p.tint = rain_core::Tint::Settled;
    p.velocity = Vec3::ZERO;
    p
}

/// Obstacles with the body resting at height 0 (no animation applied).
pub fn still_obstacles(config: &SimConfig) -> Obstacles {
    Obstacles {
        body: FloatingBody::new(&config.body),
        ground: config.ground_region.map(Into::into),
    }
}
