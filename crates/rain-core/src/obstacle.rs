use glam::{Vec2, Vec3};

use crate::config::{BodyConfig, RegionConfig};
use crate::constants::*;

/// The floating laptop, reduced to a vertical collision cylinder.
///
/// Collision only looks at the planar distance to the vertical axis through
/// `axis`; `rotation_y` is pose for the renderer and never affects tests.
#[derive(Clone, Debug, PartialEq)]
pub struct FloatingBody {
    pub axis: Vec2,
    pub center_y: f32,
    pub radius: f32,
    pub band_half_height: f32,
    pub rotation_y: f32,
    bob_amplitude: f32,
    bass_lift: f32,
}

impl FloatingBody {
    pub fn new(config: &BodyConfig) -> Self {
        Self {
            axis: Vec2::from(config.axis),
            center_y: 0.0,
            radius: config.radius,
            band_half_height: config.band_half_height,
            rotation_y: 0.0,
            bob_amplitude: config.bob_amplitude,
            bass_lift: config.bass_lift,
        }
    }

    /// Advance the bobbing animation: `sin(t * 0.002) * amp + bass * lift`.
    pub fn animate(&mut self, elapsed_ms: f64, bass: f32) {
        let phase = (elapsed_ms * BODY_BOB_RATE_PER_MS).sin() as f32;
        self.center_y = phase * self.bob_amplitude + bass * self.bass_lift;
        self.rotation_y = (self.rotation_y + BODY_SPIN_PER_TICK) % std::f32::consts::TAU;
    }

    pub fn band_top(&self) -> f32 {
        self.center_y + self.band_half_height
    }

    /// Strictly inside the collision band around the current height.
    pub fn in_band(&self, y: f32) -> bool {
        y < self.center_y + self.band_half_height && y > self.center_y - self.band_half_height
    }

    pub fn horizontal_distance(&self, p: Vec3) -> f32 {
        (Vec2::new(p.x, p.z) - self.axis).length()
    }

    pub fn hits(&self, p: Vec3) -> bool {
        self.in_band(p.y) && self.horizontal_distance(p) < self.radius
    }

    /// Unit planar direction from the axis to `p`. A point on the axis maps to +X.
    pub fn outward(&self, p: Vec3) -> Vec2 {
        (Vec2::new(p.x, p.z) - self.axis).try_normalize().unwrap_or(Vec2::X)
    }

    pub fn center(&self) -> Vec3 {
        Vec3::new(self.axis.x, self.center_y, self.axis.y)
    }
}

/// Coarse box around the ground-level text. Bounds are inclusive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroundRegion {
    pub min: Vec3,
    pub max: Vec3,
}

impl GroundRegion {
    pub fn contains(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }
}

impl From<RegionConfig> for GroundRegion {
    fn from(c: RegionConfig) -> Self {
        Self {
            min: c.min,
            max: c.max,
        }
    }
}

/// Everything the engine collides against this tick.
#[derive(Clone, Debug)]
pub struct Obstacles {
    pub body: FloatingBody,
    pub ground: Option<GroundRegion>,
}
