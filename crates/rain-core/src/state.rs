//! Read-only views handed to presentation adapters.
//!
//! These types avoid any platform API. A renderer either walks a
//! [`SceneSnapshot`] or uploads [`ParticleInstance`] records directly, and
//! keeps its own sprite table in sync from each tick's [`TickReport`].

use glam::Vec3;

use crate::obstacle::GroundRegion;
use crate::particle::{Glyph, Lifecycle, Particle, ParticleId, Tint};
use crate::spawner::SpawnedIds;
use crate::sweep::{SweepAgent, SweepPhase};

/// Entity changes produced by one tick.
///
/// `removed` covers every way a particle leaves: swept away, faded out under
/// the decay policy, evicted by the resting cap, or escaped the world.
#[derive(Clone, Debug, Default)]
pub struct TickReport {
    pub tick: u64,
    pub spawned: SpawnedIds,
    pub removed: Vec<ParticleId>,
    pub deflected: usize,
    pub settled: usize,
    pub sweep_started: bool,
    pub sweep_finished: bool,
    pub sweep_cancelled: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleView {
    pub id: ParticleId,
    pub position: Vec3,
    pub glyph: Glyph,
    pub size: f32,
    pub state: Lifecycle,
    pub tint: Tint,
    pub impact: f32,
    pub intensity: f32,
}

impl From<&Particle> for ParticleView {
    fn from(p: &Particle) -> Self {
        Self {
            id: p.id,
            position: p.position,
            glyph: p.glyph,
            size: p.size,
            state: p.state,
            tint: p.tint,
            impact: p.impact,
            intensity: p.intensity,
        }
    }
}

impl ParticleView {
    /// Tint color blended toward the impact flash by the remaining glow.
    pub fn rgba(&self) -> [f32; 4] {
        let base = match self.tint {
            Tint::Impact => Tint::Default.rgb(),
            other => other.rgb(),
        };
        let flash = Tint::Impact.rgb();
        let k = self.impact.clamp(0.0, 1.0);
        [
            base[0] + (flash[0] - base[0]) * k,
            base[1] + (flash[1] - base[1]) * k,
            base[2] + (flash[2] - base[2]) * k,
            self.intensity,
        ]
    }
}

/// Animated pose and colors of the floating body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyPose {
    pub center: Vec3,
    pub rotation_y: f32,
    pub radius: f32,
    pub glow_rgb: [f32; 3],
    pub screen_rgb: [f32; 3],
}

#[derive(Clone, Debug)]
pub struct SceneSnapshot {
    pub tick: u64,
    pub particles: Vec<ParticleView>,
    pub live_count: usize,
    pub resting_count: usize,
    pub body: BodyPose,
    pub ground: Option<GroundRegion>,
    pub agent: SweepAgent,
    pub sweep_phase: SweepPhase,
    pub idle_ticks: u32,
}

/// GPU instance record, one per particle.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleInstance {
    pub pos: [f32; 3],
    pub size: f32,
    pub color: [f32; 4],
    pub glyph: u32,
    pub _pad: [u32; 3],
}

impl SceneSnapshot {
    pub fn instances(&self) -> Vec<ParticleInstance> {
        self.particles
            .iter()
            .map(|p| ParticleInstance {
                pos: p.position.to_array(),
                size: p.size,
                color: p.rgba(),
                glyph: p.glyph.0 as u32,
                _pad: [0; 3],
            })
            .collect()
    }
}
